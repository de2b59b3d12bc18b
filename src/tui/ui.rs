use crate::menu::models::{FoodCategory, HealthTag};
use crate::order::checkout::PaymentMethod;
use crate::tui::app::{App, Screen};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(3), // Footer
        ])
        .split(frame.size());

    draw_header(frame, chunks[0], app);
    match app.screen {
        Screen::Catalog => draw_catalog(frame, chunks[1], app),
        Screen::Detail(_) => draw_detail(frame, chunks[1], app),
        Screen::Basket => draw_basket(frame, chunks[1], app),
        Screen::Checkout => draw_checkout(frame, chunks[1], app),
        Screen::Confirmation(_) => draw_confirmation(frame, chunks[1], app),
    }
    draw_footer(frame, chunks[2], app);

    if app.help_mode {
        draw_help_window(frame);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let title = match app.screen {
        Screen::Catalog => "Yemekler",
        Screen::Detail(_) => "Ürün Detayı",
        Screen::Basket => "Sepet",
        Screen::Checkout => "Ödeme",
        Screen::Confirmation(_) => "Sipariş",
    };
    let mut header_text = format!("{} | Sepet ({})", title, app.basket.count());
    if let Some(latest) = app.app_state().snapshot().latest_summary() {
        header_text.push_str(&format!(" | Son kısayol: {}", latest));
    }
    let header = Paragraph::new(header_text)
        .block(Block::default().borders(Borders::ALL).title("Food Order"))
        .style(Style::default().fg(Color::Cyan));

    frame.render_widget(header, area);
}

fn chip(label: String, selected: bool) -> Span<'static> {
    let style = if selected {
        Style::default()
            .bg(Color::Yellow)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    Span::styled(format!(" {} ", label), style)
}

fn draw_catalog(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Categories
            Constraint::Length(3), // Health tags
            Constraint::Length(3), // Search
            Constraint::Min(0),    // Items
        ])
        .split(area);

    let mut categories = vec![chip("Tümü".to_string(), app.filter.category.is_none())];
    categories.extend(FoodCategory::ALL.iter().map(|category| {
        let selected = app.filter.category == Some(*category);
        chip(category.display_name().to_string(), selected)
    }));
    let category_bar = Paragraph::new(Line::from(categories))
        .block(Block::default().borders(Borders::ALL).title("Kategori [ ]"));
    frame.render_widget(category_bar, chunks[0]);

    let tags: Vec<Span> = HealthTag::ALL
        .iter()
        .enumerate()
        .map(|(i, tag)| {
            let key = (i + 1) % 10;
            let selected = app.filter.health_tags.contains(tag);
            chip(format!("{}:{}", key, tag.display_name()), selected)
        })
        .collect();
    let tag_bar = Paragraph::new(Line::from(tags))
        .block(Block::default().borders(Borders::ALL).title("Sağlık Etiketleri 1-0"));
    frame.render_widget(tag_bar, chunks[1]);

    let search_text = if app.search.search_mode {
        format!("{}█", app.filter.search_text)
    } else if app.filter.search_text.is_empty() {
        "Yemek veya açıklama ara (/)".to_string()
    } else {
        app.filter.search_text.clone()
    };
    let search_style = if app.search.search_mode {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let search = Paragraph::new(search_text)
        .style(search_style)
        .block(Block::default().borders(Borders::ALL).title("Ara"));
    frame.render_widget(search, chunks[2]);

    let items: Vec<ListItem> = app
        .visible_items()
        .iter()
        .map(|item| {
            let tags: Vec<&str> = item.health_tags.iter().map(|t| t.display_name()).collect();
            let bold = Style::default().add_modifier(Modifier::BOLD);
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(item.name.clone(), bold),
                    Span::raw(format!("  {}", item.price)),
                    Span::styled(
                        format!("  {} kcal", item.calories),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]),
                Line::from(Span::styled(
                    item.description.clone(),
                    Style::default().fg(Color::Gray),
                )),
                Line::from(Span::styled(
                    format!("[{}] {}", item.category.display_name(), tags.join(" · ")),
                    Style::default().fg(Color::Green),
                )),
            ])
        })
        .collect();

    let title = if app.filter.is_empty() {
        format!("Ürünler ({})", items.len())
    } else {
        let total = app.catalog.items().len();
        format!("Ürünler ({}/{}, filtreli, x: temizle)", items.len(), total)
    };
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(
            Style::default()
                .bg(Color::Yellow)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        );

    let mut list_state = ListState::default();
    list_state.select(Some(app.catalog_nav.selected_index));

    frame.render_stateful_widget(list, chunks[3], &mut list_state);
}

fn draw_detail(frame: &mut Frame, area: Rect, app: &App) {
    let Some((detail, item)) = app.detail_item() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(8)])
        .split(area);

    let mut lines = vec![
        Line::from(Span::styled(item.name.clone(), Style::default().add_modifier(Modifier::BOLD))),
        Line::from(format!("{} · {} kcal", item.price, item.calories)),
        Line::from(""),
        Line::from(item.description.clone()),
        Line::from(item.detail.clone()),
    ];
    if !item.options.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(format!("Seçenekler: {}", item.options.join(", "))));
    }
    let info = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Detay"))
        .wrap(Wrap { trim: true });
    frame.render_widget(info, chunks[0]);

    let ingredients: Vec<ListItem> = item
        .ingredients
        .iter()
        .map(|ingredient| {
            let checkbox = if detail.is_selected(ingredient) { "☑" } else { "☐" };
            let optional = if ingredient.is_optional { " (isteğe bağlı)" } else { "" };
            ListItem::new(format!("{} {}{}", checkbox, ingredient.label(), optional))
        })
        .collect();
    let list = List::new(ingredients)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("İçindekiler | Adet: {}", detail.quantity)),
        )
        .highlight_style(Style::default().bg(Color::Blue).fg(Color::White));

    let mut list_state = ListState::default();
    list_state.select(Some(detail.ingredient_cursor));
    frame.render_stateful_widget(list, chunks[1], &mut list_state);
}

fn draw_basket(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    let items: Vec<ListItem> = app
        .basket
        .orders()
        .iter()
        .map(|order| {
            let bold = Style::default().add_modifier(Modifier::BOLD);
            let mut lines = vec![Line::from(vec![
                Span::styled(order.item.name.clone(), bold),
                Span::raw(format!("  x{}", order.quantity)),
            ])];
            if !order.item.options.is_empty() {
                lines.push(Line::from(Span::styled(
                    order.item.options.join(", "),
                    Style::default().fg(Color::Gray),
                )));
            }
            if !order.selected_ingredients.is_empty() {
                let names: Vec<&str> = order
                    .selected_ingredients
                    .iter()
                    .map(|i| i.name.as_str())
                    .collect();
                lines.push(Line::from(Span::styled(
                    format!("İçindekiler: {}", names.join(", ")),
                    Style::default().fg(Color::Gray),
                )));
            }
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Sepet"))
        .highlight_style(
            Style::default()
                .bg(Color::Yellow)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        );
    let mut list_state = ListState::default();
    if !app.basket.is_empty() {
        list_state.select(Some(app.basket_nav.selected_index));
    }
    frame.render_stateful_widget(list, chunks[0], &mut list_state);

    let summary = app.checkout.summary(&app.basket);
    let totals = Paragraph::new(format!(
        "Sepet sayısı: {} | Tutar: {}",
        summary.item_count, summary.total
    ))
    .block(Block::default().borders(Borders::ALL))
    .style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(totals, chunks[1]);
}

fn draw_checkout(frame: &mut Frame, area: Rect, app: &App) {
    let summary = app.checkout.summary(&app.basket);

    let methods: Vec<Span> = PaymentMethod::ALL
        .iter()
        .map(|method| {
            let selected = *method == app.checkout.payment_method;
            chip(method.display_name().to_string(), selected)
        })
        .collect();

    let mut lines = vec![
        Line::from(Span::styled("Sipariş Özetin", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(format!("Sepet Sayısı: {}", summary.item_count)),
        Line::from(format!("Toplam Tutar: {}", summary.total)),
        Line::from(""),
        Line::from(Span::styled("Ödeme Yöntemi", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(methods),
        Line::from(""),
        Line::from(Span::styled("Teslimat Adresi", Style::default().add_modifier(Modifier::BOLD))),
    ];
    lines.extend(
        crate::order::checkout::DELIVERY_ADDRESS
            .lines()
            .map(|line| Line::from(line.to_string())),
    );
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter: Öde",
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    )));

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Ödeme"))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn draw_confirmation(frame: &mut Frame, area: Rect, app: &App) {
    let Screen::Confirmation(receipt) = &app.screen else {
        return;
    };

    let text = vec![
        Line::from(Span::styled(
            "✔ Ödeme Başarılı!",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!(
            "{} ürün · {} · {}",
            receipt.summary.item_count,
            receipt.summary.total,
            receipt.payment_method.display_name()
        )),
        Line::from(""),
        Line::from("Enter: Tamam"),
    ];
    let popup = centered_rect(60, 40, area);
    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Sipariş"))
        .wrap(Wrap { trim: true });
    frame.render_widget(Clear, popup);
    frame.render_widget(paragraph, popup);
}

fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    let footer_text = if let Some(status) = &app.status {
        status.clone()
    } else if app.search.search_mode {
        "SEARCH | Enter: confirm | Esc: cancel".to_string()
    } else {
        let hint = match app.screen {
            Screen::Catalog => {
                "↑↓ move | Enter details | Tab category | 1-0 tags | / search | b basket | ? help"
            }
            Screen::Detail(_) => {
                "Space: toggle ingredient | +/-: quantity | Enter: add to basket | Esc: close"
            }
            Screen::Basket => "d: remove | c: checkout | Esc: close",
            Screen::Checkout => "←→: payment method | Enter: pay | Esc: back",
            Screen::Confirmation(_) => "Enter: done",
        };
        hint.to_string()
    };

    let footer = Paragraph::new(footer_text)
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Yellow));

    frame.render_widget(footer, area);
}

fn draw_help_window(frame: &mut Frame) {
    let help_text = vec![
        "Food Order - Keyboard Commands",
        "",
        "CATALOG:",
        "  ↑↓ / j/k          Navigate up/down",
        "  Enter             Open item details",
        "  Tab / ]           Next category",
        "  Shift+Tab / [     Previous category",
        "  1-9, 0            Toggle health tag",
        "  /                 Search name or description",
        "  x                 Clear all filters",
        "  b                 Open basket",
        "",
        "DETAILS:",
        "  Space             Toggle ingredient",
        "  + / -             Change quantity (1-10)",
        "  Enter             Add to basket",
        "",
        "BASKET:",
        "  d                 Remove line",
        "  c                 Checkout",
        "",
        "SHORTCUTS (from another terminal):",
        "  foodorder shortcut open-basket",
        "  foodorder shortcut filter-health-tag vegan",
        "  foodorder shortcut filter-category dessert",
        "",
        "Press ? or Esc to close this help window",
    ];

    let help_paragraph = Paragraph::new(help_text.join("\n"))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help - Keyboard Commands ")
                .style(Style::default().fg(Color::Yellow)),
        )
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: false });

    let area = centered_rect(80, 80, frame.size());

    frame.render_widget(Clear, area);
    frame.render_widget(help_paragraph, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
