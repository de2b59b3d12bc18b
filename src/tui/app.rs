use crate::menu::catalog::Catalog;
use crate::menu::filter::{FilterSelection, filter_items};
use crate::menu::models::{HealthTag, Ingredient, MenuItem};
use crate::order::basket::Basket;
use crate::order::checkout::{Checkout, PricingMode, Receipt};
use crate::shortcut::bridge::ShortcutBridge;
use crate::tui::handlers::{
    BasketAction, CatalogAction, CheckoutAction, ConfirmationAction, DetailAction, HelpModeAction,
    KeyHandler, SearchModeAction,
};
use crate::tui::navigation::NavigationState;
use crate::tui::search::SearchState;
use crate::tui::state::{ActionEvent, AppState, ExternalAction};
use anyhow::Result;
use crossterm::event::KeyEvent;
use std::sync::Arc;
use std::sync::mpsc::Receiver;
use uuid::Uuid;

pub const MAX_QUANTITY: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailState {
    pub item_id: Uuid,
    pub ingredient_cursor: usize,
    /// In the order the user picked them.
    pub selected_ingredients: Vec<Ingredient>,
    pub quantity: u32,
}

impl DetailState {
    fn new(item_id: Uuid) -> Self {
        Self {
            item_id,
            ingredient_cursor: 0,
            selected_ingredients: Vec::new(),
            quantity: 1,
        }
    }

    pub fn is_selected(&self, ingredient: &Ingredient) -> bool {
        self.selected_ingredients.iter().any(|i| i.id == ingredient.id)
    }

    fn toggle(&mut self, ingredient: &Ingredient) {
        if self.is_selected(ingredient) {
            self.selected_ingredients.retain(|i| i.id != ingredient.id);
        } else {
            self.selected_ingredients.push(ingredient.clone());
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Catalog,
    Detail(DetailState),
    Basket,
    Checkout,
    Confirmation(Receipt),
}

pub struct App {
    pub catalog: Catalog,
    pub basket: Basket,
    pub checkout: Checkout,
    pub filter: FilterSelection,
    pub search: SearchState,
    pub catalog_nav: NavigationState,
    pub basket_nav: NavigationState,
    pub screen: Screen,
    pub help_mode: bool,
    pub should_quit: bool,
    pub status: Option<String>,
    app_state: Arc<AppState>,
    events: Receiver<ActionEvent>,
}

impl App {
    pub fn new(catalog: Catalog, pricing: PricingMode) -> Self {
        Self::with_bridge(catalog, pricing, ShortcutBridge::shared())
    }

    pub fn with_bridge(catalog: Catalog, pricing: PricingMode, bridge: &ShortcutBridge) -> Self {
        let app_state = Arc::new(AppState::new());
        let events = app_state.subscribe();

        let app = Self {
            catalog,
            basket: Basket::new(),
            checkout: Checkout::new(pricing),
            filter: FilterSelection::new(),
            search: SearchState::new(),
            catalog_nav: NavigationState::new(),
            basket_nav: NavigationState::new(),
            screen: Screen::Catalog,
            help_mode: false,
            should_quit: false,
            status: None,
            app_state,
            events,
        };
        app.attach(bridge);
        app
    }

    /// Makes this app the target of shortcuts arriving through `bridge`.
    pub fn attach(&self, bridge: &ShortcutBridge) {
        bridge.register(&self.app_state);
    }

    pub fn app_state(&self) -> &Arc<AppState> {
        &self.app_state
    }

    pub fn visible_items(&self) -> Vec<&MenuItem> {
        filter_items(self.catalog.items(), &self.filter)
    }

    pub fn selected_item(&self) -> Option<&MenuItem> {
        self.visible_items().get(self.catalog_nav.selected_index).copied()
    }

    pub fn detail_item(&self) -> Option<(&DetailState, &MenuItem)> {
        match &self.screen {
            Screen::Detail(detail) => self.catalog.find(detail.item_id).map(|item| (detail, item)),
            _ => None,
        }
    }

    /// Applies every external action received since the last call, each one
    /// exactly once. Returns how many were handled.
    pub fn sync_external_actions(&mut self) -> usize {
        let events: Vec<ActionEvent> = self.events.try_iter().collect();
        for event in &events {
            tracing::debug!(
                seq = event.seq,
                action = event.action.kind().as_str(),
                "reacting to external action"
            );
            self.react(&event.action);
        }
        events.len()
    }

    fn react(&mut self, action: &ExternalAction) {
        match action {
            ExternalAction::OpenBasket => self.open_basket(),
            ExternalAction::FilterByHealthTag(tags) => {
                let applied = self.filter.apply_health_tags(tags);
                if applied < tags.len() {
                    tracing::info!(
                        requested = tags.len(),
                        applied,
                        "some health tags were not recognised"
                    );
                }
                self.catalog_nav.reset();
                self.status = Some(format!("Sağlık etiketi filtresi: {} etiket", applied));
            }
            ExternalAction::FilterByCategory(category) => {
                self.filter.apply_category(category);
                self.catalog_nav.reset();
                self.status = Some(match self.filter.category {
                    Some(category) => format!("Kategori: {}", category.display_name()),
                    None => "Kategori: Tümü".to_string(),
                });
            }
        }
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> Result<()> {
        if self.help_mode {
            self.handle_help_mode_key(key_event);
        } else if self.search.search_mode {
            self.handle_search_mode_key(key_event);
        } else {
            match self.screen {
                Screen::Catalog => self.handle_catalog_key(key_event),
                Screen::Detail(_) => self.handle_detail_key(key_event),
                Screen::Basket => self.handle_basket_key(key_event),
                Screen::Checkout => self.handle_checkout_key(key_event),
                Screen::Confirmation(_) => self.handle_confirmation_key(key_event),
            }
        }
        Ok(())
    }

    fn handle_help_mode_key(&mut self, key_event: KeyEvent) {
        if KeyHandler::handle_help_mode_key(key_event) == HelpModeAction::ExitHelpMode {
            self.help_mode = false;
        }
    }

    fn handle_search_mode_key(&mut self, key_event: KeyEvent) {
        match KeyHandler::handle_search_mode_key(key_event) {
            SearchModeAction::CancelSearch => self.search.cancel_search(&mut self.filter),
            SearchModeAction::ConfirmSearch => self.search.confirm_search(),
            SearchModeAction::Backspace => self.search.backspace(&mut self.filter),
            SearchModeAction::InsertChar(c) => self.search.insert_char(c, &mut self.filter),
            SearchModeAction::None => {}
        }
        let count = self.visible_items().len();
        self.catalog_nav.clamp(count);
    }

    fn handle_catalog_key(&mut self, key_event: KeyEvent) {
        self.status = None;
        match KeyHandler::handle_catalog_key(key_event) {
            CatalogAction::Quit => self.should_quit = true,
            CatalogAction::MoveSelectionUp => self.catalog_nav.move_selection_up(),
            CatalogAction::MoveSelectionDown => {
                let count = self.visible_items().len();
                self.catalog_nav.move_selection_down(count);
            }
            CatalogAction::OpenDetail => {
                if let Some(item_id) = self.selected_item().map(|item| item.id) {
                    self.screen = Screen::Detail(DetailState::new(item_id));
                }
            }
            CatalogAction::NextCategory => {
                self.filter.next_category();
                self.catalog_nav.reset();
            }
            CatalogAction::PreviousCategory => {
                self.filter.previous_category();
                self.catalog_nav.reset();
            }
            CatalogAction::ToggleHealthTag(index) => {
                if let Some(tag) = HealthTag::ALL.get(index) {
                    self.filter.toggle_health_tag(*tag);
                    let count = self.visible_items().len();
                    self.catalog_nav.clamp(count);
                }
            }
            CatalogAction::ClearFilters => {
                self.filter.clear();
                self.catalog_nav.reset();
            }
            CatalogAction::EnterSearchMode => self.search.enter_search_mode(&self.filter),
            CatalogAction::OpenBasket => self.open_basket(),
            CatalogAction::ToggleHelpMode => self.help_mode = true,
            CatalogAction::None => {}
        }
    }

    fn handle_detail_key(&mut self, key_event: KeyEvent) {
        let action = KeyHandler::handle_detail_key(key_event);
        if action == DetailAction::AddToBasket {
            self.add_detail_to_basket();
            return;
        }

        let Screen::Detail(detail) = &mut self.screen else {
            return;
        };
        let Some(item) = self.catalog.find(detail.item_id) else {
            self.screen = Screen::Catalog;
            return;
        };

        match action {
            DetailAction::Close => self.screen = Screen::Catalog,
            DetailAction::MoveSelectionUp => {
                detail.ingredient_cursor = detail.ingredient_cursor.saturating_sub(1);
            }
            DetailAction::MoveSelectionDown => {
                if detail.ingredient_cursor + 1 < item.ingredients.len() {
                    detail.ingredient_cursor += 1;
                }
            }
            DetailAction::ToggleIngredient => {
                if let Some(ingredient) = item.ingredients.get(detail.ingredient_cursor) {
                    detail.toggle(ingredient);
                }
            }
            DetailAction::IncreaseQuantity => {
                detail.quantity = (detail.quantity + 1).min(MAX_QUANTITY)
            }
            DetailAction::DecreaseQuantity => {
                detail.quantity = detail.quantity.saturating_sub(1).max(1)
            }
            DetailAction::AddToBasket | DetailAction::None => {}
        }
    }

    fn add_detail_to_basket(&mut self) {
        if let Screen::Detail(detail) = &self.screen {
            if let Some(item) = self.catalog.find(detail.item_id) {
                self.basket.add(item, detail.selected_ingredients.clone(), detail.quantity);
                self.status = Some(format!("{} x{} sepete eklendi", item.name, detail.quantity));
            }
        }
        self.screen = Screen::Catalog;
    }

    fn handle_basket_key(&mut self, key_event: KeyEvent) {
        match KeyHandler::handle_basket_key(key_event) {
            BasketAction::Close => self.screen = Screen::Catalog,
            BasketAction::MoveSelectionUp => self.basket_nav.move_selection_up(),
            BasketAction::MoveSelectionDown => {
                self.basket_nav.move_selection_down(self.basket.orders().len());
            }
            BasketAction::RemoveOrder => {
                let order_id = self
                    .basket
                    .orders()
                    .get(self.basket_nav.selected_index)
                    .map(|order| order.id);
                if let Some(order_id) = order_id {
                    self.basket.remove(order_id);
                    self.basket_nav.clamp(self.basket.orders().len());
                }
            }
            BasketAction::Checkout => {
                if self.basket.is_empty() {
                    self.status = Some("Sepet boş".to_string());
                } else {
                    self.status = None;
                    self.screen = Screen::Checkout;
                }
            }
            BasketAction::None => {}
        }
    }

    fn handle_checkout_key(&mut self, key_event: KeyEvent) {
        match KeyHandler::handle_checkout_key(key_event) {
            CheckoutAction::Back => self.screen = Screen::Basket,
            CheckoutAction::NextPaymentMethod => {
                self.checkout.payment_method = self.checkout.payment_method.next();
            }
            CheckoutAction::PreviousPaymentMethod => {
                self.checkout.payment_method = self.checkout.payment_method.previous();
            }
            CheckoutAction::Pay => match self.checkout.confirm(&mut self.basket) {
                Ok(receipt) => {
                    self.basket_nav.reset();
                    self.screen = Screen::Confirmation(receipt);
                }
                Err(e) => {
                    self.status = Some(e.to_string());
                    self.screen = Screen::Basket;
                }
            },
            CheckoutAction::None => {}
        }
    }

    fn handle_confirmation_key(&mut self, key_event: KeyEvent) {
        if KeyHandler::handle_confirmation_key(key_event) == ConfirmationAction::Done {
            self.screen = Screen::Catalog;
        }
    }

    fn open_basket(&mut self) {
        self.help_mode = false;
        if self.search.search_mode {
            self.search.confirm_search();
        }
        self.basket_nav.clamp(self.basket.orders().len());
        self.screen = Screen::Basket;
    }
}
