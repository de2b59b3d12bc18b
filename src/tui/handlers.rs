use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub struct KeyHandler;

impl KeyHandler {
    pub fn handle_catalog_key(key_event: KeyEvent) -> CatalogAction {
        match key_event.code {
            KeyCode::Char('q') => CatalogAction::Quit,
            KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                CatalogAction::Quit
            }
            KeyCode::Up | KeyCode::Char('k') => CatalogAction::MoveSelectionUp,
            KeyCode::Down | KeyCode::Char('j') => CatalogAction::MoveSelectionDown,
            KeyCode::Enter => CatalogAction::OpenDetail,
            KeyCode::Tab | KeyCode::Char(']') => CatalogAction::NextCategory,
            KeyCode::BackTab | KeyCode::Char('[') => CatalogAction::PreviousCategory,
            // 1-9 then 0 for the tenth tag
            KeyCode::Char(c @ '1'..='9') => {
                CatalogAction::ToggleHealthTag(c as usize - '1' as usize)
            }
            KeyCode::Char('0') => CatalogAction::ToggleHealthTag(9),
            KeyCode::Char('x') => CatalogAction::ClearFilters,
            KeyCode::Char('/') => CatalogAction::EnterSearchMode,
            KeyCode::Char('b') => CatalogAction::OpenBasket,
            KeyCode::Char('?') => CatalogAction::ToggleHelpMode,
            _ => CatalogAction::None,
        }
    }

    pub fn handle_detail_key(key_event: KeyEvent) -> DetailAction {
        match key_event.code {
            KeyCode::Esc | KeyCode::Char('q') => DetailAction::Close,
            KeyCode::Up | KeyCode::Char('k') => DetailAction::MoveSelectionUp,
            KeyCode::Down | KeyCode::Char('j') => DetailAction::MoveSelectionDown,
            KeyCode::Char(' ') => DetailAction::ToggleIngredient,
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => {
                DetailAction::IncreaseQuantity
            }
            KeyCode::Char('-') | KeyCode::Left => DetailAction::DecreaseQuantity,
            KeyCode::Enter => DetailAction::AddToBasket,
            _ => DetailAction::None,
        }
    }

    pub fn handle_basket_key(key_event: KeyEvent) -> BasketAction {
        match key_event.code {
            KeyCode::Esc | KeyCode::Char('q') => BasketAction::Close,
            KeyCode::Up | KeyCode::Char('k') => BasketAction::MoveSelectionUp,
            KeyCode::Down | KeyCode::Char('j') => BasketAction::MoveSelectionDown,
            KeyCode::Char('d') | KeyCode::Delete => BasketAction::RemoveOrder,
            KeyCode::Char('c') | KeyCode::Enter => BasketAction::Checkout,
            _ => BasketAction::None,
        }
    }

    pub fn handle_checkout_key(key_event: KeyEvent) -> CheckoutAction {
        match key_event.code {
            KeyCode::Esc | KeyCode::Char('q') => CheckoutAction::Back,
            KeyCode::Left | KeyCode::Char('h') => CheckoutAction::PreviousPaymentMethod,
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => CheckoutAction::NextPaymentMethod,
            KeyCode::Enter => CheckoutAction::Pay,
            _ => CheckoutAction::None,
        }
    }

    pub fn handle_confirmation_key(key_event: KeyEvent) -> ConfirmationAction {
        match key_event.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q') => ConfirmationAction::Done,
            _ => ConfirmationAction::None,
        }
    }

    pub fn handle_help_mode_key(key_event: KeyEvent) -> HelpModeAction {
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc | KeyCode::Char('?') => {
                HelpModeAction::ExitHelpMode
            }
            _ => HelpModeAction::None,
        }
    }

    pub fn handle_search_mode_key(key_event: KeyEvent) -> SearchModeAction {
        match key_event.code {
            KeyCode::Esc => SearchModeAction::CancelSearch,
            KeyCode::Enter => SearchModeAction::ConfirmSearch,
            KeyCode::Backspace => SearchModeAction::Backspace,
            KeyCode::Char(c) => SearchModeAction::InsertChar(c),
            _ => SearchModeAction::None,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum CatalogAction {
    None,
    Quit,
    MoveSelectionUp,
    MoveSelectionDown,
    OpenDetail,
    NextCategory,
    PreviousCategory,
    ToggleHealthTag(usize),
    ClearFilters,
    EnterSearchMode,
    OpenBasket,
    ToggleHelpMode,
}

#[derive(Debug, PartialEq)]
pub enum DetailAction {
    None,
    Close,
    MoveSelectionUp,
    MoveSelectionDown,
    ToggleIngredient,
    IncreaseQuantity,
    DecreaseQuantity,
    AddToBasket,
}

#[derive(Debug, PartialEq)]
pub enum BasketAction {
    None,
    Close,
    MoveSelectionUp,
    MoveSelectionDown,
    RemoveOrder,
    Checkout,
}

#[derive(Debug, PartialEq)]
pub enum CheckoutAction {
    None,
    Back,
    NextPaymentMethod,
    PreviousPaymentMethod,
    Pay,
}

#[derive(Debug, PartialEq)]
pub enum ConfirmationAction {
    None,
    Done,
}

#[derive(Debug, PartialEq)]
pub enum HelpModeAction {
    None,
    ExitHelpMode,
}

#[derive(Debug, PartialEq)]
pub enum SearchModeAction {
    None,
    CancelSearch,
    ConfirmSearch,
    Backspace,
    InsertChar(char),
}
