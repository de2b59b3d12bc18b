use crate::menu::filter::FilterSelection;

/// Editing state for the catalog search line. The query itself lives in the
/// filter selection so the list narrows while typing.
pub struct SearchState {
    pub search_mode: bool,
    previous_query: String,
}

impl SearchState {
    pub fn new() -> Self {
        Self {
            search_mode: false,
            previous_query: String::new(),
        }
    }

    pub fn enter_search_mode(&mut self, filter: &FilterSelection) {
        self.search_mode = true;
        self.previous_query = filter.search_text.clone();
    }

    /// Leaves search mode and restores the query from before it was entered.
    pub fn cancel_search(&mut self, filter: &mut FilterSelection) {
        self.search_mode = false;
        filter.search_text = std::mem::take(&mut self.previous_query);
    }

    pub fn confirm_search(&mut self) {
        self.search_mode = false;
        self.previous_query.clear();
    }

    pub fn insert_char(&mut self, c: char, filter: &mut FilterSelection) {
        filter.search_text.push(c);
    }

    pub fn backspace(&mut self, filter: &mut FilterSelection) {
        filter.search_text.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_state_new() {
        let search_state = SearchState::new();
        assert!(!search_state.search_mode);
        assert!(search_state.previous_query.is_empty());
    }

    #[test]
    fn test_typing_updates_filter() {
        let mut search_state = SearchState::new();
        let mut filter = FilterSelection::new();

        search_state.enter_search_mode(&filter);
        search_state.insert_char('s', &mut filter);
        search_state.insert_char('u', &mut filter);
        search_state.insert_char('y', &mut filter);
        assert_eq!(filter.search_text, "suy");

        search_state.backspace(&mut filter);
        assert_eq!(filter.search_text, "su");
    }

    #[test]
    fn test_cancel_search_restores_previous_query() {
        let mut search_state = SearchState::new();
        let mut filter = FilterSelection::new();
        filter.search_text = "çorba".to_string();

        search_state.enter_search_mode(&filter);
        search_state.backspace(&mut filter);
        search_state.insert_char('x', &mut filter);
        search_state.cancel_search(&mut filter);

        assert!(!search_state.search_mode);
        assert_eq!(filter.search_text, "çorba");
    }

    #[test]
    fn test_confirm_search_keeps_query() {
        let mut search_state = SearchState::new();
        let mut filter = FilterSelection::new();

        search_state.enter_search_mode(&filter);
        search_state.insert_char('t', &mut filter);
        search_state.confirm_search();

        assert!(!search_state.search_mode);
        assert_eq!(filter.search_text, "t");
    }

    #[test]
    fn test_backspace_on_empty_query() {
        let mut search_state = SearchState::new();
        let mut filter = FilterSelection::new();
        search_state.enter_search_mode(&filter);
        search_state.backspace(&mut filter);
        assert!(filter.search_text.is_empty());
    }
}
