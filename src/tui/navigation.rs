pub struct NavigationState {
    pub selected_index: usize,
    pub scroll_offset: usize,
}

impl NavigationState {
    pub fn new() -> Self {
        Self {
            selected_index: 0,
            scroll_offset: 0,
        }
    }

    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            self.update_scroll();
        }
    }

    pub fn move_selection_down(&mut self, max_items: usize) {
        if self.selected_index < max_items.saturating_sub(1) {
            self.selected_index += 1;
            self.update_scroll();
        }
    }

    pub fn update_scroll(&mut self) {
        // Keep the selected row visible
        const VISIBLE_ITEMS: usize = 20;

        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        } else if self.selected_index >= self.scroll_offset + VISIBLE_ITEMS {
            self.scroll_offset = self.selected_index.saturating_sub(VISIBLE_ITEMS - 1);
        }
    }

    /// Pulls the cursor back inside a list that shrank.
    pub fn clamp(&mut self, max_items: usize) {
        if self.selected_index >= max_items {
            self.selected_index = max_items.saturating_sub(1);
            self.update_scroll();
        }
    }

    pub fn reset(&mut self) {
        self.selected_index = 0;
        self.scroll_offset = 0;
    }
}
