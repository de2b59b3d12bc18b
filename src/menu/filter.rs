use super::models::{FoodCategory, HealthTag, MenuItem};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    /// `None` means every category.
    pub category: Option<FoodCategory>,
    /// An item matches only if it carries all of these.
    pub health_tags: BTreeSet<HealthTag>,
    pub search_text: String,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.health_tags.is_empty() && self.search_text.is_empty()
    }

    pub fn matches(&self, item: &MenuItem) -> bool {
        let category_match = self.category.is_none_or(|category| item.category == category);
        let health_tag_match = self.health_tags.is_empty() || item.has_all_tags(&self.health_tags);
        let text_match = self.search_text.is_empty() || {
            let query = self.search_text.to_lowercase();
            item.name.to_lowercase().contains(&query)
                || item.description.to_lowercase().contains(&query)
        };

        category_match && health_tag_match && text_match
    }

    /// Replaces the tag selection with every entry that parses; missing and
    /// unknown entries are skipped.
    pub fn apply_health_tags(&mut self, raw: &[Option<String>]) -> usize {
        self.health_tags = raw
            .iter()
            .flatten()
            .filter_map(|key| match key.parse::<HealthTag>() {
                Ok(tag) => Some(tag),
                Err(e) => {
                    tracing::debug!("skipping health tag: {}", e);
                    None
                }
            })
            .collect();
        self.health_tags.len()
    }

    /// An unknown key clears the category filter.
    pub fn apply_category(&mut self, raw: &str) {
        self.category = match raw.parse::<FoodCategory>() {
            Ok(category) => Some(category),
            Err(e) => {
                tracing::debug!("no category filter: {}", e);
                None
            }
        };
    }

    pub fn toggle_health_tag(&mut self, tag: HealthTag) {
        if !self.health_tags.remove(&tag) {
            self.health_tags.insert(tag);
        }
    }

    /// Steps through "all" followed by each category, wrapping around.
    pub fn next_category(&mut self) {
        self.category = match self.category {
            None => Some(FoodCategory::ALL[0]),
            Some(current) => FoodCategory::ALL
                .iter()
                .position(|c| *c == current)
                .and_then(|i| FoodCategory::ALL.get(i + 1).copied()),
        };
    }

    pub fn previous_category(&mut self) {
        let last = FoodCategory::ALL.len() - 1;
        self.category = match self.category {
            None => Some(FoodCategory::ALL[last]),
            Some(current) => match FoodCategory::ALL.iter().position(|c| *c == current) {
                Some(0) | None => None,
                Some(i) => Some(FoodCategory::ALL[i - 1]),
            },
        };
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Items matching `selection`, in catalog order.
pub fn filter_items<'a>(items: &'a [MenuItem], selection: &FilterSelection) -> Vec<&'a MenuItem> {
    items.iter().filter(|item| selection.matches(item)).collect()
}
