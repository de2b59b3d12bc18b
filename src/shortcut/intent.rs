use super::bridge::{Dispatch, ShortcutBridge};
use crate::menu::models::FoodCategory;
use std::fmt;
use url::Url;

pub const OPEN_BASKET: &str = "openBasket";
pub const FILTER_HEALTH_TAG: &str = "filterHealthTag";
pub const FILTER_CATEGORY: &str = "filterCategory";
pub const DEEP_LINK: &str = "url";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ShortcutError {
    #[error("unknown shortcut action '{0}'")]
    UnknownAction(String),
    #[error("missing parameter for '{0}'")]
    MissingParameter(&'static str),
    #[error("unparseable parameter for '{action}': {value}")]
    UnparseableParameter { action: &'static str, value: String },
}

/// A shortcut as it arrives from outside, one per line:
///
/// ```text
/// openBasket
/// filterHealthTag vegan,glutenFree
/// filterCategory dessert
/// url shortcuts://openBasket
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortcutIntent {
    OpenBasket,
    /// Kept raw so that one bad entry doesn't discard the rest.
    FilterByHealthTag(Vec<Option<String>>),
    FilterByCategory(FoodCategory),
    OpenUrl(Url),
}

impl ShortcutIntent {
    pub fn parse(line: &str) -> Result<Self, ShortcutError> {
        let line = line.trim();
        let (action, argument) = match line.split_once(char::is_whitespace) {
            Some((action, rest)) => (action, rest.trim()),
            None => (line, ""),
        };

        match action {
            OPEN_BASKET => Ok(Self::OpenBasket),
            FILTER_HEALTH_TAG => Ok(Self::FilterByHealthTag(split_tags(argument))),
            FILTER_CATEGORY => {
                if argument.is_empty() {
                    return Err(ShortcutError::MissingParameter(FILTER_CATEGORY));
                }
                argument
                    .parse::<FoodCategory>()
                    .map(Self::FilterByCategory)
                    .map_err(|_| ShortcutError::UnparseableParameter {
                        action: FILTER_CATEGORY,
                        value: argument.to_string(),
                    })
            }
            DEEP_LINK => {
                if argument.is_empty() {
                    return Err(ShortcutError::MissingParameter(DEEP_LINK));
                }
                Url::parse(argument)
                    .map(Self::OpenUrl)
                    .map_err(|e| ShortcutError::UnparseableParameter {
                        action: DEEP_LINK,
                        value: format!("{} ({})", argument, e),
                    })
            }
            other => Err(ShortcutError::UnknownAction(other.to_string())),
        }
    }

    /// Only the `openBasket` host is understood.
    pub fn from_url(url: &Url) -> Result<Self, ShortcutError> {
        match url.host_str() {
            Some(OPEN_BASKET) => Ok(Self::OpenBasket),
            _ => Err(ShortcutError::UnknownAction(url.to_string())),
        }
    }

    /// A missing handler is reported through the returned [`Dispatch`], never
    /// as an error.
    pub fn dispatch(self, bridge: &ShortcutBridge) -> Dispatch {
        match self {
            Self::OpenBasket => bridge.trigger_open_basket(),
            Self::FilterByHealthTag(tags) => bridge.trigger_filter_by_health_tag(tags),
            Self::FilterByCategory(category) => {
                bridge.trigger_filter_by_category(category.key().to_string())
            }
            Self::OpenUrl(url) => bridge.open_url(&url),
        }
    }
}

impl fmt::Display for ShortcutIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenBasket => write!(f, "{}", OPEN_BASKET),
            Self::FilterByHealthTag(tags) => {
                let tags: Vec<&str> = tags.iter().map(|t| t.as_deref().unwrap_or("")).collect();
                write!(f, "{} {}", FILTER_HEALTH_TAG, tags.join(","))
            }
            Self::FilterByCategory(category) => {
                write!(f, "{} {}", FILTER_CATEGORY, category.key())
            }
            Self::OpenUrl(url) => write!(f, "{} {}", DEEP_LINK, url),
        }
    }
}

fn split_tags(argument: &str) -> Vec<Option<String>> {
    if argument.is_empty() {
        return Vec::new();
    }
    argument
        .split([',', ' '])
        .map(str::trim)
        .map(|tag| (!tag.is_empty()).then(|| tag.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shortcut::bridge::ShortcutHandler;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct LastCall(Mutex<Option<String>>);

    impl ShortcutHandler for LastCall {
        fn trigger_open_basket(&self) {
            *self.0.lock().unwrap() = Some("openBasket".to_string());
        }
        fn trigger_filter_by_health_tag(&self, tags: Vec<Option<String>>) {
            *self.0.lock().unwrap() = Some(format!("{:?}", tags));
        }
        fn trigger_filter_by_category(&self, category: String) {
            *self.0.lock().unwrap() = Some(category);
        }
    }

    #[test]
    fn test_parse_open_basket() {
        assert_eq!(ShortcutIntent::parse("openBasket"), Ok(ShortcutIntent::OpenBasket));
        assert_eq!(ShortcutIntent::parse("  openBasket \n"), Ok(ShortcutIntent::OpenBasket));
    }

    #[test]
    fn test_parse_health_tags_keeps_unknown_entries() {
        let intent = ShortcutIntent::parse("filterHealthTag vegan,not-a-real-tag").unwrap();
        assert_eq!(
            intent,
            ShortcutIntent::FilterByHealthTag(vec![
                Some("vegan".to_string()),
                Some("not-a-real-tag".to_string()),
            ])
        );
    }

    #[test]
    fn test_parse_health_tags_empty_entries() {
        let intent = ShortcutIntent::parse("filterHealthTag vegan,,spicy").unwrap();
        assert_eq!(
            intent,
            ShortcutIntent::FilterByHealthTag(vec![
                Some("vegan".to_string()),
                None,
                Some("spicy".to_string()),
            ])
        );
        assert_eq!(
            ShortcutIntent::parse("filterHealthTag"),
            Ok(ShortcutIntent::FilterByHealthTag(Vec::new()))
        );
    }

    #[test]
    fn test_parse_category() {
        assert_eq!(
            ShortcutIntent::parse("filterCategory dessert"),
            Ok(ShortcutIntent::FilterByCategory(FoodCategory::Dessert))
        );
    }

    #[test]
    fn test_parse_bad_category_is_rejected_upstream() {
        assert_eq!(
            ShortcutIntent::parse("filterCategory pizza"),
            Err(ShortcutError::UnparseableParameter {
                action: FILTER_CATEGORY,
                value: "pizza".to_string(),
            })
        );
        assert_eq!(
            ShortcutIntent::parse("filterCategory"),
            Err(ShortcutError::MissingParameter(FILTER_CATEGORY))
        );
    }

    #[test]
    fn test_parse_unknown_action() {
        assert_eq!(
            ShortcutIntent::parse("orderPizza now"),
            Err(ShortcutError::UnknownAction("orderPizza".to_string()))
        );
    }

    #[test]
    fn test_parse_deep_link() {
        let url = Url::parse("shortcuts://openBasket").unwrap();
        assert_eq!(
            ShortcutIntent::parse("url shortcuts://openBasket"),
            Ok(ShortcutIntent::OpenUrl(url.clone()))
        );
        assert_eq!(ShortcutIntent::from_url(&url), Ok(ShortcutIntent::OpenBasket));
        assert!(matches!(
            ShortcutIntent::from_url(&Url::parse("shortcuts://somewhereElse").unwrap()),
            Err(ShortcutError::UnknownAction(_))
        ));
        assert!(matches!(
            ShortcutIntent::parse("url not a url"),
            Err(ShortcutError::UnparseableParameter { action: DEEP_LINK, .. })
        ));
    }

    #[test]
    fn test_display_matches_wire_format() {
        let intent = ShortcutIntent::FilterByHealthTag(vec![
            Some("vegan".to_string()),
            Some("spicy".to_string()),
        ]);
        assert_eq!(intent.to_string(), "filterHealthTag vegan,spicy");
        assert_eq!(ShortcutIntent::parse(&intent.to_string()), Ok(intent));
        assert_eq!(
            ShortcutIntent::FilterByCategory(FoodCategory::MainCourse).to_string(),
            "filterCategory mainCourse"
        );
    }

    #[test]
    fn test_dispatch_without_handler() {
        let bridge = ShortcutBridge::new();
        assert_eq!(
            ShortcutIntent::FilterByCategory(FoodCategory::Dessert).dispatch(&bridge),
            Dispatch::NoHandler
        );
        assert_eq!(ShortcutIntent::OpenBasket.dispatch(&bridge), Dispatch::NoHandler);
    }

    #[test]
    fn test_dispatch_deep_link() {
        let bridge = ShortcutBridge::new();
        let handler = Arc::new(LastCall::default());
        bridge.register(&handler);

        let intent = ShortcutIntent::parse("url shortcuts://elsewhere").unwrap();
        assert_eq!(intent.dispatch(&bridge), Dispatch::Delivered);
        assert_eq!(*handler.0.lock().unwrap(), None);

        let intent = ShortcutIntent::parse("url shortcuts://openBasket").unwrap();
        intent.dispatch(&bridge);
        assert_eq!(handler.0.lock().unwrap().as_deref(), Some("openBasket"));
    }

    #[test]
    fn test_dispatch_passes_category_key() {
        let bridge = ShortcutBridge::new();
        let handler = Arc::new(LastCall::default());
        bridge.register(&handler);

        let outcome = ShortcutIntent::FilterByCategory(FoodCategory::Breakfast).dispatch(&bridge);
        assert_eq!(outcome, Dispatch::Delivered);
        assert_eq!(handler.0.lock().unwrap().as_deref(), Some("breakfast"));
    }
}
