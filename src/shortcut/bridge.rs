use super::intent::ShortcutIntent;
use std::sync::{Arc, OnceLock, PoisonError, RwLock, Weak};
use url::Url;

/// What a shortcut can ask of the running application.
pub trait ShortcutHandler: Send + Sync {
    fn trigger_open_basket(&self);
    /// Raw tag keys; entries that don't name a known tag are skipped later.
    fn trigger_filter_by_health_tag(&self, tags: Vec<Option<String>>);
    fn trigger_filter_by_category(&self, category: String);

    /// Deep links. Only `openBasket` leads anywhere; other hosts are ignored.
    fn open_url(&self, url: &Url) {
        match ShortcutIntent::from_url(url) {
            Ok(ShortcutIntent::OpenBasket) => self.trigger_open_basket(),
            _ => tracing::debug!(%url, "ignoring deep link"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Delivered,
    NoHandler,
}

/// Attachment point for shortcuts arriving from outside the UI. Holds at most
/// one handler, without keeping it alive.
pub struct ShortcutBridge {
    handler: RwLock<Option<Weak<dyn ShortcutHandler>>>,
}

static SHARED: OnceLock<ShortcutBridge> = OnceLock::new();

impl ShortcutBridge {
    pub fn new() -> Self {
        Self {
            handler: RwLock::new(None),
        }
    }

    pub fn shared() -> &'static ShortcutBridge {
        SHARED.get_or_init(ShortcutBridge::new)
    }

    /// Replaces any previously registered handler.
    pub fn register<H: ShortcutHandler + 'static>(&self, handler: &Arc<H>) {
        let handler: Arc<dyn ShortcutHandler> = handler.clone();
        let mut slot = self.handler.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(Arc::downgrade(&handler));
        tracing::debug!("shortcut handler registered");
    }

    pub fn unregister(&self) {
        let mut slot = self.handler.write().unwrap_or_else(PoisonError::into_inner);
        *slot = None;
    }

    pub fn is_attached(&self) -> bool {
        self.current().is_some()
    }

    pub fn trigger_open_basket(&self) -> Dispatch {
        self.forward("openBasket", |handler| handler.trigger_open_basket())
    }

    pub fn trigger_filter_by_health_tag(&self, tags: Vec<Option<String>>) -> Dispatch {
        self.forward("filterHealthTag", |handler| {
            handler.trigger_filter_by_health_tag(tags)
        })
    }

    pub fn trigger_filter_by_category(&self, category: String) -> Dispatch {
        self.forward("filterCategory", |handler| {
            handler.trigger_filter_by_category(category)
        })
    }

    pub fn open_url(&self, url: &Url) -> Dispatch {
        self.forward("url", |handler| handler.open_url(url))
    }

    fn current(&self) -> Option<Arc<dyn ShortcutHandler>> {
        let slot = self.handler.read().unwrap_or_else(PoisonError::into_inner);
        slot.as_ref().and_then(Weak::upgrade)
    }

    // The slot lock is released before the handler runs.
    fn forward(&self, action: &str, call: impl FnOnce(&dyn ShortcutHandler)) -> Dispatch {
        match self.current() {
            Some(handler) => {
                tracing::info!(action, "shortcut triggered");
                call(handler.as_ref());
                Dispatch::Delivered
            }
            None => {
                tracing::debug!(action, "no shortcut handler attached, dropping trigger");
                Dispatch::NoHandler
            }
        }
    }
}

impl Default for ShortcutBridge {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<String>>,
    }

    impl Recorder {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl ShortcutHandler for Recorder {
        fn trigger_open_basket(&self) {
            self.calls.lock().unwrap().push("openBasket".to_string());
        }

        fn trigger_filter_by_health_tag(&self, tags: Vec<Option<String>>) {
            let tags: Vec<String> = tags.into_iter().map(|t| t.unwrap_or_default()).collect();
            self.calls.lock().unwrap().push(format!("filterHealthTag {}", tags.join(",")));
        }

        fn trigger_filter_by_category(&self, category: String) {
            self.calls.lock().unwrap().push(format!("filterCategory {}", category));
        }
    }

    #[test]
    fn test_trigger_without_handler_is_a_no_op() {
        let bridge = ShortcutBridge::new();
        assert!(!bridge.is_attached());
        assert_eq!(
            bridge.trigger_filter_by_category("dessert".to_string()),
            Dispatch::NoHandler
        );
        assert_eq!(bridge.trigger_open_basket(), Dispatch::NoHandler);
    }

    #[test]
    fn test_triggers_reach_registered_handler() {
        let bridge = ShortcutBridge::new();
        let recorder = Arc::new(Recorder::default());
        bridge.register(&recorder);

        assert_eq!(bridge.trigger_open_basket(), Dispatch::Delivered);
        bridge.trigger_filter_by_health_tag(vec![Some("vegan".to_string()), None]);
        bridge.trigger_filter_by_category("soup".to_string());

        assert_eq!(
            recorder.calls(),
            vec!["openBasket", "filterHealthTag vegan,", "filterCategory soup"]
        );
    }

    #[test]
    fn test_open_url_routes_known_hosts() {
        let bridge = ShortcutBridge::new();
        let recorder = Arc::new(Recorder::default());
        bridge.register(&recorder);

        let elsewhere = Url::parse("shortcuts://elsewhere").unwrap();
        assert_eq!(bridge.open_url(&elsewhere), Dispatch::Delivered);
        assert!(recorder.calls().is_empty());

        bridge.open_url(&Url::parse("shortcuts://openBasket").unwrap());
        assert_eq!(recorder.calls(), vec!["openBasket"]);
    }

    #[test]
    fn test_bridge_does_not_keep_handler_alive() {
        let bridge = ShortcutBridge::new();
        let recorder = Arc::new(Recorder::default());
        bridge.register(&recorder);
        assert!(bridge.is_attached());

        drop(recorder);
        assert!(!bridge.is_attached());
        assert_eq!(bridge.trigger_open_basket(), Dispatch::NoHandler);
    }

    #[test]
    fn test_register_replaces_previous_handler() {
        let bridge = ShortcutBridge::new();
        let first = Arc::new(Recorder::default());
        let second = Arc::new(Recorder::default());

        bridge.register(&first);
        bridge.register(&second);
        bridge.trigger_open_basket();

        assert!(first.calls().is_empty());
        assert_eq!(second.calls(), vec!["openBasket"]);
    }

    #[test]
    fn test_unregister() {
        let bridge = ShortcutBridge::new();
        let recorder = Arc::new(Recorder::default());
        bridge.register(&recorder);
        bridge.unregister();

        assert_eq!(bridge.trigger_open_basket(), Dispatch::NoHandler);
        assert!(recorder.calls().is_empty());
    }

    #[test]
    fn test_triggers_from_another_thread() {
        let bridge = Arc::new(ShortcutBridge::new());
        let recorder = Arc::new(Recorder::default());
        bridge.register(&recorder);

        let remote = Arc::clone(&bridge);
        std::thread::spawn(move || remote.trigger_filter_by_category("drink".to_string()))
            .join()
            .unwrap();

        assert_eq!(recorder.calls(), vec!["filterCategory drink"]);
    }

    #[test]
    fn test_shared_is_a_single_instance() {
        assert!(std::ptr::eq(ShortcutBridge::shared(), ShortcutBridge::shared()));
    }
}
