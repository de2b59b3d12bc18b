use crate::shortcut::bridge::ShortcutHandler;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    OpenBasket,
    FilterHealthTag,
    FilterCategory,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenBasket => "openBasket",
            Self::FilterHealthTag => "filterHealthTag",
            Self::FilterCategory => "filterCategory",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExternalAction {
    OpenBasket,
    FilterByHealthTag(Vec<Option<String>>),
    FilterByCategory(String),
}

impl ExternalAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::OpenBasket => ActionKind::OpenBasket,
            Self::FilterByHealthTag(_) => ActionKind::FilterHealthTag,
            Self::FilterByCategory(_) => ActionKind::FilterCategory,
        }
    }
}

/// One emission. `seq` is unique per emission, so the same action fired
/// twice is still two events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionEvent {
    pub seq: u64,
    pub action: ExternalAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionMarker {
    pub seq: u64,
    pub kind: ActionKind,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Published {
    pub latest_action: Option<ActionMarker>,
    pub filter_health_tags: Vec<Option<String>>,
    pub filter_category: Option<String>,
}

impl Published {
    /// The latest action with the payload it published, e.g.
    /// `#3 filterCategory soup`.
    pub fn latest_summary(&self) -> Option<String> {
        let marker = self.latest_action?;
        let detail = match marker.kind {
            ActionKind::OpenBasket => String::new(),
            ActionKind::FilterHealthTag => {
                let tags: Vec<&str> = self
                    .filter_health_tags
                    .iter()
                    .map(|tag| tag.as_deref().unwrap_or("?"))
                    .collect();
                format!(" {}", tags.join(","))
            }
            ActionKind::FilterCategory => {
                format!(" {}", self.filter_category.as_deref().unwrap_or("?"))
            }
        };
        Some(format!("#{} {}{}", marker.seq, marker.kind.as_str(), detail))
    }
}

#[derive(Default)]
struct Inner {
    published: Published,
    next_seq: u64,
    subscriber: Option<Sender<ActionEvent>>,
}

/// What happened externally, shared between the shortcut listener and the UI.
/// Fields change under a lock from any thread; the UI only reacts to what it
/// drains from its subscription.
#[derive(Default)]
pub struct AppState {
    inner: Mutex<Inner>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any earlier subscription; there is a single consumer.
    pub fn subscribe(&self) -> Receiver<ActionEvent> {
        let (tx, rx) = mpsc::channel();
        self.lock().subscriber = Some(tx);
        rx
    }

    pub fn snapshot(&self) -> Published {
        self.lock().published.clone()
    }

    fn emit(&self, action: ExternalAction) {
        let mut inner = self.lock();
        inner.next_seq += 1;
        let seq = inner.next_seq;

        match &action {
            ExternalAction::OpenBasket => {}
            ExternalAction::FilterByHealthTag(tags) => {
                inner.published.filter_health_tags = tags.clone()
            }
            ExternalAction::FilterByCategory(category) => {
                inner.published.filter_category = Some(category.clone())
            }
        }
        inner.published.latest_action = Some(ActionMarker { seq, kind: action.kind() });
        tracing::info!(seq, action = action.kind().as_str(), "external action recorded");

        let delivered = inner
            .subscriber
            .as_ref()
            .is_some_and(|tx| tx.send(ActionEvent { seq, action }).is_ok());
        if !delivered {
            inner.subscriber = None;
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ShortcutHandler for AppState {
    fn trigger_open_basket(&self) {
        self.emit(ExternalAction::OpenBasket);
    }

    fn trigger_filter_by_health_tag(&self, tags: Vec<Option<String>>) {
        self.emit(ExternalAction::FilterByHealthTag(tags));
    }

    fn trigger_filter_by_category(&self, category: String) {
        self.emit(ExternalAction::FilterByCategory(category));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shortcut::bridge::ShortcutBridge;
    use std::sync::Arc;
    use url::Url;

    #[test]
    fn test_open_basket_sets_marker() {
        let state = AppState::new();
        let events = state.subscribe();

        state.trigger_open_basket();

        let snapshot = state.snapshot();
        assert_eq!(
            snapshot.latest_action,
            Some(ActionMarker { seq: 1, kind: ActionKind::OpenBasket })
        );
        assert_eq!(
            events.try_recv(),
            Ok(ActionEvent { seq: 1, action: ExternalAction::OpenBasket })
        );
    }

    #[test]
    fn test_health_tags_replaced_wholesale() {
        let state = AppState::new();
        state.trigger_filter_by_health_tag(vec![
            Some("vegan".to_string()),
            Some("spicy".to_string()),
        ]);
        state.trigger_filter_by_health_tag(vec![Some("organic".to_string()), None]);

        let snapshot = state.snapshot();
        assert_eq!(snapshot.filter_health_tags, vec![Some("organic".to_string()), None]);
        assert_eq!(snapshot.latest_action.map(|m| m.kind), Some(ActionKind::FilterHealthTag));
    }

    #[test]
    fn test_category_published() {
        let state = AppState::new();
        state.trigger_filter_by_category("soup".to_string());
        let snapshot = state.snapshot();
        assert_eq!(snapshot.filter_category.as_deref(), Some("soup"));
        assert_eq!(snapshot.latest_action.map(|m| m.kind), Some(ActionKind::FilterCategory));
    }

    #[test]
    fn test_latest_summary() {
        let state = AppState::new();
        assert_eq!(state.snapshot().latest_summary(), None);

        state.trigger_open_basket();
        assert_eq!(state.snapshot().latest_summary().as_deref(), Some("#1 openBasket"));

        state.trigger_filter_by_health_tag(vec![Some("vegan".to_string()), None]);
        assert_eq!(
            state.snapshot().latest_summary().as_deref(),
            Some("#2 filterHealthTag vegan,?")
        );

        state.trigger_filter_by_category("soup".to_string());
        assert_eq!(
            state.snapshot().latest_summary().as_deref(),
            Some("#3 filterCategory soup")
        );
    }

    #[test]
    fn test_repeated_action_emits_distinct_events() {
        let state = AppState::new();
        let events = state.subscribe();

        state.trigger_open_basket();
        state.trigger_open_basket();

        let seqs: Vec<u64> = events.try_iter().map(|e| e.seq).collect();
        assert_eq!(seqs, vec![1, 2]);
    }

    #[test]
    fn test_without_subscriber_still_publishes() {
        let state = AppState::new();
        state.trigger_filter_by_category("drink".to_string());
        assert_eq!(state.snapshot().filter_category.as_deref(), Some("drink"));
    }

    #[test]
    fn test_dropped_subscriber_is_forgotten() {
        let state = AppState::new();
        drop(state.subscribe());
        state.trigger_open_basket();

        let events = state.subscribe();
        state.trigger_open_basket();
        assert_eq!(events.try_iter().count(), 1);
    }

    #[test]
    fn test_resubscribe_replaces_consumer() {
        let state = AppState::new();
        let old = state.subscribe();
        let new = state.subscribe();

        state.trigger_open_basket();
        assert!(old.try_recv().is_err());
        assert!(new.try_recv().is_ok());
    }

    #[test]
    fn test_deep_link() {
        let state = AppState::new();
        let events = state.subscribe();

        state.open_url(&Url::parse("shortcuts://elsewhere").unwrap());
        assert!(events.try_recv().is_err());

        state.open_url(&Url::parse("shortcuts://openBasket").unwrap());
        assert_eq!(events.try_recv().map(|e| e.action), Ok(ExternalAction::OpenBasket));
    }

    #[test]
    fn test_bridge_to_state_from_another_thread() {
        let bridge = Arc::new(ShortcutBridge::new());
        let state = Arc::new(AppState::new());
        let events = state.subscribe();
        bridge.register(&state);

        let remote = Arc::clone(&bridge);
        std::thread::spawn(move || {
            remote.trigger_filter_by_health_tag(vec![Some("vegan".to_string())]);
        })
        .join()
        .unwrap();

        let event = events.recv().unwrap();
        assert_eq!(
            event.action,
            ExternalAction::FilterByHealthTag(vec![Some("vegan".to_string())])
        );
    }
}
