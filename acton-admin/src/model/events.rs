//! Model lifecycle events
//!
//! Listeners are keyed by `acton_admin.{event}: {class}`. A halting
//! dispatch stops at the first listener returning `false` and reports the
//! veto; a plain dispatch runs every listener.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

/// Lifecycle point of a model record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    /// Before a record is stored; may veto
    Creating,
    /// After a record was stored
    Created,
    /// Before a record is updated; may veto
    Updating,
    /// After a record was updated
    Updated,
    /// Before a record is deleted; may veto
    Deleting,
    /// After a record was deleted
    Deleted,
}

impl LifecycleEvent {
    /// Event name used in dispatcher keys
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Creating => "creating",
            Self::Created => "created",
            Self::Updating => "updating",
            Self::Updated => "updated",
            Self::Deleting => "deleting",
            Self::Deleted => "deleted",
        }
    }

    /// Dispatcher key of this event for a model class
    #[must_use]
    pub fn key(&self, class: &str) -> String {
        format!("acton_admin.{}: {class}", self.as_str())
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Data handed to listeners
#[derive(Debug, Clone, PartialEq)]
pub struct ModelEvent {
    /// Which lifecycle point fired
    pub event: LifecycleEvent,
    /// Model class of the record
    pub class: String,
    /// Record attributes (submitted attributes for `creating`/`updating`)
    pub payload: Value,
}

/// Lifecycle listener; returning `false` vetoes a halting dispatch
pub type Listener = Arc<dyn Fn(&ModelEvent) -> bool + Send + Sync>;

/// Keyed listener registry
#[derive(Default, Clone)]
pub struct EventDispatcher {
    listeners: HashMap<String, Vec<Listener>>,
}

impl fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys = self.listeners.keys().collect::<Vec<_>>();
        keys.sort();
        f.debug_struct("EventDispatcher").field("events", &keys).finish()
    }
}

impl EventDispatcher {
    /// Empty dispatcher
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a listener under `key`, after any existing ones
    pub fn listen(&mut self, key: impl Into<String>, listener: Listener) {
        self.listeners.entry(key.into()).or_default().push(listener);
    }

    /// Whether anything listens on `key`
    #[must_use]
    pub fn has_listeners(&self, key: &str) -> bool {
        self.listeners.get(key).is_some_and(|l| !l.is_empty())
    }

    /// Run the listeners of `key` in order
    ///
    /// With `halt`, stops at the first listener returning `false` and returns
    /// `false`. Without it, every listener runs and the result is `true`.
    pub fn dispatch(&self, key: &str, event: &ModelEvent, halt: bool) -> bool {
        let Some(listeners) = self.listeners.get(key) else {
            return true;
        };

        for listener in listeners {
            if !listener(event) && halt {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn event(kind: LifecycleEvent) -> ModelEvent {
        ModelEvent {
            event: kind,
            class: "blog::Post".to_string(),
            payload: json!({ "title": "Hello" }),
        }
    }

    #[test]
    fn test_key_format() {
        assert_eq!(
            LifecycleEvent::Creating.key("blog::Post"),
            "acton_admin.creating: blog::Post"
        );
    }

    #[test]
    fn test_no_listeners_passes() {
        let dispatcher = EventDispatcher::new();
        assert!(dispatcher.dispatch("acton_admin.creating: x", &event(LifecycleEvent::Creating), true));
    }

    #[test]
    fn test_halting_dispatch_stops_at_veto() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut dispatcher = EventDispatcher::new();
        let key = LifecycleEvent::Deleting.key("blog::Post");

        dispatcher.listen(key.clone(), Arc::new(|_: &ModelEvent| false));
        let counter = Arc::clone(&calls);
        dispatcher.listen(
            key.clone(),
            Arc::new(move |_: &ModelEvent| {
                counter.fetch_add(1, Ordering::SeqCst);
                true
            }),
        );

        assert!(!dispatcher.dispatch(&key, &event(LifecycleEvent::Deleting), true));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert!(dispatcher.dispatch(&key, &event(LifecycleEvent::Deleting), false));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_listener_sees_payload() {
        let mut dispatcher = EventDispatcher::new();
        let key = LifecycleEvent::Created.key("blog::Post");
        dispatcher.listen(key.clone(), Arc::new(|e: &ModelEvent| e.payload["title"] == "Hello"));

        assert!(dispatcher.has_listeners(&key));
        assert!(dispatcher.dispatch(&key, &event(LifecycleEvent::Created), true));
    }
}
