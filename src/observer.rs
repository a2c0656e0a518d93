//! Change notification for scoring consumers.
//!
//! Hosts register observers (a score panel, a chart) and are told whenever
//! the scoring configuration is written, so they can recompute and redraw.
//! Observers run synchronously on the writing thread, after the new value
//! is visible to readers.

use std::sync::{Arc, Mutex};

use log::debug;

/// Scoring event types for notifying consumers of changes
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "ffi", derive(uniffi::Enum))]
pub enum ScoringEvent {
    /// The window bottom was written (possibly with the same value)
    ScoringChanged { window_bottom: f64 },
    /// The whole configuration was replaced
    ConfigReplaced { window_bottom: f64 },
}

impl ScoringEvent {
    /// Window bottom in effect after the change.
    pub fn window_bottom(&self) -> f64 {
        match self {
            ScoringEvent::ScoringChanged { window_bottom }
            | ScoringEvent::ConfigReplaced { window_bottom } => *window_bottom,
        }
    }
}

/// Receiver of scoring change events.
///
/// Any `Fn(&ScoringEvent) + Send + Sync` closure is an observer.
pub trait ScoringObserver: Send + Sync {
    fn on_scoring_changed(&self, event: &ScoringEvent);
}

impl<F> ScoringObserver for F
where
    F: Fn(&ScoringEvent) + Send + Sync,
{
    fn on_scoring_changed(&self, event: &ScoringEvent) {
        self(event)
    }
}

/// Handle returned by [`ObserverRegistry::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Rebuild an id previously obtained from [`raw`](Self::raw).
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Numeric form, for hosts that cannot hold Rust values.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

#[derive(Default)]
struct Subscribers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Arc<dyn ScoringObserver>)>,
}

/// Thread-safe list of observers.
#[derive(Default)]
pub struct ObserverRegistry {
    inner: Mutex<Subscribers>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer; it stays registered until unsubscribed.
    pub fn subscribe(&self, observer: Arc<dyn ScoringObserver>) -> SubscriptionId {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;
        inner.entries.push((id, observer));
        debug!("[Observers] Subscribed {:?} ({} total)", id, inner.entries.len());
        id
    }

    /// Remove an observer. Returns false if the id was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let before = inner.entries.len();
        inner.entries.retain(|(entry_id, _)| *entry_id != id);
        inner.entries.len() != before
    }

    /// Number of registered observers.
    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .entries
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deliver an event to every observer in subscription order.
    ///
    /// The list is snapshotted first, so observers may subscribe or
    /// unsubscribe from inside the callback.
    pub fn notify(&self, event: &ScoringEvent) {
        let observers: Vec<Arc<dyn ScoringObserver>> = {
            let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
            inner.entries.iter().map(|(_, o)| Arc::clone(o)).collect()
        };
        debug!(
            "[Observers] Notifying {} observers of {:?}",
            observers.len(),
            event
        );
        for observer in observers {
            observer.on_scoring_changed(event);
        }
    }
}

impl std::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_notify_reaches_all_observers() {
        let registry = ObserverRegistry::new();
        let hits = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let hits = Arc::clone(&hits);
            registry.subscribe(Arc::new(move |_: &ScoringEvent| {
                hits.fetch_add(1, Ordering::SeqCst);
            }));
        }

        registry.notify(&ScoringEvent::ScoringChanged {
            window_bottom: 1500.0,
        });
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_unsubscribe() {
        let registry = ObserverRegistry::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let id = registry.subscribe(Arc::new(move |_: &ScoringEvent| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        assert!(registry.unsubscribe(id));
        assert!(!registry.unsubscribe(id));
        assert!(registry.is_empty());

        registry.notify(&ScoringEvent::ScoringChanged {
            window_bottom: 1500.0,
        });
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_subscription_ids_are_unique() {
        let registry = ObserverRegistry::new();
        let a = registry.subscribe(Arc::new(|_: &ScoringEvent| {}));
        let b = registry.subscribe(Arc::new(|_: &ScoringEvent| {}));
        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);
        assert_eq!(SubscriptionId::from_raw(b.raw()), b);
    }

    #[test]
    fn test_event_window_bottom() {
        let event = ScoringEvent::ConfigReplaced {
            window_bottom: 1800.0,
        };
        assert_eq!(event.window_bottom(), 1800.0);
    }
}
