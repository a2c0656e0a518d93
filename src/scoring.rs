//! # Scoring Methods
//!
//! Scoring methods turn a trajectory into a single number plus its display
//! text. Hosts pick one at runtime through [`Scorer`], a closed set of
//! methods sharing the [`ScoringMethod`] interface.
//!
//! [`FlareScoring`] is the flare method: the altitude gained between the
//! bottom and top of the scoring window. Its window bottom can be changed
//! while other threads score; every write notifies registered observers.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use flare_scoring::{FlareScoring, ScoringEvent};
//!
//! let scoring = FlareScoring::new();
//! scoring.subscribe(Arc::new(|event: &ScoringEvent| {
//!     println!("rescore with window bottom {}", event.window_bottom());
//! }));
//! scoring.set_window_bottom(1500.0);
//! assert_eq!(scoring.window_bottom(), 1500.0);
//! ```

use std::sync::{Arc, Mutex, RwLock};

use log::{debug, info};

use crate::annotation::{prepare_annotation, FlareAnnotation};
use crate::config::ScoringConfig;
use crate::error::Result;
use crate::observer::{ObserverRegistry, ScoringEvent, ScoringObserver, SubscriptionId};
use crate::window::{find_window_bounds, FlareWindow};
use crate::DataPoint;

/// Shared interface of all scoring methods.
pub trait ScoringMethod {
    /// Short human-readable method name.
    fn name(&self) -> &'static str;

    /// Score a trajectory. Never fails; "nothing to score" is 0.0.
    fn score(&self, samples: &[DataPoint]) -> f64;

    /// Display text for a score.
    fn score_as_text(&self, score: f64) -> String;

    /// Chart annotation for the visible time range `(lower, upper)`.
    fn prepare_annotation(
        &self,
        samples: &[DataPoint],
        range: (f64, f64),
    ) -> Option<FlareAnnotation>;
}

/// Render a distance score with its unit, e.g. `50 m` or `12.5 m`.
///
/// Uses the shortest decimal that parses back to the same value.
pub fn format_score(score: f64) -> String {
    format!("{} m", score)
}

// ============================================================================
// Flare Scoring
// ============================================================================

/// Flare scoring: altitude gained inside the scoring window.
///
/// Writers are serialized from the write through the last observer call,
/// so observers see changes in the order they were stored. Observers must
/// not write the configuration from inside their callback.
#[derive(Debug, Default)]
pub struct FlareScoring {
    config: RwLock<ScoringConfig>,
    observers: ObserverRegistry,
    write_lock: Mutex<()>,
}

impl FlareScoring {
    /// Create flare scoring with the default window bottom (2000 m).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create flare scoring with a custom configuration.
    pub fn with_config(config: ScoringConfig) -> Self {
        Self {
            config: RwLock::new(config),
            observers: ObserverRegistry::new(),
            write_lock: Mutex::new(()),
        }
    }

    /// Current configuration.
    pub fn config(&self) -> ScoringConfig {
        *self.config.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Current window bottom in meters above ground.
    pub fn window_bottom(&self) -> f64 {
        self.config().window_bottom
    }

    /// Replace the window bottom and notify observers.
    ///
    /// Any value is stored, including non-finite ones; use
    /// [`try_set_window_bottom`](Self::try_set_window_bottom) to reject those.
    pub fn set_window_bottom(&self, window_bottom: f64) {
        let _writer = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        {
            let mut config = self.config.write().unwrap_or_else(|e| e.into_inner());
            config.window_bottom = window_bottom;
        }
        info!("[FlareScoring] Window bottom set to {}m", window_bottom);
        self.observers
            .notify(&ScoringEvent::ScoringChanged { window_bottom });
    }

    /// Replace the window bottom after validating it.
    pub fn try_set_window_bottom(&self, window_bottom: f64) -> Result<()> {
        ScoringConfig::with_window_bottom(window_bottom).validate()?;
        self.set_window_bottom(window_bottom);
        Ok(())
    }

    /// Replace the whole configuration after validating it.
    pub fn set_config(&self, config: ScoringConfig) -> Result<()> {
        config.validate()?;
        let _writer = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        {
            let mut current = self.config.write().unwrap_or_else(|e| e.into_inner());
            *current = config;
        }
        info!("[FlareScoring] Config replaced: {:?}", config);
        self.observers.notify(&ScoringEvent::ConfigReplaced {
            window_bottom: config.window_bottom,
        });
        Ok(())
    }

    /// Register a change observer.
    pub fn subscribe(&self, observer: Arc<dyn ScoringObserver>) -> SubscriptionId {
        self.observers.subscribe(observer)
    }

    /// Remove a change observer.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Scoring window for a trajectory under the current window bottom.
    pub fn find_window(&self, samples: &[DataPoint]) -> Option<FlareWindow> {
        find_window_bounds(samples, self.window_bottom())
    }
}

impl ScoringMethod for FlareScoring {
    fn name(&self) -> &'static str {
        "Flare"
    }

    fn score(&self, samples: &[DataPoint]) -> f64 {
        match self.find_window(samples) {
            Some(window) if window.gain().is_finite() => window.gain(),
            Some(window) => {
                debug!(
                    "[FlareScoring] Ignoring non-finite gain between samples {} and {}",
                    window.bottom_index, window.top_index
                );
                0.0
            }
            None => 0.0,
        }
    }

    fn score_as_text(&self, score: f64) -> String {
        format_score(score)
    }

    fn prepare_annotation(
        &self,
        samples: &[DataPoint],
        range: (f64, f64),
    ) -> Option<FlareAnnotation> {
        prepare_annotation(samples, self.window_bottom(), range)
    }
}

// ============================================================================
// Scorer
// ============================================================================

/// Scoring method selected by the host.
#[derive(Debug)]
pub enum Scorer {
    Flare(FlareScoring),
}

impl Scorer {
    /// Flare scoring with the default configuration.
    pub fn flare() -> Self {
        Scorer::Flare(FlareScoring::new())
    }

    /// The flare method, if that is the one selected.
    pub fn as_flare(&self) -> Option<&FlareScoring> {
        match self {
            Scorer::Flare(flare) => Some(flare),
        }
    }
}

impl ScoringMethod for Scorer {
    fn name(&self) -> &'static str {
        match self {
            Scorer::Flare(flare) => flare.name(),
        }
    }

    fn score(&self, samples: &[DataPoint]) -> f64 {
        match self {
            Scorer::Flare(flare) => flare.score(samples),
        }
    }

    fn score_as_text(&self, score: f64) -> String {
        match self {
            Scorer::Flare(flare) => flare.score_as_text(score),
        }
    }

    fn prepare_annotation(
        &self,
        samples: &[DataPoint],
        range: (f64, f64),
    ) -> Option<FlareAnnotation> {
        match self {
            Scorer::Flare(flare) => flare.prepare_annotation(samples, range),
        }
    }
}
