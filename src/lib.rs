//! # Flare Scoring
//!
//! Flare scoring for recorded skydiving and wingsuit trajectories.
//!
//! A flare is the climb a flyer can pull right after exit by trading speed
//! for altitude. This library measures it from a logged trajectory:
//! - Single-pass search for the largest climb inside the scoring window
//! - Score value and display text, behind a shared scoring-method interface
//! - Threshold configuration with change notification for interactive hosts
//! - Annotation data for charting the scoring window
//!
//! ## Features
//!
//! - **`ffi`** - Enable FFI bindings for mobile platforms (iOS/Android)
//! - **`synthetic`** - Deterministic synthetic trajectories for testing
//! - **`full`** - Enable all features
//!
//! ## Quick Start
//!
//! ```rust
//! use flare_scoring::{DataPoint, FlareScoring, ScoringMethod};
//!
//! // t relative to exit (s), height above sea level (m), height above ground (m)
//! let samples = vec![
//!     DataPoint::new(0.0, 4000.0, 3600.0),
//!     DataPoint::new(1.0, 4012.0, 3612.0),
//!     DataPoint::new(2.0, 4020.5, 3620.5),
//!     DataPoint::new(3.0, 4001.0, 3601.0),
//! ];
//!
//! let scoring = FlareScoring::new();
//! let score = scoring.score(&samples);
//! assert_eq!(scoring.score_as_text(score), "20.5 m");
//! ```

use serde::{Deserialize, Serialize};

// Unified error handling
pub mod error;
pub use error::{Result, ScoringError};

// Scoring window search (single backward pass)
pub mod window;
pub use window::{find_window_bounds, FlareWindow};

// Scoring configuration (window bottom threshold)
pub mod config;
pub use config::{ScoringConfig, DEFAULT_WINDOW_BOTTOM};

// Change notification for configuration consumers
pub mod observer;
pub use observer::{ObserverRegistry, ScoringEvent, ScoringObserver, SubscriptionId};

// Scoring methods (flare score, display text, strategy dispatch)
pub mod scoring;
pub use scoring::{format_score, FlareScoring, Scorer, ScoringMethod};

// Sample sequence construction and interpolation
pub mod trajectory;
pub use trajectory::{
    interpolate_at_time, samples_from_flat, samples_from_json, validate_samples,
};

// Chart annotation data for the scoring window
pub mod annotation;
pub use annotation::{prepare_annotation, FlareAnnotation, ReferenceLine, ShadedSpan};

// Synthetic trajectories for tests
#[cfg(feature = "synthetic")]
pub mod synthetic;

// FFI bindings for mobile platforms (iOS/Android)
#[cfg(feature = "ffi")]
pub mod ffi;

#[cfg(feature = "ffi")]
uniffi::setup_scaffolding!();

/// Initialize logging for Android (only used in FFI)
#[cfg(all(feature = "ffi", target_os = "android"))]
pub(crate) fn init_logging() {
    use android_logger::Config;
    use log::LevelFilter;

    android_logger::init_once(
        Config::default()
            .with_max_level(LevelFilter::Debug)
            .with_tag("FlareScoringRust"),
    );
}

#[cfg(all(feature = "ffi", not(target_os = "android")))]
pub(crate) fn init_logging() {
    // No-op on non-Android platforms
}

// ============================================================================
// Core Types
// ============================================================================

/// A single recorded trajectory sample.
///
/// # Example
/// ```
/// use flare_scoring::DataPoint;
/// let exit = DataPoint::new(0.0, 4000.0, 3600.0);
/// assert!(exit.is_finite());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct DataPoint {
    /// Seconds relative to exit (negative before exit)
    pub t: f64,
    /// Height above mean sea level in meters
    pub h_msl: f64,
    /// Height above ground in meters
    pub z: f64,
}

impl DataPoint {
    /// Create a new sample.
    pub fn new(t: f64, h_msl: f64, z: f64) -> Self {
        Self { t, h_msl, z }
    }

    /// Check that every field is a finite number.
    pub fn is_finite(&self) -> bool {
        self.t.is_finite() && self.h_msl.is_finite() && self.z.is_finite()
    }
}

// ============================================================================
// Tests
// ============================================================================
