//! FFI bindings for mobile platforms (iOS/Android).
//!
//! This module provides the UniFFI bindings that expose flare scoring to
//! Kotlin and Swift. Trajectories cross the boundary as flat
//! `[t, h_msl, z, ...]` buffers. All FFI functions are prefixed with `ffi_`
//! to avoid naming conflicts with the internal API.
//!
//! The window bottom lives in a process-wide [`FlareScoring`], so the score
//! panel and the chart on the host side always read the same value.

use std::sync::Arc;

use log::{info, warn};
use once_cell::sync::Lazy;

use crate::trajectory::samples_from_flat;
use crate::{
    init_logging, DataPoint, FlareAnnotation, FlareScoring, FlareWindow, ScoringEvent,
    ScoringMethod, SubscriptionId,
};

/// Global scoring instance shared by all FFI calls.
pub static SCORING: Lazy<FlareScoring> = Lazy::new(FlareScoring::new);

// ============================================================================
// Change Callback Interface
// ============================================================================

/// Callback interface for scoring configuration changes.
/// Implement this in Kotlin/Swift to recompute scores and redraw charts.
#[uniffi::export(callback_interface)]
pub trait ScoringChangedCallback: Send + Sync {
    /// Called after every write of the window bottom.
    fn on_scoring_changed(&self, window_bottom: f64);
}

/// Register a change callback. Returns an id for unregistering.
#[uniffi::export]
pub fn ffi_register_scoring_callback(callback: Box<dyn ScoringChangedCallback>) -> u64 {
    init_logging();
    let callback: Arc<dyn ScoringChangedCallback> = Arc::from(callback);
    let id = SCORING.subscribe(Arc::new(move |event: &ScoringEvent| {
        callback.on_scoring_changed(event.window_bottom());
    }));
    info!("[FlareScoringRust] Registered scoring callback {:?}", id);
    id.raw()
}

/// Unregister a change callback. Returns false if the id is unknown.
#[uniffi::export]
pub fn ffi_unregister_scoring_callback(id: u64) -> bool {
    SCORING.unsubscribe(SubscriptionId::from_raw(id))
}

// ============================================================================
// Configuration
// ============================================================================

/// Set the window bottom (m above ground). Non-finite values are rejected.
#[uniffi::export]
pub fn ffi_set_window_bottom(window_bottom: f64) -> bool {
    init_logging();
    match SCORING.try_set_window_bottom(window_bottom) {
        Ok(()) => true,
        Err(e) => {
            warn!("[FlareScoringRust] {}", e);
            false
        }
    }
}

/// Current window bottom (m above ground).
#[uniffi::export]
pub fn ffi_get_window_bottom() -> f64 {
    SCORING.window_bottom()
}

/// Current configuration as JSON.
#[uniffi::export]
pub fn ffi_get_scoring_config_json() -> String {
    SCORING
        .config()
        .to_json()
        .unwrap_or_else(|_| "{}".to_string())
}

// ============================================================================
// Scoring
// ============================================================================

fn parse_flat(flat: &[f64]) -> Option<Vec<DataPoint>> {
    match samples_from_flat(flat) {
        Ok(samples) => Some(samples),
        Err(e) => {
            warn!("[FlareScoringRust] {}", e);
            None
        }
    }
}

/// Flare score of a flat trajectory buffer. Malformed buffers score 0.
#[uniffi::export]
pub fn ffi_flare_score(flat: Vec<f64>) -> f64 {
    init_logging();
    let Some(samples) = parse_flat(&flat) else {
        return 0.0;
    };
    let score = SCORING.score(&samples);
    info!(
        "[FlareScoringRust] Scored {} samples: {}",
        samples.len(),
        SCORING.score_as_text(score)
    );
    score
}

/// Scoring window of a flat trajectory buffer.
#[uniffi::export]
pub fn ffi_find_flare_window(flat: Vec<f64>) -> Option<FlareWindow> {
    init_logging();
    parse_flat(&flat).and_then(|samples| SCORING.find_window(&samples))
}

/// Chart annotation for a flat trajectory buffer and visible time range.
#[uniffi::export]
pub fn ffi_prepare_flare_annotation(
    flat: Vec<f64>,
    range_lower: f64,
    range_upper: f64,
) -> Option<FlareAnnotation> {
    init_logging();
    parse_flat(&flat)
        .and_then(|samples| SCORING.prepare_annotation(&samples, (range_lower, range_upper)))
}

/// Display text for a score, e.g. "42.5 m".
#[uniffi::export]
pub fn ffi_format_flare_score(score: f64) -> String {
    SCORING.score_as_text(score)
}
