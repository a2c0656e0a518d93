//! Chart annotation data for the flare scoring window.
//!
//! The chart itself lives in the host. This module only works out what to
//! draw on an elevation-over-time plot so the picture matches the score:
//!
//! - two dashed reference lines across the visible range, at the bottom and
//!   top elevation of the window
//! - a shaded span from the left edge up to the window bottom, and another
//!   from the window top to the right edge, leaving the climb unshaded
//!
//! Shaded spans are in axis-rect ratios (0 = left/bottom edge, 1 =
//! right/top edge) and overshoot by 0.1 on the outer sides so their borders
//! fall outside the plot.

use serde::{Deserialize, Serialize};

use crate::trajectory::interpolate_at_time;
use crate::window::{find_window_bounds, FlareWindow};
use crate::DataPoint;

/// Outer edge overshoot of shaded spans, in axis ratios.
const SHADE_OVERSHOOT: f64 = 0.1;

/// Horizontal reference line at a fixed elevation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct ReferenceLine {
    /// Start time (s)
    pub x_start: f64,
    /// End time (s)
    pub x_end: f64,
    /// Elevation above sea level (m)
    pub elevation: f64,
}

/// Shaded rectangle in axis-rect ratios.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct ShadedSpan {
    pub x_start_ratio: f64,
    pub x_end_ratio: f64,
    pub y_start_ratio: f64,
    pub y_end_ratio: f64,
}

impl ShadedSpan {
    fn full_height(x_start_ratio: f64, x_end_ratio: f64) -> Self {
        Self {
            x_start_ratio,
            x_end_ratio,
            y_start_ratio: -SHADE_OVERSHOOT,
            y_end_ratio: 1.0 + SHADE_OVERSHOOT,
        }
    }
}

/// Everything a chart needs to mark the scoring window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct FlareAnnotation {
    /// The window being marked
    pub window: FlareWindow,
    /// Time at the left edge of the visible range (s)
    pub x_min: f64,
    /// Time at the right edge of the visible range (s)
    pub x_max: f64,
    /// Dashed line at the window bottom elevation
    pub bottom_line: ReferenceLine,
    /// Dashed line at the window top elevation
    pub top_line: ReferenceLine,
    /// Shade before the climb starts
    pub before_shade: ShadedSpan,
    /// Shade after the climb ends
    pub after_shade: ShadedSpan,
}

/// Work out the scoring window annotation for a visible time range.
///
/// # Arguments
/// * `samples` - Trajectory in chronological order
/// * `window_bottom` - Window bottom (m above ground) used for the search
/// * `range` - Visible time range `(lower, upper)` in seconds
///
/// # Returns
/// `None` when there is nothing to mark: no samples, no scoring window, or a
/// visible range that collapses to a single instant.
pub fn prepare_annotation(
    samples: &[DataPoint],
    window_bottom: f64,
    range: (f64, f64),
) -> Option<FlareAnnotation> {
    let window = find_window_bounds(samples, window_bottom)?;

    let x_min = interpolate_at_time(samples, range.0)?.t;
    let x_max = interpolate_at_time(samples, range.1)?.t;
    let width = x_max - x_min;
    if !width.is_finite() || width <= 0.0 {
        return None;
    }

    let line = |elevation: f64| ReferenceLine {
        x_start: x_min,
        x_end: x_max,
        elevation,
    };

    Some(FlareAnnotation {
        window,
        x_min,
        x_max,
        bottom_line: line(window.bottom.h_msl),
        top_line: line(window.top.h_msl),
        before_shade: ShadedSpan::full_height(
            -SHADE_OVERSHOOT,
            (window.bottom.t - x_min) / width,
        ),
        after_shade: ShadedSpan::full_height(
            (window.top.t - x_min) / width,
            1.0 + SHADE_OVERSHOOT,
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<DataPoint> {
        vec![
            DataPoint::new(-1.0, 4000.0, 3600.0),
            DataPoint::new(0.0, 4000.0, 3600.0),
            DataPoint::new(1.0, 4030.0, 3630.0),
            DataPoint::new(2.0, 4050.0, 3650.0),
            DataPoint::new(4.0, 4010.0, 3610.0),
        ]
    }

    #[test]
    fn test_annotation_geometry() {
        let annotation = prepare_annotation(&samples(), 2000.0, (0.0, 4.0)).unwrap();

        assert_eq!(annotation.window.bottom_index, 1);
        assert_eq!(annotation.window.top_index, 3);
        assert_eq!((annotation.x_min, annotation.x_max), (0.0, 4.0));

        assert_eq!(annotation.bottom_line.elevation, 4000.0);
        assert_eq!(annotation.top_line.elevation, 4050.0);
        assert_eq!(annotation.top_line.x_start, 0.0);
        assert_eq!(annotation.top_line.x_end, 4.0);

        assert_eq!(annotation.before_shade.x_start_ratio, -0.1);
        assert_eq!(annotation.before_shade.x_end_ratio, 0.0);
        assert_eq!(annotation.after_shade.x_start_ratio, 0.5);
        assert_eq!(annotation.after_shade.x_end_ratio, 1.1);
        assert_eq!(annotation.after_shade.y_start_ratio, -0.1);
        assert_eq!(annotation.after_shade.y_end_ratio, 1.1);
    }

    #[test]
    fn test_range_clamps_to_recording() {
        let annotation = prepare_annotation(&samples(), 2000.0, (-100.0, 100.0)).unwrap();
        assert_eq!((annotation.x_min, annotation.x_max), (-1.0, 4.0));
    }

    #[test]
    fn test_no_window_no_annotation() {
        assert!(prepare_annotation(&samples(), 5000.0, (0.0, 4.0)).is_none());
        assert!(prepare_annotation(&[], 2000.0, (0.0, 4.0)).is_none());
    }

    #[test]
    fn test_degenerate_range() {
        assert!(prepare_annotation(&samples(), 2000.0, (2.0, 2.0)).is_none());
        assert!(prepare_annotation(&samples(), 2000.0, (3.0, 1.0)).is_none());
    }
}
