//! # Flare Window Search
//!
//! Locates the pair of samples that bound the largest altitude gain inside
//! the scoring window, using a single backward pass over the trajectory.
//!
//! The scan runs from the last sample towards the first and keeps two
//! things apart:
//!
//! - the **best pair** found so far (`bottom`/`top`), and
//! - the **run**, an ascending stretch still being extended backwards.
//!
//! Every sample below the window bottom (height above ground) re-anchors
//! both the best pair and the run on itself, so only gains made above the
//! window bottom and before the trajectory first drops below it survive.
//! The scan stops right after the first sample recorded before exit
//! (`t < 0`), which is itself still considered.
//!
//! ## Example
//! ```rust
//! use flare_scoring::{find_window_bounds, DataPoint};
//!
//! let samples = vec![
//!     DataPoint::new(-1.0, 3000.0, 3000.0),
//!     DataPoint::new(0.0, 3000.0, 3000.0),
//!     DataPoint::new(1.0, 3040.0, 3040.0),
//!     DataPoint::new(2.0, 3010.0, 3010.0),
//!     DataPoint::new(3.0, 1900.0, 1900.0),
//! ];
//!
//! let window = find_window_bounds(&samples, 2000.0).unwrap();
//! assert_eq!(window.gain(), 40.0);
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use crate::DataPoint;

/// The samples bounding the largest altitude gain in the scoring window.
///
/// `bottom` never comes after `top` and `top.h_msl > bottom.h_msl` always
/// holds for a window returned by [`find_window_bounds`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct FlareWindow {
    /// Lowest sample of the climb
    pub bottom: DataPoint,
    /// Highest sample of the climb
    pub top: DataPoint,
    /// Index of `bottom` in the scanned sequence
    pub bottom_index: u64,
    /// Index of `top` in the scanned sequence
    pub top_index: u64,
}

impl FlareWindow {
    /// Altitude gained between bottom and top, in meters.
    pub fn gain(&self) -> f64 {
        self.top.h_msl - self.bottom.h_msl
    }

    /// Time between bottom and top, in seconds.
    pub fn duration(&self) -> f64 {
        self.top.t - self.bottom.t
    }
}

/// In-progress ascending stretch, as indices into the sample slice.
#[derive(Debug, Clone, Copy)]
struct Run {
    bottom: usize,
    top: usize,
    h_bottom: f64,
    h_top: f64,
}

impl Run {
    fn at(index: usize, h_msl: f64) -> Self {
        Self {
            bottom: index,
            top: index,
            h_bottom: h_msl,
            h_top: h_msl,
        }
    }

    fn gain(&self) -> f64 {
        self.h_top - self.h_bottom
    }
}

/// Find the bottom/top samples of the largest climb in the scoring window.
///
/// # Arguments
/// * `samples` - Trajectory in chronological order, `t` relative to exit
/// * `window_bottom` - Height above ground (m) below which samples re-anchor the search
///
/// # Returns
/// `None` when the sequence is empty or the best gain is zero or negative.
/// O(n) time and O(1) extra space.
pub fn find_window_bounds(samples: &[DataPoint], window_bottom: f64) -> Option<FlareWindow> {
    let last = samples.len().checked_sub(1)?;

    let mut best_bottom = last;
    let mut best_top = last;
    let mut prev = last;
    let mut run = Run::at(last, samples[last].h_msl);

    for i in (0..=last).rev() {
        let dp = &samples[i];

        if i == last || dp.z < window_bottom {
            best_bottom = i;
            best_top = i;
            prev = i;
        }

        if dp.h_msl < samples[prev].h_msl {
            run.bottom = i;
            run.h_bottom = dp.h_msl;
        } else {
            run = Run::at(i, dp.h_msl);
        }

        if run.gain() > samples[best_top].h_msl - samples[best_bottom].h_msl {
            best_bottom = run.bottom;
            best_top = run.top;
        }

        prev = i;

        if dp.t < 0.0 {
            debug!("[FlareWindow] Reached exit at index {} (t={}s)", i, dp.t);
            break;
        }
    }

    let bottom = samples[best_bottom];
    let top = samples[best_top];

    if top.h_msl > bottom.h_msl {
        debug!(
            "[FlareWindow] Window {}..{} gains {:.1}m",
            best_bottom,
            best_top,
            top.h_msl - bottom.h_msl
        );
        Some(FlareWindow {
            bottom,
            top,
            bottom_index: best_bottom as u64,
            top_index: best_top as u64,
        })
    } else {
        None
    }
}
