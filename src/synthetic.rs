//! Synthetic trajectories for deterministic testing.
//!
//! Generates an idealized jump: level flight before exit, a straight dive,
//! one linear flare, then a constant-rate descent to the ground. The flare
//! is the only climb, so its gain is the expected score whenever it happens
//! above the window bottom.

use crate::DataPoint;

/// Recording cut-off after the flare, for parameters that never land.
const MAX_SECONDS_AFTER_FLARE: f64 = 3600.0;

/// Parameters of a synthetic jump. Times in seconds, heights in meters.
#[derive(Debug, Clone)]
pub struct SyntheticFlare {
    /// Ground elevation above sea level
    pub ground_msl: f64,
    /// Height above ground at exit
    pub exit_agl: f64,
    /// Seconds of level flight recorded before exit
    pub pre_exit_seconds: f64,
    /// Seconds of diving between exit and the flare
    pub dive_seconds: f64,
    /// Vertical speed while diving and after the flare (m/s, positive down)
    pub descent_rate: f64,
    /// Altitude gained by the flare
    pub flare_gain: f64,
    /// Duration of the flare
    pub flare_seconds: f64,
    /// Samples per second
    pub sample_rate_hz: f64,
}

impl Default for SyntheticFlare {
    fn default() -> Self {
        Self {
            ground_msl: 500.0,
            exit_agl: 4000.0,
            pre_exit_seconds: 10.0,
            dive_seconds: 6.0,
            descent_rate: 50.0,
            flare_gain: 80.0,
            flare_seconds: 4.0,
            sample_rate_hz: 5.0,
        }
    }
}

impl SyntheticFlare {
    /// Jump whose flare bottoms out at `agl` above ground.
    pub fn flaring_at(agl: f64) -> Self {
        let base = Self::default();
        Self {
            dive_seconds: (base.exit_agl - agl) / base.descent_rate,
            ..base
        }
    }

    /// Time the flare starts (lowest point of the dive).
    pub fn flare_start(&self) -> f64 {
        self.dive_seconds
    }

    /// Time the flare ends (highest point of the climb).
    pub fn flare_end(&self) -> f64 {
        self.dive_seconds + self.flare_seconds
    }

    /// Height above ground at the start of the flare.
    pub fn flare_bottom_agl(&self) -> f64 {
        self.exit_agl - self.descent_rate * self.dive_seconds
    }

    /// Height above ground at the end of the flare.
    pub fn flare_top_agl(&self) -> f64 {
        self.flare_bottom_agl() + self.flare_gain
    }

    /// Score expected when the flare stays above the window bottom.
    pub fn expected_gain(&self) -> f64 {
        self.flare_gain
    }

    fn agl_at(&self, t: f64) -> f64 {
        if t < 0.0 {
            self.exit_agl
        } else if t < self.flare_start() {
            self.exit_agl - self.descent_rate * t
        } else if t < self.flare_end() {
            self.flare_bottom_agl()
                + self.flare_gain * (t - self.flare_start()) / self.flare_seconds
        } else {
            self.flare_top_agl() - self.descent_rate * (t - self.flare_end())
        }
    }

    /// Generate samples from the start of the recording until landing.
    pub fn generate(&self) -> Vec<DataPoint> {
        let hz = self.sample_rate_hz;
        let first = -(self.pre_exit_seconds * hz).round() as i64;

        let mut samples = Vec::new();
        let mut k = first;
        loop {
            let t = k as f64 / hz;
            let agl = self.agl_at(t).max(0.0);
            samples.push(DataPoint::new(t, self.ground_msl + agl, agl));
            let after_flare = t - self.flare_end();
            if (agl <= 0.0 && after_flare > 0.0) || after_flare >= MAX_SECONDS_AFTER_FLARE {
                break;
            }
            k += 1;
        }
        samples
    }
}
