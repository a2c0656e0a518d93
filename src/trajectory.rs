//! Sample sequence construction and interpolation.
//!
//! Hosts hand trajectories over either as flat `[t, h_msl, z, ...]` buffers
//! (cheap across FFI) or as JSON arrays of samples. Scoring never requires
//! validation; [`validate_samples`] is there for hosts that want to reject
//! broken logs up front.

use log::debug;

use crate::error::{Result, ScoringError};
use crate::DataPoint;

/// Values per sample in a flat buffer: t, h_msl, z.
pub const FLAT_STRIDE: usize = 3;

/// Build samples from a flat buffer `[t1, h_msl1, z1, t2, h_msl2, z2, ...]`.
pub fn samples_from_flat(flat: &[f64]) -> Result<Vec<DataPoint>> {
    if flat.len() % FLAT_STRIDE != 0 {
        return Err(ScoringError::InvalidBuffer {
            length: flat.len(),
            stride: FLAT_STRIDE,
        });
    }

    Ok(flat
        .chunks_exact(FLAT_STRIDE)
        .map(|chunk| DataPoint::new(chunk[0], chunk[1], chunk[2]))
        .collect())
}

/// Flatten samples into `[t, h_msl, z, ...]`.
pub fn samples_to_flat(samples: &[DataPoint]) -> Vec<f64> {
    samples.iter().flat_map(|p| [p.t, p.h_msl, p.z]).collect()
}

/// Parse samples from a JSON array of `{"t", "h_msl", "z"}` objects.
pub fn samples_from_json(json: &str) -> Result<Vec<DataPoint>> {
    let samples: Vec<DataPoint> = serde_json::from_str(json)?;
    debug!("[Trajectory] Parsed {} samples from JSON", samples.len());
    Ok(samples)
}

/// Check that all values are finite and time never goes backwards.
pub fn validate_samples(samples: &[DataPoint]) -> Result<()> {
    for (index, p) in samples.iter().enumerate() {
        let field = if !p.t.is_finite() {
            Some("t")
        } else if !p.h_msl.is_finite() {
            Some("h_msl")
        } else if !p.z.is_finite() {
            Some("z")
        } else {
            None
        };
        if let Some(field) = field {
            return Err(ScoringError::NonFiniteValue { index, field });
        }

        if index > 0 {
            let previous_t = samples[index - 1].t;
            if p.t < previous_t {
                return Err(ScoringError::UnorderedSamples {
                    index,
                    previous_t,
                    t: p.t,
                });
            }
        }
    }
    Ok(())
}

/// Linearly interpolate a sample at time `t`.
///
/// Times outside the recorded range clamp to the first or last sample.
/// Returns `None` for an empty sequence.
pub fn interpolate_at_time(samples: &[DataPoint], t: f64) -> Option<DataPoint> {
    let first = samples.first()?;
    let last = samples.last()?;

    if t.is_nan() {
        return None;
    }
    if samples.len() == 1 || t <= first.t {
        return Some(*first);
    }
    if t >= last.t {
        return Some(*last);
    }

    // First sample strictly after t; clamped in case of NaN times in the log
    let upper = samples
        .partition_point(|p| p.t <= t)
        .clamp(1, samples.len() - 1);
    let a = samples[upper - 1];
    let b = samples[upper];

    let span = b.t - a.t;
    if span <= 0.0 {
        return Some(a);
    }
    let ratio = (t - a.t) / span;

    Some(DataPoint {
        t,
        h_msl: a.h_msl + (b.h_msl - a.h_msl) * ratio,
        z: a.z + (b.z - a.z) * ratio,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track() -> Vec<DataPoint> {
        vec![
            DataPoint::new(0.0, 4000.0, 3600.0),
            DataPoint::new(1.0, 4010.0, 3610.0),
            DataPoint::new(3.0, 3990.0, 3590.0),
        ]
    }

    #[test]
    fn test_samples_from_flat() {
        let samples = samples_from_flat(&[0.0, 4000.0, 3600.0, 1.0, 4010.0, 3610.0]).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1], DataPoint::new(1.0, 4010.0, 3610.0));

        assert!(samples_from_flat(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_samples_from_flat_bad_length() {
        assert_eq!(
            samples_from_flat(&[0.0, 4000.0]),
            Err(ScoringError::InvalidBuffer {
                length: 2,
                stride: 3
            })
        );
    }

    #[test]
    fn test_flat_round_trip() {
        let samples = track();
        assert_eq!(samples_from_flat(&samples_to_flat(&samples)).unwrap(), samples);
    }

    #[test]
    fn test_samples_from_json() {
        let json = r#"[
            {"t": -1.0, "h_msl": 4000.0, "z": 3600.0},
            {"t": 0.0, "h_msl": 4005.0, "z": 3605.0}
        ]"#;
        let samples = samples_from_json(json).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].t, -1.0);

        assert!(matches!(
            samples_from_json(r#"[{"t": 1.0}]"#),
            Err(ScoringError::Serialization { .. })
        ));
    }

    #[test]
    fn test_validate_samples() {
        assert!(validate_samples(&track()).is_ok());
        assert!(validate_samples(&[]).is_ok());

        let mut bad = track();
        bad[1].z = f64::NAN;
        assert_eq!(
            validate_samples(&bad),
            Err(ScoringError::NonFiniteValue {
                index: 1,
                field: "z"
            })
        );

        let mut unordered = track();
        unordered[2].t = 0.5;
        assert!(matches!(
            validate_samples(&unordered),
            Err(ScoringError::UnorderedSamples { index: 2, .. })
        ));
    }

    #[test]
    fn test_interpolate_at_time() {
        let samples = track();

        let mid = interpolate_at_time(&samples, 2.0).unwrap();
        assert_eq!(mid.t, 2.0);
        assert!((mid.h_msl - 4000.0).abs() < 1e-9);
        assert!((mid.z - 3600.0).abs() < 1e-9);

        let exact = interpolate_at_time(&samples, 1.0).unwrap();
        assert_eq!(exact, samples[1]);
    }

    #[test]
    fn test_interpolate_clamps() {
        let samples = track();
        assert_eq!(interpolate_at_time(&samples, -10.0), Some(samples[0]));
        assert_eq!(interpolate_at_time(&samples, 10.0), Some(samples[2]));
        assert_eq!(interpolate_at_time(&[], 1.0), None);
        assert_eq!(interpolate_at_time(&samples, f64::NAN), None);
    }
}
