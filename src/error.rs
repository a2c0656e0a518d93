//! Unified error handling for the flare-scoring library.
//!
//! The scoring core itself is total: finding a window or computing a score
//! never fails. Errors only come from the edges, when a host hands us a
//! malformed sample buffer or an unusable configuration.

use std::fmt;

/// Unified error type for flare-scoring operations.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoringError {
    /// Flat sample buffer does not divide into whole samples
    InvalidBuffer { length: usize, stride: usize },
    /// A sample carries NaN or infinite values
    NonFiniteValue { index: usize, field: &'static str },
    /// Sample times go backwards between neighbours
    UnorderedSamples {
        index: usize,
        previous_t: f64,
        t: f64,
    },
    /// Configuration error
    ConfigError { message: String },
    /// JSON (de)serialization error
    Serialization { message: String },
}

impl fmt::Display for ScoringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringError::InvalidBuffer { length, stride } => {
                write!(
                    f,
                    "Sample buffer has {} values, not a multiple of {}",
                    length, stride
                )
            }
            ScoringError::NonFiniteValue { index, field } => {
                write!(f, "Sample {} has a non-finite {}", index, field)
            }
            ScoringError::UnorderedSamples {
                index,
                previous_t,
                t,
            } => {
                write!(
                    f,
                    "Sample {} at t={}s precedes its predecessor at t={}s",
                    index, t, previous_t
                )
            }
            ScoringError::ConfigError { message } => {
                write!(f, "Configuration error: {}", message)
            }
            ScoringError::Serialization { message } => {
                write!(f, "Serialization error: {}", message)
            }
        }
    }
}

impl std::error::Error for ScoringError {}

impl From<serde_json::Error> for ScoringError {
    fn from(err: serde_json::Error) -> Self {
        ScoringError::Serialization {
            message: err.to_string(),
        }
    }
}

/// Result type alias for flare-scoring operations.
pub type Result<T> = std::result::Result<T, ScoringError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ScoringError::InvalidBuffer {
            length: 7,
            stride: 3,
        };
        assert!(err.to_string().contains("7 values"));
        assert!(err.to_string().contains("multiple of 3"));

        let err = ScoringError::UnorderedSamples {
            index: 4,
            previous_t: 2.0,
            t: 1.5,
        };
        assert!(err.to_string().contains("Sample 4"));
    }

    #[test]
    fn test_every_variant_has_a_message() {
        let errors = [
            ScoringError::InvalidBuffer {
                length: 4,
                stride: 3,
            },
            ScoringError::NonFiniteValue {
                index: 0,
                field: "z",
            },
            ScoringError::UnorderedSamples {
                index: 1,
                previous_t: 1.0,
                t: 0.0,
            },
            ScoringError::ConfigError {
                message: "bad".to_string(),
            },
            ScoringError::Serialization {
                message: "bad".to_string(),
            },
        ];
        for err in errors {
            // Exhaustive: only input and configuration failures exist
            let kind = match &err {
                ScoringError::InvalidBuffer { .. } => "buffer",
                ScoringError::NonFiniteValue { .. } => "value",
                ScoringError::UnorderedSamples { .. } => "order",
                ScoringError::ConfigError { .. } => "config",
                ScoringError::Serialization { .. } => "json",
            };
            assert!(!err.to_string().is_empty(), "{}", kind);
        }
    }

    #[test]
    fn test_from_json_error() {
        let err: ScoringError = serde_json::from_str::<f64>("not json").unwrap_err().into();
        assert!(matches!(err, ScoringError::Serialization { .. }));
    }
}
