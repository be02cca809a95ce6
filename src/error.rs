//! Error types for editor configuration.
//!
//! Buffer and selection operations never fail: out-of-range coordinates are
//! clamped and missing lines are reported with `Option`. The only fallible
//! surface is validating host-supplied configuration.

use thiserror::Error;

/// Result type alias for fallible editor operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for editor configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A font metric is zero, negative, or not a finite number.
    #[error("invalid font metric {field}: {value}")]
    InvalidMetrics { field: &'static str, value: f32 },
    /// The viewport has a non-positive or non-finite dimension.
    #[error("invalid viewport: {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidMetrics {
            field: "line_height",
            value: 0.0,
        };
        assert_eq!(err.to_string(), "invalid font metric line_height: 0");

        let err = Error::InvalidViewport {
            width: 640.0,
            height: -1.0,
        };
        assert!(err.to_string().contains("640x-1"));
    }
}
