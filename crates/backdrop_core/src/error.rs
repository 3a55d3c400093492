//! Error types for scene configuration

use std::fmt;

/// A tunable in a [`SceneConfig`](crate::SceneConfig) that breaks an invariant
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    /// An update divisor of zero would divide by zero in the frame gate
    ZeroDivisor(&'static str),
    /// A range whose minimum exceeds its maximum
    InvertedRange(&'static str),
    /// A NaN or infinite constant
    NonFinite(&'static str),
    /// A value outside the range the field accepts
    OutOfRange { field: &'static str, value: f32 },
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValidationError::ZeroDivisor(field) => {
                write!(f, "Update divisor for {} must be at least 1", field)
            }
            ConfigValidationError::InvertedRange(field) => {
                write!(f, "Range {} has min greater than max", field)
            }
            ConfigValidationError::NonFinite(field) => {
                write!(f, "Value {} is not finite", field)
            }
            ConfigValidationError::OutOfRange { field, value } => {
                write!(f, "Value {} = {} is out of range", field, value)
            }
        }
    }
}

impl std::error::Error for ConfigValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_field() {
        let msg = ConfigValidationError::ZeroDivisor("star_field").to_string();
        assert!(msg.contains("star_field"));

        let msg = ConfigValidationError::OutOfRange { field: "camera.smoothing", value: 2.0 }.to_string();
        assert!(msg.contains("camera.smoothing"));
        assert!(msg.contains('2'));
    }
}
