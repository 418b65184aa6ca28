//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Message is empty")]
    EmptyMessage,

    #[error("Music query is empty")]
    EmptyQuery,

    #[error("Invalid threshold: {0} (must be within 0.0..=1.0)")]
    InvalidThreshold(f64),
}

/// Check that a confidence threshold lies in `[0, 1]`.
pub fn validate_threshold(threshold: f64) -> Result<f64, DomainError> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(threshold)
    } else {
        Err(DomainError::InvalidThreshold(threshold))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(DomainError::EmptyMessage.to_string(), "Message is empty");
        assert_eq!(
            DomainError::InvalidThreshold(1.5).to_string(),
            "Invalid threshold: 1.5 (must be within 0.0..=1.0)"
        );
    }

    #[test]
    fn test_validate_threshold() {
        assert_eq!(validate_threshold(0.3), Ok(0.3));
        assert_eq!(validate_threshold(0.0), Ok(0.0));
        assert_eq!(validate_threshold(1.0), Ok(1.0));
        assert!(validate_threshold(-0.1).is_err());
        assert!(validate_threshold(f64::NAN).is_err());
    }
}
