//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// City name is empty or otherwise unusable
    #[error("Invalid city name: {0}")]
    InvalidCityName(String),

    /// Coordinates outside the valid latitude/longitude ranges
    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_city_name_error_message() {
        let err = DomainError::InvalidCityName("must not be empty".to_string());
        assert_eq!(err.to_string(), "Invalid city name: must not be empty");
    }

    #[test]
    fn invalid_coordinates_error_message() {
        let err = DomainError::InvalidCoordinates;
        assert!(err.to_string().contains("latitude"));
        assert!(err.to_string().contains("longitude"));
    }
}
