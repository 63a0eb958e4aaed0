//! City name value object

use std::fmt;

use crate::errors::DomainError;

/// A caller-supplied city name, trimmed and non-empty
///
/// The requested spelling is preserved for display and for the snapshot's
/// `city` field; the lowercase [`normalized`](Self::normalized) form is the
/// cache key, so case variants of the same name share cache entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CityName {
    name: String,
    normalized: String,
}

impl CityName {
    /// Parse a raw city name, trimming surrounding whitespace
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCityName` if the trimmed name is empty
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidCityName(
                "must not be empty".to_string(),
            ));
        }
        Ok(Self {
            name: trimmed.to_string(),
            normalized: trimmed.to_lowercase(),
        })
    }

    /// The name as requested by the caller (trimmed)
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// Lowercase form used for cache keys
    #[must_use]
    pub fn normalized(&self) -> &str {
        &self.normalized
    }
}

impl fmt::Display for CityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl TryFrom<&str> for CityName {
    type Error = DomainError;

    fn try_from(raw: &str) -> Result<Self, Self::Error> {
        Self::parse(raw)
    }
}
