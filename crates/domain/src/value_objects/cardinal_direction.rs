//! Eight-point compass direction value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the eight compass points used for wind direction reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardinalDirection {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl CardinalDirection {
    const COMPASS: [Self; 8] = [
        Self::N,
        Self::NE,
        Self::E,
        Self::SE,
        Self::S,
        Self::SW,
        Self::W,
        Self::NW,
    ];

    /// Map meteorological degrees to the nearest compass point
    ///
    /// Computes `round((degrees mod 360) / 45) mod 8` into the compass table.
    /// Rounding follows `f64::round` (half away from zero), so the sector
    /// boundary 22.5° maps to `NE`. The Euclidean remainder keeps negative
    /// inputs in range, and 360° wraps back to `N`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_degrees(degrees: f64) -> Self {
        // rem_euclid keeps the sector index in 0..=8, so the cast is lossless
        let sector = (degrees.rem_euclid(360.0) / 45.0).round() as usize;
        Self::COMPASS[sector % 8]
    }

    /// Compass abbreviation as reported on the wire (e.g. "SW")
    #[must_use]
    pub const fn abbreviation(&self) -> &'static str {
        match self {
            Self::N => "N",
            Self::NE => "NE",
            Self::E => "E",
            Self::SE => "SE",
            Self::S => "S",
            Self::SW => "SW",
            Self::W => "W",
            Self::NW => "NW",
        }
    }
}

impl fmt::Display for CardinalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}
