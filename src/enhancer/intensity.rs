//! Enhancement intensity levels

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_INTENSITY: u8 = 1;
pub const MAX_INTENSITY: u8 = 5;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("intensity must be between 1 and 5, got {0}")]
pub struct IntensityError(pub i64);

/// How aggressively a rewrite departs from the original, 1 to 5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Intensity(u8);

impl Intensity {
    pub fn new(level: i64) -> Result<Self, IntensityError> {
        if (MIN_INTENSITY as i64..=MAX_INTENSITY as i64).contains(&level) {
            Ok(Self(level as u8))
        } else {
            Err(IntensityError(level))
        }
    }

    pub fn level(self) -> u8 {
        self.0
    }

    /// Descriptor embedded verbatim into the generation request
    pub fn descriptor(self) -> &'static str {
        match self.0 {
            1 => "Subtle & Conservative: Minimal changes, focused on basic grammar and slight clarity improvements.",
            2 => "Modest: Light enhancements to vocabulary and flow without changing the core structure.",
            3 => "Balanced: Standard professional enhancement with good descriptive depth and structural optimization.",
            4 => "High: Significant creative flourishes, advanced vocabulary, and strong atmospheric/technical expansion.",
            _ => "Maximum / Extreme: Full transformation. Highly evocative, incredibly detailed, and deeply immersive or technically dense.",
        }
    }

    /// Short display label
    pub fn label(self) -> &'static str {
        match self.0 {
            1 => "Subtle",
            2 => "Light",
            3 => "Balanced",
            4 => "High",
            _ => "Extreme",
        }
    }
}

impl Default for Intensity {
    fn default() -> Self {
        Self(3)
    }
}

impl TryFrom<u8> for Intensity {
    type Error = IntensityError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value as i64)
    }
}

impl From<Intensity> for u8 {
    fn from(value: Intensity) -> Self {
        value.0
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, MAX_INTENSITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_is_rejected() {
        assert_eq!(Intensity::new(0), Err(IntensityError(0)));
        assert_eq!(Intensity::new(6), Err(IntensityError(6)));
        assert!(Intensity::try_from(9u8).is_err());
    }

    #[test]
    fn test_descriptors_and_labels() {
        let balanced = Intensity::default();
        assert_eq!(balanced.level(), 3);
        assert!(balanced.descriptor().starts_with("Balanced:"));
        assert_eq!(balanced.label(), "Balanced");
        assert_eq!(balanced.to_string(), "3/5");

        let max = Intensity::new(5).unwrap();
        assert!(max.descriptor().starts_with("Maximum / Extreme:"));
        assert_eq!(max.label(), "Extreme");
    }
}
