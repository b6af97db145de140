//! Warning threshold types

use crate::utils::PolicyError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Threshold used when neither an override nor a global default is configured
pub const FALLBACK_THRESHOLD: Threshold = Threshold(1);

/// A warning threshold in days, always at least 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct Threshold(u32);

impl Threshold {
    /// Validate a day count
    pub fn new(days: i64) -> Result<Self, PolicyError> {
        if days < 1 {
            return Err(PolicyError::validation(
                days,
                "threshold must be greater than or equal to 1",
            ));
        }
        u32::try_from(days)
            .map(Threshold)
            .map_err(|_| PolicyError::validation(days, "threshold is too large"))
    }

    /// Number of days
    pub fn days(self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for Threshold {
    type Error = PolicyError;

    fn try_from(days: i64) -> Result<Self, Self::Error> {
        Threshold::new(days)
    }
}

impl From<Threshold> for u32 {
    fn from(threshold: Threshold) -> Self {
        threshold.0
    }
}

impl FromStr for Threshold {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let days: i64 = trimmed
            .parse()
            .map_err(|_| PolicyError::validation(s, "threshold must be an integer"))?;
        Threshold::new(days)
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 1 {
            write!(f, "1 day")
        } else {
            write!(f, "{} days", self.0)
        }
    }
}

/// Anything a caller may hand to the policy store as a threshold.
///
/// Validation happens before the store is touched, so a rejected value
/// never reaches persistence.
pub trait IntoThreshold {
    fn into_threshold(self) -> Result<Threshold, PolicyError>;
}

impl IntoThreshold for Threshold {
    fn into_threshold(self) -> Result<Threshold, PolicyError> {
        Ok(self)
    }
}

impl IntoThreshold for i64 {
    fn into_threshold(self) -> Result<Threshold, PolicyError> {
        Threshold::new(self)
    }
}

impl IntoThreshold for i32 {
    fn into_threshold(self) -> Result<Threshold, PolicyError> {
        Threshold::new(i64::from(self))
    }
}

impl IntoThreshold for u32 {
    fn into_threshold(self) -> Result<Threshold, PolicyError> {
        Threshold::new(i64::from(self))
    }
}

impl IntoThreshold for f64 {
    fn into_threshold(self) -> Result<Threshold, PolicyError> {
        if !self.is_finite() || self.fract() != 0.0 {
            return Err(PolicyError::validation(self, "threshold must be an integer"));
        }
        if self < 1.0 || self > f64::from(u32::MAX) {
            return Err(PolicyError::validation(
                self,
                "threshold must be greater than or equal to 1",
            ));
        }
        Threshold::new(self as i64)
    }
}

impl IntoThreshold for &str {
    fn into_threshold(self) -> Result<Threshold, PolicyError> {
        self.parse()
    }
}

impl IntoThreshold for String {
    fn into_threshold(self) -> Result<Threshold, PolicyError> {
        self.parse()
    }
}

/// Where an effective threshold came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdSource {
    Override,
    GlobalDefault,
    Fallback,
    /// Supplied directly by the caller
    Explicit,
}

impl fmt::Display for ThresholdSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThresholdSource::Override => write!(f, "domain override"),
            ThresholdSource::GlobalDefault => write!(f, "global default"),
            ThresholdSource::Fallback => write!(f, "built-in fallback"),
            ThresholdSource::Explicit => write!(f, "explicit"),
        }
    }
}

/// Effective threshold for a hostname
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub threshold: Threshold,
    pub source: ThresholdSource,
}

/// Snapshot of the whole stored policy
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ThresholdPolicy {
    pub global_default: Option<Threshold>,
    pub overrides: BTreeMap<String, Threshold>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_values_below_one() {
        assert!(Threshold::new(0).is_err());
        assert!(Threshold::new(-5).is_err());
        assert_eq!(Threshold::new(1).unwrap().days(), 1);
    }

    #[test]
    fn test_parse_requires_integer() {
        assert_eq!("30".parse::<Threshold>().unwrap().days(), 30);
        assert_eq!(" 7 ".parse::<Threshold>().unwrap().days(), 7);
        assert!("abc".parse::<Threshold>().is_err());
        assert!("2.5".parse::<Threshold>().is_err());
        assert!("".parse::<Threshold>().is_err());
    }

    #[test]
    fn test_float_input() {
        assert_eq!(3.0f64.into_threshold().unwrap().days(), 3);
        assert!(2.5f64.into_threshold().is_err());
        assert!(f64::NAN.into_threshold().is_err());
        assert!(0.0f64.into_threshold().is_err());
    }

    #[test]
    fn test_serde_revalidates() {
        let t: Threshold = serde_json::from_str("14").unwrap();
        assert_eq!(t.days(), 14);
        assert_eq!(serde_json::to_string(&t).unwrap(), "14");
        assert!(serde_json::from_str::<Threshold>("0").is_err());
        assert!(serde_json::from_str::<Threshold>("\"5\"").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(FALLBACK_THRESHOLD.to_string(), "1 day");
        assert_eq!(Threshold::new(30).unwrap().to_string(), "30 days");
    }
}
