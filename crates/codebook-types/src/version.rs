//! Numeric codebook version keys.
//!
//! Version labels are authored as free text but used as a sortable,
//! hashable key. Only finite decimal numbers are accepted.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// Error returned when a version label is not a finite number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidVersion(pub String);

impl std::fmt::Display for InvalidVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid version label: '{}' (expected a number)", self.0)
    }
}

impl std::error::Error for InvalidVersion {}

/// A numeric codebook version with a total order.
///
/// `-0.0` is normalised to `0.0` so both compare and hash equal.
///
/// # Examples
///
/// ```
/// use codebook_types::VersionKey;
///
/// let v33 = VersionKey::parse("33").unwrap();
/// let v4 = VersionKey::parse(" 4.1 ").unwrap();
/// assert!(v4 < v33);
/// assert!(VersionKey::parse("33b").is_err());
/// assert!(VersionKey::parse("NaN").is_err());
/// ```
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "f64", into = "f64"))]
pub struct VersionKey(f64);

impl VersionKey {
    /// The key malformed labels collapse onto.
    pub const ZERO: Self = Self(0.0);

    /// Creates a key from a finite number.
    pub fn new(value: f64) -> Result<Self, InvalidVersion> {
        if !value.is_finite() {
            return Err(InvalidVersion(value.to_string()));
        }
        // -0.0 == 0.0, so this maps both zeros onto +0.0
        Ok(Self(if value == 0.0 { 0.0 } else { value }))
    }

    /// Parses a version label such as `"33"` or `"4.1"`.
    pub fn parse(label: &str) -> Result<Self, InvalidVersion> {
        let value = label
            .trim()
            .parse::<f64>()
            .map_err(|_| InvalidVersion(label.to_string()))?;
        Self::new(value).map_err(|_| InvalidVersion(label.to_string()))
    }

    /// Returns the numeric value.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for VersionKey {
    fn default() -> Self {
        Self::ZERO
    }
}

impl PartialEq for VersionKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for VersionKey {}

impl PartialOrd for VersionKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VersionKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for VersionKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl TryFrom<f64> for VersionKey {
    type Error = InvalidVersion;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<VersionKey> for f64 {
    fn from(key: VersionKey) -> Self {
        key.0
    }
}

impl std::fmt::Display for VersionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_parse_numeric_labels() {
        assert_eq!(VersionKey::parse("33").unwrap().value(), 33.0);
        assert_eq!(VersionKey::parse("33.0").unwrap(), VersionKey::parse("33").unwrap());
        assert_eq!(VersionKey::parse("1.5").unwrap().value(), 1.5);
    }

    #[test]
    fn test_parse_rejects_text() {
        assert_eq!(
            VersionKey::parse("33b"),
            Err(InvalidVersion("33b".to_string()))
        );
        assert!(VersionKey::parse("").is_err());
        assert!(VersionKey::parse("inf").is_err());
        assert!(VersionKey::new(f64::NAN).is_err());
    }

    #[test]
    fn test_negative_zero_is_zero() {
        let neg = VersionKey::parse("-0").unwrap();
        assert_eq!(neg, VersionKey::ZERO);
        let set: BTreeSet<_> = [neg, VersionKey::ZERO].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_ordering() {
        let mut keys: Vec<_> = ["10", "2", "2.5", "0"]
            .iter()
            .map(|s| VersionKey::parse(s).unwrap())
            .collect();
        keys.sort();
        let values: Vec<f64> = keys.into_iter().map(VersionKey::value).collect();
        assert_eq!(values, vec![0.0, 2.0, 2.5, 10.0]);
        assert!(VersionKey::parse("10").unwrap() > VersionKey::parse("9.99").unwrap());
    }
}
