//! Codebook effective date.
//!
//! An effective date keeps both the parsed timestamp and its canonical
//! ISO-8601 text form, which is what downstream serializers emit.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, SubsecRound};

/// Fallback date used when the authored date cannot be parsed.
const SENTINEL_DATE: NaiveDate = match NaiveDate::from_ymd_opt(1900, 1, 1) {
    Some(date) => date,
    None => panic!("invalid sentinel date"),
};

/// The date from which a codebook version is considered in force.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use codebook_types::EffectiveDate;
///
/// let date = EffectiveDate::from_date(NaiveDate::from_ymd_opt(2021, 3, 15).unwrap());
/// assert_eq!(date.as_str(), "2021-03-15T00:00:00");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectiveDate {
    value: NaiveDateTime,
    text: String,
}

impl EffectiveDate {
    /// Canonical text form, ISO-8601 with seconds.
    pub const TEXT_FORMAT: &'static str = "%Y-%m-%dT%H:%M:%S";

    /// Creates an effective date from a timestamp. Sub-second precision is dropped.
    pub fn new(value: NaiveDateTime) -> Self {
        let value = value.trunc_subsecs(0);
        Self {
            text: value.format(Self::TEXT_FORMAT).to_string(),
            value,
        }
    }

    /// Creates an effective date at midnight of `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self::new(date.and_time(NaiveTime::MIN))
    }

    /// The fixed fallback date, 1900-01-01.
    pub fn sentinel() -> Self {
        Self::from_date(SENTINEL_DATE)
    }

    /// The local wall-clock time.
    pub fn now() -> Self {
        Self::new(Local::now().naive_local())
    }

    /// Returns the parsed timestamp.
    pub fn value(&self) -> NaiveDateTime {
        self.value
    }

    /// Returns the calendar date part.
    pub fn date(&self) -> NaiveDate {
        self.value.date()
    }

    /// Returns the canonical text form.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns true if this is the 1900-01-01 fallback.
    pub fn is_sentinel(&self) -> bool {
        self.value.date() == SENTINEL_DATE
    }
}

impl std::fmt::Display for EffectiveDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel() {
        let date = EffectiveDate::sentinel();
        assert!(date.is_sentinel());
        assert_eq!(date.as_str(), "1900-01-01T00:00:00");
        assert_eq!(date.date(), NaiveDate::from_ymd_opt(1900, 1, 1).unwrap());
    }

    #[test]
    fn test_text_form_drops_subseconds() {
        let value = NaiveDate::from_ymd_opt(2021, 3, 15)
            .unwrap()
            .and_hms_milli_opt(14, 5, 9, 750)
            .unwrap();
        let date = EffectiveDate::new(value);
        assert_eq!(date.as_str(), "2021-03-15T14:05:09");
        assert_eq!(date.to_string(), "2021-03-15T14:05:09");
        assert!(!date.is_sentinel());
    }
}
