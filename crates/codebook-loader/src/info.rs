//! Info sheet parser.
//!
//! The Info sheet is a two-column key/value block:
//!
//! ```text
//! version                  33
//! effectiveDate            2021-03-15
//! DatasetName_nl           PALGA colonbiopt protocol versie 33
//! DatasetDescription_nl    Versie 33 van het PALGA colonbiopt protocol
//! ```

use std::collections::HashMap;

use chrono::NaiveDate;
use codebook_types::{EffectiveDate, LanguageSettings};

use crate::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink};
use crate::sheet::Sheet;

/// Key holding the version label.
pub const VERSION_KEY: &str = "version";
/// Key holding the effective date.
pub const EFFECTIVE_DATE_KEY: &str = "effectiveDate";
/// Prefix of the per-language dataset description keys.
pub const DATASET_DESCRIPTION_PREFIX: &str = "DatasetDescription_";
/// Accepted effective-date format.
pub const EFFECTIVE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Case-insensitive key/value lookup built from an Info sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfoBlock {
    values: HashMap<String, String>,
}

impl InfoBlock {
    /// Reads columns 0 and 1 of every non-empty row. Later keys overwrite earlier ones.
    pub fn from_sheet(sheet: &Sheet) -> Self {
        let mut values = HashMap::new();
        for row in sheet.non_empty_rows() {
            values.insert(row.cell(0).to_lowercase(), row.cell(1).to_string());
        }
        Self { values }
    }

    /// Looks up `key`, ignoring case.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(&key.to_lowercase()).map(String::as_str)
    }

    /// Returns true if `key` is present, ignoring case.
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(&key.to_lowercase())
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the sheet held no keys.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The raw version label; `""` when absent.
    pub fn version_label(&self) -> &str {
        self.get(VERSION_KEY).unwrap_or("")
    }

    /// Resolves the effective date.
    ///
    /// An unparsable date falls back to 1900-01-01 and records an error.
    /// A missing date falls back to the current time and records a warning.
    pub fn effective_date(&self, version_label: &str, sink: &dyn DiagnosticSink) -> EffectiveDate {
        let Some(text) = self.get(EFFECTIVE_DATE_KEY) else {
            sink.record(Diagnostic::warning(
                version_label,
                DiagnosticKind::MissingEffectiveDate,
                "Warning: The effective date is not available in the Info sheet (yyyy-mm-dd). Setting it to today...",
            ));
            return EffectiveDate::now();
        };

        match NaiveDate::parse_from_str(text.trim(), EFFECTIVE_DATE_FORMAT) {
            Ok(date) => EffectiveDate::from_date(date),
            Err(_) => {
                sink.record(Diagnostic::error(
                    version_label,
                    DiagnosticKind::InvalidEffectiveDate,
                    format!(
                        "Severe Error: The effective date is not in the correct format {text}"
                    ),
                ));
                EffectiveDate::sentinel()
            }
        }
    }

    /// Dataset settings for `language`.
    ///
    /// Both the name and the description are read from
    /// `DatasetDescription_<language>`; `DatasetName_<language>` is not
    /// consulted. Absent keys yield empty text.
    pub fn language_settings(&self, language: &str) -> LanguageSettings {
        let description = self
            .get(&format!("{DATASET_DESCRIPTION_PREFIX}{language}"))
            .unwrap_or("");
        LanguageSettings::new(description, description)
    }
}
