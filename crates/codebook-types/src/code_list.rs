//! Code-list entry type.

use std::collections::BTreeMap;

/// One row of an auxiliary code-list sheet.
///
/// The attribute set is defined by the code-list sheet's own header row,
/// so entries are kept as an ordered attribute bag keyed by header name.
/// Entries are not required to be unique; duplicates are preserved in row
/// order.
///
/// # Examples
///
/// ```
/// use codebook_types::CodeListEntry;
///
/// let entry = CodeListEntry {
///     concept_id: "T1".to_string(),
///     codelist_ref: "tumour_types".to_string(),
///     attributes: vec![
///         ("code".to_string(), "M8140/3".to_string()),
///         ("description_code".to_string(), "Adenocarcinoma".to_string()),
///     ],
///     language_descriptions: Default::default(),
/// };
///
/// assert_eq!(entry.attribute("Code"), Some("M8140/3"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CodeListEntry {
    /// Identifier of the owning concept.
    pub concept_id: String,
    /// Name of the sheet this entry was read from.
    pub codelist_ref: String,
    /// `(header, value)` pairs in column order.
    pub attributes: Vec<(String, String)>,
    /// Description per active language (empty string when the cell was blank).
    pub language_descriptions: BTreeMap<String, String>,
}

impl CodeListEntry {
    /// Returns the value under `header`, compared case-insensitively.
    pub fn attribute(&self, header: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(header))
            .map(|(_, value)| value.as_str())
    }

    /// Returns the description for `language`, if that language was active.
    pub fn description(&self, language: &str) -> Option<&str> {
        self.language_descriptions
            .get(language)
            .map(String::as_str)
    }
}
