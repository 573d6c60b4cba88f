//! Codebook concept type.
//!
//! This module provides the `Concept` struct representing one accepted
//! data row of a codebook's main sheet.

use std::collections::BTreeMap;

use crate::{CodeListEntry, EffectiveDate, StatusCode};

/// A single coded item (diagnosis, finding, property) from a codebook.
///
/// Concepts live in a flat map keyed by `id`; the tree formed by
/// `parent_id` is resolved lazily by consumers and may contain dangling
/// references or cycles.
///
/// # Examples
///
/// ```
/// use codebook_types::{Concept, EffectiveDate, StatusCode};
///
/// let concept = Concept {
///     id: "T1".to_string(),
///     codesystem: "PALGA-thesaurus".to_string(),
///     code: "P1234".to_string(),
///     code_description: "Tumour type".to_string(),
///     properties: String::new(),
///     parent_id: Some("ROOT".to_string()),
///     data_type: "code".to_string(),
///     codelist_ref: Some("tumour_types".to_string()),
///     effective_date: EffectiveDate::sentinel(),
///     version_label: "4".to_string(),
///     status_code: StatusCode::Draft,
///     language_descriptions: Default::default(),
///     code_list_entries: Vec::new(),
/// };
///
/// assert!(!concept.is_root());
/// assert_eq!(concept.codelist_ref.as_deref(), Some("tumour_types"));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Concept {
    /// External identifier, unique within the owning codebook.
    pub id: String,
    /// Name of the codesystem the code belongs to.
    pub codesystem: String,
    /// The code itself.
    pub code: String,
    /// Description of the code in the codebook's authoring language.
    pub code_description: String,
    /// Free-text properties column.
    pub properties: String,
    /// Identifier of the parent concept, if any.
    pub parent_id: Option<String>,
    /// Declared data type of the concept's value.
    pub data_type: String,
    /// Name of the auxiliary sheet holding this concept's code list.
    pub codelist_ref: Option<String>,
    /// Effective date copied from the owning codebook.
    pub effective_date: EffectiveDate,
    /// Raw version label copied from the owning codebook.
    pub version_label: String,
    /// Publication status copied from the run configuration.
    pub status_code: StatusCode,
    /// Description per active language (empty string when the cell was blank).
    pub language_descriptions: BTreeMap<String, String>,
    /// Code-list entries in sheet row order.
    pub code_list_entries: Vec<CodeListEntry>,
}

impl Concept {
    /// Returns the description for `language`, if that language was active.
    pub fn description(&self, language: &str) -> Option<&str> {
        self.language_descriptions
            .get(language)
            .map(String::as_str)
    }

    /// Returns true if this concept references a code-list sheet.
    pub fn has_code_list(&self) -> bool {
        self.codelist_ref.is_some()
    }

    /// Returns true if this concept declares no parent.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}
