//! Concept builder for main-sheet rows.
//!
//! Each non-empty row of the `Codebook` sheet is validated and, if it
//! passes, turned into a [`Concept`]. A rejected row is dropped entirely,
//! which also means its code list is never read: errors inside a code
//! list only surface once the owning concept itself is valid.

use std::collections::BTreeMap;

use codebook_types::{Concept, EffectiveDate, StatusCode};

use crate::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink};
use crate::sheet::{Header, Row};
use crate::typo::TypoDictionary;

/// Expected columns in the main sheet, besides `description_<lang>`.
pub const CONCEPT_COLUMNS: &[&str] = &[
    "id",
    "codesystem",
    "code",
    "description_code",
    "codelist_ref",
    "properties",
    "parent",
    "data_type",
];

/// Prefix of the per-language description columns.
pub const DESCRIPTION_PREFIX: &str = "description_";

/// Header name of the description column for `language`.
pub fn description_column(language: &str) -> String {
    format!("{DESCRIPTION_PREFIX}{language}")
}

/// Cell text of one main-sheet row, by column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConceptRow<'a> {
    /// `id`
    pub id: &'a str,
    /// `codesystem`
    pub codesystem: &'a str,
    /// `code`
    pub code: &'a str,
    /// `description_code`
    pub description_code: &'a str,
    /// `codelist_ref`
    pub codelist_ref: &'a str,
    /// `properties`
    pub properties: &'a str,
    /// `parent`
    pub parent: &'a str,
    /// `data_type`
    pub data_type: &'a str,
}

impl<'a> ConceptRow<'a> {
    /// Reads the concept columns of `row` through `header`.
    pub fn extract(row: &'a Row, header: &Header) -> Self {
        Self {
            id: header.value(row, "id"),
            codesystem: header.value(row, "codesystem"),
            code: header.value(row, "code"),
            description_code: header.value(row, "description_code"),
            codelist_ref: header.value(row, "codelist_ref"),
            properties: header.value(row, "properties"),
            parent: header.value(row, "parent"),
            data_type: header.value(row, "data_type"),
        }
    }

    /// Runs every check and records one diagnostic per finding.
    ///
    /// Checks are not short-circuited. A probable codesystem typo is only
    /// a warning; duplicate ids and missing mandatory fields reject the row.
    pub fn validate(
        &self,
        already_present: bool,
        typos: &dyn TypoDictionary,
        version_label: &str,
        sink: &dyn DiagnosticSink,
    ) -> bool {
        let id = self.id;
        let mut is_valid = true;

        if already_present {
            sink.record(Diagnostic::error(
                version_label,
                DiagnosticKind::DuplicateIdentifier,
                format!("Concept: The identifier in the codebook must be unique {id}"),
            ));
            is_valid = false;
        }
        if let Some(suggestion) = typos.suggestion(self.codesystem) {
            sink.record(Diagnostic::warning(
                version_label,
                DiagnosticKind::ProbableTypo,
                format!(
                    "Concept: Codesystem found: {} for {id}. Did you mean {suggestion}?",
                    self.codesystem
                ),
            ));
        }
        if self.code.is_empty() {
            sink.record(Diagnostic::error(
                version_label,
                DiagnosticKind::MissingCode,
                format!("Concept: Mandatory code missing for concept {id}"),
            ));
            is_valid = false;
        }
        if self.codesystem.is_empty() {
            sink.record(Diagnostic::error(
                version_label,
                DiagnosticKind::MissingCodesystem,
                format!("Concept: Mandatory codesystem missing for concept {id}"),
            ));
            is_valid = false;
        }
        if self.description_code.is_empty() {
            sink.record(Diagnostic::error(
                version_label,
                DiagnosticKind::MissingCodeDescription,
                format!("Concept: Mandatory code description missing for concept {id}"),
            ));
            is_valid = false;
        }

        is_valid
    }
}

/// Builds concepts from main-sheet rows of one codebook.
pub struct ConceptBuilder<'a> {
    /// Header of the main sheet.
    pub header: &'a Header,
    /// Active languages.
    pub languages: &'a [String],
    /// Status stamped on every concept.
    pub status_code: StatusCode,
    /// Raw version label of the codebook.
    pub version_label: &'a str,
    /// Effective date of the codebook.
    pub effective_date: &'a EffectiveDate,
    /// Codesystem typo lookup.
    pub typos: &'a dyn TypoDictionary,
}

impl<'a> ConceptBuilder<'a> {
    /// Validates `row` and builds its concept.
    ///
    /// `is_known` reports whether an id is already in the codebook.
    /// Returns `None` for a rejected row; the reasons have been recorded.
    /// The returned concept has no code-list entries yet.
    pub fn build(
        &self,
        row: &Row,
        is_known: impl Fn(&str) -> bool,
        sink: &dyn DiagnosticSink,
    ) -> Option<Concept> {
        let fields = ConceptRow::extract(row, self.header);
        if !fields.validate(is_known(fields.id), self.typos, self.version_label, sink) {
            return None;
        }

        let language_descriptions: BTreeMap<String, String> = self
            .languages
            .iter()
            .map(|language| {
                let text = self.header.value(row, &description_column(language));
                (language.clone(), text.to_string())
            })
            .collect();

        Some(Concept {
            id: fields.id.to_string(),
            codesystem: fields.codesystem.to_string(),
            code: fields.code.to_string(),
            code_description: fields.description_code.to_string(),
            properties: fields.properties.to_string(),
            parent_id: non_empty(fields.parent),
            data_type: fields.data_type.to_string(),
            codelist_ref: non_empty(fields.codelist_ref),
            effective_date: self.effective_date.clone(),
            version_label: self.version_label.to_string(),
            status_code: self.status_code,
            language_descriptions,
            code_list_entries: Vec::new(),
        })
    }
}

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}
