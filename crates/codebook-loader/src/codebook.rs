//! Codebook aggregate.
//!
//! One [`Codebook`] holds everything read from one workbook: the Info
//! block results, the main sheet's header and the accepted concepts in
//! insertion order. It is immutable once ingestion finishes.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use codebook_types::{Concept, EffectiveDate, LanguageSettings, VersionKey};

use crate::code_list::attach_code_list;
use crate::concept::{ConceptBuilder, CONCEPT_COLUMNS};
use crate::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink};
use crate::info::InfoBlock;
use crate::sheet::{Header, Sheet, Workbook};
use crate::typo::{KnownCodesystems, TypoDictionary};
use crate::types::{CodebookError, CodebookResult, IngestStats, RunConfig, SheetError};
use crate::xlsx::XlsxWorkbook;

/// Name of the key/value metadata sheet.
pub const INFO_SHEET: &str = "Info";
/// Name of the main concept sheet.
pub const CODEBOOK_SHEET: &str = "Codebook";

/// One version's parsed set of concepts plus metadata.
#[derive(Debug, Clone)]
pub struct Codebook {
    version_label: String,
    version: VersionKey,
    effective_date: EffectiveDate,
    header: Header,
    language_settings: BTreeMap<String, LanguageSettings>,
    concepts: Vec<Concept>,
    index: HashMap<String, usize>,
    stats: IngestStats,
}

impl Codebook {
    /// Reads the `.xlsx` workbook at `path`.
    ///
    /// The workbook is closed before this returns, on success or failure.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened, the `Info` or
    /// `Codebook` sheet is missing, or a sheet cannot be decoded.
    pub fn read_from<P: AsRef<Path>>(
        path: P,
        config: &RunConfig,
        sink: &dyn DiagnosticSink,
    ) -> CodebookResult<Self> {
        let mut workbook = XlsxWorkbook::open(path)?;
        Self::from_workbook(&mut workbook, config, sink)
    }

    /// Reads a codebook from any tabular source using the built-in typo dictionary.
    pub fn from_workbook<W: Workbook + ?Sized>(
        workbook: &mut W,
        config: &RunConfig,
        sink: &dyn DiagnosticSink,
    ) -> CodebookResult<Self> {
        Self::from_workbook_with(workbook, config, &KnownCodesystems, sink)
    }

    /// Reads a codebook from any tabular source.
    ///
    /// Row-level problems are recorded on `sink` and never abort the read.
    pub fn from_workbook_with<W: Workbook + ?Sized>(
        workbook: &mut W,
        config: &RunConfig,
        typos: &dyn TypoDictionary,
        sink: &dyn DiagnosticSink,
    ) -> CodebookResult<Self> {
        config.validate()?;

        let info_sheet = required_sheet(workbook, INFO_SHEET)?;
        let info = InfoBlock::from_sheet(&info_sheet);
        let version_label = info.version_label().to_string();
        let effective_date = info.effective_date(&version_label, sink);
        let version = coerce_version(&version_label, sink);

        let language_settings = config
            .languages
            .iter()
            .map(|language| (language.clone(), info.language_settings(language)))
            .collect();

        let sheet = required_sheet(workbook, CODEBOOK_SHEET)?;
        let header = match sheet.row(0) {
            Some(row) => Header::from_row(row),
            None => {
                return Err(CodebookError::EmptySheet {
                    sheet: CODEBOOK_SHEET.to_string(),
                })
            }
        };

        let builder = ConceptBuilder {
            header: &header,
            languages: &config.languages,
            status_code: config.status_code,
            version_label: &version_label,
            effective_date: &effective_date,
            typos,
        };

        let mut concepts: Vec<Concept> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut stats = IngestStats::default();

        for row in sheet.data_rows() {
            stats.rows_read += 1;
            let Some(mut concept) = builder.build(row, |id| index.contains_key(id), sink) else {
                stats.rows_rejected += 1;
                continue;
            };

            if let Some(codelist_ref) = concept.codelist_ref.clone() {
                stats.code_list_entries +=
                    attach_code_list(workbook, &mut concept, &codelist_ref, &config.languages, sink)?;
            }

            index.insert(concept.id.clone(), concepts.len());
            concepts.push(concept);
            stats.concepts_accepted += 1;
        }

        Ok(Self {
            version_label,
            version,
            effective_date,
            header,
            language_settings,
            concepts,
            index,
            stats,
        })
    }

    /// All concepts in insertion order.
    pub fn concepts(&self) -> &[Concept] {
        &self.concepts
    }

    /// Number of accepted concepts.
    pub fn concept_count(&self) -> usize {
        self.concepts.len()
    }

    /// Looks up a concept by id.
    pub fn concept(&self, id: &str) -> Option<&Concept> {
        self.index.get(id).map(|&i| &self.concepts[i])
    }

    /// Numeric version key; `0.0` for a non-numeric label.
    pub fn version(&self) -> VersionKey {
        self.version
    }

    /// Numeric version as `f64`.
    pub fn version_number(&self) -> f64 {
        self.version.value()
    }

    /// Raw version label as written in the Info sheet.
    pub fn version_label(&self) -> &str {
        &self.version_label
    }

    /// Effective date.
    pub fn effective_date(&self) -> &EffectiveDate {
        &self.effective_date
    }

    /// Main-sheet column names in sheet order.
    pub fn header(&self) -> &[String] {
        self.header.columns()
    }

    /// Concept columns the main sheet's header does not contain.
    pub fn missing_columns(&self) -> Vec<&'static str> {
        CONCEPT_COLUMNS
            .iter()
            .copied()
            .filter(|column| self.header.column_index_of(column).is_none())
            .collect()
    }

    /// Dataset settings per active language.
    pub fn language_settings(&self) -> &BTreeMap<String, LanguageSettings> {
        &self.language_settings
    }

    /// Ingest statistics.
    pub fn stats(&self) -> &IngestStats {
        &self.stats
    }

    /// Concepts whose parent is `id`, in insertion order.
    pub fn children_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Concept> + 'a {
        self.concepts
            .iter()
            .filter(move |c| c.parent_id.as_deref() == Some(id))
    }

    /// Concepts with no parent, or whose parent is not in this codebook.
    pub fn roots(&self) -> impl Iterator<Item = &Concept> {
        self.concepts.iter().filter(move |c| match c.parent_id.as_deref() {
            None => true,
            Some(parent) => !self.index.contains_key(parent),
        })
    }

    /// Concepts that name a parent id absent from this codebook.
    pub fn dangling_parents(&self) -> impl Iterator<Item = &Concept> {
        self.concepts.iter().filter(move |c| {
            c.parent_id
                .as_deref()
                .is_some_and(|parent| !self.index.contains_key(parent))
        })
    }
}

/// Looks up a structurally required sheet.
fn required_sheet<W: Workbook + ?Sized>(
    workbook: &mut W,
    name: &str,
) -> CodebookResult<Sheet> {
    workbook.sheet(name).map_err(|e| match e {
        SheetError::NotFound { .. } => CodebookError::MissingSheet {
            sheet: name.to_string(),
        },
        other => other.into(),
    })
}

/// Coerces a version label to a key; non-numeric labels become `0.0`.
pub fn coerce_version(version_label: &str, sink: &dyn DiagnosticSink) -> VersionKey {
    match VersionKey::parse(version_label) {
        Ok(version) => version,
        Err(_) => {
            sink.record(Diagnostic::error(
                version_label,
                DiagnosticKind::InvalidVersionLabel,
                "Only numbers are supported as version labels",
            ));
            VersionKey::ZERO
        }
    }
}
