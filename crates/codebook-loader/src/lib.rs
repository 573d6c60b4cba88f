//! # codebook-loader
//!
//! Ingestion engine for versioned, spreadsheet-authored clinical codebooks.
//!
//! Each workbook carries an `Info` key/value sheet, a `Codebook` sheet
//! with one concept per row, and optional code-list sheets referenced
//! from the `codelist_ref` column. Reading a directory of workbooks
//! yields a [`CodebookManager`] indexing one [`Codebook`] per version.
//!
//! Validation problems never abort a workbook. They are recorded on a
//! [`DiagnosticSink`] and the offending row or reference is skipped.
//! Only a missing `Info` or `Codebook` sheet is fatal.
//!
//! ## Example
//!
//! ```ignore
//! use codebook_loader::{CodebookManager, RunConfig, TracingSink};
//! use codebook_types::StatusCode;
//!
//! let config = RunConfig::new(["nl", "en"], StatusCode::Draft);
//! let manager = CodebookManager::ingest_directory("codebooks/", &config, &TracingSink)?;
//!
//! for (version, codebook) in manager.iter() {
//!     println!("{version}: {} concepts", codebook.concept_count());
//! }
//! ```
//!
//! Any [`Workbook`] implementation can stand in for the xlsx reader:
//!
//! ```
//! use codebook_loader::{Codebook, MemorySink, MemoryWorkbook, RunConfig, Sheet};
//!
//! let mut workbook = MemoryWorkbook::new()
//!     .with_sheet(Sheet::new("Info", [["version", "2"], ["effectiveDate", "2021-03-15"]]))
//!     .with_sheet(Sheet::new(
//!         "Codebook",
//!         [
//!             ["id", "codesystem", "code", "description_code"],
//!             ["C1", "SNOMED", "404684003", "Clinical finding"],
//!         ],
//!     ));
//!
//! let sink = MemorySink::new();
//! let codebook = Codebook::from_workbook(&mut workbook, &RunConfig::default(), &sink).unwrap();
//! assert_eq!(codebook.version_number(), 2.0);
//! assert_eq!(codebook.concepts().len(), 1);
//! ```

#![warn(missing_docs)]

mod code_list;
mod codebook;
mod concept;
mod diagnostics;
mod info;
mod manager;
mod sheet;
mod typo;
mod types;
mod xlsx;

pub use code_list::attach_code_list;
pub use codebook::{coerce_version, Codebook, CODEBOOK_SHEET, INFO_SHEET};
pub use concept::{description_column, ConceptBuilder, ConceptRow, CONCEPT_COLUMNS};
pub use diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink, MemorySink, Severity, Tee, TracingSink};
pub use info::InfoBlock;
pub use manager::{discover_codebook_files, is_codebook_file, CodebookManager, CODEBOOK_EXTENSION};
pub use sheet::{Header, MemoryWorkbook, Row, Sheet, Workbook};
pub use typo::{KnownCodesystems, TypoDictionary};
pub use types::{CodebookError, CodebookResult, IngestStats, RunConfig, SheetError};
pub use xlsx::{cell_text, XlsxWorkbook};

// Re-export codebook-types for convenience
pub use codebook_types;
