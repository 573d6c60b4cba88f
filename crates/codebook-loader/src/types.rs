//! Loader-specific types: errors, run configuration and ingest statistics.

use std::path::PathBuf;

use codebook_types::StatusCode;
use thiserror::Error;

/// Errors that abort the ingestion of a workbook or directory.
///
/// Row-level validation problems are never errors; they are reported
/// through a [`DiagnosticSink`](crate::DiagnosticSink) instead.
#[derive(Error, Debug)]
pub enum CodebookError {
    /// I/O error reading a codebook directory or file.
    #[error("IO error reading codebook: {0}")]
    Io(#[from] std::io::Error),

    /// The spreadsheet library could not open or decode the workbook.
    #[error("Workbook error in {path}: {message}")]
    Workbook {
        /// Path of the workbook.
        path: String,
        /// Underlying reader message.
        message: String,
    },

    /// A sheet could not be read.
    #[error(transparent)]
    Sheet(#[from] SheetError),

    /// A structurally required sheet is absent.
    #[error("{sheet} sheet missing")]
    MissingSheet {
        /// Name of the required sheet.
        sheet: String,
    },

    /// A structurally required sheet has no header row.
    #[error("{sheet} sheet has no header row")]
    EmptySheet {
        /// Name of the empty sheet.
        sheet: String,
    },

    /// Directory not found.
    #[error("Directory not found: {path}")]
    DirectoryNotFound {
        /// The path that was not found.
        path: String,
    },

    /// The run configuration cannot be used.
    #[error("Invalid run configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for codebook operations.
pub type CodebookResult<T> = Result<T, CodebookError>;

/// Outcome of looking up a sheet by name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SheetError {
    /// No sheet with this exact name exists in the workbook.
    #[error("Sheet not found: {name}")]
    NotFound {
        /// The requested sheet name.
        name: String,
    },

    /// The sheet exists but could not be decoded.
    #[error("Could not read sheet {name}: {message}")]
    Read {
        /// The requested sheet name.
        name: String,
        /// Underlying reader message.
        message: String,
    },
}

/// Configuration for a codebook ingestion run.
///
/// Read-only to the loader; supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Active language codes, in selection order, without duplicates.
    pub languages: Vec<String>,
    /// Status code stamped on every concept.
    pub status_code: StatusCode,
    /// Directory holding the codebook workbooks.
    pub codebook_directory: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            languages: vec!["nl".to_string()],
            status_code: StatusCode::Draft,
            codebook_directory: None,
        }
    }
}

impl RunConfig {
    /// Creates a config for the given languages and status.
    ///
    /// Blank language codes are dropped and duplicates keep their first position.
    pub fn new<I, S>(languages: I, status_code: StatusCode) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for language in languages {
            let language = language.into().trim().to_string();
            if !language.is_empty() && !unique.contains(&language) {
                unique.push(language);
            }
        }
        Self {
            languages: unique,
            status_code,
            codebook_directory: None,
        }
    }

    /// Sets the codebook directory.
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.codebook_directory = Some(directory.into());
        self
    }

    /// Checks that at least one language is active.
    pub fn validate(&self) -> CodebookResult<()> {
        if self.languages.is_empty() {
            return Err(CodebookError::InvalidConfig(
                "at least one language must be selected".to_string(),
            ));
        }
        Ok(())
    }
}

/// Statistics from ingesting one workbook.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestStats {
    /// Non-empty data rows read from the main sheet.
    pub rows_read: usize,
    /// Rows that became concepts.
    pub concepts_accepted: usize,
    /// Rows rejected by validation.
    pub rows_rejected: usize,
    /// Code-list entries attached across all concepts.
    pub code_list_entries: usize,
}

impl IngestStats {
    /// Returns the percentage of rows that became concepts.
    pub fn acceptance_rate(&self) -> f64 {
        if self.rows_read == 0 {
            0.0
        } else {
            (self.concepts_accepted as f64 / self.rows_read as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_config_default() {
        let config = RunConfig::default();
        assert_eq!(config.languages, vec!["nl"]);
        assert_eq!(config.status_code, StatusCode::Draft);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_run_config_dedupes_languages() {
        let config = RunConfig::new(["en", " nl", "en", ""], StatusCode::Final);
        assert_eq!(config.languages, vec!["en", "nl"]);
        assert_eq!(config.status_code, StatusCode::Final);
    }

    #[test]
    fn test_run_config_requires_language() {
        let config = RunConfig::new(Vec::<String>::new(), StatusCode::Draft);
        assert!(matches!(
            config.validate(),
            Err(CodebookError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_ingest_stats_acceptance_rate() {
        let stats = IngestStats {
            rows_read: 4,
            concepts_accepted: 3,
            rows_rejected: 1,
            ..Default::default()
        };
        assert!((stats.acceptance_rate() - 75.0).abs() < 0.01);
        assert_eq!(IngestStats::default().acceptance_rate(), 0.0);
    }

    #[test]
    fn test_missing_sheet_message() {
        let err = CodebookError::MissingSheet {
            sheet: "Info".to_string(),
        };
        assert_eq!(err.to_string(), "Info sheet missing");
    }
}
