//! Codebook discovery and the version index.
//!
//! A codebook directory holds one `.xlsx` workbook per version. Every
//! workbook is read in turn and indexed by its numeric version.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use codebook_types::VersionKey;

use crate::codebook::Codebook;
use crate::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink};
use crate::sheet::Workbook;
use crate::types::{CodebookError, CodebookResult, RunConfig};
use crate::xlsx::XlsxWorkbook;

/// Extension of ingested workbooks.
pub const CODEBOOK_EXTENSION: &str = "xlsx";

/// Prefix of the lock files spreadsheet editors leave next to open workbooks.
pub const LOCK_FILE_PREFIX: char = '~';

/// Returns true if `file_name` looks like a codebook workbook.
///
/// ```
/// use codebook_loader::is_codebook_file;
///
/// assert!(is_codebook_file("report.xlsx"));
/// assert!(!is_codebook_file("~temp.xlsx"));
/// assert!(!is_codebook_file("report.xls"));
/// ```
pub fn is_codebook_file(file_name: &str) -> bool {
    if file_name.starts_with(LOCK_FILE_PREFIX) {
        return false;
    }
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(CODEBOOK_EXTENSION))
        .unwrap_or(false)
}

/// Lists the codebook workbooks in `dir`, sorted by file name.
///
/// # Errors
/// Returns an error if `dir` is not a readable directory.
pub fn discover_codebook_files<P: AsRef<Path>>(dir: P) -> CodebookResult<Vec<PathBuf>> {
    let dir = dir.as_ref();

    if !dir.is_dir() {
        return Err(CodebookError::DirectoryNotFound {
            path: dir.display().to_string(),
        });
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        let file_name = entry.file_name();
        if is_codebook_file(&file_name.to_string_lossy()) {
            files.push(entry.path());
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// All codebooks of a run, indexed by numeric version.
///
/// Versions that coerce to the same key share one slot; the codebook
/// read last replaces the earlier one.
#[derive(Debug, Clone, Default)]
pub struct CodebookManager {
    codebooks: BTreeMap<VersionKey, Codebook>,
}

impl CodebookManager {
    /// Creates an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads every codebook workbook in `dir`.
    ///
    /// Files are processed one at a time in file-name order. The first
    /// workbook that fails to read aborts the whole directory.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be listed or any workbook
    /// fails with a structural error.
    pub fn ingest_directory<P: AsRef<Path>>(
        dir: P,
        config: &RunConfig,
        sink: &dyn DiagnosticSink,
    ) -> CodebookResult<Self> {
        Self::ingest_directory_with(dir, config, sink, |path: &Path| XlsxWorkbook::open(path))
    }

    /// Reads every codebook workbook in `dir`, opening each with `open`.
    pub fn ingest_directory_with<P, W, F>(
        dir: P,
        config: &RunConfig,
        sink: &dyn DiagnosticSink,
        mut open: F,
    ) -> CodebookResult<Self>
    where
        P: AsRef<Path>,
        W: Workbook,
        F: FnMut(&Path) -> CodebookResult<W>,
    {
        config.validate()?;

        let mut manager = Self::new();
        for path in discover_codebook_files(dir)? {
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            sink.record(Diagnostic::info(
                "",
                DiagnosticKind::ReadingCodebook,
                format!("Reading codebook: {file_name}"),
            ));

            let codebook = {
                let mut workbook = open(&path)?;
                Codebook::from_workbook(&mut workbook, config, sink)?
            };
            manager.insert(codebook);
        }

        Ok(manager)
    }

    /// Indexes `codebook` by its version, returning any codebook it displaced.
    pub fn insert(&mut self, codebook: Codebook) -> Option<Codebook> {
        self.codebooks.insert(codebook.version(), codebook)
    }

    /// All known versions, ascending.
    pub fn versions(&self) -> impl Iterator<Item = VersionKey> + '_ {
        self.codebooks.keys().copied()
    }

    /// All known versions as numbers, ascending.
    pub fn version_numbers(&self) -> Vec<f64> {
        self.versions().map(VersionKey::value).collect()
    }

    /// The codebook for `version`, if any.
    pub fn codebook(&self, version: VersionKey) -> Option<&Codebook> {
        self.codebooks.get(&version)
    }

    /// The codebook for numeric `version`; `None` for unknown or non-finite values.
    pub fn get(&self, version: f64) -> Option<&Codebook> {
        VersionKey::new(version)
            .ok()
            .and_then(|key| self.codebook(key))
    }

    /// The codebook with the highest version.
    pub fn latest(&self) -> Option<&Codebook> {
        self.codebooks.values().next_back()
    }

    /// Codebooks in ascending version order.
    pub fn iter(&self) -> impl Iterator<Item = (VersionKey, &Codebook)> {
        self.codebooks.iter().map(|(version, codebook)| (*version, codebook))
    }

    /// Number of indexed codebooks.
    pub fn len(&self) -> usize {
        self.codebooks.len()
    }

    /// Returns true if no codebook was read.
    pub fn is_empty(&self) -> bool {
        self.codebooks.is_empty()
    }
}
