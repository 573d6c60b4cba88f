//! Tab-separated export of ingested codebooks.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use codebook_loader::{Codebook, CodebookManager};
use codebook_types::Concept;
use thiserror::Error;

/// Fixed leading columns of an export file.
pub const EXPORT_COLUMNS: &[&str] = &[
    "id",
    "codesystem",
    "code",
    "description_code",
    "parent",
    "data_type",
    "codelist_ref",
    "code_list_size",
];

/// Errors that can occur while writing exports.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// File name of the export for `codebook`.
pub fn export_file_name(codebook: &Codebook) -> String {
    format!("codebook_{}.tsv", codebook.version())
}

/// Writes one TSV file per codebook into `dir`, creating it if needed.
///
/// Returns the written paths in ascending version order.
pub fn export_all(
    manager: &CodebookManager,
    languages: &[String],
    dir: &Path,
) -> Result<Vec<PathBuf>, ExportError> {
    fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(manager.len());
    for (_, codebook) in manager.iter() {
        let path = dir.join(export_file_name(codebook));
        write_codebook(codebook, languages, File::create(&path)?)?;
        tracing::debug!("Exported {} concepts to {}", codebook.concept_count(), path.display());
        written.push(path);
    }
    Ok(written)
}

/// Writes the concepts of `codebook` as tab-separated rows.
pub fn write_codebook<W: std::io::Write>(
    codebook: &Codebook,
    languages: &[String],
    out: W,
) -> Result<(), ExportError> {
    let mut writer = csv::WriterBuilder::new().delimiter(b'\t').from_writer(out);

    let mut header: Vec<String> = EXPORT_COLUMNS.iter().map(|c| c.to_string()).collect();
    header.extend(languages.iter().map(|lang| format!("description_{lang}")));
    writer.write_record(&header)?;

    for concept in codebook.concepts() {
        writer.write_record(concept_record(concept, languages))?;
    }

    writer.flush()?;
    Ok(())
}

fn concept_record(concept: &Concept, languages: &[String]) -> Vec<String> {
    let mut record = vec![
        concept.id.clone(),
        concept.codesystem.clone(),
        concept.code.clone(),
        concept.code_description.clone(),
        concept.parent_id.clone().unwrap_or_default(),
        concept.data_type.clone(),
        concept.codelist_ref.clone().unwrap_or_default(),
        concept.code_list_entries.len().to_string(),
    ];
    record.extend(
        languages
            .iter()
            .map(|lang| concept.description(lang).unwrap_or_default().to_string()),
    );
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use codebook_loader::{MemorySink, MemoryWorkbook, RunConfig, Sheet};
    use codebook_types::StatusCode;
    use tempfile::TempDir;

    fn codebook(version: &str) -> Codebook {
        let mut workbook = MemoryWorkbook::new()
            .with_sheet(Sheet::new(
                "Info",
                [["version", version], ["effectiveDate", "2022-06-01"]],
            ))
            .with_sheet(Sheet::new(
                "Codebook",
                vec![
                    vec!["id", "codesystem", "code", "description_code", "parent", "codelist_ref", "description_nl"],
                    vec!["C1", "SNOMED", "404684003", "Clinical finding", "", "list1", "Bevinding"],
                    vec!["C2", "LOINC", "8480-6", "Systolic", "C1", "", "Systolisch"],
                ],
            ))
            .with_sheet(Sheet::new(
                "list1",
                [["code", "description_code"], ["A", "Alpha"], ["B", "Beta"]],
            ));
        let config = RunConfig::new(["nl"], StatusCode::Draft);
        Codebook::from_workbook(&mut workbook, &config, &MemorySink::new()).unwrap()
    }

    #[test]
    fn test_write_codebook() {
        let mut out = Vec::new();
        write_codebook(&codebook("3"), &["nl".to_string()], &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "id\tcodesystem\tcode\tdescription_code\tparent\tdata_type\tcodelist_ref\tcode_list_size\tdescription_nl"
        );
        assert_eq!(lines[1], "C1\tSNOMED\t404684003\tClinical finding\t\t\tlist1\t2\tBevinding");
        assert_eq!(lines[2], "C2\tLOINC\t8480-6\tSystolic\tC1\t\t\t0\tSystolisch");
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name(&codebook("3")), "codebook_3.tsv");
        assert_eq!(export_file_name(&codebook("1.5")), "codebook_1.5.tsv");
    }

    #[test]
    fn test_export_all_writes_one_file_per_version() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("out");

        let mut manager = CodebookManager::new();
        manager.insert(codebook("2"));
        manager.insert(codebook("1"));

        let written = export_all(&manager, &["nl".to_string()], &target).unwrap();
        let names: Vec<_> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["codebook_1.tsv", "codebook_2.tsv"]);
        assert!(written.iter().all(|p| p.is_file()));
    }
}
