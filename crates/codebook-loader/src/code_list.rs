//! Code-list attachment.
//!
//! A concept's `codelist_ref` names another sheet of the same workbook.
//! Row 0 of that sheet is its own header; every later non-empty row
//! becomes one [`CodeListEntry`] on the concept.

use std::collections::BTreeMap;

use codebook_types::{CodeListEntry, Concept};

use crate::concept::description_column;
use crate::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink};
use crate::sheet::{Header, Row, Sheet, Workbook};
use crate::types::{CodebookResult, SheetError};

/// Reads the sheet named `codelist_ref` and appends its entries to `concept`.
///
/// A missing or header-less sheet is recorded as an error and leaves the
/// concept without entries. Returns the number of entries appended.
///
/// # Errors
/// Returns an error only if the sheet exists but cannot be decoded.
pub fn attach_code_list<W: Workbook + ?Sized>(
    workbook: &mut W,
    concept: &mut Concept,
    codelist_ref: &str,
    languages: &[String],
    sink: &dyn DiagnosticSink,
) -> CodebookResult<usize> {
    let sheet = match workbook.sheet(codelist_ref) {
        Ok(sheet) => sheet,
        Err(SheetError::NotFound { .. }) => {
            sink.record(Diagnostic::error(
                &concept.version_label,
                DiagnosticKind::MissingCodeList,
                format!(
                    "Severe Error: Issue adding codelist, ref = {codelist_ref} (available sheets: {})",
                    workbook.sheet_names().join(", ")
                ),
            ));
            return Ok(0);
        }
        Err(e) => return Err(e.into()),
    };

    let Some(header_row) = sheet.row(0) else {
        sink.record(Diagnostic::error(
            &concept.version_label,
            DiagnosticKind::EmptyCodeList,
            format!("Severe Error: Issue adding codelist, ref = {codelist_ref} has no header row"),
        ));
        return Ok(0);
    };

    let header = Header::from_row(header_row);
    let entries = code_list_entries(&sheet, &header, &concept.id, languages);
    let count = entries.len();
    concept.code_list_entries.extend(entries);
    Ok(count)
}

/// Builds entries for every non-empty row after the header, in row order.
fn code_list_entries(
    sheet: &Sheet,
    header: &Header,
    concept_id: &str,
    languages: &[String],
) -> Vec<CodeListEntry> {
    sheet
        .data_rows()
        .map(|row| code_list_entry(row, header, concept_id, sheet.name(), languages))
        .collect()
}

fn code_list_entry(
    row: &Row,
    header: &Header,
    concept_id: &str,
    codelist_ref: &str,
    languages: &[String],
) -> CodeListEntry {
    let attributes = header
        .columns()
        .iter()
        .enumerate()
        .filter(|(_, name)| !name.is_empty())
        .map(|(index, name)| (name.clone(), row.cell(index).to_string()))
        .collect();

    let language_descriptions: BTreeMap<String, String> = languages
        .iter()
        .map(|language| {
            let text = header.value(row, &description_column(language));
            (language.clone(), text.to_string())
        })
        .collect();

    CodeListEntry {
        concept_id: concept_id.to_string(),
        codelist_ref: codelist_ref.to_string(),
        attributes,
        language_descriptions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{MemorySink, Severity};
    use crate::sheet::MemoryWorkbook;
    use codebook_types::{EffectiveDate, StatusCode};

    fn concept() -> Concept {
        Concept {
            id: "T1".to_string(),
            codesystem: "PALGA-thesaurus".to_string(),
            code: "P1".to_string(),
            code_description: "Tumour type".to_string(),
            properties: String::new(),
            parent_id: None,
            data_type: "code".to_string(),
            codelist_ref: Some("tumours".to_string()),
            effective_date: EffectiveDate::sentinel(),
            version_label: "4".to_string(),
            status_code: StatusCode::Draft,
            language_descriptions: BTreeMap::new(),
            code_list_entries: Vec::new(),
        }
    }

    fn languages() -> Vec<String> {
        vec!["nl".to_string(), "en".to_string()]
    }

    #[test]
    fn test_attach_preserves_row_order_and_duplicates() {
        let mut workbook = MemoryWorkbook::new().with_sheet(Sheet::new(
            "tumours",
            vec![
                vec!["code", "codesystem", "description_code", "description_nl"],
                vec!["M8140/3", "ICD-O-3", "Adenocarcinoma", "Adenocarcinoom"],
                vec!["", "", "", ""],
                vec!["M8010/3", "ICD-O-3", "Carcinoma", "Carcinoom"],
                vec!["M8010/3", "ICD-O-3", "Carcinoma", "Carcinoom"],
            ],
        ));
        let sink = MemorySink::new();
        let mut concept = concept();

        let count =
            attach_code_list(&mut workbook, &mut concept, "tumours", &languages(), &sink).unwrap();

        assert_eq!(count, 3);
        let entries = &concept.code_list_entries;
        assert_eq!(entries[0].attribute("code"), Some("M8140/3"));
        assert_eq!(entries[1].attribute("code"), Some("M8010/3"));
        assert_eq!(entries[1], entries[2]);
        assert_eq!(entries[0].concept_id, "T1");
        assert_eq!(entries[0].codelist_ref, "tumours");
        assert_eq!(entries[0].description("nl"), Some("Adenocarcinoom"));
        assert_eq!(entries[0].description("en"), Some(""));
        assert_eq!(entries[0].attributes.len(), 4);
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn test_missing_sheet_is_logged_not_raised() {
        let mut workbook = MemoryWorkbook::new()
            .with_sheet(Sheet::new("Info", [["version", "4"]]))
            .with_sheet(Sheet::new("tumours", [["code"]]));
        let sink = MemorySink::new();
        let mut concept = concept();

        let count =
            attach_code_list(&mut workbook, &mut concept, "tumors", &languages(), &sink).unwrap();

        assert_eq!(count, 0);
        assert!(concept.code_list_entries.is_empty());
        let diagnostics = sink.diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Error);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::MissingCodeList);
        assert_eq!(diagnostics[0].version_label, "4");
        assert!(diagnostics[0].message.contains("ref = tumors"));
        assert!(diagnostics[0]
            .message
            .ends_with("(available sheets: Info, tumours)"));
    }

    #[test]
    fn test_empty_sheet_is_logged() {
        let mut workbook = MemoryWorkbook::new().with_sheet(Sheet::from_rows("tumours", Vec::new()));
        let sink = MemorySink::new();
        let mut concept = concept();

        let count =
            attach_code_list(&mut workbook, &mut concept, "tumours", &languages(), &sink).unwrap();

        assert_eq!(count, 0);
        assert_eq!(sink.count(DiagnosticKind::EmptyCodeList), 1);
    }

    #[test]
    fn test_header_only_sheet_has_no_entries() {
        let mut workbook = MemoryWorkbook::new()
            .with_sheet(Sheet::new("tumours", [["code", "description_code"]]));
        let sink = MemorySink::new();
        let mut concept = concept();

        let count =
            attach_code_list(&mut workbook, &mut concept, "tumours", &languages(), &sink).unwrap();

        assert_eq!(count, 0);
        assert!(sink.diagnostics().is_empty());
    }
}
