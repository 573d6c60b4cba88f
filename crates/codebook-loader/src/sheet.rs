//! Tabular source abstraction.
//!
//! A [`Workbook`] hands out [`Sheet`]s by exact name. Sheets are plain
//! grids of trimmed cell text; row 0 is the header wherever one is used.

use std::collections::HashMap;

use crate::types::SheetError;

/// One row of cell text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: Vec<String>,
}

impl Row {
    /// Creates a row, trimming every cell.
    pub fn new<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            cells: cells
                .into_iter()
                .map(|cell| cell.as_ref().trim().to_string())
                .collect(),
        }
    }

    /// Returns the text in `column`, or `""` past the end of the row.
    pub fn cell(&self, column: usize) -> &str {
        self.cells.get(column).map(String::as_str).unwrap_or("")
    }

    /// Returns true if every cell is blank.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_empty())
    }

    /// Returns the cells.
    pub fn cells(&self) -> &[String] {
        &self.cells
    }
}

/// A named sheet of rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sheet {
    name: String,
    rows: Vec<Row>,
}

impl Sheet {
    /// Creates a sheet from rows of cell text.
    ///
    /// ```
    /// use codebook_loader::Sheet;
    ///
    /// let sheet = Sheet::new("Info", [["version", "33"], ["effectiveDate", "2021-03-15"]]);
    /// assert_eq!(sheet.row(1).unwrap().cell(1), "2021-03-15");
    /// assert_eq!(sheet.last_row_index(), Some(1));
    /// ```
    pub fn new<I, R, S>(name: impl Into<String>, rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            name: name.into(),
            rows: rows.into_iter().map(Row::new).collect(),
        }
    }

    /// Creates a sheet from already built rows.
    pub fn from_rows(name: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Returns the sheet name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the row at `index`, if the sheet extends that far.
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Index of the last row, or `None` for an empty sheet.
    pub fn last_row_index(&self) -> Option<usize> {
        self.rows.len().checked_sub(1)
    }

    /// Iterates over rows after the header that contain any text.
    pub fn data_rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().skip(1).filter(|row| !row.is_empty())
    }

    /// Iterates over all rows that contain any text.
    pub fn non_empty_rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().filter(|row| !row.is_empty())
    }
}

/// Ordered column names taken from a sheet's header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    columns: Vec<String>,
}

impl Header {
    /// Builds a header from a row.
    pub fn from_row(row: &Row) -> Self {
        Self {
            columns: row.cells().to_vec(),
        }
    }

    /// Column names in sheet order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Index of the first column named `name`, compared case-insensitively.
    pub fn column_index_of(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|column| column.eq_ignore_ascii_case(name))
    }

    /// Text of column `name` in `row`; `""` if the column is absent.
    pub fn value<'r>(&self, row: &'r Row, name: &str) -> &'r str {
        match self.column_index_of(name) {
            Some(index) => row.cell(index),
            None => "",
        }
    }
}

/// A source of named sheets.
///
/// Implementations own whatever file handle backs them; dropping the
/// workbook releases it.
pub trait Workbook {
    /// Returns the sheet named exactly `name`.
    fn sheet(&mut self, name: &str) -> Result<Sheet, SheetError>;

    /// Names of all sheets, in workbook order.
    fn sheet_names(&self) -> Vec<String>;
}

impl<W: Workbook + ?Sized> Workbook for &mut W {
    fn sheet(&mut self, name: &str) -> Result<Sheet, SheetError> {
        (**self).sheet(name)
    }

    fn sheet_names(&self) -> Vec<String> {
        (**self).sheet_names()
    }
}

/// A workbook held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryWorkbook {
    order: Vec<String>,
    sheets: HashMap<String, Sheet>,
}

impl MemoryWorkbook {
    /// Creates an empty workbook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a sheet, replacing any sheet of the same name.
    pub fn with_sheet(mut self, sheet: Sheet) -> Self {
        self.insert(sheet);
        self
    }

    /// Adds a sheet, replacing any sheet of the same name.
    pub fn insert(&mut self, sheet: Sheet) {
        let name = sheet.name().to_string();
        if !self.sheets.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.sheets.insert(name, sheet);
    }
}

impl Workbook for MemoryWorkbook {
    fn sheet(&mut self, name: &str) -> Result<Sheet, SheetError> {
        self.sheets
            .get(name)
            .cloned()
            .ok_or_else(|| SheetError::NotFound {
                name: name.to_string(),
            })
    }

    fn sheet_names(&self) -> Vec<String> {
        self.order.clone()
    }
}
