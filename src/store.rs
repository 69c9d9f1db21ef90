//! Tabular persistence for rosters and schedules.
//!
//! The roster is a single [`Table`]; the schedule is a [`Workbook`] with
//! a `Weeks` sheet and a `Counts` sheet. Cells are plain strings, the way
//! a spreadsheet export presents them.
//!
//! [`TableStore`] is the seam between the rotation engine and the file
//! format. [`JsonTableStore`] stores tables as JSON:
//!
//! ```json
//! {"columns": ["Name", "Email", "Available"],
//!  "rows": [["Ada", "ada@example.com", "yes"]]}
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RotationError, RotationResult};

/// A header row plus string cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Column headers.
    pub columns: Vec<String>,
    /// Data rows. Each row should have one cell per column.
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
}

/// A named table inside a workbook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    /// Sheet name (e.g. `Weeks`).
    pub name: String,
    /// Sheet contents.
    #[serde(flatten)]
    pub table: Table,
}

/// An ordered collection of sheets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workbook {
    /// Sheets in write order.
    pub sheets: Vec<Sheet>,
}

impl Table {
    /// Creates an empty table with the given headers.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row.
    pub fn with_row<I, S>(mut self, row: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push_row(row);
        self
    }

    /// Appends a row in place.
    pub fn push_row<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    /// Strips surrounding whitespace from every header.
    pub fn trim_headers(&mut self) {
        for column in &mut self.columns {
            let trimmed = column.trim();
            if trimmed.len() != column.len() {
                *column = trimmed.to_string();
            }
        }
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

impl Workbook {
    /// Creates an empty workbook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a sheet, replacing any existing sheet with the same name.
    pub fn with_sheet(mut self, name: impl Into<String>, table: Table) -> Self {
        let name = name.into();
        match self.sheets.iter_mut().find(|s| s.name == name) {
            Some(existing) => existing.table = table,
            None => self.sheets.push(Sheet { name, table }),
        }
        self
    }

    /// Looks up a sheet by name.
    pub fn sheet(&self, name: &str) -> Option<&Table> {
        self.sheets.iter().find(|s| s.name == name).map(|s| &s.table)
    }
}

/// Reads and writes tabular artifacts.
pub trait TableStore {
    /// Loads a single table (the roster).
    fn read_table(&self, path: &Path) -> RotationResult<Table>;

    /// Loads a workbook (a previously written schedule).
    fn read_workbook(&self, path: &Path) -> RotationResult<Workbook>;

    /// Writes a workbook, replacing the file.
    fn write_workbook(&self, path: &Path, workbook: &Workbook) -> RotationResult<()>;
}

/// JSON-backed [`TableStore`].
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonTableStore;

impl JsonTableStore {
    /// Creates a JSON table store.
    pub fn new() -> Self {
        Self
    }

    /// Writes a single table. Mostly useful for producing roster files.
    pub fn write_table(&self, path: &Path, table: &Table) -> RotationResult<()> {
        let json = serde_json::to_string_pretty(table).map_err(|source| {
            RotationError::Serialization {
                path: path.to_path_buf(),
                source,
            }
        })?;
        fs::write(path, json).map_err(|e| RotationError::io(path, e))
    }
}

impl TableStore for JsonTableStore {
    fn read_table(&self, path: &Path) -> RotationResult<Table> {
        let content = fs::read_to_string(path).map_err(|e| RotationError::io(path, e))?;
        let mut table: Table =
            serde_json::from_str(&content).map_err(|source| RotationError::Serialization {
                path: path.to_path_buf(),
                source,
            })?;
        table.trim_headers();
        Ok(table)
    }

    fn read_workbook(&self, path: &Path) -> RotationResult<Workbook> {
        let content = fs::read_to_string(path).map_err(|e| RotationError::io(path, e))?;
        serde_json::from_str(&content).map_err(|source| RotationError::Serialization {
            path: path.to_path_buf(),
            source,
        })
    }

    fn write_workbook(&self, path: &Path, workbook: &Workbook) -> RotationResult<()> {
        let json = serde_json::to_string_pretty(workbook).map_err(|source| {
            RotationError::Serialization {
                path: path.to_path_buf(),
                source,
            }
        })?;
        fs::write(path, json).map_err(|e| RotationError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_builder() {
        let t = Table::new(["Name", "Email", "Available"])
            .with_row(["A", "a@x.com", "yes"])
            .with_row(["B", "b@x.com", "no"]);
        assert_eq!(t.row_count(), 2);
        assert_eq!(t.columns, ["Name", "Email", "Available"]);
        assert_eq!(t.rows[1], ["B", "b@x.com", "no"]);
    }

    #[test]
    fn test_read_table_trims_headers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("team_list.json");
        fs::write(
            &path,
            r#"{"columns": [" Name", "Email ", "Available"], "rows": [["A", "a@x.com", "yes"]]}"#,
        )
        .unwrap();

        let table = JsonTableStore::new().read_table(&path).unwrap();
        assert_eq!(table.columns, vec!["Name", "Email", "Available"]);
        assert_eq!(table.rows[0][0], "A");
    }

    #[test]
    fn test_read_missing_table_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = JsonTableStore::new()
            .read_table(&dir.path().join("absent.json"))
            .unwrap_err();
        assert!(matches!(err, RotationError::Io { .. }));
    }

    #[test]
    fn test_read_malformed_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "not json").unwrap();
        let err = JsonTableStore::new().read_table(&path).unwrap_err();
        assert!(matches!(err, RotationError::Serialization { .. }));
    }

    #[test]
    fn test_workbook_sheet_replacement() {
        let wb = Workbook::new()
            .with_sheet("Weeks", Table::new(["start_date"]))
            .with_sheet("Counts", Table::new(["Name", "Assignments"]))
            .with_sheet("Weeks", Table::new(["start_date", "end_date"]));
        assert_eq!(wb.sheets.len(), 2);
        assert_eq!(wb.sheets[0].name, "Weeks");
        assert_eq!(wb.sheet("Weeks").unwrap().columns.len(), 2);
        assert!(wb.sheet("Missing").is_none());
    }

    #[test]
    fn test_workbook_json_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("assignments.json");
        let wb = Workbook::new().with_sheet(
            "Counts",
            Table::new(["Name", "Assignments"]).with_row(["A", "3"]),
        );
        let store = JsonTableStore::new();
        store.write_workbook(&path, &wb).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["sheets"][0]["name"], "Counts");
        assert_eq!(raw["sheets"][0]["columns"][1], "Assignments");
        assert_eq!(raw["sheets"][0]["rows"][0][1], "3");

        assert_eq!(store.read_workbook(&path).unwrap(), wb);
    }
}
