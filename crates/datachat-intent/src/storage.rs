//! Access to the uploaded tabular data

use std::path::{Path, PathBuf};

use crate::error::StorageError;
use crate::models::Table;

/// Source of the currently uploaded table, if any
pub trait TableStore: Send + Sync {
    /// Load the uploaded table. `Ok(None)` means no tabular data exists.
    fn load_table(&self) -> Result<Option<Table>, StorageError>;
}

/// Table held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryTableStore {
    table: Option<Table>,
}

impl InMemoryTableStore {
    pub fn new(table: Option<Table>) -> Self {
        Self { table }
    }

    pub fn empty() -> Self {
        Self { table: None }
    }

    pub fn with_table(table: Table) -> Self {
        Self { table: Some(table) }
    }
}

impl TableStore for InMemoryTableStore {
    fn load_table(&self) -> Result<Option<Table>, StorageError> {
        Ok(self.table.clone())
    }
}

/// Table stored as a CSV file with a header row
#[derive(Debug, Clone)]
pub struct CsvTableStore {
    path: PathBuf,
}

impl CsvTableStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TableStore for CsvTableStore {
    fn load_table(&self) -> Result<Option<Table>, StorageError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no uploaded table");
            return Ok(None);
        }

        let mut rdr = csv::Reader::from_path(&self.path)?;
        let headers = rdr.headers()?.iter().map(str::to_string).collect();
        let rows = rdr
            .records()
            .map(|record| record.map(|r| r.iter().map(str::to_string).collect()))
            .collect::<Result<Vec<Vec<String>>, csv::Error>>()?;

        Ok(Some(Table::new(headers, rows)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_in_memory_store() {
        assert_eq!(InMemoryTableStore::empty().load_table().unwrap(), None);

        let table = Table::new(vec!["a".into()], vec![vec!["1".into()]]);
        let store = InMemoryTableStore::with_table(table.clone());
        assert_eq!(store.load_table().unwrap(), Some(table));
    }

    #[test]
    fn test_csv_store_reads_headers_and_rows() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "month,sales").unwrap();
        writeln!(file, "2024-01,120").unwrap();
        writeln!(file, "2024-02,135").unwrap();

        let table = CsvTableStore::new(file.path()).load_table().unwrap().unwrap();
        assert_eq!(table.headers, vec!["month", "sales"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[1], vec!["2024-02", "135"]);
    }

    #[test]
    fn test_csv_store_missing_file_means_no_table() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvTableStore::new(dir.path().join("upload.csv"));
        assert_eq!(store.load_table().unwrap(), None);
    }

    #[test]
    fn test_csv_store_ragged_rows_fail() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "month,sales").unwrap();
        writeln!(file, "2024-01,120,extra").unwrap();

        let result = CsvTableStore::new(file.path()).load_table();
        assert!(matches!(result, Err(StorageError::Csv(_))));
    }
}
