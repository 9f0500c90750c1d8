//! Export sinks for finished paths.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use mondrian_common::error::{MondrianError, MondrianResult};
use mondrian_path_model::PathTable;
use serde::Serialize;

/// Where exported tables go.
pub trait ExportSink {
    /// Persist `table` under `file_name` (e.g. `Path_0.csv`).
    ///
    /// Returns the location written to, if the sink has one.
    fn save_table(
        &mut self,
        file_name: &str,
        table: &PathTable,
    ) -> MondrianResult<Option<PathBuf>>;
}

/// Summary of one successful export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRecord {
    /// Running index the path was exported under.
    pub index: u32,
    /// Artifact file name, `Path_<index>.csv`.
    pub file_name: String,
    /// Number of rows written.
    pub rows: usize,
    /// Where the sink put it.
    pub location: Option<PathBuf>,
}

/// Writes each table as `<dir>/<file_name>`.
#[derive(Debug, Clone)]
pub struct CsvDirectorySink {
    dir: PathBuf,
}

impl CsvDirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ExportSink for CsvDirectorySink {
    fn save_table(
        &mut self,
        file_name: &str,
        table: &PathTable,
    ) -> MondrianResult<Option<PathBuf>> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            MondrianError::export(format!(
                "Failed to create export directory {}: {e}",
                self.dir.display()
            ))
        })?;

        let path = self.dir.join(file_name);
        let file = File::create(&path).map_err(|e| {
            MondrianError::export(format!("Failed to create {}: {e}", path.display()))
        })?;
        table.write_csv(BufWriter::new(file)).map_err(|e| {
            MondrianError::export(format!("Failed to write {}: {e}", path.display()))
        })?;

        tracing::debug!(path = %path.display(), rows = table.len(), "Wrote path table");
        Ok(Some(path))
    }
}

/// Keeps exported tables in memory, in export order.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    tables: Vec<(String, PathTable)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exported `(file_name, table)` pairs.
    pub fn tables(&self) -> &[(String, PathTable)] {
        &self.tables
    }
}

impl ExportSink for MemorySink {
    fn save_table(
        &mut self,
        file_name: &str,
        table: &PathTable,
    ) -> MondrianResult<Option<PathBuf>> {
        self.tables.push((file_name.to_string(), table.clone()));
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mondrian_path_model::{Path, Point};

    fn sample_table() -> PathTable {
        let mut path = Path::default();
        path.push(Point::new(0.0, 0.0, 0.0));
        path.push(Point::new(1.0, 2.0, 1.0));
        PathTable::from_path(&path)
    }

    #[test]
    fn directory_sink_writes_csv_file() {
        let dir = std::env::temp_dir().join("mondrian_test_csv_sink");
        let _ = std::fs::remove_dir_all(&dir);

        let mut sink = CsvDirectorySink::new(dir.join("nested"));
        let location = sink.save_table("Path_0.csv", &sample_table()).unwrap();

        let path = location.unwrap();
        assert!(path.ends_with("nested/Path_0.csv"));
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "time,x,y\n0.00,0.00,0.00\n1.00,1.00,2.00\n");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn directory_sink_reports_unwritable_target() {
        let dir = std::env::temp_dir().join("mondrian_test_csv_sink_blocked");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        // A regular file where the export directory should be.
        let blocker = dir.join("exports");
        std::fs::write(&blocker, b"").unwrap();

        let mut sink = CsvDirectorySink::new(&blocker);
        let err = sink.save_table("Path_0.csv", &sample_table()).unwrap_err();
        assert!(matches!(err, MondrianError::Export { .. }));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn memory_sink_keeps_order() {
        let mut sink = MemorySink::new();
        sink.save_table("Path_0.csv", &sample_table()).unwrap();
        sink.save_table("Path_1.csv", &PathTable::default()).unwrap();
        let names: Vec<&str> = sink.tables().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["Path_0.csv", "Path_1.csv"]);
    }
}
