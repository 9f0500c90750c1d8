//! Exported path tables.
//!
//! A path is exported as one `time,x,y` row per recorded point, every field
//! fixed to two decimal places, under the name `Path_<index>.csv`.

use std::io::Write;

use mondrian_common::clock::fix_decimals;
use serde::{Deserialize, Serialize};

use crate::path::Path;

/// Decimal places used for every exported field.
pub const TABLE_DECIMALS: u32 = 2;

/// Column names, in order.
pub const TABLE_HEADER: [&str; 3] = ["time", "x", "y"];

/// One exported row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathRow {
    pub time: f64,
    pub x: f64,
    pub y: f64,
}

/// Row-oriented export of a single path.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PathTable {
    rows: Vec<PathRow>,
}

/// Artifact stem for the export with the given index, e.g. `Path_0`.
pub fn export_stem(index: u32) -> String {
    format!("Path_{index}")
}

/// File name for the export with the given index, e.g. `Path_0.csv`.
pub fn export_file_name(index: u32) -> String {
    format!("{}.csv", export_stem(index))
}

impl PathTable {
    /// Serialize a path. The path is only read.
    pub fn from_path(path: &Path) -> Self {
        let rows = path
            .points()
            .iter()
            .map(|p| PathRow {
                time: fix_decimals(p.t, TABLE_DECIMALS),
                x: fix_decimals(p.x, TABLE_DECIMALS),
                y: fix_decimals(p.y, TABLE_DECIMALS),
            })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[PathRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First and last row times.
    pub fn time_span(&self) -> Option<(f64, f64)> {
        Some((self.rows.first()?.time, self.rows.last()?.time))
    }

    /// Whether row times never decrease.
    pub fn is_time_ordered(&self) -> bool {
        self.rows.windows(2).all(|w| w[0].time <= w[1].time)
    }

    /// Write the table as CSV with a header line.
    pub fn write_csv<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        writeln!(writer, "{}", TABLE_HEADER.join(","))?;
        for row in &self.rows {
            writeln!(writer, "{:.2},{:.2},{:.2}", row.time, row.x, row.y)?;
        }
        writer.flush()
    }

    /// Render the table as a CSV string.
    pub fn to_csv(&self) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.write_csv(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Parse CSV produced by [`PathTable::write_csv`].
    pub fn parse_csv(content: &str) -> Result<Self, TableError> {
        let mut lines = content
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let (_, header) = lines.next().ok_or(TableError::MissingHeader)?;
        let columns: Vec<&str> = header.split(',').map(str::trim).collect();
        if columns != TABLE_HEADER {
            return Err(TableError::BadHeader {
                found: header.to_string(),
            });
        }

        let mut rows = Vec::new();
        for (line, text) in lines {
            let cells: Vec<&str> = text.split(',').map(str::trim).collect();
            if cells.len() != TABLE_HEADER.len() {
                return Err(TableError::ColumnCount {
                    line,
                    found: cells.len(),
                });
            }
            let parse = |column: usize| -> Result<f64, TableError> {
                cells[column]
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| TableError::BadNumber {
                        line,
                        column: TABLE_HEADER[column],
                        value: cells[column].to_string(),
                    })
            };
            rows.push(PathRow {
                time: parse(0)?,
                x: parse(1)?,
                y: parse(2)?,
            });
        }

        Ok(Self { rows })
    }
}

/// Errors reading an exported path table.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("Table is empty; expected a `time,x,y` header")]
    MissingHeader,

    #[error("Unexpected header `{found}`; expected `time,x,y`")]
    BadHeader { found: String },

    #[error("Line {line}: expected 3 columns, found {found}")]
    ColumnCount { line: usize, found: usize },

    #[error("Line {line}: `{value}` is not a number in column `{column}`")]
    BadNumber {
        line: usize,
        column: &'static str,
        value: String,
    },
}
