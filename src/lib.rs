//! # sheetgrid
//!
//! Convert a worksheet of an XLSX workbook into a dense matrix of strings.
//!
//! Cells are resolved from their three encodings (shared string, inline
//! string, literal value), placed by the column letters of their reference,
//! and every row is padded with `""` up to its last referenced column. The
//! result serializes as a JSON array of arrays of strings.
//!
//! ## Quick Start
//!
//! ```no_run
//! use sheetgrid::read_matrix;
//!
//! let matrix = read_matrix("products.xlsx")?;
//! for row in &matrix {
//!     println!("{:?}", row);
//! }
//!
//! // Straight to JSON
//! let json = sheetgrid::to_json("products.xlsx")?;
//! std::fs::write("products.json", json)?;
//! # Ok::<(), sheetgrid::Error>(())
//! ```
//!
//! ## Choosing a sheet
//!
//! By default the first `xl/worksheets/sheet*.xml` entry in archive order is
//! read. A sheet can also be picked from the workbook manifest:
//!
//! ```no_run
//! use sheetgrid::{read_matrix_with_options, ReadOptions};
//!
//! let options = ReadOptions::new().with_sheet_name("Summary");
//! let matrix = read_matrix_with_options("report.xlsx", &options)?;
//! # Ok::<(), sheetgrid::Error>(())
//! ```
//!
//! ## Features
//!
//! - `async`: [`read_matrix_async`] reads the file with Tokio

pub mod container;
pub mod error;
pub mod model;
pub mod render;
pub mod xlsx;

// Re-exports
pub use container::{Relationship, Relationships, SpreadsheetContainer};
pub use error::{Error, Result};
pub use model::{Matrix, Row};
pub use xlsx::{ReadOptions, SheetSelection, XlsxReader};

use std::path::Path;

/// Read the first worksheet of a workbook file.
///
/// # Example
///
/// ```no_run
/// let matrix = sheetgrid::read_matrix("data.xlsx")?;
/// println!("{} rows", matrix.len());
/// # Ok::<(), sheetgrid::Error>(())
/// ```
pub fn read_matrix(path: impl AsRef<Path>) -> Result<Matrix> {
    read_matrix_with_options(path, &ReadOptions::default())
}

/// Read a worksheet of a workbook file with options.
pub fn read_matrix_with_options(path: impl AsRef<Path>, options: &ReadOptions) -> Result<Matrix> {
    let reader = XlsxReader::open(path)?.with_options(options.clone());
    reader.read_matrix()
}

/// Read the first worksheet of a workbook held in memory.
///
/// # Example
///
/// ```no_run
/// let data = std::fs::read("data.xlsx")?;
/// let matrix = sheetgrid::read_matrix_from_bytes(&data)?;
/// # Ok::<(), sheetgrid::Error>(())
/// ```
pub fn read_matrix_from_bytes(data: &[u8]) -> Result<Matrix> {
    let reader = XlsxReader::from_bytes(data.to_vec())?;
    reader.read_matrix()
}

/// Read the first worksheet of a workbook file as compact JSON.
pub fn to_json(path: impl AsRef<Path>) -> Result<String> {
    let matrix = read_matrix(path)?;
    render::to_json(&matrix, render::JsonFormat::Compact)
}

/// Read a worksheet with options, loading the file through Tokio.
#[cfg(feature = "async")]
pub async fn read_matrix_async(path: impl AsRef<Path>, options: &ReadOptions) -> Result<Matrix> {
    let path = path.as_ref();
    let data = tokio::fs::read(path)
        .await
        .map_err(|e| Error::ArchiveOpen(format!("{}: {}", path.display(), e)))?;
    let reader = XlsxReader::from_bytes(data)?.with_options(options.clone());
    reader.read_matrix()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_sample_file() {
        let path = "test-files/sample.xlsx";
        if Path::new(path).exists() {
            let matrix = read_matrix(path).unwrap();
            assert!(!matrix.is_empty());
        }
    }

    #[test]
    fn test_missing_file() {
        let err = read_matrix("test-files/does-not-exist.xlsx").unwrap_err();
        assert!(matches!(err, Error::ArchiveOpen(_)));
    }

    #[test]
    fn test_not_a_workbook() {
        let err = read_matrix_from_bytes(b"Name;Age\nx;30\n").unwrap_err();
        assert!(matches!(err, Error::ArchiveOpen(_)));
    }
}
