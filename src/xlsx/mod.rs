//! XLSX (Excel) worksheet reading.
//!
//! This module turns one worksheet of an Office Open XML workbook (.xlsx)
//! into a dense [`Matrix`](crate::model::Matrix) of strings.
//!
//! # Example
//!
//! ```no_run
//! use sheetgrid::xlsx::{ReadOptions, XlsxReader};
//!
//! let reader = XlsxReader::open("spreadsheet.xlsx")?
//!     .with_options(ReadOptions::new().with_sheet_name("Produtos"));
//! let matrix = reader.read_matrix()?;
//!
//! for row in &matrix {
//!     println!("{}", row.join(" | "));
//! }
//! # Ok::<(), sheetgrid::Error>(())
//! ```

mod options;
mod reader;
pub mod reference;
mod shared_strings;
mod workbook;
mod worksheet;

pub use options::{ReadOptions, GRID_COLUMNS};
pub use reader::XlsxReader;
pub use shared_strings::SharedStrings;
pub use workbook::{
    first_listed_worksheet, is_worksheet_part, select_worksheet, SheetInfo, SheetSelection,
    WorkbookCatalog, SHARED_STRINGS_PART, WORKBOOK_PART, WORKSHEET_PREFIX,
};
pub use worksheet::WorksheetDecoder;

use crate::error::Error;

/// Whitespace around the root element is allowed; other text is not.
fn is_blank(text: &[u8]) -> bool {
    text.iter().all(u8::is_ascii_whitespace)
}

fn second_root(part: &str) -> Error {
    Error::XmlParse(format!("{}: content after the root element", part))
}

fn stray_text(part: &str) -> Error {
    Error::XmlParse(format!("{}: text outside the root element", part))
}
