//! Error types for the sheetgrid library.

use std::io;
use thiserror::Error;

/// Result type alias for sheetgrid operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting a workbook.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not a readable ZIP container.
    #[error("Cannot open archive: {0}")]
    ArchiveOpen(String),

    /// A required XML part is not well-formed.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// No entry matches the worksheet part convention or the requested sheet.
    #[error("Worksheet not found: {0}")]
    WorksheetNotFound(String),

    /// A named archive entry does not exist.
    #[error("Missing component: {0}")]
    MissingComponent(String),

    /// Invalid or out-of-bounds data in the workbook.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Error during rendering.
    #[error("Render error: {0}")]
    Render(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ArchiveOpen(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlParse(err.to_string())
    }
}

impl From<quick_xml::escape::EscapeError> for Error {
    fn from(err: quick_xml::escape::EscapeError) -> Self {
        Error::XmlParse(err.to_string())
    }
}
