//! XLSX reader: shared strings, worksheet selection and decoding.

use crate::container::SpreadsheetContainer;
use crate::error::Result;
use crate::model::Matrix;
use std::io::{Read, Seek};
use std::path::Path;

use super::options::ReadOptions;
use super::shared_strings::SharedStrings;
use super::workbook::{select_worksheet, WorkbookCatalog, SHARED_STRINGS_PART};
use super::worksheet::WorksheetDecoder;

/// Reader for one XLSX workbook.
///
/// Owns the archive for its whole lifetime; dropping the reader releases it.
pub struct XlsxReader {
    container: SpreadsheetContainer,
    shared_strings: SharedStrings,
    options: ReadOptions,
}

impl XlsxReader {
    /// Open an XLSX file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let container = SpreadsheetContainer::open(path)?;
        Self::from_container(container)
    }

    /// Create a reader from bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let container = SpreadsheetContainer::from_bytes(data)?;
        Self::from_container(container)
    }

    /// Create a reader from any seekable source.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let container = SpreadsheetContainer::from_reader(reader)?;
        Self::from_container(container)
    }

    /// Create a reader from a container, loading the shared strings table.
    pub fn from_container(container: SpreadsheetContainer) -> Result<Self> {
        let shared_strings = Self::load_shared_strings(&container)?;

        Ok(Self {
            container,
            shared_strings,
            options: ReadOptions::default(),
        })
    }

    /// Replace the read options.
    pub fn with_options(mut self, options: ReadOptions) -> Self {
        self.options = options;
        self
    }

    /// The shared strings table is optional; minimal writers omit it.
    fn load_shared_strings(container: &SpreadsheetContainer) -> Result<SharedStrings> {
        if !container.exists(SHARED_STRINGS_PART) {
            log::debug!("{} not present, using an empty table", SHARED_STRINGS_PART);
            return Ok(SharedStrings::default());
        }
        let xml = container.read_xml(SHARED_STRINGS_PART)?;
        SharedStrings::parse(&xml)
    }

    /// Archive path of the worksheet the current options select.
    pub fn worksheet_path(&self) -> Result<String> {
        select_worksheet(&self.container, &self.options.sheet)
    }

    /// Decode the selected worksheet.
    pub fn read_matrix(&self) -> Result<Matrix> {
        let path = self.worksheet_path()?;
        let xml = self.container.read_xml(&path)?;

        WorksheetDecoder::new(&self.shared_strings)
            .with_max_columns(self.options.max_columns)
            .decode(&xml)
    }

    /// Sheet names declared in the workbook manifest, in manifest order.
    pub fn sheet_names(&self) -> Result<Vec<String>> {
        let catalog = WorkbookCatalog::load(&self.container)?;
        Ok(catalog
            .sheet_names()
            .into_iter()
            .map(String::from)
            .collect())
    }

    /// Get a reference to the container.
    pub fn container(&self) -> &SpreadsheetContainer {
        &self.container
    }

    /// Get the shared strings table.
    pub fn shared_strings(&self) -> &SharedStrings {
        &self.shared_strings
    }

    /// Get the read options.
    pub fn options(&self) -> &ReadOptions {
        &self.options
    }
}

impl std::fmt::Debug for XlsxReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XlsxReader")
            .field("container", &self.container)
            .field("shared_strings", &self.shared_strings.len())
            .field("options", &self.options)
            .finish()
    }
}
