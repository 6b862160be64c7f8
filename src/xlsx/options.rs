//! Read options configuration.

use super::workbook::SheetSelection;

/// Column count of the SpreadsheetML grid (`A` through `XFD`).
pub const GRID_COLUMNS: usize = 16_384;

/// Options for reading a worksheet.
///
/// By default cells past column `XFD` fail with
/// [`Error::InvalidData`](crate::Error::InvalidData), since every row is
/// allocated up to its highest column. Plain SpreadsheetML conversion has no
/// such bound; `with_max_columns(None)` lifts it and accepts any column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOptions {
    /// Which worksheet to decode
    pub sheet: SheetSelection,

    /// Cells at or beyond this zero-based column are rejected (None = no bound)
    pub max_columns: Option<usize>,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            sheet: SheetSelection::FirstListed,
            max_columns: Some(GRID_COLUMNS),
        }
    }
}

impl ReadOptions {
    /// Create new read options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the worksheet selection.
    pub fn with_sheet(mut self, sheet: SheetSelection) -> Self {
        self.sheet = sheet;
        self
    }

    /// Select a sheet by its workbook name.
    pub fn with_sheet_name(self, name: impl Into<String>) -> Self {
        self.with_sheet(SheetSelection::ByName(name.into()))
    }

    /// Select a sheet by its zero-based workbook position.
    pub fn with_sheet_index(self, index: usize) -> Self {
        self.with_sheet(SheetSelection::ByIndex(index))
    }

    /// Set the column bound.
    pub fn with_max_columns(mut self, max_columns: Option<usize>) -> Self {
        self.max_columns = max_columns;
        self
    }
}
