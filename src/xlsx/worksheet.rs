//! Worksheet decoding: `sheetData` rows into a dense matrix.

use crate::error::{Error, Result};
use crate::model::{Matrix, Row};
use quick_xml::events::{BytesStart, Event};
use std::collections::BTreeMap;

use super::reference::column_index;
use super::{is_blank, second_root, stray_text};
use super::shared_strings::SharedStrings;

/// Element depths below the worksheet root.
const SHEET_DATA_DEPTH: usize = 2;
const ROW_DEPTH: usize = 3;
const CELL_DEPTH: usize = 4;
const VALUE_DEPTH: usize = 5;
const INLINE_TEXT_DEPTH: usize = 6;

/// A `c` element whose value has not been resolved yet.
#[derive(Debug, Default)]
struct PendingCell {
    column: usize,
    cell_type: Option<String>,
    /// Text of the first `v` child.
    value: Option<String>,
    /// Text of the first `is/t` child.
    inline: Option<String>,
    in_inline_string: bool,
}

/// Which text node is being collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Capture {
    Value,
    InlineText,
}

/// Decodes worksheet XML into a [`Matrix`] using a shared strings table.
#[derive(Debug)]
pub struct WorksheetDecoder<'a> {
    shared_strings: &'a SharedStrings,
    max_columns: Option<usize>,
}

impl<'a> WorksheetDecoder<'a> {
    /// Create a decoder without a column bound.
    pub fn new(shared_strings: &'a SharedStrings) -> Self {
        Self {
            shared_strings,
            max_columns: None,
        }
    }

    /// Reject cells whose column index is `max_columns` or more.
    pub fn with_max_columns(mut self, max_columns: Option<usize>) -> Self {
        self.max_columns = max_columns;
        self
    }

    /// Decode worksheet XML.
    ///
    /// Rows come from the `row` children of the first `sheetData` element, in
    /// document order; a worksheet without `sheetData` yields an empty matrix.
    /// Within a row, each `c` element is placed by the column letters of its
    /// `r` attribute and the gaps are filled with `""`.
    pub fn decode(&self, xml: &str) -> Result<Matrix> {
        let mut matrix = Matrix::new();
        let mut reader = quick_xml::Reader::from_str(xml);

        let mut buf = Vec::new();
        let mut depth = 0usize;
        let mut seen_root = false;
        let mut in_sheet_data = false;
        let mut sheet_data_done = false;
        let mut current_row: Option<BTreeMap<usize, String>> = None;
        let mut current_cell: Option<PendingCell> = None;
        let mut capture: Option<Capture> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    if depth == 0 && seen_root {
                        return Err(second_root("worksheet"));
                    }
                    depth += 1;
                    seen_root = true;
                    let name = e.local_name();
                    match (name.as_ref(), depth) {
                        (b"sheetData", SHEET_DATA_DEPTH) if !sheet_data_done => {
                            in_sheet_data = true;
                        }
                        (b"row", ROW_DEPTH) if in_sheet_data => {
                            current_row = Some(BTreeMap::new());
                        }
                        (b"c", CELL_DEPTH) if current_row.is_some() => {
                            current_cell = Some(self.open_cell(e)?);
                        }
                        (b"v", VALUE_DEPTH) => {
                            if let Some(cell) = current_cell.as_mut() {
                                if cell.value.is_none() {
                                    cell.value = Some(String::new());
                                    capture = Some(Capture::Value);
                                }
                            }
                        }
                        (b"is", VALUE_DEPTH) => {
                            if let Some(cell) = current_cell.as_mut() {
                                cell.in_inline_string = true;
                            }
                        }
                        (b"t", INLINE_TEXT_DEPTH) => {
                            if let Some(cell) = current_cell.as_mut() {
                                if cell.in_inline_string && cell.inline.is_none() {
                                    cell.inline = Some(String::new());
                                    capture = Some(Capture::InlineText);
                                }
                            }
                        }
                        _ => {}
                    }
                }
                Ok(Event::Empty(ref e)) => {
                    if depth == 0 && seen_root {
                        return Err(second_root("worksheet"));
                    }
                    seen_root = true;
                    let name = e.local_name();
                    match (name.as_ref(), depth + 1) {
                        (b"sheetData", SHEET_DATA_DEPTH) if !sheet_data_done => {
                            sheet_data_done = true;
                        }
                        (b"row", ROW_DEPTH) if in_sheet_data => {
                            matrix.push_row(Row::new());
                        }
                        (b"c", CELL_DEPTH) => {
                            if let Some(row) = current_row.as_mut() {
                                let cell = self.open_cell(e)?;
                                row.insert(cell.column, String::new());
                            }
                        }
                        (b"v", VALUE_DEPTH) => {
                            if let Some(cell) = current_cell.as_mut() {
                                cell.value.get_or_insert_with(String::new);
                            }
                        }
                        (b"t", INLINE_TEXT_DEPTH) => {
                            if let Some(cell) = current_cell.as_mut() {
                                if cell.in_inline_string {
                                    cell.inline.get_or_insert_with(String::new);
                                }
                            }
                        }
                        _ => {}
                    }
                }
                Ok(Event::Text(ref e)) => {
                    if depth == 0 && !is_blank(e) {
                        return Err(stray_text("worksheet"));
                    }
                    if let Some(text) = self.capture_target(&mut current_cell, capture, depth) {
                        text.push_str(&e.unescape()?);
                    }
                }
                Ok(Event::CData(ref e)) => {
                    if let Some(text) = self.capture_target(&mut current_cell, capture, depth) {
                        text.push_str(&String::from_utf8_lossy(e));
                    }
                }
                Ok(Event::End(ref e)) => {
                    let name = e.local_name();
                    match (name.as_ref(), depth) {
                        (b"v", VALUE_DEPTH) if capture == Some(Capture::Value) => {
                            capture = None;
                        }
                        (b"t", INLINE_TEXT_DEPTH) if capture == Some(Capture::InlineText) => {
                            capture = None;
                        }
                        (b"is", VALUE_DEPTH) => {
                            if let Some(cell) = current_cell.as_mut() {
                                cell.in_inline_string = false;
                            }
                        }
                        (b"c", CELL_DEPTH) => {
                            if let (Some(cell), Some(row)) =
                                (current_cell.take(), current_row.as_mut())
                            {
                                let column = cell.column;
                                row.insert(column, self.resolve_value(cell));
                            }
                        }
                        (b"row", ROW_DEPTH) => {
                            if let Some(cells) = current_row.take() {
                                matrix.push_row(dense_row(cells)?);
                            }
                        }
                        (b"sheetData", SHEET_DATA_DEPTH) if in_sheet_data => {
                            in_sheet_data = false;
                            sheet_data_done = true;
                        }
                        _ => {}
                    }
                    depth = depth.saturating_sub(1);
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(format!("worksheet: {}", e))),
                _ => {}
            }
            buf.clear();
        }

        if !seen_root {
            return Err(Error::XmlParse("worksheet: no root element".to_string()));
        }
        if depth != 0 {
            return Err(Error::XmlParse(
                "worksheet: unexpected end of document".to_string(),
            ));
        }

        log::debug!(
            "decoded {} rows, widest row has {} cells",
            matrix.len(),
            matrix.width()
        );
        Ok(matrix)
    }

    /// Read the `r` and `t` attributes of a `c` element.
    fn open_cell(&self, e: &BytesStart<'_>) -> Result<PendingCell> {
        let mut cell = PendingCell::default();

        for attr in e.attributes() {
            let attr = attr?;
            match attr.key.as_ref() {
                b"r" => {
                    let reference = attr.unescape_value()?;
                    cell.column = column_index(&reference);
                    if let Some(max) = self.max_columns {
                        if cell.column >= max {
                            return Err(Error::InvalidData(format!(
                                "cell reference {:?} is beyond the {}-column limit",
                                reference, max
                            )));
                        }
                    }
                }
                b"t" => cell.cell_type = Some(attr.unescape_value()?.into_owned()),
                _ => {}
            }
        }

        Ok(cell)
    }

    /// The buffer collecting text for the current capture, if text at this
    /// depth belongs to it.
    fn capture_target<'c>(
        &self,
        cell: &'c mut Option<PendingCell>,
        capture: Option<Capture>,
        depth: usize,
    ) -> Option<&'c mut String> {
        let cell = cell.as_mut()?;
        match capture? {
            Capture::Value if depth == VALUE_DEPTH => cell.value.as_mut(),
            Capture::InlineText if depth == INLINE_TEXT_DEPTH => cell.inline.as_mut(),
            _ => None,
        }
    }

    /// Collapse the cell's encoding into its string value.
    fn resolve_value(&self, cell: PendingCell) -> String {
        match cell.cell_type.as_deref() {
            Some("inlineStr") => cell.inline.unwrap_or_default(),
            Some("s") => cell
                .value
                .as_deref()
                .and_then(|v| v.trim().parse::<usize>().ok())
                .and_then(|idx| self.shared_strings.get(idx))
                .unwrap_or("")
                .to_string(),
            _ => cell.value.unwrap_or_default(),
        }
    }
}

/// Spread a sparse row into a positional one sized by its highest column.
///
/// Fails with [`Error::InvalidData`] when that size cannot be allocated.
fn dense_row(cells: BTreeMap<usize, String>) -> Result<Row> {
    let last = match cells.keys().next_back() {
        Some(&last) => last,
        None => return Ok(Row::new()),
    };
    let width = last
        .checked_add(1)
        .ok_or_else(|| Error::InvalidData(format!("row width overflows at column {}", last)))?;

    let mut row = Row::new();
    row.try_reserve_exact(width).map_err(|e| {
        Error::InvalidData(format!("cannot allocate a row of {} cells: {}", width, e))
    })?;
    row.resize(width, String::new());
    for (column, value) in cells {
        row[column] = value;
    }
    Ok(row)
}
