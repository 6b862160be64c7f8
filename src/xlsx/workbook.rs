//! Worksheet selection: by archive listing order or through the workbook manifest.

use crate::container::{Relationships, SpreadsheetContainer};
use crate::error::{Error, Result};
use quick_xml::events::Event;

/// Workbook manifest part.
pub const WORKBOOK_PART: &str = "xl/workbook.xml";

/// Optional shared strings part.
pub const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";

/// Worksheet entries start with this prefix and end in `.xml`.
pub const WORKSHEET_PREFIX: &str = "xl/worksheets/sheet";

/// Which worksheet of a workbook to decode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SheetSelection {
    /// First `xl/worksheets/sheet*.xml` entry in archive listing order.
    ///
    /// This does not consult `xl/workbook.xml`, so it may differ from the
    /// first tab a spreadsheet application shows.
    #[default]
    FirstListed,
    /// Sheet with this name in the workbook manifest.
    ByName(String),
    /// Zero-based position in the workbook manifest.
    ByIndex(usize),
}

/// Whether an entry name follows the worksheet part convention.
pub fn is_worksheet_part(name: &str) -> bool {
    name.starts_with(WORKSHEET_PREFIX) && name.ends_with(".xml")
}

/// First worksheet entry in listing order.
pub fn first_listed_worksheet(entries: &[String]) -> Option<&str> {
    entries
        .iter()
        .map(String::as_str)
        .find(|name| is_worksheet_part(name))
}

/// A `sheet` element of the workbook manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetInfo {
    /// Display name
    pub name: String,
    /// `sheetId` attribute
    pub sheet_id: String,
    /// Relationship ID pointing at the worksheet part
    pub rel_id: String,
}

/// Sheets declared in `xl/workbook.xml`, with their resolved part paths.
#[derive(Debug, Clone, Default)]
pub struct WorkbookCatalog {
    sheets: Vec<SheetInfo>,
    relationships: Relationships,
}

impl WorkbookCatalog {
    /// Load the catalog from a container.
    ///
    /// A workbook without `xl/workbook.xml` yields an empty catalog.
    pub fn load(container: &SpreadsheetContainer) -> Result<Self> {
        let xml = match container.read_xml(WORKBOOK_PART) {
            Ok(xml) => xml,
            Err(Error::MissingComponent(_)) => {
                log::debug!("{} not present, sheet names unavailable", WORKBOOK_PART);
                return Ok(Self::default());
            }
            Err(e) => return Err(e),
        };
        let relationships = container.read_relationships(WORKBOOK_PART)?;
        Self::parse(&xml, relationships)
    }

    /// Parse the manifest XML against the workbook relationships.
    pub fn parse(xml: &str, relationships: Relationships) -> Result<Self> {
        let mut sheets = Vec::new();
        let mut reader = quick_xml::Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e))
                    if e.local_name().as_ref() == b"sheet" =>
                {
                    let mut name = String::new();
                    let mut sheet_id = String::new();
                    let mut rel_id = String::new();

                    for attr in e.attributes() {
                        let attr = attr?;
                        let key = attr.key;
                        match key.local_name().as_ref() {
                            b"name" if key.prefix().is_none() => {
                                name = attr.unescape_value()?.into_owned();
                            }
                            b"sheetId" => sheet_id = attr.unescape_value()?.into_owned(),
                            b"id" if key.prefix().is_some() => {
                                rel_id = attr.unescape_value()?.into_owned();
                            }
                            _ => {}
                        }
                    }

                    if !name.is_empty() {
                        sheets.push(SheetInfo {
                            name,
                            sheet_id,
                            rel_id,
                        });
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(format!("{}: {}", WORKBOOK_PART, e))),
                _ => {}
            }
            buf.clear();
        }

        Ok(Self {
            sheets,
            relationships,
        })
    }

    /// Sheets in manifest order.
    pub fn sheets(&self) -> &[SheetInfo] {
        &self.sheets
    }

    /// Sheet names in manifest order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// Archive path of a sheet's worksheet part.
    pub fn part_path(&self, sheet: &SheetInfo) -> Option<String> {
        let rel = self.relationships.get(&sheet.rel_id)?;
        if rel.external {
            return None;
        }
        Some(SpreadsheetContainer::resolve_path(WORKBOOK_PART, &rel.target))
    }

    /// Find a sheet by exact name.
    pub fn by_name(&self, name: &str) -> Option<&SheetInfo> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// Find a sheet by zero-based manifest position.
    pub fn by_index(&self, index: usize) -> Option<&SheetInfo> {
        self.sheets.get(index)
    }
}

/// Pick the worksheet part to decode.
pub fn select_worksheet(
    container: &SpreadsheetContainer,
    selection: &SheetSelection,
) -> Result<String> {
    let path = match selection {
        SheetSelection::FirstListed => {
            let entries = container.list_files();
            first_listed_worksheet(&entries)
                .map(str::to_string)
                .ok_or_else(|| {
                    Error::WorksheetNotFound(format!(
                        "no {}*.xml entry in the archive",
                        WORKSHEET_PREFIX
                    ))
                })?
        }
        SheetSelection::ByName(name) => {
            let catalog = WorkbookCatalog::load(container)?;
            catalog
                .by_name(name)
                .and_then(|sheet| catalog.part_path(sheet))
                .ok_or_else(|| Error::WorksheetNotFound(format!("no sheet named {:?}", name)))?
        }
        SheetSelection::ByIndex(index) => {
            let catalog = WorkbookCatalog::load(container)?;
            catalog
                .by_index(*index)
                .and_then(|sheet| catalog.part_path(sheet))
                .ok_or_else(|| {
                    Error::WorksheetNotFound(format!(
                        "no sheet at index {} (workbook has {})",
                        index,
                        catalog.sheets().len()
                    ))
                })?
        }
    };

    if !container.exists(&path) {
        return Err(Error::WorksheetNotFound(format!(
            "{} is referenced but not present",
            path
        )));
    }

    log::debug!("selected worksheet {}", path);
    Ok(path)
}
