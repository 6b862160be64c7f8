//! ZIP container abstraction for SpreadsheetML workbooks.

use crate::error::{Error, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

/// A relationship entry from a .rels file.
#[derive(Debug, Clone)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1")
    pub id: String,
    /// Relationship type URI
    pub rel_type: String,
    /// Target path (relative or absolute)
    pub target: String,
    /// Whether the target is external
    pub external: bool,
}

/// Relationships declared by one part, keyed by ID.
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    by_id: HashMap<String, Relationship>,
}

impl Relationships {
    /// Create a new empty relationships collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a relationship by ID.
    pub fn get(&self, id: &str) -> Option<&Relationship> {
        self.by_id.get(id)
    }

    /// Add a relationship, replacing any earlier one with the same ID.
    pub fn add(&mut self, rel: Relationship) {
        self.by_id.insert(rel.id.clone(), rel);
    }

    /// Number of relationships.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Rewrite an `encoding="UTF-16"` XML declaration after transcoding to UTF-8.
///
/// quick-xml would otherwise try to re-interpret the already decoded text.
fn fix_xml_encoding_declaration(content: &str) -> String {
    if content.starts_with("<?xml") {
        if let Some(end_decl) = content.find("?>") {
            let decl = &content[..end_decl + 2];
            let rest = &content[end_decl + 2..];

            let fixed_decl = decl
                .replace("encoding=\"UTF-16\"", "encoding=\"UTF-8\"")
                .replace("encoding='UTF-16'", "encoding='UTF-8'")
                .replace("encoding=\"utf-16\"", "encoding=\"UTF-8\"")
                .replace("encoding='utf-16'", "encoding='UTF-8'");

            return format!("{}{}", fixed_decl, rest);
        }
    }
    content.to_string()
}

/// Decode XML part bytes, honouring UTF-8 and UTF-16 (LE/BE) byte order marks.
///
/// SpreadsheetML parts are almost always UTF-8, but some producers write
/// UTF-16. Without a BOM, UTF-8 is tried first and UTF-16 is guessed from
/// the position of NUL bytes.
pub fn decode_xml_bytes(bytes: &[u8]) -> Result<String> {
    if let Some(rest) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        return decode_utf8(rest);
    }

    if let Some(rest) = bytes.strip_prefix(&[0xFF, 0xFE]) {
        let content = decode_utf16(rest, u16::from_le_bytes)?;
        return Ok(fix_xml_encoding_declaration(&content));
    }

    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let content = decode_utf16(rest, u16::from_be_bytes)?;
        return Ok(fix_xml_encoding_declaration(&content));
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return Ok(s.to_owned());
    }

    // ASCII markup in UTF-16 leaves NUL in every other byte
    if bytes.len() >= 4 && bytes[1] == 0 && bytes[3] == 0 {
        decode_utf16(bytes, u16::from_le_bytes)
    } else if bytes.len() >= 4 && bytes[0] == 0 && bytes[2] == 0 {
        decode_utf16(bytes, u16::from_be_bytes)
    } else {
        decode_utf8(bytes)
    }
}

fn decode_utf8(bytes: &[u8]) -> Result<String> {
    String::from_utf8(bytes.to_vec()).map_err(|e| Error::XmlParse(format!("invalid UTF-8: {}", e)))
}

fn decode_utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> Result<String> {
    let units = bytes
        .chunks_exact(2)
        .map(|pair| to_unit([pair[0], pair[1]]));

    char::decode_utf16(units)
        .collect::<std::result::Result<String, _>>()
        .map_err(|e| Error::XmlParse(format!("invalid UTF-16: {}", e)))
}

/// Random-access view over the parts of a workbook archive.
///
/// The whole archive is held in memory. Entries are read whole; dropping the
/// container releases everything it holds.
pub struct SpreadsheetContainer {
    archive: RefCell<zip::ZipArchive<Cursor<Vec<u8>>>>,
}

impl SpreadsheetContainer {
    /// Open a container from a file path.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sheetgrid::container::SpreadsheetContainer;
    ///
    /// let container = SpreadsheetContainer::open("data.xlsx")?;
    /// println!("{} entries", container.list_files().len());
    /// # Ok::<(), sheetgrid::Error>(())
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| Error::ArchiveOpen(format!("{}: {}", path.display(), e)))?;
        let mut reader = BufReader::new(file);
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    /// Create a container from a byte vector.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let cursor = Cursor::new(data);
        let archive = zip::ZipArchive::new(cursor)?;
        log::trace!("opened archive with {} entries", archive.len());
        Ok(Self {
            archive: RefCell::new(archive),
        })
    }

    /// Create a container from a reader.
    pub fn from_reader<R: Read + Seek>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    /// Read an XML part from the archive as a string.
    ///
    /// Handles UTF-8 (with or without BOM) and UTF-16 LE/BE. Bytes that are
    /// neither fail with [`Error::XmlParse`] naming the part.
    pub fn read_xml(&self, path: &str) -> Result<String> {
        let bytes = self.read_binary(path)?;
        decode_xml_bytes(&bytes).map_err(|e| match e {
            Error::XmlParse(msg) => Error::XmlParse(format!("{}: {}", path, msg)),
            other => other,
        })
    }

    /// Read a part from the archive as raw bytes.
    pub fn read_binary(&self, path: &str) -> Result<Vec<u8>> {
        let mut archive = self.archive.borrow_mut();
        let mut file = archive.by_name(path).map_err(|e| match e {
            zip::result::ZipError::FileNotFound => Error::MissingComponent(path.to_string()),
            other => other.into(),
        })?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        Ok(data)
    }

    /// Check if an entry exists in the archive.
    pub fn exists(&self, path: &str) -> bool {
        let archive = self.archive.borrow();
        let result = archive.file_names().any(|n| n == path);
        result
    }

    /// List all entries in archive listing order.
    pub fn list_files(&self) -> Vec<String> {
        let archive = self.archive.borrow();
        archive.file_names().map(String::from).collect()
    }

    /// Read the relationships belonging to a part.
    ///
    /// For `xl/workbook.xml` this reads `xl/_rels/workbook.xml.rels`. A missing
    /// or empty .rels part yields an empty collection.
    pub fn read_relationships(&self, part_path: &str) -> Result<Relationships> {
        let rels_path = if part_path.is_empty() || part_path == "/" {
            "_rels/.rels".to_string()
        } else {
            let (parent, filename) = match part_path.rsplit_once('/') {
                Some((parent, filename)) => (parent, filename),
                None => ("", part_path),
            };
            if parent.is_empty() {
                format!("_rels/{}.rels", filename)
            } else {
                format!("{}/_rels/{}.rels", parent, filename)
            }
        };

        self.parse_relationships(&rels_path)
    }

    fn parse_relationships(&self, rels_path: &str) -> Result<Relationships> {
        let content = match self.read_xml(rels_path) {
            Ok(c) => c,
            Err(Error::MissingComponent(_)) => return Ok(Relationships::new()),
            Err(e) => return Err(e),
        };

        if content.trim().is_empty() {
            return Ok(Relationships::new());
        }

        let mut rels = Relationships::new();
        let mut reader = quick_xml::Reader::from_str(&content);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(quick_xml::events::Event::Empty(e)) | Ok(quick_xml::events::Event::Start(e))
                    if e.local_name().as_ref() == b"Relationship" =>
                {
                    let mut id = String::new();
                    let mut rel_type = String::new();
                    let mut target = String::new();
                    let mut external = false;

                    for attr in e.attributes() {
                        let attr = attr?;
                        match attr.key.as_ref() {
                            b"Id" => id = attr.unescape_value()?.into_owned(),
                            b"Type" => rel_type = attr.unescape_value()?.into_owned(),
                            b"Target" => target = attr.unescape_value()?.into_owned(),
                            b"TargetMode" => {
                                external =
                                    attr.unescape_value()?.eq_ignore_ascii_case("external")
                            }
                            _ => {}
                        }
                    }

                    if !id.is_empty() {
                        rels.add(Relationship {
                            id,
                            rel_type,
                            target,
                            external,
                        });
                    }
                }
                Ok(quick_xml::events::Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(format!("{}: {}", rels_path, e))),
                _ => {}
            }
            buf.clear();
        }

        log::trace!("{}: {} relationships", rels_path, rels.len());
        Ok(rels)
    }

    /// Resolve a relationship target against the part that declares it.
    pub fn resolve_path(base: &str, relative: &str) -> String {
        if let Some(stripped) = relative.strip_prefix('/') {
            return stripped.to_string();
        }

        let mut parts: Vec<&str> = match base.rsplit_once('/') {
            Some((dir, _)) => dir.split('/').filter(|s| !s.is_empty()).collect(),
            None => Vec::new(),
        };

        for component in relative.split(['/', '\\']) {
            match component {
                "" | "." => {}
                ".." => {
                    parts.pop();
                }
                c => parts.push(c),
            }
        }

        parts.join("/")
    }
}

impl std::fmt::Debug for SpreadsheetContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpreadsheetContainer")
            .field("files", &self.list_files().len())
            .finish()
    }
}
