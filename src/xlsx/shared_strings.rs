//! XLSX shared strings parsing.

use crate::error::{Error, Result};
use quick_xml::events::Event;

use super::{is_blank, second_root, stray_text};

/// Shared strings table (`xl/sharedStrings.xml`).
///
/// Cells of type `s` refer to entries by position, so order follows the
/// `si` items in the document exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SharedStrings {
    strings: Vec<String>,
}

impl SharedStrings {
    /// Parse shared strings from XML content.
    ///
    /// Each `si` item becomes the concatenation of every `t` element nested
    /// anywhere inside it (plain text, rich-text runs and phonetic runs alike).
    /// Items without `t` elements become `""`.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut strings = Vec::new();
        let mut reader = quick_xml::Reader::from_str(xml);

        let mut buf = Vec::new();
        let mut depth = 0usize;
        let mut seen_root = false;
        let mut si_depth: Option<usize> = None;
        let mut t_depth: Option<usize> = None;
        let mut current_text = String::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    if depth == 0 && seen_root {
                        return Err(second_root("shared strings"));
                    }
                    depth += 1;
                    seen_root = true;
                    match e.local_name().as_ref() {
                        // items are the children of the root `sst`
                        b"si" if depth == 2 => {
                            si_depth = Some(depth);
                            current_text.clear();
                        }
                        b"t" if si_depth.is_some() && t_depth.is_none() => {
                            t_depth = Some(depth);
                        }
                        _ => {}
                    }
                }
                Ok(Event::Empty(e)) => {
                    if depth == 0 && seen_root {
                        return Err(second_root("shared strings"));
                    }
                    seen_root = true;
                    if e.local_name().as_ref() == b"si" && depth == 1 {
                        strings.push(String::new());
                    }
                }
                Ok(Event::Text(e)) => {
                    if depth == 0 && !is_blank(&e) {
                        return Err(stray_text("shared strings"));
                    }
                    if t_depth == Some(depth) {
                        current_text.push_str(&e.unescape()?);
                    }
                }
                Ok(Event::CData(e)) => {
                    if t_depth == Some(depth) {
                        current_text.push_str(&String::from_utf8_lossy(&e));
                    }
                }
                Ok(Event::End(_)) => {
                    if t_depth == Some(depth) {
                        t_depth = None;
                    } else if si_depth == Some(depth) {
                        strings.push(std::mem::take(&mut current_text));
                        si_depth = None;
                    }
                    depth = depth.saturating_sub(1);
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(format!("shared strings: {}", e))),
                _ => {}
            }
            buf.clear();
        }

        if !seen_root {
            return Err(Error::XmlParse("shared strings: no root element".to_string()));
        }
        if depth != 0 {
            return Err(Error::XmlParse(
                "shared strings: unexpected end of document".to_string(),
            ));
        }

        log::debug!("loaded {} shared strings", strings.len());
        Ok(Self { strings })
    }

    /// Get a string by index.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.strings.get(index).map(|s| s.as_str())
    }

    /// Get the count of shared strings.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl From<Vec<String>> for SharedStrings {
    fn from(strings: Vec<String>) -> Self {
        Self { strings }
    }
}
