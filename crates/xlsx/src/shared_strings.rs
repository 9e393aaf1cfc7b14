//! Shared strings table (`xl/sharedStrings.xml`).
//!
//! Cells of type `s` store an index into this pool instead of their text.
//! Each `<si>` entry may be split into several `<t>` runs (rich text); the
//! entry's value is the concatenation of all runs in document order.

use std::ops::Index;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::Result;

/// Shared strings pool, indexed by position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SharedStrings {
    strings: Vec<String>,
}

impl SharedStrings {
    /// Create an empty pool (a workbook without a shared strings part).
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the shared strings part.
    ///
    /// Text is kept exactly as written, surrounding whitespace included.
    /// An `<si>` without any text run yields an empty string so that the
    /// positions of later entries are preserved.
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        let mut buf = Vec::new();

        let mut strings = Vec::new();
        let mut current: Option<String> = None;
        let mut in_text = false;

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"si" => current = Some(String::new()),
                    b"t" => in_text = true,
                    _ => {}
                },
                Event::Empty(e) if e.local_name().as_ref() == b"si" => {
                    strings.push(String::new());
                }
                Event::Text(t) if in_text => {
                    if let Some(entry) = current.as_mut() {
                        entry.push_str(&t.unescape()?);
                    }
                }
                Event::CData(t) if in_text => {
                    if let Some(entry) = current.as_mut() {
                        entry.push_str(std::str::from_utf8(&t)?);
                    }
                }
                Event::End(e) => match e.local_name().as_ref() {
                    b"t" => in_text = false,
                    b"si" => {
                        if let Some(entry) = current.take() {
                            strings.push(entry);
                        }
                    }
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(Self { strings })
    }

    /// Get a string by its index.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.strings.get(index).map(String::as_str)
    }

    /// Number of entries in the pool.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// All entries in pool order.
    pub fn strings(&self) -> &[String] {
        &self.strings
    }
}

impl Index<usize> for SharedStrings {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.strings[index]
    }
}

impl From<Vec<String>> for SharedStrings {
    fn from(strings: Vec<String>) -> Self {
        Self { strings }
    }
}
