//! Worksheet cell reader (`xl/worksheets/sheetN.xml`).

use std::collections::BTreeMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::a1_notation::try_column_index;
use crate::error::{Result, XlsxError};
use crate::shared_strings::SharedStrings;

/// One worksheet row: column index to cell text.
///
/// Columns without a cell node are absent. A cell node without a value is
/// present with an empty string.
pub type Row = BTreeMap<usize, String>;

/// How a cell's `<v>` text is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellKind {
    /// `t="s"`: the value is an index into the shared strings pool
    SharedString,
    /// Numbers, booleans, inline formula results, ...: the value is the text itself
    Literal,
}

impl CellKind {
    fn from_attr(value: Option<&str>) -> Self {
        match value {
            Some("s") => CellKind::SharedString,
            _ => CellKind::Literal,
        }
    }
}

/// A `<c>` element between its start and end tags.
#[derive(Debug)]
struct PendingCell {
    reference: String,
    column: usize,
    kind: CellKind,
    value: Option<String>,
}

impl PendingCell {
    fn from_start(start: &BytesStart<'_>, row: usize) -> Result<Self> {
        let mut reference = None;
        let mut kind = None;

        for attr in start.attributes() {
            let attr = attr?;
            match attr.key.local_name().as_ref() {
                b"r" => reference = Some(attr.unescape_value()?.into_owned()),
                b"t" => kind = Some(attr.unescape_value()?.into_owned()),
                _ => {}
            }
        }

        let reference = reference.ok_or(XlsxError::MissingCellRef { row })?;
        let column = try_column_index(&reference)?;

        Ok(Self {
            reference,
            column,
            kind: CellKind::from_attr(kind.as_deref()),
            value: None,
        })
    }

    fn resolve(self, shared_strings: &SharedStrings) -> Result<(usize, String)> {
        let Some(raw) = self.value else {
            return Ok((self.column, String::new()));
        };

        let text = match self.kind {
            CellKind::Literal => raw,
            CellKind::SharedString => {
                let index = raw.trim().parse::<usize>().map_err(|_| XlsxError::MalformedValue {
                    reference: self.reference.clone(),
                    value: raw.clone(),
                })?;
                shared_strings
                    .get(index)
                    .ok_or_else(|| XlsxError::SharedStringOutOfRange {
                        reference: self.reference.clone(),
                        index,
                        len: shared_strings.len(),
                    })?
                    .to_string()
            }
        };

        Ok((self.column, text))
    }
}

/// Parse a worksheet part into rows, resolving shared strings.
///
/// Rows and cells come back in document order. Row numbers in the XML are not
/// used: the n-th `<row>` element is the n-th entry of the result. Any error
/// aborts the whole parse.
pub fn parse_sheet(xml: &[u8], shared_strings: &SharedStrings) -> Result<Vec<Row>> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();

    let mut rows = Vec::new();
    let mut row: Option<Row> = None;
    let mut cell: Option<PendingCell> = None;
    let mut in_value = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"row" => row = Some(Row::new()),
                b"c" => cell = Some(PendingCell::from_start(&e, rows.len())?),
                b"v" => {
                    if let Some(cell) = cell.as_mut() {
                        cell.value = Some(String::new());
                        in_value = true;
                    }
                }
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"row" => rows.push(Row::new()),
                b"c" => {
                    let (column, text) =
                        PendingCell::from_start(&e, rows.len())?.resolve(shared_strings)?;
                    if let Some(row) = row.as_mut() {
                        row.insert(column, text);
                    }
                }
                b"v" => {
                    if let Some(cell) = cell.as_mut() {
                        cell.value = Some(String::new());
                    }
                }
                _ => {}
            },
            Event::Text(t) if in_value => {
                if let Some(value) = cell.as_mut().and_then(|c| c.value.as_mut()) {
                    value.push_str(&t.unescape()?);
                }
            }
            Event::CData(t) if in_value => {
                if let Some(value) = cell.as_mut().and_then(|c| c.value.as_mut()) {
                    value.push_str(std::str::from_utf8(&t)?);
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"v" => in_value = false,
                b"c" => {
                    if let Some(pending) = cell.take() {
                        let (column, text) = pending.resolve(shared_strings)?;
                        if let Some(row) = row.as_mut() {
                            row.insert(column, text);
                        }
                    }
                }
                b"row" => {
                    if let Some(done) = row.take() {
                        rows.push(done);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(rows)
}
