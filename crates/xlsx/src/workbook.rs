use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use tracing::debug;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::{Result, XlsxError};
use crate::shared_strings::SharedStrings;
use crate::worksheet::{parse_sheet, Row};

/// Archive path of the shared strings pool.
pub const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";

/// Archive path of the first worksheet.
pub const FIRST_SHEET_PART: &str = "xl/worksheets/sheet1.xml";

/// The two parts of an XLSX container needed to read the first sheet.
///
/// Opening reads both members into memory and parses the shared strings
/// pool; [`Workbook::rows`] then parses the sheet against that pool.
#[derive(Debug, Clone)]
pub struct Workbook {
    shared_strings: SharedStrings,
    sheet_xml: Vec<u8>,
}

impl Workbook {
    /// Open an XLSX file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, is not a zip archive, has no
    /// first worksheet, or its shared strings part is malformed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Open an XLSX container from any seekable reader
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;

        let shared_strings = match read_part(&mut archive, SHARED_STRINGS_PART)? {
            Some(xml) => SharedStrings::parse(&xml)?,
            None => SharedStrings::new(),
        };
        let sheet_xml =
            read_part(&mut archive, FIRST_SHEET_PART)?.ok_or_else(|| XlsxError::MissingPart {
                name: FIRST_SHEET_PART.to_string(),
            })?;

        debug!(
            shared_strings = shared_strings.len(),
            sheet_bytes = sheet_xml.len(),
            "opened workbook"
        );

        Ok(Self {
            shared_strings,
            sheet_xml,
        })
    }

    /// The parsed shared strings pool
    pub fn shared_strings(&self) -> &SharedStrings {
        &self.shared_strings
    }

    /// Parse the first worksheet into rows
    pub fn rows(&self) -> Result<Vec<Row>> {
        let rows = parse_sheet(&self.sheet_xml, &self.shared_strings)?;
        debug!(rows = rows.len(), "parsed worksheet");
        Ok(rows)
    }
}

/// Read the rows of the first worksheet of an XLSX file.
pub fn read_sheet_rows<P: AsRef<Path>>(path: P) -> Result<Vec<Row>> {
    Workbook::open(path)?.rows()
}

/// Read an archive member fully, or `None` if the archive has no such member.
fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Option<Vec<u8>>> {
    match archive.by_name(name) {
        Ok(mut file) => {
            let mut buf = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut buf)?;
            Ok(Some(buf))
        }
        Err(ZipError::FileNotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
