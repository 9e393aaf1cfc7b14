use quick_xml::events::attributes::AttrError;
use thiserror::Error;

/// Errors that can occur while reading a workbook
#[derive(Error, Debug)]
pub enum XlsxError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    XmlAttribute(#[from] AttrError),

    #[error("Invalid UTF-8 in CDATA section: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("Workbook part not found: {name}")]
    MissingPart { name: String },

    #[error("Invalid cell reference: {0:?}")]
    MalformedCellRef(String),

    #[error("Cell in row {row} is missing its reference attribute")]
    MissingCellRef { row: usize },

    #[error("Invalid shared string index {value:?} in cell {reference}")]
    MalformedValue { reference: String, value: String },

    #[error(
        "Shared string index {index} in cell {reference} is out of range (pool has {len} entries)"
    )]
    SharedStringOutOfRange {
        reference: String,
        index: usize,
        len: usize,
    },
}

pub type Result<T> = std::result::Result<T, XlsxError>;
