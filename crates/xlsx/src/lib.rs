//! Minimal XLSX cell reader for exitrank
//!
//! Reads the first worksheet of an exported workbook into rows of cell text.
//! Only the parts needed for that are understood: the zip container, the
//! shared strings pool and the worksheet's `row`/`c`/`v` structure. Styles,
//! formulas, merged cells and additional sheets are ignored.
//!
//! # Examples
//!
//! ```no_run
//! use exitrank_xlsx::read_sheet_rows;
//!
//! let rows = read_sheet_rows("survey.xlsx").unwrap();
//! if let Some(question) = rows.get(1).and_then(|row| row.get(&2)) {
//!     println!("C2 = {question}");
//! }
//! ```
//!
//! The reader works on already-extracted parts as well:
//!
//! ```
//! use exitrank_xlsx::{parse_sheet, SharedStrings};
//!
//! let pool = SharedStrings::parse(b"<sst><si><t>Hello</t></si></sst>").unwrap();
//! let rows = parse_sheet(
//!     br#"<worksheet><sheetData><row r="1"><c r="B1" t="s"><v>0</v></c></row></sheetData></worksheet>"#,
//!     &pool,
//! )
//! .unwrap();
//!
//! assert_eq!(rows[0][&1], "Hello");
//! ```

mod a1_notation;
mod error;
mod shared_strings;
mod workbook;
mod worksheet;

/// Re-export column reference helpers.
pub use a1_notation::{column_index, column_letters, try_column_index};
/// Re-export reader error types.
pub use error::{Result, XlsxError};
/// Re-export the shared strings pool.
pub use shared_strings::SharedStrings;
/// Re-export workbook access.
pub use workbook::{read_sheet_rows, Workbook, FIRST_SHEET_PART, SHARED_STRINGS_PART};
/// Re-export the worksheet parser and row type.
pub use worksheet::{parse_sheet, Row};
