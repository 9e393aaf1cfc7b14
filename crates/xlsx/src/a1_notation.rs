use crate::error::{Result, XlsxError};

/// Convert the column letters of an A1-style reference to a 0-based column index.
/// A=0, B=1, ... Z=25, AA=26, AB=27, ...
///
/// Row digits and any other non-letter characters are skipped, and lowercase
/// letters are treated as uppercase. The caller is expected to pass references
/// taken from a conforming worksheet; a reference without letters yields 0.
/// Use [`try_column_index`] when the input has not been validated.
pub fn column_index(reference: &str) -> usize {
    let col = reference
        .bytes()
        .filter(u8::is_ascii_alphabetic)
        .fold(0usize, |acc, b| {
            acc.wrapping_mul(26)
                .wrapping_add((b.to_ascii_uppercase() - b'A') as usize + 1)
        });

    col.saturating_sub(1)
}

/// Like [`column_index`], but rejects references that contain no column letters.
pub fn try_column_index(reference: &str) -> Result<usize> {
    if !reference.bytes().any(|b| b.is_ascii_alphabetic()) {
        return Err(XlsxError::MalformedCellRef(reference.to_string()));
    }

    Ok(column_index(reference))
}

/// Convert 0-based column index to column letters
/// 0=A, 1=B, ... 25=Z, 26=AA, 27=AB, ...
pub fn column_letters(mut col: usize) -> String {
    let mut result = String::new();
    col += 1; // Convert to 1-based for calculation

    while col > 0 {
        col -= 1;
        result.insert(0, ((col % 26) as u8 + b'A') as char);
        col /= 26;
    }

    result
}
