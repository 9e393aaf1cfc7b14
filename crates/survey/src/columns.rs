use std::collections::BTreeMap;
use std::sync::OnceLock;

use exitrank_xlsx::Row;
use regex::Regex;
use tracing::debug;

use crate::error::{Result, SurveyError};
use crate::layout::SurveyLayout;

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid regex"))
}

/// Reduce a question label to its course name.
///
/// Takes the text after the last `separator`, trims it, and collapses
/// internal whitespace runs to a single space. A label without the
/// separator is used whole.
pub fn normalize_course_name(label: &str, separator: &str) -> String {
    let part = if separator.is_empty() {
        label
    } else {
        label.rsplit(separator).next().unwrap_or(label)
    };
    whitespace_re().replace_all(part.trim(), " ").into_owned()
}

/// Select the course rating columns from the question label row.
///
/// Returns column index to course name. Several columns may map to the same
/// name; their ratings are pooled later.
pub fn extract_course_columns(
    question_row: &Row,
    layout: &SurveyLayout,
) -> Result<BTreeMap<usize, String>> {
    let columns: BTreeMap<usize, String> = question_row
        .iter()
        .filter(|(_, label)| layout.is_course_label(label))
        .map(|(&col, label)| (col, normalize_course_name(label, &layout.label_separator)))
        .collect();

    if columns.is_empty() {
        return Err(SurveyError::NoCourseColumns);
    }

    for (col, course) in &columns {
        debug!(column = col, course = %course, "selected course column");
    }
    Ok(columns)
}
