use serde::{Deserialize, Serialize};

/// Where the survey export keeps its questions and answers.
///
/// Rows are 0-based indexes into the sheet rows returned by the reader.
/// The defaults match a Qualtrics export: row 0 holds internal question
/// ids, row 1 the question text, row 2 import ids, and responses start
/// at row 3.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurveyLayout {
    /// Row holding the question labels
    pub question_row: usize,
    /// First response row
    pub data_start_row: usize,
    /// Fewer rows than this is treated as a malformed export
    pub min_rows: usize,
    /// A column is a course rating when its lowercased label contains every marker
    pub label_markers: Vec<String>,
    /// The course name is the label text after the last occurrence of this
    pub label_separator: String,
}

impl Default for SurveyLayout {
    fn default() -> Self {
        SurveyLayout {
            question_row: 1,
            data_start_row: 3,
            min_rows: 4,
            label_markers: vec!["macc core course".to_string(), "- acc".to_string()],
            label_separator: " - ".to_string(),
        }
    }
}

impl SurveyLayout {
    /// Set the question label row
    #[must_use]
    pub fn with_question_row(mut self, row: usize) -> Self {
        self.question_row = row;
        self
    }

    /// Set the first response row
    #[must_use]
    pub fn with_data_start_row(mut self, row: usize) -> Self {
        self.data_start_row = row;
        self
    }

    /// Set the minimum number of sheet rows
    #[must_use]
    pub fn with_min_rows(mut self, min_rows: usize) -> Self {
        self.min_rows = min_rows;
        self
    }

    /// Replace the column label markers
    #[must_use]
    pub fn with_label_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.label_markers = markers.into_iter().map(Into::into).collect();
        self
    }

    /// Set the separator in front of the course name
    #[must_use]
    pub fn with_label_separator(mut self, separator: impl Into<String>) -> Self {
        self.label_separator = separator.into();
        self
    }

    /// Whether a question label marks a course rating column.
    pub fn is_course_label(&self, label: &str) -> bool {
        let lowered = label.to_lowercase();
        self.label_markers
            .iter()
            .all(|marker| lowered.contains(&marker.to_lowercase()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let layout = SurveyLayout::default();
        assert_eq!(layout.question_row, 1);
        assert_eq!(layout.data_start_row, 3);
        assert_eq!(layout.min_rows, 4);
        assert_eq!(layout.label_separator, " - ");
    }

    #[test]
    fn test_is_course_label() {
        let layout = SurveyLayout::default();
        assert!(layout.is_course_label(
            "Please rate the MAcc Core Course - ACC 6300 - Data Analytics"
        ));
        assert!(!layout.is_course_label("MAcc core course overall satisfaction"));
        assert!(!layout.is_course_label("Rate ACC 6300"));
    }

    #[test]
    fn test_markers_are_case_insensitive() {
        let layout = SurveyLayout::default().with_label_markers(["ELECTIVE"]);
        assert!(layout.is_course_label("elective - Tax Research"));
    }

    #[test]
    fn test_no_markers_matches_everything() {
        let layout = SurveyLayout::default().with_label_markers(Vec::<String>::new());
        assert!(layout.is_course_label("anything"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let layout: SurveyLayout = serde_json::from_str(r#"{"min_rows": 10}"#).unwrap();
        assert_eq!(layout.min_rows, 10);
        assert_eq!(layout.question_row, 1);
        assert_eq!(layout.label_markers.len(), 2);
    }
}
