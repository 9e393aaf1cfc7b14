use std::collections::BTreeMap;

use exitrank_xlsx::Row;
use tracing::{debug, info};

use crate::columns::extract_course_columns;
use crate::error::{Result, SurveyError};
use crate::layout::SurveyLayout;
use crate::number::parse_number;

/// One ranked course.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseRating {
    /// 1-based position after sorting
    pub rank: usize,
    pub course: String,
    pub mean_rating: f64,
    pub response_count: usize,
}

/// Rank courses by their mean rating.
///
/// Blank and non-numeric answers are skipped, and columns that normalize to
/// the same course name are pooled. Courses without a single rating are
/// dropped. The result is sorted by mean descending, ties broken by course
/// name, and ranked from 1.
pub fn aggregate_course_ratings(rows: &[Row], layout: &SurveyLayout) -> Result<Vec<CourseRating>> {
    let min = layout
        .min_rows
        .max(layout.question_row + 1)
        .max(layout.data_start_row);
    if rows.len() < min {
        return Err(SurveyError::UnexpectedLayout {
            rows: rows.len(),
            min,
        });
    }

    let columns = extract_course_columns(&rows[layout.question_row], layout)?;
    let responses = &rows[layout.data_start_row..];
    debug!(
        columns = columns.len(),
        responses = responses.len(),
        "aggregating course ratings"
    );

    let mut ratings: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for row in responses {
        for (col, course) in &columns {
            let Some(rating) = row.get(col).and_then(|text| parse_number(text)) else {
                continue;
            };
            ratings.entry(course.as_str()).or_default().push(rating);
        }
    }

    let mut ranked: Vec<CourseRating> = ratings
        .into_iter()
        .filter(|(_, values)| !values.is_empty())
        .map(|(course, values)| CourseRating {
            rank: 0,
            course: course.to_string(),
            mean_rating: values.iter().sum::<f64>() / values.len() as f64,
            response_count: values.len(),
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.mean_rating
            .total_cmp(&a.mean_rating)
            .then_with(|| a.course.cmp(&b.course))
    });
    for (i, rating) in ranked.iter_mut().enumerate() {
        rating.rank = i + 1;
    }

    info!(courses = ranked.len(), "ranked courses");
    Ok(ranked)
}
