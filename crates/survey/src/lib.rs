//! Course ranking for graduate exit survey exports
//!
//! Reads the course rating columns out of the rows produced by
//! [`exitrank_xlsx`], averages every course's ratings, and writes the
//! ranking as CSV.
//!
//! # Examples
//!
//! ```
//! use exitrank_survey::{aggregate_course_ratings, ranking_to_csv_string, SurveyLayout};
//! use exitrank_xlsx::Row;
//!
//! let label = "MAcc Core Course - ACC 6510 - Tax".to_string();
//! let rows: Vec<Row> = vec![
//!     Row::new(),
//!     Row::from([(0, label)]),
//!     Row::new(),
//!     Row::from([(0, "4".to_string())]),
//!     Row::from([(0, "5".to_string())]),
//! ];
//!
//! let ranked = aggregate_course_ratings(&rows, &SurveyLayout::default()).unwrap();
//! assert_eq!(ranked[0].course, "Tax");
//! assert_eq!(ranked[0].mean_rating, 4.5);
//!
//! let csv = ranking_to_csv_string(&ranked);
//! assert!(csv.contains("1,Tax,4.5000,2"));
//! ```

mod aggregate;
mod columns;
mod csv;
mod error;
mod layout;
mod number;

pub use aggregate::{aggregate_course_ratings, CourseRating};
pub use columns::{extract_course_columns, normalize_course_name};
pub use self::csv::{ranking_to_csv_string, write_ranking, write_ranking_csv, RANKING_HEADER};
pub use error::{Result, SurveyError};
pub use layout::SurveyLayout;
pub use number::parse_number;
