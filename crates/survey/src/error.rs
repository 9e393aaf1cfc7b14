use thiserror::Error;

/// Errors that can occur while ranking survey responses
#[derive(Error, Debug)]
pub enum SurveyError {
    #[error("Workbook does not have the expected survey header structure: {rows} rows, need at least {min}")]
    UnexpectedLayout { rows: usize, min: usize },

    #[error("No required-core course columns were detected in the workbook")]
    NoCourseColumns,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for survey operations
pub type Result<T> = std::result::Result<T, SurveyError>;
