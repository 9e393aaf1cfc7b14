use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::aggregate::CourseRating;
use crate::error::Result;

/// Header row of the ranking file
pub const RANKING_HEADER: [&str; 4] = ["rank", "course", "mean_rating", "response_count"];

/// Write the ranking as CSV to a writer.
///
/// Means are written with exactly four decimals and records end in CRLF.
pub fn write_ranking<W: Write>(ratings: &[CourseRating], writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);

    csv_writer.write_record(RANKING_HEADER)?;
    for rating in ratings {
        csv_writer.write_record([
            rating.rank.to_string(),
            rating.course.clone(),
            format!("{:.4}", rating.mean_rating),
            rating.response_count.to_string(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write the ranking to a CSV file, creating parent directories.
pub fn write_ranking_csv<P: AsRef<Path>>(ratings: &[CourseRating], path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(path)?;
    write_ranking(ratings, BufWriter::new(file))?;
    debug!(path = %path.display(), rows = ratings.len(), "wrote ranking csv");
    Ok(())
}

/// Render the ranking as a CSV string
#[must_use]
pub fn ranking_to_csv_string(ratings: &[CourseRating]) -> String {
    let mut buffer = Vec::new();
    // Writing into a Vec cannot fail
    let _ = write_ranking(ratings, &mut buffer);
    String::from_utf8_lossy(&buffer).to_string()
}
