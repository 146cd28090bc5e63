//! CSV import and export for the roster.
//!
//! The format is deliberately plain: one header row, comma-delimited fields,
//! newline-delimited rows, and no quoting or escaping. Fields are assumed to
//! be comma-free.
//!
//! Import is strict about the header and lenient about rows. A file without a
//! `name` column is rejected outright; inside an accepted file, every
//! non-blank row becomes a student, with defaults filling any missing or
//! unparseable field.

#[cfg(test)]
#[path = "codec_test.rs"]
mod codec_test;

use crate::avatar::AvatarGenerator;
use crate::consts::{EXPORT_COLUMNS, UNKNOWN_NAME};
use crate::roster::{IdAllocator, Scores, Student, StudentId};

/// Error returned by [`import`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The header row lacks one or more required columns.
    #[error("missing required fields: {}", .fields.join(", "))]
    MissingFields { fields: Vec<String> },
}

/// One data row, by column name. `None` means the column is absent or the
/// value is blank or unparseable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsvRow {
    /// From `massar_numbr`, or `id` when that column is absent.
    pub id: Option<StudentId>,
    pub name: Option<String>,
    pub photo: Option<String>,
    pub x_score: Option<f64>,
    pub y_score: Option<f64>,
}

impl CsvRow {
    /// Build a student, filling defaults for everything but the id.
    ///
    /// Name falls back to `"Unknown"`, photo to an avatar seeded by the name,
    /// and scores to 0.
    #[must_use]
    pub fn into_student(self, id: StudentId, avatars: &AvatarGenerator) -> Student {
        let name = self.name.unwrap_or_else(|| UNKNOWN_NAME.to_string());
        let photo_url = self.photo.unwrap_or_else(|| avatars.url(&name));
        Student {
            id,
            name,
            photo_url,
            scores: Scores::new(self.x_score.unwrap_or(0.0), self.y_score.unwrap_or(0.0)),
        }
    }
}

/// Column positions resolved from the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Header {
    id: Option<usize>,
    name: usize,
    photo: Option<usize>,
    x_score: Option<usize>,
    y_score: Option<usize>,
}

impl Header {
    fn parse(line: &str) -> Result<Self, CodecError> {
        let columns: Vec<String> = line.split(',').map(|c| c.trim().to_lowercase()).collect();
        // Repeated column names resolve to the rightmost one.
        let find = |name: &str| columns.iter().rposition(|c| c == name);

        let Some(name) = find("name") else {
            return Err(CodecError::MissingFields { fields: vec!["name".to_string()] });
        };

        Ok(Self {
            id: find("massar_numbr").or_else(|| find("id")),
            name,
            photo: find("photo"),
            x_score: find("x_score"),
            y_score: find("y_score"),
        })
    }

    fn row(&self, line: &str) -> CsvRow {
        let values: Vec<&str> = line.split(',').map(str::trim).collect();
        let field = |index: Option<usize>| {
            index
                .and_then(|i| values.get(i))
                .copied()
                .filter(|v| !v.is_empty())
        };
        CsvRow {
            id: field(self.id).and_then(|raw| match raw.parse::<StudentId>() {
                Ok(id) => Some(id),
                Err(e) => {
                    tracing::debug!(value = %raw, error = %e, "unusable student id, assigning placeholder");
                    None
                }
            }),
            name: field(Some(self.name)).map(str::to_string),
            photo: field(self.photo).map(str::to_string),
            x_score: field(self.x_score).and_then(parse_score),
            y_score: field(self.y_score).and_then(parse_score),
        }
    }
}

fn parse_score(raw: &str) -> Option<f64> {
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => None,
    }
}

/// Parse CSV text into rows without applying defaults.
///
/// # Errors
///
/// Returns [`CodecError::MissingFields`] if the header row lacks a required
/// column. Empty input has an empty header and is rejected the same way.
pub fn parse_rows(text: &str) -> Result<Vec<CsvRow>, CodecError> {
    let mut lines = text.lines();
    let header = Header::parse(lines.next().unwrap_or(""))?;
    Ok(lines
        .filter(|line| !line.trim().is_empty())
        .map(|line| header.row(line))
        .collect())
}

/// Parse CSV text into students ready to replace the roster.
///
/// Rows without a usable id get placeholder ids counting up from one above
/// the largest explicit id in the file, skipping every explicit id.
///
/// # Errors
///
/// Returns [`CodecError::MissingFields`] if the header row lacks a required
/// column; no rows are returned in that case.
pub fn import(text: &str, avatars: &AvatarGenerator) -> Result<Vec<Student>, CodecError> {
    let rows = parse_rows(text)?;
    let mut placeholders = IdAllocator::new(rows.iter().filter_map(|r| r.id));
    let students: Vec<Student> = rows
        .into_iter()
        .map(|row| {
            let id = row.id.unwrap_or_else(|| placeholders.allocate());
            row.into_student(id, avatars)
        })
        .collect();
    tracing::info!(count = students.len(), "parsed roster csv");
    Ok(students)
}

/// Render students as CSV: the header row, then one line per student in order.
#[must_use]
pub fn export(students: &[Student]) -> String {
    let mut lines = Vec::with_capacity(students.len() + 1);
    lines.push(EXPORT_COLUMNS.join(","));
    for s in students {
        lines.push(format!(
            "{},{},{},{},{},{}",
            s.id,
            s.name,
            s.photo_url,
            s.scores.x,
            s.scores.y,
            s.mean_score()
        ));
    }
    lines.join("\n")
}
