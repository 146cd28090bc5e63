//! Shared constants for the roster chart crate.

// ── Chart geometry ──────────────────────────────────────────────

/// Width and height of the square chart, in CSS pixels.
pub const CHART_SIZE_PX: f64 = 600.0;

/// Inset between the chart edge and the plotted score domain, in CSS pixels.
pub const CHART_PADDING_PX: f64 = 40.0;

/// Rendered size of a student photo on the chart, in CSS pixels.
pub const PHOTO_SIZE_PX: f64 = 40.0;

// ── Score domain ────────────────────────────────────────────────

/// Lowest score that can be plotted.
pub const MIN_SCORE: f64 = 10.0;

/// Highest score that can be plotted.
pub const MAX_SCORE: f64 = 20.0;

// ── Roster ──────────────────────────────────────────────────────

/// Number of students in the initial demo roster.
pub const DEMO_ROSTER_SIZE: usize = 20;

/// Name given to imported rows that carry no name.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Avatar service used when a student has no photo.
pub const DEFAULT_AVATAR_BASE_URL: &str = "https://api.dicebear.com/7.x/avataaars/svg";

// ── CSV ─────────────────────────────────────────────────────────

/// Column names written by export, in order.
pub const EXPORT_COLUMNS: [&str; 6] = ["massar_numbr", "name", "photo", "x_score", "y_score", "mean_score"];

/// Suggested file name for exported rosters.
pub const EXPORT_FILE_NAME: &str = "students-evaluation.csv";

/// MIME type for exported rosters.
pub const EXPORT_MIME_TYPE: &str = "text/csv;charset=utf-8;";
