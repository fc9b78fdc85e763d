//! Reading the course and enrollment files.

pub mod course_file;
pub mod enrollment_file;
mod loader;

pub use course_file::parse_courses;
pub use enrollment_file::{EnrollmentRecord, parse_enrollments};
pub use loader::{LoadError, ReplaySummary, UnknownCode, load_catalog, replay};

/// A malformed line in one of the input files.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    /// The line ended before a required field.
    #[error("line {line}: missing {field}")]
    MissingField {
        /// 1-based line number.
        line: usize,
        /// The field that was expected.
        field: &'static str,
    },

    /// A numeric field did not hold a non-negative integer.
    #[error("line {line}: invalid {field} '{value}'")]
    InvalidNumber {
        /// 1-based line number.
        line: usize,
        /// The field being parsed.
        field: &'static str,
        /// The text that failed to parse.
        value: String,
    },

    /// The line continued after the last expected field.
    #[error("line {line}: unexpected trailing fields '{extra}'")]
    TrailingFields {
        /// 1-based line number.
        line: usize,
        /// The unexpected text.
        extra: String,
    },
}
