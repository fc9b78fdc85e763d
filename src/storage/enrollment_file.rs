//! Parser for the enrollment file.
//!
//! Each non-blank line is one student record:
//!
//! ```text
//! 1001 alice 2 CS101 MA201 1 PH110
//! ```
//!
//! id, name, the number of enrolled courses followed by their codes, then
//! optionally the number of waitlisted courses followed by their codes. A
//! record that ends after the enrolled codes has no waitlisted courses.

use std::str::SplitWhitespace;

use crate::{
    domain::Student,
    storage::{ParseError, course_file::parse_count},
};

/// One student's line from the enrollment file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentRecord {
    /// 1-based line number the record came from.
    pub line: usize,
    /// The student the record describes.
    pub student: Student,
    /// Codes of courses the student is enrolled in.
    pub enrolled: Vec<String>,
    /// Codes of courses the student is waitlisted for.
    pub waitlisted: Vec<String>,
}

/// Parses every record in `input`, in file order.
///
/// # Errors
///
/// Returns a [`ParseError`] for the first malformed line.
pub fn parse_enrollments(input: &str) -> Result<Vec<EnrollmentRecord>, ParseError> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| parse_record(line, index + 1))
        .collect()
}

fn parse_record(line: &str, line_number: usize) -> Result<EnrollmentRecord, ParseError> {
    let mut fields = Fields {
        inner: line.split_whitespace(),
        line: line_number,
    };

    let id = fields.next("student id")?;
    let id = id.parse().map_err(|_| ParseError::InvalidNumber {
        line: line_number,
        field: "student id",
        value: id.to_string(),
    })?;
    let name = fields.next("student name")?;
    let student = Student::try_new(id, name).map_err(|_| ParseError::MissingField {
        line: line_number,
        field: "student name",
    })?;

    let enrolled = fields.codes("enrolled count", "enrolled course code")?;

    // The waitlist section is optional; it is present only if the line
    // continues past the enrolled codes.
    let waitlisted = if fields.is_exhausted() {
        Vec::new()
    } else {
        fields.codes("waitlist count", "waitlisted course code")?
    };

    let rest: Vec<_> = fields.inner.collect();
    if !rest.is_empty() {
        return Err(ParseError::TrailingFields {
            line: line_number,
            extra: rest.join(" "),
        });
    }

    Ok(EnrollmentRecord {
        line: line_number,
        student,
        enrolled,
        waitlisted,
    })
}

struct Fields<'a> {
    inner: SplitWhitespace<'a>,
    line: usize,
}

impl<'a> Fields<'a> {
    fn next(&mut self, field: &'static str) -> Result<&'a str, ParseError> {
        self.inner.next().ok_or(ParseError::MissingField {
            line: self.line,
            field,
        })
    }

    fn is_exhausted(&self) -> bool {
        self.inner.clone().next().is_none()
    }

    /// A count followed by that many course codes.
    fn codes(
        &mut self,
        count_field: &'static str,
        code_field: &'static str,
    ) -> Result<Vec<String>, ParseError> {
        let count = parse_count(self.next(count_field)?, count_field, self.line)?;
        (0..count)
            .map(|_| self.next(code_field).map(ToString::to_string))
            .collect()
    }
}
