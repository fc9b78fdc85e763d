//! Parser for the course file.
//!
//! Each non-blank line describes one course as four whitespace-separated
//! fields:
//!
//! ```text
//! CS101 Programming 3 1
//! ```
//!
//! code, title, declared enrolled count and declared waitlist count.

use crate::{
    domain::{Config, Course, DeclaredCounts},
    storage::ParseError,
};

/// Parses every course in `input`, in file order.
///
/// Seat counts come from `config`; the counts in the file are kept as
/// [`DeclaredCounts`].
///
/// # Errors
///
/// Returns a [`ParseError`] for the first malformed line.
pub fn parse_courses(input: &str, config: &Config) -> Result<Vec<Course>, ParseError> {
    let mut courses = Vec::new();
    for (index, line) in input.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        courses.push(parse_course(line, index + 1, config)?);
    }
    tracing::debug!("read {} courses", courses.len());
    Ok(courses)
}

fn parse_course(line: &str, line_number: usize, config: &Config) -> Result<Course, ParseError> {
    let mut fields = line.split_whitespace();
    let mut next = |field| {
        fields.next().ok_or(ParseError::MissingField {
            line: line_number,
            field,
        })
    };

    let code = next("course code")?;
    let title = next("course title")?;
    let enrolled = parse_count(next("enrolled count")?, "enrolled count", line_number)?;
    let waitlisted = parse_count(next("waitlist count")?, "waitlist count", line_number)?;

    let rest: Vec<_> = fields.collect();
    if !rest.is_empty() {
        return Err(ParseError::TrailingFields {
            line: line_number,
            extra: rest.join(" "),
        });
    }

    Ok(Course::new(
        code,
        title,
        config.capacity_for(code),
        DeclaredCounts {
            enrolled,
            waitlisted,
        },
    ))
}

pub(super) fn parse_count(
    value: &str,
    field: &'static str,
    line: usize,
) -> Result<usize, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidNumber {
        line,
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn read(input: &str) -> Result<Vec<Course>, ParseError> {
        parse_courses(input, &Config::default())
    }

    #[test]
    fn reads_courses_in_file_order() {
        let courses = read("CS101 Programming 3 1\n\nMA201 Calculus 0 0\n").unwrap();

        assert_eq!(courses.len(), 2);
        assert_eq!(courses[0].code(), "CS101");
        assert_eq!(courses[0].title(), "Programming");
        assert_eq!(
            courses[0].declared_counts(),
            DeclaredCounts {
                enrolled: 3,
                waitlisted: 1
            }
        );
        assert_eq!(courses[1].code(), "MA201");
        assert!(courses[1].enrolled().is_empty());
    }

    #[test]
    fn capacity_comes_from_config() {
        let mut config = Config::default();
        config.set_capacity_for("MA201", 2);

        let courses = parse_courses("CS101 Programming 0 0\nMA201 Calculus 0 0\n", &config).unwrap();

        assert_eq!(courses[0].capacity(), 10);
        assert_eq!(courses[1].capacity(), 2);
    }

    #[test_case("CS101 Programming 3\n", 1, "waitlist count"; "missing waitlist count")]
    #[test_case("CS101\n", 1, "course title"; "missing title")]
    #[test_case("MA201 Calculus 0 0\nCS101 Programming\n", 2, "enrolled count"; "error on second line")]
    fn missing_fields_are_reported(input: &str, line: usize, field: &'static str) {
        assert_eq!(read(input).unwrap_err(), ParseError::MissingField { line, field });
    }

    #[test]
    fn non_numeric_count_is_rejected() {
        assert_eq!(
            read("CS101 Programming three 0\n").unwrap_err(),
            ParseError::InvalidNumber {
                line: 1,
                field: "enrolled count",
                value: "three".to_string(),
            }
        );
    }

    #[test]
    fn extra_fields_are_rejected() {
        assert_eq!(
            read("CS101 Intro to Programming 0 0\n").unwrap_err(),
            ParseError::InvalidNumber {
                line: 1,
                field: "enrolled count",
                value: "to".to_string(),
            }
        );
        assert_eq!(
            read("CS101 Programming 0 0 extra\n").unwrap_err(),
            ParseError::TrailingFields {
                line: 1,
                extra: "extra".to_string(),
            }
        );
    }
}
