//! Builds a [`Catalog`] from the course and enrollment files.
//!
//! Loading happens in two phases. The course file creates every course with
//! empty rosters, then the enrollment file is replayed on top with bulk adds
//! that bypass the capacity gate. The replay is taken as the truth; the
//! counts declared in the course file are kept but never reconciled.

use std::{
    fs,
    path::{Path, PathBuf},
    rc::Rc,
};

use tracing::{debug, instrument, warn};

use crate::{
    domain::{Catalog, Config},
    storage::{
        ParseError,
        course_file::parse_courses,
        enrollment_file::{EnrollmentRecord, parse_enrollments},
    },
};

/// Errors that can occur while loading the catalog.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// An input file could not be read.
    #[error("failed to read {}", path.display())]
    Io {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An input file was malformed.
    #[error("{}: {source}", path.display())]
    Parse {
        /// The malformed file.
        path: PathBuf,
        /// What was wrong with it.
        #[source]
        source: ParseError,
    },

    /// An enrollment record named a course code that is not in the catalog,
    /// and the configuration asks for strict checking.
    #[error("{}: line {line}: unknown course code '{code}'", path.display())]
    UnknownCourse {
        /// The enrollment file.
        path: PathBuf,
        /// 1-based line of the offending record.
        line: usize,
        /// The unknown course code.
        code: String,
    },
}

/// Counters describing an enrollment replay.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Student records processed.
    pub students: usize,
    /// Bulk adds to enrolled rosters.
    pub enrolled: usize,
    /// Bulk adds to waitlists.
    pub waitlisted: usize,
    /// Course codes that matched no course and were skipped.
    pub skipped: usize,
    /// Codes naming a course the student was already placed in.
    pub duplicates: usize,
}

/// Loads the catalog from a course file and an enrollment file.
///
/// # Errors
///
/// Fails if either file cannot be read or parsed, or if strict course code
/// checking is enabled and an enrollment names an unknown course.
#[instrument(level = "debug", skip(config))]
pub fn load_catalog(
    course_path: &Path,
    enrollment_path: &Path,
    config: &Config,
) -> Result<Catalog, LoadError> {
    let courses = parse_courses(&read(course_path)?, config).map_err(|source| {
        LoadError::Parse {
            path: course_path.to_path_buf(),
            source,
        }
    })?;
    let mut catalog = Catalog::from_courses(courses);

    let records = parse_enrollments(&read(enrollment_path)?).map_err(|source| {
        LoadError::Parse {
            path: enrollment_path.to_path_buf(),
            source,
        }
    })?;

    let summary = replay(&mut catalog, records, config.strict_course_codes).map_err(
        |UnknownCode { line, code }| LoadError::UnknownCourse {
            path: enrollment_path.to_path_buf(),
            line,
            code,
        },
    )?;
    debug!(
        courses = catalog.len(),
        students = summary.students,
        enrolled = summary.enrolled,
        waitlisted = summary.waitlisted,
        skipped = summary.skipped,
        duplicates = summary.duplicates,
        "catalog loaded"
    );

    report_declared_drift(&catalog);
    Ok(catalog)
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// An enrollment record named a course code the catalog does not have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCode {
    /// 1-based line of the record.
    pub line: usize,
    /// The unknown code.
    pub code: String,
}

/// Replays enrollment records onto the catalog.
///
/// Each listed code is matched against the first course with that code.
/// Rosters are filled directly, without the capacity gate.
///
/// # Errors
///
/// With `strict` set, returns the first code that matches no course.
/// Otherwise unknown codes are skipped and counted.
pub fn replay(
    catalog: &mut Catalog,
    records: impl IntoIterator<Item = EnrollmentRecord>,
    strict: bool,
) -> Result<ReplaySummary, UnknownCode> {
    let mut summary = ReplaySummary::default();

    for record in records {
        let student = catalog.student(record.student);
        summary.students += 1;

        let sections = [(record.enrolled, true), (record.waitlisted, false)];
        for (codes, enrolled) in sections {
            for code in codes {
                let Some(course) = catalog.find_by_code_mut(&code) else {
                    if strict {
                        return Err(UnknownCode {
                            line: record.line,
                            code,
                        });
                    }
                    warn!(
                        line = record.line,
                        student = student.id(),
                        "skipping unknown course code '{code}'"
                    );
                    summary.skipped += 1;
                    continue;
                };

                let added = if enrolled {
                    course.add_enrolled(Rc::clone(&student))
                } else {
                    course.add_waitlisted(Rc::clone(&student))
                };
                if !added {
                    warn!(
                        line = record.line,
                        student = student.id(),
                        "ignoring repeated course code '{code}'"
                    );
                    summary.duplicates += 1;
                } else if enrolled {
                    summary.enrolled += 1;
                } else {
                    summary.waitlisted += 1;
                }
            }
        }
    }

    Ok(summary)
}

fn report_declared_drift(catalog: &Catalog) {
    for course in catalog.courses() {
        let declared = course.declared_counts();
        if declared.enrolled != course.enrolled_count()
            || declared.waitlisted != course.wait_count()
        {
            warn!(
                course = course.code(),
                declared_enrolled = declared.enrolled,
                declared_waitlisted = declared.waitlisted,
                enrolled = course.enrolled_count(),
                waitlisted = course.wait_count(),
                "course file counts differ from enrollment file"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::domain::Student;

    const COURSES: &str = "CS101 Programming 2 1\nMA201 Calculus 1 0\nCS101 Lab 0 0\n";
    const ENROLLMENTS: &str = "\
3 carol 1 CS101 1 MA201
1 alice 2 CS101 MA201
2 bob 0 1 CS101
";

    fn write_inputs(dir: &Path, courses: &str, enrollments: &str) -> (PathBuf, PathBuf) {
        let course_path = dir.join("courses.txt");
        let enrollment_path = dir.join("enrollments.txt");
        fs::write(&course_path, courses).unwrap();
        fs::write(&enrollment_path, enrollments).unwrap();
        (course_path, enrollment_path)
    }

    fn ids(roster: &crate::domain::Roster) -> Vec<i64> {
        roster.iter().map(Student::id).collect()
    }

    #[test]
    fn replays_enrollment_onto_first_matching_code() {
        let tmp = tempfile::tempdir().unwrap();
        let (courses, enrollments) = write_inputs(tmp.path(), COURSES, ENROLLMENTS);

        let catalog = load_catalog(&courses, &enrollments, &Config::default()).unwrap();

        let programming = catalog.find("CS101", "Programming").unwrap();
        assert_eq!(ids(programming.enrolled()), vec![1, 3]);
        assert_eq!(ids(programming.waitlist()), vec![2]);

        let calculus = catalog.find("MA201", "Calculus").unwrap();
        assert_eq!(ids(calculus.enrolled()), vec![1]);
        assert_eq!(ids(calculus.waitlist()), vec![3]);

        assert!(catalog.find("CS101", "Lab").unwrap().enrolled().is_empty());
    }

    #[test]
    fn replay_ignores_capacity() {
        let tmp = tempfile::tempdir().unwrap();
        let (courses, enrollments) = write_inputs(
            tmp.path(),
            "CS101 Programming 0 0\n",
            "1 a 1 CS101\n2 b 1 CS101\n3 c 1 CS101\n",
        );
        let mut config = Config::default();
        config.set_capacity(1);

        let catalog = load_catalog(&courses, &enrollments, &config).unwrap();

        let course = catalog.find("CS101", "Programming").unwrap();
        assert_eq!(course.enrolled_count(), 3);
        assert_eq!(course.capacity(), 1);
    }

    #[test]
    fn declared_counts_are_not_reconciled() {
        let tmp = tempfile::tempdir().unwrap();
        let (courses, enrollments) =
            write_inputs(tmp.path(), "CS101 Programming 7 4\n", "1 a 1 CS101\n");

        let catalog = load_catalog(&courses, &enrollments, &Config::default()).unwrap();

        let course = catalog.find("CS101", "Programming").unwrap();
        assert_eq!(course.declared_counts().enrolled, 7);
        assert_eq!(course.declared_counts().waitlisted, 4);
        assert_eq!(course.enrolled_count(), 1);
        assert_eq!(course.wait_count(), 0);
    }

    #[test]
    fn students_are_shared_between_rosters() {
        let tmp = tempfile::tempdir().unwrap();
        let (courses, enrollments) = write_inputs(tmp.path(), COURSES, ENROLLMENTS);

        let catalog = load_catalog(&courses, &enrollments, &Config::default()).unwrap();

        let programming = catalog.find("CS101", "Programming").unwrap();
        let calculus = catalog.find("MA201", "Calculus").unwrap();
        let a = programming.enrolled().into_iter().next().unwrap();
        let b = calculus.enrolled().into_iter().next().unwrap();
        assert!(std::rc::Rc::ptr_eq(a, b));
    }

    #[test]
    fn unknown_codes_are_skipped_by_default() {
        let mut catalog = Catalog::from_courses(
            parse_courses("CS101 Programming 0 0\n", &Config::default()).unwrap(),
        );
        let records = parse_enrollments("1 a 2 CS101 XX999\n").unwrap();

        let summary = replay(&mut catalog, records, false).unwrap();

        assert_eq!(
            summary,
            ReplaySummary {
                students: 1,
                enrolled: 1,
                waitlisted: 0,
                skipped: 1,
                duplicates: 0,
            }
        );
    }

    #[test]
    fn repeated_codes_place_a_student_once() {
        let mut catalog = Catalog::from_courses(
            parse_courses("CS101 Programming 0 0\n", &Config::default()).unwrap(),
        );
        let records = parse_enrollments("1 a 2 CS101 CS101 1 CS101\n2 b 0 1 CS101\n").unwrap();

        let summary = replay(&mut catalog, records, false).unwrap();

        assert_eq!(summary.enrolled, 1);
        assert_eq!(summary.waitlisted, 1);
        assert_eq!(summary.duplicates, 2);

        let course = catalog.find("CS101", "Programming").unwrap();
        assert_eq!(ids(course.enrolled()), vec![1]);
        assert_eq!(ids(course.waitlist()), vec![2]);

        let a = Student::try_new(1, "a").unwrap();
        catalog.cancel(&a, "CS101", "Programming");

        let course = catalog.find("CS101", "Programming").unwrap();
        assert_eq!(ids(course.enrolled()), vec![2]);
        assert!(course.waitlist().is_empty());
        assert_eq!(course.status(&a), crate::domain::EnrollmentStatus::NotFound);
    }

    #[test]
    fn unknown_codes_fail_in_strict_mode() {
        let tmp = tempfile::tempdir().unwrap();
        let (courses, enrollments) = write_inputs(
            tmp.path(),
            "CS101 Programming 0 0\n",
            "1 a 1 CS101\n2 b 0 1 XX999\n",
        );
        let mut config = Config::default();
        config.strict_course_codes = true;

        let error = load_catalog(&courses, &enrollments, &config).unwrap_err();

        assert!(matches!(
            error,
            LoadError::UnknownCourse { line: 2, ref code, .. } if code == "XX999"
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let (courses, _) = write_inputs(tmp.path(), COURSES, ENROLLMENTS);
        let missing = tmp.path().join("nope.txt");

        let error = load_catalog(&courses, &missing, &Config::default()).unwrap_err();

        assert!(matches!(error, LoadError::Io { ref path, .. } if path == &missing));
        assert!(error.to_string().starts_with("failed to read"));
    }

    #[test]
    fn malformed_course_file_names_the_file() {
        let tmp = tempfile::tempdir().unwrap();
        let (courses, enrollments) = write_inputs(tmp.path(), "CS101 Programming x 0\n", "");

        let error = load_catalog(&courses, &enrollments, &Config::default()).unwrap_err();

        assert!(matches!(error, LoadError::Parse { ref path, .. } if path == &courses));
    }
}
