use std::{fmt, rc::Rc};

use tracing::debug;

use crate::domain::{Roster, Student};

/// Where a student stands in a single course.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrollmentStatus {
    /// Holding a seat.
    Enrolled,
    /// On the waitlist.
    Waitlisted,
    /// Neither enrolled nor waitlisted.
    NotFound,
}

/// Result of [`Course::register`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// A seat was free and the student took it.
    Enrolled,
    /// The course was full; the student joined the waitlist.
    Waitlisted,
    /// The student already holds a seat. Nothing changed.
    AlreadyEnrolled,
    /// The student is already on the waitlist. Nothing changed.
    AlreadyWaitlisted,
}

/// Result of [`Course::cancel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancellationOutcome {
    /// The student gave up a seat and nobody was waiting.
    Cancelled,
    /// The student gave up a seat and the lowest-id waitlisted student took
    /// it.
    CancelledAndPromoted(Rc<Student>),
    /// The student was taken off the waitlist.
    RemovedFromWaitlist,
    /// The student was not registered for the course.
    NotFound,
}

/// Enrolled and waitlist counts as stated by the course file.
///
/// These are kept for display and diagnostics only. The live counts always
/// come from the rosters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct DeclaredCounts {
    /// Declared number of enrolled students.
    pub enrolled: usize,
    /// Declared number of waitlisted students.
    pub waitlisted: usize,
}

/// A course with its enrolled roster and waitlist.
#[derive(Debug, Clone)]
pub struct Course {
    code: String,
    title: String,
    capacity: usize,
    declared: DeclaredCounts,
    enrolled: Roster,
    waitlist: Roster,
}

impl Course {
    /// Creates a course with empty rosters.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        title: impl Into<String>,
        capacity: usize,
        declared: DeclaredCounts,
    ) -> Self {
        Self {
            code: code.into(),
            title: title.into(),
            capacity,
            declared,
            enrolled: Roster::new(),
            waitlist: Roster::new(),
        }
    }

    /// The course code, e.g. `CS101`.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The course title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Number of seats.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Counts stated by the course file.
    #[must_use]
    pub const fn declared_counts(&self) -> DeclaredCounts {
        self.declared
    }

    /// Students holding a seat, ascending by id.
    #[must_use]
    pub const fn enrolled(&self) -> &Roster {
        &self.enrolled
    }

    /// Students waiting for a seat, ascending by id.
    #[must_use]
    pub const fn waitlist(&self) -> &Roster {
        &self.waitlist
    }

    /// Number of enrolled students.
    #[must_use]
    pub fn enrolled_count(&self) -> usize {
        self.enrolled.len()
    }

    /// Number of waitlisted students.
    #[must_use]
    pub fn wait_count(&self) -> usize {
        self.waitlist.len()
    }

    /// Whether a new registration would be seated.
    #[must_use]
    pub fn has_open_seat(&self) -> bool {
        self.enrolled_count() < self.capacity
    }

    /// Registers a student, seating them if there is room and waitlisting
    /// them otherwise.
    pub fn register(&mut self, student: Rc<Student>) -> RegistrationOutcome {
        match self.status(&student) {
            EnrollmentStatus::Enrolled => return RegistrationOutcome::AlreadyEnrolled,
            EnrollmentStatus::Waitlisted => return RegistrationOutcome::AlreadyWaitlisted,
            EnrollmentStatus::NotFound => {}
        }

        if self.has_open_seat() {
            debug!(course = %self.code, student = student.id(), "enrolled");
            self.enrolled.insert(student);
            RegistrationOutcome::Enrolled
        } else {
            debug!(course = %self.code, student = student.id(), "waitlisted");
            self.waitlist.insert(student);
            RegistrationOutcome::Waitlisted
        }
    }

    /// Cancels a student's registration.
    ///
    /// A vacated seat is refilled from the front of the waitlist before this
    /// returns.
    pub fn cancel(&mut self, student: &Student) -> CancellationOutcome {
        match self.status(student) {
            EnrollmentStatus::Enrolled => {
                self.enrolled.remove(student);
                match self.waitlist.remove_first() {
                    Some(promoted) => {
                        debug!(
                            course = %self.code,
                            student = student.id(),
                            promoted = promoted.id(),
                            "cancelled and promoted"
                        );
                        self.enrolled.insert(Rc::clone(&promoted));
                        CancellationOutcome::CancelledAndPromoted(promoted)
                    }
                    None => {
                        debug!(course = %self.code, student = student.id(), "cancelled");
                        CancellationOutcome::Cancelled
                    }
                }
            }
            EnrollmentStatus::Waitlisted => {
                self.waitlist.remove(student);
                debug!(course = %self.code, student = student.id(), "removed from waitlist");
                CancellationOutcome::RemovedFromWaitlist
            }
            EnrollmentStatus::NotFound => CancellationOutcome::NotFound,
        }
    }

    /// Where `student` stands in this course.
    #[must_use]
    pub fn status(&self, student: &Student) -> EnrollmentStatus {
        if self.enrolled.contains(student) {
            EnrollmentStatus::Enrolled
        } else if self.waitlist.contains(student) {
            EnrollmentStatus::Waitlisted
        } else {
            EnrollmentStatus::NotFound
        }
    }

    /// Adds a student straight to the enrolled roster, ignoring capacity.
    ///
    /// Used when replaying historical enrollment. A student already on
    /// either roster is left where they are and `false` is returned.
    pub fn add_enrolled(&mut self, student: Rc<Student>) -> bool {
        if self.status(&student) != EnrollmentStatus::NotFound {
            return false;
        }
        self.enrolled.insert(student);
        true
    }

    /// Adds a student straight to the waitlist.
    ///
    /// Used when replaying historical enrollment. A student already on
    /// either roster is left where they are and `false` is returned.
    pub fn add_waitlisted(&mut self, student: Rc<Student>) -> bool {
        if self.status(&student) != EnrollmentStatus::NotFound {
            return false;
        }
        self.waitlist.insert(student);
        true
    }

    /// A printable roster report for this course.
    #[must_use]
    pub const fn report(&self) -> CourseReport<'_> {
        CourseReport { course: self }
    }
}

/// Roster report for a single course.
///
/// Returned by [`Course::report`]. Prints the course header, the enrolled
/// roster and, when anyone is waiting, the waitlist.
#[derive(Debug, Clone, Copy)]
pub struct CourseReport<'a> {
    course: &'a Course,
}

impl fmt::Display for CourseReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let course = self.course;
        writeln!(
            f,
            "[ {:<10}{:<15} ({})  ]",
            course.code,
            course.title,
            course.enrolled_count()
        )?;
        writeln!(f, "---------------------------------------")?;
        for student in course.enrolled.iter() {
            writeln!(f, "{student}")?;
        }
        writeln!(f)?;

        if !course.waitlist.is_empty() {
            writeln!(f, "  <  Waitlist  ({})  >", course.wait_count())?;
            for student in course.waitlist.iter() {
                writeln!(f, "{student}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
