//! The set of courses for a session.
//!
//! The [`Catalog`] owns every [`Course`] in file order together with the
//! arena of [`Student`] records the rosters share. It knows nothing about
//! files; see [`crate::storage`] for loading.

use std::{
    collections::{HashMap, hash_map::Entry},
    rc::Rc,
};

use tracing::instrument;

use crate::domain::{
    CancellationOutcome, Course, EnrollmentStatus, RegistrationOutcome, Student,
};

/// Every course available this session, in load order.
#[derive(Debug, Default)]
pub struct Catalog {
    courses: Vec<Course>,

    /// Exact `(code, title)` lookup into `courses`.
    index: HashMap<(String, String), usize>,

    /// One shared record per student identity.
    students: HashMap<(i64, String), Rc<Student>>,
}

impl Catalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog from courses in load order.
    #[must_use]
    pub fn from_courses(courses: impl IntoIterator<Item = Course>) -> Self {
        let mut catalog = Self::new();
        for course in courses {
            catalog.push(course);
        }
        catalog
    }

    fn push(&mut self, course: Course) {
        let key = (course.code().to_string(), course.title().to_string());
        let position = self.courses.len();
        // Keep the first course on a repeated key, matching a front-to-back scan.
        self.index.entry(key).or_insert(position);
        self.courses.push(course);
    }

    /// All courses, in load order.
    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Number of courses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Whether the catalog has no courses.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Finds a course by exact code and title.
    ///
    /// A correct code with the wrong title is not a match.
    #[must_use]
    pub fn find(&self, code: &str, title: &str) -> Option<&Course> {
        self.position(code, title).map(|i| &self.courses[i])
    }

    /// Mutable variant of [`Catalog::find`].
    pub fn find_mut(&mut self, code: &str, title: &str) -> Option<&mut Course> {
        self.position(code, title).map(|i| &mut self.courses[i])
    }

    fn position(&self, code: &str, title: &str) -> Option<usize> {
        self.index
            .get(&(code.to_string(), title.to_string()))
            .copied()
    }

    /// The first course, in load order, with the given code.
    pub fn find_by_code_mut(&mut self, code: &str) -> Option<&mut Course> {
        self.courses.iter_mut().find(|course| course.code() == code)
    }

    /// Returns the shared record for this identity, creating it on first use.
    pub fn student(&mut self, student: Student) -> Rc<Student> {
        match self
            .students
            .entry((student.id(), student.name().to_string()))
        {
            Entry::Occupied(entry) => Rc::clone(entry.get()),
            Entry::Vacant(entry) => Rc::clone(entry.insert(Rc::new(student))),
        }
    }

    /// Registers a student for the course matching `code` and `title`.
    ///
    /// Returns `None` if no such course exists.
    #[instrument(level = "debug", skip(self))]
    pub fn register(
        &mut self,
        student: Student,
        code: &str,
        title: &str,
    ) -> Option<RegistrationOutcome> {
        let position = self.position(code, title)?;
        let student = self.student(student);
        Some(self.courses[position].register(student))
    }

    /// Cancels a student's registration in the course matching `code` and
    /// `title`.
    ///
    /// Returns `None` if no such course exists.
    #[instrument(level = "debug", skip(self))]
    pub fn cancel(
        &mut self,
        student: &Student,
        code: &str,
        title: &str,
    ) -> Option<CancellationOutcome> {
        self.find_mut(code, title).map(|course| course.cancel(student))
    }

    /// Every course `student` is enrolled in or waiting for.
    #[must_use]
    pub fn registrations(&self, student: &Student) -> Registrations<'_> {
        let mut registrations = Registrations::default();
        for course in &self.courses {
            match course.status(student) {
                EnrollmentStatus::Enrolled => registrations.enrolled.push(course),
                EnrollmentStatus::Waitlisted => registrations.waitlisted.push(course),
                EnrollmentStatus::NotFound => {}
            }
        }
        registrations
    }
}

/// A student's courses across the catalog, each list in catalog order.
#[derive(Debug, Default, Clone)]
pub struct Registrations<'a> {
    /// Courses with a seat.
    pub enrolled: Vec<&'a Course>,
    /// Courses on the waitlist.
    pub waitlisted: Vec<&'a Course>,
}

impl Registrations<'_> {
    /// Whether the student appears nowhere.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.enrolled.is_empty() && self.waitlisted.is_empty()
    }
}
