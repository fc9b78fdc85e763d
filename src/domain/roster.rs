//! An id-ordered list of students.
//!
//! A [`Roster`] backs both the enrolled list and the waitlist of a course.
//! Entries are shared [`Student`] records, kept in ascending id order at all
//! times so that the front of a waitlist is always the lowest id.

use std::rc::Rc;

use crate::domain::Student;

/// Students ordered by ascending id.
///
/// The roster does not reject duplicates; callers check membership first.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Roster {
    students: Vec<Rc<Student>>,
}

impl Roster {
    /// Creates an empty roster.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            students: Vec::new(),
        }
    }

    /// Inserts a student, keeping ids ascending.
    ///
    /// The student is placed immediately before the first entry whose id is
    /// greater than or equal to its own, or at the end if there is none.
    pub fn insert(&mut self, student: Rc<Student>) {
        let position = self
            .students
            .partition_point(|existing| existing.id() < student.id());
        self.students.insert(position, student);
    }

    /// Removes the first entry equal to `student`.
    ///
    /// Returns `true` if an entry was removed.
    pub fn remove(&mut self, student: &Student) -> bool {
        if let Some(position) = self.position(student) {
            self.students.remove(position);
            true
        } else {
            false
        }
    }

    /// Removes and returns the lowest-id entry.
    pub fn remove_first(&mut self) -> Option<Rc<Student>> {
        if self.students.is_empty() {
            None
        } else {
            Some(self.students.remove(0))
        }
    }

    /// The lowest-id entry, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Rc<Student>> {
        self.students.first()
    }

    /// Whether an entry equal to `student` is present.
    #[must_use]
    pub fn contains(&self, student: &Student) -> bool {
        self.position(student).is_some()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.students.len()
    }

    /// Whether the roster has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Iterates the entries in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Student> + '_ {
        self.students.iter().map(|student| &**student)
    }

    fn position(&self, student: &Student) -> Option<usize> {
        self.students
            .iter()
            .position(|existing| **existing == *student)
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Rc<Student>;
    type IntoIter = std::slice::Iter<'a, Rc<Student>>;

    fn into_iter(self) -> Self::IntoIter {
        self.students.iter()
    }
}
