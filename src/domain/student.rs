use std::fmt;

use non_empty_string::NonEmptyString;

/// A student's identity: numeric id plus name.
///
/// Two students are the same student when both fields match. The record is
/// immutable once built and is shared (via [`std::rc::Rc`]) between every
/// roster it sits on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    id: i64,
    name: NonEmptyString,
}

impl Student {
    /// Create a student record.
    #[must_use]
    pub const fn new(id: i64, name: NonEmptyString) -> Self {
        Self { id, name }
    }

    /// Create a student record from a plain string.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyNameError`] if `name` is empty.
    pub fn try_new(id: i64, name: impl Into<String>) -> Result<Self, EmptyNameError> {
        let name = NonEmptyString::new(name.into()).map_err(|_| EmptyNameError { id })?;
        Ok(Self::new(id, name))
    }

    /// The student's id. Rosters are ordered by this value.
    #[must_use]
    pub const fn id(&self) -> i64 {
        self.id
    }

    /// The student's name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<15}{:<15}", self.id, self.name.as_str())
    }
}

/// Error returned when a student is given an empty name.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("student {id} has an empty name")]
pub struct EmptyNameError {
    id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_requires_id_and_name() {
        let alice = Student::try_new(1, "alice").unwrap();
        assert_eq!(alice, Student::try_new(1, "alice").unwrap());
        assert_ne!(alice, Student::try_new(1, "bob").unwrap());
        assert_ne!(alice, Student::try_new(2, "alice").unwrap());
    }

    #[test]
    fn empty_name_is_rejected() {
        assert_eq!(
            Student::try_new(7, "").unwrap_err(),
            EmptyNameError { id: 7 }
        );
    }

    #[test]
    fn display_pads_columns() {
        let student = Student::try_new(42, "carol").unwrap();
        assert_eq!(student.to_string(), format!("{:<15}{:<15}", 42, "carol"));
    }
}
