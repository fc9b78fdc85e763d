//! Domain models for course registration.
//!
//! This module contains the core types: students, the id-ordered rosters
//! that hold them, courses with their enrolled list and waitlist, and the
//! catalog of courses for a session.

mod catalog;
pub use catalog::{Catalog, Registrations};

mod config;
pub use config::Config;

/// Course type and the outcomes of registering and cancelling.
pub mod course;
pub use course::{
    CancellationOutcome, Course, CourseReport, DeclaredCounts, EnrollmentStatus,
    RegistrationOutcome,
};

pub mod roster;
pub use roster::Roster;

mod student;
pub use student::{EmptyNameError, Student};
