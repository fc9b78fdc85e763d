//! Course registration
//!
//! Courses are loaded from a course file, historical enrollment is replayed
//! from an enrollment file, and students are then registered, cancelled and
//! reported on against the in-memory catalog.

pub mod domain;
pub use domain::{
    CancellationOutcome, Catalog, Config, Course, EnrollmentStatus, RegistrationOutcome, Roster,
    Student,
};

/// Parsing and loading of the input files.
pub mod storage;
pub use storage::{LoadError, ParseError, load_catalog};
