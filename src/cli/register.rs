use clap::Parser;
use registrar::{Catalog, RegistrationOutcome};
use tracing::instrument;

use super::{CourseArgs, Exit, StudentArgs, terminal::Colorize};

#[derive(Debug, Parser)]
#[command(about = "Register a student for a course, joining the waitlist if it is full")]
pub struct Register {
    #[command(flatten)]
    student: StudentArgs,

    #[command(flatten)]
    course: CourseArgs,
}

impl Register {
    #[instrument(level = "debug", skip(catalog))]
    pub fn run(self, catalog: &mut Catalog) -> anyhow::Result<Exit> {
        let student = self.student.into_student()?;
        let outcome = catalog.register(student, &self.course.code, &self.course.title);
        print(outcome.as_ref(), &self.course);
        Ok(if outcome.is_some() {
            Exit::Success
        } else {
            Exit::NoSuchCourse
        })
    }
}

/// The message shown for a registration attempt.
///
/// `None` means no course matched both the code and the title.
pub fn message(outcome: Option<&RegistrationOutcome>, course: &CourseArgs) -> String {
    let code = &course.code;
    match outcome {
        Some(RegistrationOutcome::Enrolled) => "Registration succeeded!".to_string(),
        Some(RegistrationOutcome::Waitlisted) => format!("You are on the waitlist for {code}."),
        Some(RegistrationOutcome::AlreadyEnrolled) => {
            format!("You are already registered for {code}.")
        }
        Some(RegistrationOutcome::AlreadyWaitlisted) => {
            format!("You are already on the waitlist for {code}.")
        }
        None => course.not_found(),
    }
}

pub fn print(outcome: Option<&RegistrationOutcome>, course: &CourseArgs) {
    let text = message(outcome, course);
    let text = match outcome {
        Some(RegistrationOutcome::Enrolled) => text.success(),
        Some(_) => text.warning(),
        None => text.failure(),
    };
    println!("{text}");
}
