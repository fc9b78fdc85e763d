use clap::Parser;
use registrar::{CancellationOutcome, Catalog};
use tracing::{info, instrument};

use super::{CourseArgs, Exit, StudentArgs, terminal::Colorize};

#[derive(Debug, Parser)]
#[command(about = "Cancel a registration; the lowest waitlisted id takes any freed seat")]
pub struct Cancel {
    #[command(flatten)]
    student: StudentArgs,

    #[command(flatten)]
    course: CourseArgs,
}

impl Cancel {
    #[instrument(level = "debug", skip(catalog))]
    pub fn run(self, catalog: &mut Catalog) -> anyhow::Result<Exit> {
        let student = self.student.into_student()?;
        let outcome = catalog.cancel(&student, &self.course.code, &self.course.title);
        print(outcome.as_ref(), &self.course);
        Ok(if outcome.is_some() {
            Exit::Success
        } else {
            Exit::NoSuchCourse
        })
    }
}

/// The message shown for a cancellation attempt.
///
/// `None` means no course matched both the code and the title.
pub fn message(outcome: Option<&CancellationOutcome>, course: &CourseArgs) -> String {
    let title = &course.title;
    match outcome {
        Some(CancellationOutcome::Cancelled | CancellationOutcome::CancelledAndPromoted(_)) => {
            format!("'{title}' is removed from your course list.")
        }
        Some(CancellationOutcome::RemovedFromWaitlist) => {
            format!("You have been removed from the waitlist of '{title}'.")
        }
        Some(CancellationOutcome::NotFound) => {
            format!("You are not registered for '{title}'.")
        }
        None => course.not_found(),
    }
}

pub fn print(outcome: Option<&CancellationOutcome>, course: &CourseArgs) {
    if let Some(CancellationOutcome::CancelledAndPromoted(promoted)) = outcome {
        info!(
            course = %course.code,
            promoted = promoted.id(),
            "seat passed to the first waitlisted student"
        );
    }

    let text = message(outcome, course);
    let text = match outcome {
        Some(CancellationOutcome::NotFound) => text.warning(),
        Some(_) => text.success(),
        None => text.failure(),
    };
    println!("{text}");
}
