//! The interactive menu.
//!
//! One operation per round trip against a catalog loaded once at start-up.
//! Changes live only as long as the session.

use std::path::PathBuf;

use dialoguer::{Input, Select, theme::ColorfulTheme};
use registrar::{Catalog, Student};

use super::{CourseArgs, Inputs, cancel, register, report, view};

const ITEMS: [&str; 5] = [
    "View your registration",
    "Course registration",
    "Course cancellation",
    "Print enrollment list including waitlist",
    "Exit",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    View,
    Register,
    Cancel,
    Report,
    Exit,
}

impl Action {
    const fn from_index(index: usize) -> Self {
        match index {
            0 => Self::View,
            1 => Self::Register,
            2 => Self::Cancel,
            3 => Self::Report,
            _ => Self::Exit,
        }
    }
}

/// Asks for any input file the command line did not supply.
pub fn prompt_missing(inputs: Inputs) -> anyhow::Result<Inputs> {
    let courses = match inputs.courses {
        Some(path) => path,
        None => prompt_path("Enter course filename")?,
    };
    let enrollments = match inputs.enrollments {
        Some(path) => path,
        None => prompt_path("Enter enrollment filename")?,
    };
    Ok(Inputs {
        courses: Some(courses),
        enrollments: Some(enrollments),
        ..inputs
    })
}

fn prompt_path(prompt: &str) -> anyhow::Result<PathBuf> {
    let text: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .interact_text()?;
    Ok(PathBuf::from(text))
}

pub fn run(catalog: &mut Catalog) -> anyhow::Result<()> {
    let theme = ColorfulTheme::default();
    loop {
        let selection = Select::with_theme(&theme)
            .with_prompt("MENU")
            .items(&ITEMS)
            .default(0)
            .interact()?;
        println!();

        match Action::from_index(selection) {
            Action::View => {
                let student = prompt_student(&theme)?;
                view::print_registrations(&catalog.registrations(&student));
            }
            Action::Register => {
                let student = prompt_student(&theme)?;
                let course = prompt_course(&theme)?;
                let outcome = catalog.register(student, &course.code, &course.title);
                register::print(outcome.as_ref(), &course);
            }
            Action::Cancel => {
                let student = prompt_student(&theme)?;
                let course = prompt_course(&theme)?;
                let outcome = catalog.cancel(&student, &course.code, &course.title);
                cancel::print(outcome.as_ref(), &course);
            }
            Action::Report => report::print_table(catalog),
            Action::Exit => return Ok(()),
        }
        println!();
    }
}

fn prompt_student(theme: &ColorfulTheme) -> anyhow::Result<Student> {
    let id: i64 = Input::with_theme(theme)
        .with_prompt("Enter your id")
        .interact_text()?;
    let name: String = Input::with_theme(theme)
        .with_prompt("Enter your name")
        .interact_text()?;
    Ok(Student::try_new(id, name.trim())?)
}

fn prompt_course(theme: &ColorfulTheme) -> anyhow::Result<CourseArgs> {
    let code: String = Input::with_theme(theme)
        .with_prompt("Enter course code")
        .interact_text()?;
    let title: String = Input::with_theme(theme)
        .with_prompt("Enter course title")
        .interact_text()?;
    Ok(CourseArgs {
        code: code.trim().to_string(),
        title: title.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_order_matches_actions() {
        let actions: Vec<_> = (0..ITEMS.len()).map(Action::from_index).collect();
        assert_eq!(
            actions,
            vec![
                Action::View,
                Action::Register,
                Action::Cancel,
                Action::Report,
                Action::Exit
            ]
        );
    }
}
