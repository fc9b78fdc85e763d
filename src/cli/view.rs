use std::fmt::Write as _;

use clap::Parser;
use registrar::{Catalog, Student, domain::Registrations};
use tracing::instrument;

use super::{OutputFormat, StudentArgs, terminal::Colorize};

#[derive(Debug, Parser)]
#[command(about = "Show the courses a student is registered or waitlisted for")]
pub struct View {
    #[command(flatten)]
    student: StudentArgs,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

impl View {
    #[instrument(level = "debug", skip(catalog))]
    pub fn run(self, catalog: &Catalog) -> anyhow::Result<()> {
        let student = self.student.into_student()?;
        let registrations = catalog.registrations(&student);

        match self.output {
            OutputFormat::Table => print_registrations(&registrations),
            OutputFormat::Json => output_json(&student, &registrations)?,
        }
        Ok(())
    }
}

/// The summary line followed by `(R)` rows for seats and `(W)` rows for
/// waitlist places, each in catalog order.
pub fn render(registrations: &Registrations<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "You registered {} courses and waitlisted {} courses.",
        registrations.enrolled.len(),
        registrations.waitlisted.len()
    );
    for course in &registrations.enrolled {
        let _ = writeln!(out, "(R) {:<15}{:<15}", course.code(), course.title());
    }
    for course in &registrations.waitlisted {
        let _ = writeln!(out, "(W) {:<15}{:<15}", course.code(), course.title());
    }
    out
}

/// Prints [`render`] with the markers coloured.
pub fn print_registrations(registrations: &Registrations<'_>) {
    for line in render(registrations).lines() {
        if let Some(rest) = line.strip_prefix("(R)") {
            println!("{}{rest}", "(R)".success());
        } else if let Some(rest) = line.strip_prefix("(W)") {
            println!("{}{rest}", "(W)".warning());
        } else {
            println!("{line}");
        }
    }
}

fn output_json(student: &Student, registrations: &Registrations<'_>) -> anyhow::Result<()> {
    use serde_json::json;

    fn courses(list: &[&registrar::Course]) -> Vec<serde_json::Value> {
        list.iter()
            .map(|course| json!({ "code": course.code(), "title": course.title() }))
            .collect()
    }

    let output = json!({
        "student": { "id": student.id(), "name": student.name() },
        "enrolled": courses(&registrations.enrolled),
        "waitlisted": courses(&registrations.waitlisted),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use registrar::{Config, storage};

    use super::*;

    fn catalog() -> Catalog {
        let config = Config::default();
        let mut catalog = Catalog::from_courses(
            storage::parse_courses(
                "CS101 Programming 0 0\nMA201 Calculus 0 0\nPH110 Physics 0 0\n",
                &config,
            )
            .unwrap(),
        );
        let records =
            storage::parse_enrollments("1 ann 1 PH110 1 CS101\n2 bob 1 MA201\n").unwrap();
        storage::replay(&mut catalog, records, false).unwrap();
        catalog
    }

    #[test]
    fn lists_seats_before_waitlist_places() {
        let catalog = catalog();
        let ann = Student::try_new(1, "ann").unwrap();

        let rendered = render(&catalog.registrations(&ann));

        assert_eq!(
            rendered,
            format!(
                "You registered 1 courses and waitlisted 1 courses.\n(R) {:<15}{:<15}\n(W) {:<15}{:<15}\n",
                "PH110", "Physics", "CS101", "Programming"
            )
        );
    }

    #[test]
    fn unknown_student_has_no_rows() {
        let catalog = catalog();
        let nobody = Student::try_new(1, "bob").unwrap();

        assert_eq!(
            render(&catalog.registrations(&nobody)),
            "You registered 0 courses and waitlisted 0 courses.\n"
        );
    }
}
