use std::fmt::Write as _;

use clap::Parser;
use registrar::{Catalog, Course, Student};
use tracing::instrument;

use super::{
    OutputFormat,
    terminal::{Colorize, is_narrow},
};

#[derive(Debug, Parser, Default)]
#[command(about = "Print every course's enrolled roster and waitlist")]
pub struct Report {
    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

impl Report {
    #[instrument(level = "debug", skip(self, catalog))]
    pub fn run(&self, catalog: &Catalog) -> anyhow::Result<()> {
        match self.output {
            OutputFormat::Table => print_table(catalog),
            OutputFormat::Json => output_json(catalog)?,
        }
        Ok(())
    }
}

pub fn print_table(catalog: &Catalog) {
    if catalog.is_empty() {
        println!("{}", "No courses loaded.".dim());
        return;
    }

    if is_narrow() {
        print!("{}", render_compact(catalog));
    } else {
        print!("{}", render(catalog));
    }
    println!();
}

/// Every course's roster report, in catalog order.
pub fn render(catalog: &Catalog) -> String {
    catalog
        .courses()
        .iter()
        .map(|course| course.report().to_string())
        .collect()
}

/// A stacked layout for narrow terminals.
pub fn render_compact(catalog: &Catalog) -> String {
    let mut out = String::new();
    for course in catalog.courses() {
        let _ = writeln!(
            out,
            "{} {} ({}/{})",
            course.code(),
            course.title(),
            course.enrolled_count(),
            course.capacity()
        );
        for student in course.enrolled().iter() {
            let _ = writeln!(out, "  {} {}", student.id(), student.name());
        }
        if !course.waitlist().is_empty() {
            let _ = writeln!(out, "  waitlist ({}):", course.wait_count());
            for student in course.waitlist().iter() {
                let _ = writeln!(out, "  {} {}", student.id(), student.name());
            }
        }
    }
    out
}

fn output_json(catalog: &Catalog) -> anyhow::Result<()> {
    use serde_json::json;

    fn students<'a>(list: impl Iterator<Item = &'a Student>) -> Vec<serde_json::Value> {
        list.map(|student| json!({ "id": student.id(), "name": student.name() }))
            .collect()
    }

    let courses: Vec<_> = catalog
        .courses()
        .iter()
        .map(|course: &Course| {
            json!({
                "code": course.code(),
                "title": course.title(),
                "capacity": course.capacity(),
                "declared": course.declared_counts(),
                "enrolled": students(course.enrolled().iter()),
                "waitlisted": students(course.waitlist().iter()),
            })
        })
        .collect();

    println!(
        "{}",
        serde_json::to_string_pretty(&json!({ "courses": courses }))?
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use registrar::{Config, storage};

    use super::*;

    fn catalog() -> Catalog {
        let mut config = Config::default();
        config.set_capacity(1);
        let mut catalog = Catalog::from_courses(
            storage::parse_courses("CS101 Programming 1 1\nMA201 Calculus 0 0\n", &config)
                .unwrap(),
        );
        let records = storage::parse_enrollments("2 bob 1 CS101\n1 ann 0 1 CS101\n").unwrap();
        storage::replay(&mut catalog, records, false).unwrap();
        catalog
    }

    #[test]
    fn full_report_concatenates_course_reports() {
        let catalog = catalog();
        let expected: String = catalog
            .courses()
            .iter()
            .map(|course| course.report().to_string())
            .collect();

        let rendered = render(&catalog);

        assert_eq!(rendered, expected);
        assert!(rendered.contains("  <  Waitlist  (1)  >"));
        let waitlist_headers = rendered.matches("Waitlist").count();
        assert_eq!(waitlist_headers, 1);
    }

    #[test]
    fn compact_report() {
        assert_eq!(
            render_compact(&catalog()),
            "CS101 Programming (1/1)\n  2 bob\n  waitlist (1):\n  1 ann\nMA201 Calculus (0/1)\n"
        );
    }
}
