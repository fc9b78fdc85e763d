use std::path::{Path, PathBuf};

mod cancel;
mod menu;
mod register;
mod report;
mod terminal;
mod view;

use anyhow::Context;
use cancel::Cancel;
use clap::ArgAction;
use register::Register;
use registrar::{Catalog, Config, Student};
use report::Report;
use tracing::instrument;
use view::View;

/// Name of the configuration file looked for next to the course file.
const CONFIG_FILE: &str = "registration.toml";

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The course file (code, title, enrolled count, waitlist count per line)
    #[arg(short, long, global = true)]
    courses: Option<PathBuf>,

    /// The enrollment file (one student record per line)
    #[arg(short, long, global = true)]
    enrollments: Option<PathBuf>,

    /// Configuration file [default: registration.toml beside the course file]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seats per course, replacing the configured default
    ///
    /// Per-course overrides from the configuration still apply.
    #[arg(long, global = true)]
    capacity: Option<usize>,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<Exit> {
        Self::setup_logging(self.verbose);

        let inputs = Inputs {
            courses: self.courses,
            enrollments: self.enrollments,
            config: self.config,
            capacity: self.capacity,
        };

        self.command.unwrap_or(Command::Menu).run(inputs)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Interactive menu (default)
    Menu,

    /// Show a student's registrations
    View(View),

    /// Register a student for a course
    Register(Register),

    /// Cancel a student's registration
    Cancel(Cancel),

    /// Print the roster of every course
    Report(Report),
}

impl Command {
    fn run(self, inputs: Inputs) -> anyhow::Result<Exit> {
        match self {
            Self::Menu => {
                let inputs = menu::prompt_missing(inputs)?;
                let mut catalog = inputs.load()?;
                menu::run(&mut catalog)?;
            }
            Self::View(command) => command.run(&inputs.load()?)?,
            Self::Register(command) => return command.run(&mut inputs.load()?),
            Self::Cancel(command) => return command.run(&mut inputs.load()?),
            Self::Report(command) => command.run(&inputs.load()?)?,
        }
        Ok(Exit::Success)
    }
}

/// How the process should exit once a command completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Success,
    /// The requested course code and title matched nothing.
    NoSuchCourse,
}

impl Exit {
    pub const fn code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::NoSuchCourse => 2,
        }
    }
}

/// The input file locations gathered from the command line.
#[derive(Debug, Default)]
pub struct Inputs {
    courses: Option<PathBuf>,
    enrollments: Option<PathBuf>,
    config: Option<PathBuf>,
    capacity: Option<usize>,
}

impl Inputs {
    #[instrument(level = "debug")]
    fn load(self) -> anyhow::Result<Catalog> {
        let courses = self
            .courses
            .context("no course file given (use --courses)")?;
        let enrollments = self
            .enrollments
            .context("no enrollment file given (use --enrollments)")?;
        let mut config = load_config(self.config.as_deref(), &courses)?;
        if let Some(capacity) = self.capacity {
            config.set_capacity(capacity);
        }

        Ok(registrar::load_catalog(&courses, &enrollments, &config)?)
    }
}

/// Loads the configuration.
///
/// An explicit path must exist and parse. Otherwise `registration.toml` is
/// looked for beside the course file, falling back to the defaults when it
/// is absent or unusable.
fn load_config(explicit: Option<&Path>, course_file: &Path) -> anyhow::Result<Config> {
    if let Some(path) = explicit {
        return Config::load(path).map_err(|e| anyhow::anyhow!("{e}"));
    }

    let path = course_file
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(CONFIG_FILE);
    if !path.exists() {
        tracing::debug!("No {} found, using default config", path.display());
        return Ok(Config::default());
    }

    Ok(Config::load(&path).unwrap_or_else(|e| {
        tracing::warn!("Ignoring {}: {e}", path.display());
        Config::default()
    }))
}

#[derive(Debug, Clone, clap::Args)]
pub struct StudentArgs {
    /// The student's id
    #[arg(long, allow_negative_numbers = true)]
    id: i64,

    /// The student's name
    #[arg(long)]
    name: String,
}

impl StudentArgs {
    fn into_student(self) -> anyhow::Result<Student> {
        Ok(Student::try_new(self.id, self.name)?)
    }
}

#[derive(Debug, Clone, clap::Args)]
pub struct CourseArgs {
    /// The course code
    #[arg(long)]
    code: String,

    /// The course title
    #[arg(long)]
    title: String,
}

impl CourseArgs {
    fn not_found(&self) -> String {
        format!("No course matches {} '{}'.", self.code, self.title)
    }
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}
