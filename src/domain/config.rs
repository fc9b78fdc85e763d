use std::{collections::BTreeMap, path::Path};

use serde::Deserialize;

/// Registration settings.
///
/// Loaded from a TOML file that must name its format with `_version = "1"`.
/// Every other field has a default, so a file holding only the version gives
/// the standard ten-seat behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "Versions")]
pub struct Config {
    /// Seats per course unless overridden in `capacities`.
    capacity: usize,

    /// Per-course seat counts, keyed by course code.
    capacities: BTreeMap<String, usize>,

    /// Whether an enrollment record naming an unknown course code is an
    /// error.
    ///
    /// When `false` (default) such codes are skipped with a warning.
    pub strict_course_codes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            capacities: BTreeMap::new(),
            strict_course_codes: false,
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// The default number of seats per course.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Sets the default number of seats per course.
    pub const fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
    }

    /// Overrides the number of seats for one course code.
    pub fn set_capacity_for(&mut self, code: impl Into<String>, capacity: usize) {
        self.capacities.insert(code.into(), capacity);
    }

    /// The number of seats for the course with the given code.
    #[must_use]
    pub fn capacity_for(&self, code: &str) -> usize {
        self.capacities.get(code).copied().unwrap_or(self.capacity)
    }
}

const fn default_capacity() -> usize {
    10
}

/// The serialized versions of the configuration.
#[derive(Debug, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_capacity")]
        capacity: usize,

        #[serde(default)]
        capacities: BTreeMap<String, usize>,

        #[serde(default)]
        strict_course_codes: bool,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                capacity,
                capacities,
                strict_course_codes,
            } => Self {
                capacity,
                capacities,
                strict_course_codes,
            },
        }
    }
}
