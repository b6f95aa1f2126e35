//! Configuration.
//!
//! Loaded from `~/.merger-timeline/config.toml`. A missing file means
//! defaults: the full Phase 1 and 2 schedule, the built-in holidays only, and
//! the database at its default path.

use std::fs;
use std::io;
use std::path::PathBuf;

use jiff::civil::Date;
use serde::Deserialize;

use crate::calendar::Calendar;
use crate::schedule::PhaseOption;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Schedule used when `--phase` is not given.
    #[serde(default)]
    pub default_phase: PhaseOption,

    /// Non-business days on top of the built-in holiday list.
    #[serde(default)]
    pub extra_holidays: Vec<Date>,

    /// Where merger records are stored. Defaults to
    /// `~/.merger-timeline/mergers.sqlite`.
    pub database: Option<PathBuf>,
}

impl Config {
    /// Load config from `~/.merger-timeline/config.toml`.
    ///
    /// Returns defaults when the file does not exist, and an error if it
    /// exists but cannot be read or parsed.
    pub fn load() -> Result<Self, String> {
        let Some(path) = Self::path() else {
            return Ok(Self::default());
        };

        let contents = match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(format!("failed to read {}: {e}", path.display())),
        };

        Self::parse(&contents).map_err(|e| format!("invalid config at {}: {e}", path.display()))
    }

    /// Parse config from TOML text.
    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// The config file path: `~/.merger-timeline/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".merger-timeline").join("config.toml"))
    }

    /// The business-day calendar: built-in holidays plus any configured extras.
    pub fn calendar(&self) -> Calendar {
        Calendar::australia().with_extra_holidays(self.extra_holidays.iter().copied())
    }
}
