//! Run configuration.
//!
//! Loaded from an optional TOML file; every key falls back to a default.
//!
//! ```toml
//! data_dir = "data"
//! history_dir = "history"
//! log_dir = "logging"
//! roster_file = "team_list.json"
//! schedule_file = "assignments.json"
//! num_weeks = 52
//! retention = 3
//! ```
//!
//! The configuration only describes where things live. Creating the
//! directories and installing log output is the entry point's job.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::backup::DEFAULT_RETENTION;
use crate::error::{RotationError, RotationResult};
use crate::scheduler::DEFAULT_NUM_WEEKS;

/// Paths and tunables for one rotation run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RotationConfig {
    /// Directory holding the roster and schedule.
    pub data_dir: PathBuf,
    /// Directory receiving timestamped backups.
    pub history_dir: PathBuf,
    /// Directory receiving the event log.
    pub log_dir: PathBuf,
    /// Roster file name inside `data_dir`.
    pub roster_file: String,
    /// Schedule file name inside `data_dir`.
    pub schedule_file: String,
    /// Backup base name for the roster.
    pub roster_backup_name: String,
    /// Backup base name for the schedule.
    pub schedule_backup_name: String,
    /// Number of weeks in the schedule.
    pub num_weeks: usize,
    /// Backups kept per base name.
    pub retention: usize,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            history_dir: PathBuf::from("history"),
            log_dir: PathBuf::from("logging"),
            roster_file: "team_list.json".to_string(),
            schedule_file: "assignments.json".to_string(),
            roster_backup_name: "team_list_backup".to_string(),
            schedule_backup_name: "assignments_backup".to_string(),
            num_weeks: DEFAULT_NUM_WEEKS,
            retention: DEFAULT_RETENTION,
        }
    }
}

impl RotationConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(content: &str) -> RotationResult<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| RotationError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a TOML file.
    pub fn load(path: &Path) -> RotationResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| RotationError::io(path, e))?;
        Self::from_toml_str(&content)
    }

    /// Rebases the three directories under `root`.
    pub fn with_root(mut self, root: &Path) -> Self {
        self.data_dir = root.join(&self.data_dir);
        self.history_dir = root.join(&self.history_dir);
        self.log_dir = root.join(&self.log_dir);
        self
    }

    /// Overrides the schedule horizon.
    pub fn with_num_weeks(mut self, num_weeks: usize) -> Self {
        self.num_weeks = num_weeks;
        self
    }

    /// Rejects zero-length schedules and zero retention.
    pub fn validate(&self) -> RotationResult<()> {
        if self.num_weeks == 0 {
            return Err(RotationError::Config("num_weeks must be at least 1".into()));
        }
        if self.retention == 0 {
            return Err(RotationError::Config("retention must be at least 1".into()));
        }
        Ok(())
    }

    /// Full roster path.
    pub fn roster_path(&self) -> PathBuf {
        self.data_dir.join(&self.roster_file)
    }

    /// Full schedule path.
    pub fn schedule_path(&self) -> PathBuf {
        self.data_dir.join(&self.schedule_file)
    }
}
