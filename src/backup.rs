//! Versioned backups with retention.
//!
//! Before an artifact is overwritten, [`BackupManager::backup`] copies it
//! into the history directory as
//! `{base_name}_as_of_{MM-DD-YYYY_HH-MM-SS}.{ext}` and then prunes that
//! base name down to the newest `retention` copies.
//!
//! # Ordering
//! Backups are ordered by file creation time, falling back to modification
//! time where the platform has no birth time. Files created within the
//! same filesystem tick are ordered by the timestamp in their name.
//!
//! A missing artifact is not an error. Any failure to copy, list or delete
//! is logged and returned as [`RotationError::Backup`].

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::NaiveDateTime;
use tracing::{error, info};

use crate::clock::{Clock, SystemClock};
use crate::error::{RotationError, RotationResult};

/// Default number of backups kept per base name.
pub const DEFAULT_RETENTION: usize = 3;

/// `strftime` pattern of the timestamp embedded in backup names.
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%m-%d-%Y_%H-%M-%S";

const AS_OF: &str = "_as_of_";

/// A backup file found in the history directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupRecord {
    /// Full path of the backup.
    pub path: PathBuf,
    /// Creation (or modification) time reported by the filesystem.
    pub created: SystemTime,
    /// Timestamp parsed from the file name, if well-formed.
    pub stamped: Option<NaiveDateTime>,
}

/// Copies artifacts into a history directory and prunes old copies.
#[derive(Debug, Clone)]
pub struct BackupManager<C: Clock = SystemClock> {
    history_dir: PathBuf,
    retention: usize,
    clock: C,
}

impl BackupManager<SystemClock> {
    /// Creates a manager using the wall clock and default retention.
    pub fn new(history_dir: impl Into<PathBuf>) -> Self {
        Self {
            history_dir: history_dir.into(),
            retention: DEFAULT_RETENTION,
            clock: SystemClock,
        }
    }
}

impl<C: Clock> BackupManager<C> {
    /// Replaces the clock used for backup timestamps.
    pub fn with_clock<D: Clock>(self, clock: D) -> BackupManager<D> {
        BackupManager {
            history_dir: self.history_dir,
            retention: self.retention,
            clock,
        }
    }

    /// Sets how many backups to keep per base name.
    pub fn with_retention(mut self, retention: usize) -> Self {
        self.retention = retention;
        self
    }

    /// History directory.
    pub fn history_dir(&self) -> &Path {
        &self.history_dir
    }

    /// Retention count.
    pub fn retention(&self) -> usize {
        self.retention
    }

    /// File name a backup of `artifact` would get right now.
    pub fn backup_file_name(&self, artifact: &Path, base_name: &str) -> String {
        let stamp = self.clock.now().format(BACKUP_TIMESTAMP_FORMAT);
        match artifact.extension().and_then(|e| e.to_str()) {
            Some(ext) => format!("{base_name}{AS_OF}{stamp}.{ext}"),
            None => format!("{base_name}{AS_OF}{stamp}"),
        }
    }

    /// Copies `artifact` into history and prunes old copies.
    ///
    /// Returns the backup path, or `None` when the artifact does not exist.
    pub fn backup(&self, artifact: &Path, base_name: &str) -> RotationResult<Option<PathBuf>> {
        if !artifact.exists() {
            info!(artifact = %artifact.display(), "No existing {base_name} to back up");
            return Ok(None);
        }

        let target = self
            .history_dir
            .join(self.backup_file_name(artifact, base_name));
        fs::copy(artifact, &target).map_err(|e| {
            error!(artifact = %artifact.display(), error = %e, "Backup copy failed");
            RotationError::backup(artifact, e)
        })?;
        info!("Back up {} to {}", artifact.display(), target.display());

        self.prune(base_name)?;
        Ok(Some(target))
    }

    /// Lists backups for a base name, newest first.
    pub fn list_backups(&self, base_name: &str) -> RotationResult<Vec<BackupRecord>> {
        if !self.history_dir.exists() {
            return Ok(Vec::new());
        }

        let prefix = format!("{base_name}{AS_OF}");
        let entries = fs::read_dir(&self.history_dir).map_err(|e| self.listing_failed(e))?;

        let mut records = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| self.listing_failed(e))?;
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            let Some(rest) = name.strip_prefix(&prefix) else {
                continue;
            };

            let path = entry.path();
            let metadata = entry
                .metadata()
                .map_err(|e| RotationError::backup(&path, e))?;
            if !metadata.is_file() {
                continue;
            }
            let created = metadata
                .created()
                .or_else(|_| metadata.modified())
                .map_err(|e| RotationError::backup(&path, e))?;

            records.push(BackupRecord {
                stamped: parse_stamp(rest),
                created,
                path,
            });
        }

        records.sort_by(|a, b| {
            (b.created, b.stamped, &b.path).cmp(&(a.created, a.stamped, &a.path))
        });
        Ok(records)
    }

    /// Deletes all but the newest `retention` backups of a base name.
    ///
    /// Returns the deleted paths.
    pub fn prune(&self, base_name: &str) -> RotationResult<Vec<PathBuf>> {
        info!(dir = %self.history_dir.display(), "Delete old backups");
        let records = self.list_backups(base_name)?;
        self.remove_expired(base_name, records)
    }

    /// Deletes every record past the first `retention` of a newest-first list.
    fn remove_expired(
        &self,
        base_name: &str,
        records: Vec<BackupRecord>,
    ) -> RotationResult<Vec<PathBuf>> {
        let mut deleted = Vec::new();
        for record in records.into_iter().skip(self.retention) {
            fs::remove_file(&record.path).map_err(|e| {
                error!(path = %record.path.display(), error = %e, "Failed to delete old backup");
                RotationError::backup(&record.path, e)
            })?;
            info!(
                "Retain maximum of {} saved logs. Old {base_name} backup deleted: {}",
                self.retention,
                record.path.display()
            );
            deleted.push(record.path);
        }
        Ok(deleted)
    }

    fn listing_failed(&self, e: std::io::Error) -> RotationError {
        error!(dir = %self.history_dir.display(), error = %e, "Failed to list backups");
        RotationError::backup(&self.history_dir, e)
    }
}

/// Parses the timestamp part of `MM-DD-YYYY_HH-MM-SS.ext`.
fn parse_stamp(rest: &str) -> Option<NaiveDateTime> {
    let stamp = rest.split('.').next()?;
    NaiveDateTime::parse_from_str(stamp, BACKUP_TIMESTAMP_FORMAT).ok()
}
