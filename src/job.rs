//! End-to-end rotation run.
//!
//! # Pipeline
//!
//! 1. Load the previous snapshot: the newest roster backup from earlier runs
//!    that still loads and validates. Backups taken by failed runs are
//!    skipped this way.
//! 2. Back up the current roster.
//! 3. Load and validate the current roster. Failure stops the run here,
//!    before the schedule is backed up or written.
//! 4. Diff the previous snapshot against the current roster and log changes.
//! 5. Back up the current schedule.
//! 6. Generate week windows, rotate pairs, tally counts.
//! 7. Backfill empty slots when the available-agent count is odd.
//! 8. Write the `Weeks` and `Counts` sheets.
//!
//! Runs assume exclusive access to the data and history directories.

use std::path::{Path, PathBuf};

use rand::Rng;
use tracing::{debug, error, info, warn};

use crate::backup::BackupManager;
use crate::changes::{departed_agents, detect_changes, ChangeRecord};
use crate::clock::{Clock, SystemClock};
use crate::config::RotationConfig;
use crate::error::{RotationError, RotationResult};
use crate::models::{AssignmentCounts, Roster, Schedule, COUNTS_SHEET, WEEKS_SHEET};
use crate::scheduler::{backfill, generate_windows, needs_backfill, RotationAssigner};
use crate::store::{JsonTableStore, TableStore, Workbook};

/// What one successful run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// The schedule that was written.
    pub schedule: Schedule,
    /// Final per-agent counts (after backfill).
    pub counts: AssignmentCounts,
    /// Roster changes since the previous snapshot.
    pub changes: Vec<ChangeRecord>,
    /// Backup of the roster taken by this run.
    pub roster_backup: Option<PathBuf>,
    /// Backup of the previous schedule taken by this run.
    pub schedule_backup: Option<PathBuf>,
    /// Slots filled by backfill.
    pub backfilled: usize,
}

/// A configured rotation run.
#[derive(Debug, Clone)]
pub struct RotationJob<S: TableStore = JsonTableStore, C: Clock = SystemClock> {
    config: RotationConfig,
    store: S,
    clock: C,
}

impl RotationJob {
    /// Creates a job using JSON tables and the wall clock.
    pub fn new(config: RotationConfig) -> Self {
        Self {
            config,
            store: JsonTableStore::new(),
            clock: SystemClock,
        }
    }
}

impl<S: TableStore, C: Clock> RotationJob<S, C> {
    /// Replaces the table store.
    pub fn with_store<T: TableStore>(self, store: T) -> RotationJob<T, C> {
        RotationJob {
            config: self.config,
            store,
            clock: self.clock,
        }
    }

    /// Replaces the clock.
    pub fn with_clock<D: Clock>(self, clock: D) -> RotationJob<S, D> {
        RotationJob {
            config: self.config,
            store: self.store,
            clock,
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &RotationConfig {
        &self.config
    }

    /// Executes one run.
    ///
    /// Logs exactly one error line on failure: `Problem reading from
    /// team_list` for roster failures, `Script execution failed` otherwise.
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> RotationResult<RunReport> {
        info!("Start script execution");
        match self.execute(rng) {
            Ok(report) => {
                info!(
                    weeks = report.schedule.len(),
                    backfilled = report.backfilled,
                    "Script execution completed"
                );
                Ok(report)
            }
            Err(e) if self.is_roster_failure(&e) => {
                error!(error = %e, "Problem reading from team_list");
                Err(e)
            }
            Err(e) => {
                error!(error = %e, "Script execution failed");
                Err(e)
            }
        }
    }

    fn execute<R: Rng + ?Sized>(&self, rng: &mut R) -> RotationResult<RunReport> {
        self.config.validate()?;
        let roster_path = self.config.roster_path();
        let schedule_path = self.config.schedule_path();
        let backups = BackupManager::new(&self.config.history_dir)
            .with_retention(self.config.retention)
            .with_clock(&self.clock);

        let previous = self.previous_roster(&backups)?;
        info!("Back up existing team list");
        let roster_backup = backups.backup(&roster_path, &self.config.roster_backup_name)?;

        let roster = self.load_roster(&roster_path)?;
        let changes = match previous {
            Some(previous) => self.roster_changes(&previous, &roster),
            None => Vec::new(),
        };

        info!("Back up existing assignments");
        let schedule_backup = backups.backup(&schedule_path, &self.config.schedule_backup_name)?;

        let windows = generate_windows(self.clock.now().date(), self.config.num_weeks);
        let mut schedule = RotationAssigner::new().assign(&roster, &windows, rng)?;
        let mut counts = AssignmentCounts::seeded(roster.available_names()).tally(&schedule);

        let backfilled = if needs_backfill(roster.available_count()) {
            backfill(&mut schedule, &mut counts, &roster)
        } else {
            0
        };

        let workbook = Workbook::new()
            .with_sheet(WEEKS_SHEET, schedule.to_weeks_table())
            .with_sheet(COUNTS_SHEET, counts.to_table());
        self.store.write_workbook(&schedule_path, &workbook)?;
        info!(path = %schedule_path.display(), "Schedule written");

        Ok(RunReport {
            schedule,
            counts,
            changes,
            roster_backup,
            schedule_backup,
            backfilled,
        })
    }

    fn load_roster(&self, path: &Path) -> RotationResult<Roster> {
        let table = self.store.read_table(path)?;
        Ok(Roster::from_table(&table)?)
    }

    /// Newest roster backup that loads and validates, if any.
    ///
    /// Unusable backups (for example from a run that failed validation) are
    /// logged and skipped.
    fn previous_roster<K: Clock>(
        &self,
        backups: &BackupManager<K>,
    ) -> RotationResult<Option<Roster>> {
        let snapshots = backups.list_backups(&self.config.roster_backup_name)?;
        if snapshots.is_empty() {
            info!("No previous roster snapshot; skipping change detection");
            return Ok(None);
        }

        for record in &snapshots {
            match self.load_roster(&record.path) {
                Ok(previous) => {
                    debug!(snapshot = %record.path.display(), "Using roster snapshot");
                    return Ok(Some(previous));
                }
                Err(e) => {
                    warn!(snapshot = %record.path.display(), error = %e, "Skipping unusable roster snapshot");
                }
            }
        }
        warn!("No usable previous roster snapshot; skipping change detection");
        Ok(None)
    }

    /// Diffs `previous` against `current` and logs the result.
    fn roster_changes(&self, previous: &Roster, current: &Roster) -> Vec<ChangeRecord> {
        info!("Load and detect changes in employee data");
        for name in departed_agents(previous, current) {
            debug!(name = %name, "Agent no longer on roster");
        }

        let changes = detect_changes(previous, current);
        if !changes.is_empty() {
            info!("Changes detected in team_list:");
            for change in &changes {
                info!("{change}");
            }
        }
        changes
    }

    fn is_roster_failure(&self, e: &RotationError) -> bool {
        match e {
            RotationError::Validation(_) => true,
            RotationError::Io { path, .. } | RotationError::Serialization { path, .. } => {
                *path == self.config.roster_path()
            }
            _ => false,
        }
    }
}
