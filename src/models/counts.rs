//! Assignment counts.
//!
//! Tracks how many duty slots each agent holds in the live schedule.
//! Entries keep insertion order; that order is the tie-break order used
//! by backfill.
//!
//! # Invariant
//! The sum of all counts equals the number of filled slots they were
//! tallied from, plus one per later [`AssignmentCounts::increment`].

use std::collections::HashMap;

use super::Schedule;
use crate::store::Table;

/// Name of the counts sheet in the schedule workbook.
pub const COUNTS_SHEET: &str = "Counts";

/// Columns of the counts sheet.
pub const COUNTS_COLUMNS: [&str; 2] = ["Name", "Assignments"];

/// Insertion-ordered mapping from agent name to slot count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentCounts {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl AssignmentCounts {
    /// Creates empty counts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates counts with every name at zero, in the given order.
    pub fn seeded<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut counts = Self::new();
        for name in names {
            counts.ensure(name.into());
        }
        counts
    }

    /// Counts every filled slot in the schedule on top of `self`.
    pub fn tally(mut self, schedule: &Schedule) -> Self {
        for week in &schedule.weeks {
            for slot in [&week.agent1, &week.agent2].into_iter().flatten() {
                self.increment(&slot.name);
            }
        }
        self
    }

    /// Adds one slot for `name`, inserting it if unseen.
    pub fn increment(&mut self, name: &str) {
        let idx = match self.index.get(name) {
            Some(&idx) => idx,
            None => self.ensure(name.to_string()),
        };
        self.entries[idx].1 += 1;
    }

    /// Count for a name (0 if unseen).
    pub fn get(&self, name: &str) -> usize {
        self.index.get(name).map(|&i| self.entries[i].1).unwrap_or(0)
    }

    /// Smallest count, or `None` when empty.
    pub fn min(&self) -> Option<usize> {
        self.entries.iter().map(|(_, c)| *c).min()
    }

    /// Largest count, or `None` when empty.
    pub fn max(&self) -> Option<usize> {
        self.entries.iter().map(|(_, c)| *c).max()
    }

    /// Names holding the minimum count, in insertion order.
    pub fn least_assigned(&self) -> Vec<&str> {
        let Some(min) = self.min() else {
            return Vec::new();
        };
        self.entries
            .iter()
            .filter(|(_, c)| *c == min)
            .map(|(n, _)| n.as_str())
            .collect()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    /// Iterates `(name, count)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(n, c)| (n.as_str(), *c))
    }

    /// Number of agents tracked.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no agent is tracked.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders the `Counts` sheet.
    pub fn to_table(&self) -> Table {
        let mut table = Table::new(COUNTS_COLUMNS);
        for (name, count) in self.iter() {
            table.push_row([name.to_string(), count.to_string()]);
        }
        table
    }

    fn ensure(&mut self, name: String) -> usize {
        if let Some(&idx) = self.index.get(&name) {
            return idx;
        }
        let idx = self.entries.len();
        self.index.insert(name.clone(), idx);
        self.entries.push((name, 0));
        idx
    }
}
