//! Schedule (rotation plan) model.
//!
//! A schedule is the ordered list of duty weeks produced by one run.
//! It is rebuilt from scratch every run and never merged with a
//! previous schedule's assignments.

use super::{Slot, Week, WeekWindow};
use crate::store::Table;

/// Name of the weeks sheet in the schedule workbook.
pub const WEEKS_SHEET: &str = "Weeks";

/// Columns of the weeks sheet.
pub const WEEKS_COLUMNS: [&str; 6] = [
    "start_date",
    "end_date",
    "Agent1",
    "Email1",
    "Agent2",
    "Email2",
];

/// An ordered sequence of duty weeks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schedule {
    /// Weeks in date order.
    pub weeks: Vec<Week>,
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a schedule of unassigned weeks, one per window.
    pub fn from_windows(windows: &[WeekWindow]) -> Self {
        Self {
            weeks: windows.iter().copied().map(Week::new).collect(),
        }
    }

    /// Number of weeks.
    pub fn len(&self) -> usize {
        self.weeks.len()
    }

    /// Whether the schedule has no weeks.
    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }

    /// Total filled slots across all weeks.
    pub fn filled_slots(&self) -> usize {
        self.weeks.iter().map(Week::filled_count).sum()
    }

    /// Total empty slots across all weeks.
    pub fn empty_slots(&self) -> usize {
        self.weeks.len() * 2 - self.filled_slots()
    }

    /// Number of weeks a given agent is on duty.
    pub fn weeks_for_agent(&self, name: &str) -> usize {
        self.weeks
            .iter()
            .filter(|w| {
                w.agent1.as_ref().is_some_and(|s| s.name == name)
                    || w.agent2.as_ref().is_some_and(|s| s.name == name)
            })
            .count()
    }

    /// Renders the `Weeks` sheet. Empty slots become empty cells.
    pub fn to_weeks_table(&self) -> Table {
        let mut table = Table::new(WEEKS_COLUMNS);
        for week in &self.weeks {
            let (agent1, email1) = slot_cells(week.agent1.as_ref());
            let (agent2, email2) = slot_cells(week.agent2.as_ref());
            table.push_row([
                week.window.start_label(),
                week.window.end_label(),
                agent1,
                email1,
                agent2,
                email2,
            ]);
        }
        table
    }
}

fn slot_cells(slot: Option<&Slot>) -> (String, String) {
    match slot {
        Some(s) => (s.name.clone(), s.email.clone()),
        None => (String::new(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SlotPosition;
    use chrono::NaiveDate;

    fn sample_schedule() -> Schedule {
        let first = WeekWindow::starting(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        let mut s = Schedule::from_windows(&[first, first.next()]);
        s.weeks[0].set_slot(SlotPosition::First, Slot::new("A", "a@x.com"));
        s.weeks[0].set_slot(SlotPosition::Second, Slot::new("B", "b@x.com"));
        s.weeks[1].set_slot(SlotPosition::First, Slot::new("C", "c@x.com"));
        s
    }

    #[test]
    fn test_slot_totals() {
        let s = sample_schedule();
        assert_eq!(s.len(), 2);
        assert_eq!(s.filled_slots(), 3);
        assert_eq!(s.empty_slots(), 1);
        assert_eq!(s.weeks_for_agent("A"), 1);
        assert_eq!(s.weeks_for_agent("Z"), 0);
    }

    #[test]
    fn test_weeks_table() {
        let table = sample_schedule().to_weeks_table();
        assert_eq!(table.columns, WEEKS_COLUMNS);
        assert_eq!(
            table.rows[0],
            vec!["03-04-2024", "03-08-2024", "A", "a@x.com", "B", "b@x.com"]
        );
        assert_eq!(
            table.rows[1],
            vec!["03-11-2024", "03-15-2024", "C", "c@x.com", "", ""]
        );
    }

    #[test]
    fn test_empty_schedule() {
        let s = Schedule::new();
        assert!(s.is_empty());
        assert_eq!(s.filled_slots(), 0);
        assert_eq!(s.empty_slots(), 0);
    }
}
