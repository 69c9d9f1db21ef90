//! Week window and duty slot models.
//!
//! A [`WeekWindow`] is a Monday–Friday span. A [`Week`] is one schedule
//! row: a window plus up to two assigned agents.
//!
//! # Date format
//! Dates render as `MM-DD-YYYY` ([`DATE_FORMAT`]).

use chrono::{Days, NaiveDate};

/// `strftime` pattern for schedule dates.
pub const DATE_FORMAT: &str = "%m-%d-%Y";

/// Days from a window's Monday to its Friday.
const WORKWEEK_SPAN_DAYS: u64 = 4;

/// A Monday–Friday date span (both ends inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekWindow {
    /// Monday.
    pub start: NaiveDate,
    /// Friday.
    pub end: NaiveDate,
}

/// An agent placed in a duty slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    /// Agent name.
    pub name: String,
    /// Agent email at assignment time.
    pub email: String,
}

/// Which of the two duty slots of a week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotPosition {
    /// `Agent1` / `Email1`.
    First,
    /// `Agent2` / `Email2`.
    Second,
}

/// One schedule row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Week {
    /// Date span.
    pub window: WeekWindow,
    /// First duty slot.
    pub agent1: Option<Slot>,
    /// Second duty slot.
    pub agent2: Option<Slot>,
}

impl WeekWindow {
    /// Creates the window that starts on `monday`.
    pub fn starting(monday: NaiveDate) -> Self {
        Self {
            start: monday,
            end: monday + Days::new(WORKWEEK_SPAN_DAYS),
        }
    }

    /// The window one week later.
    pub fn next(&self) -> Self {
        Self::starting(self.start + Days::new(7))
    }

    /// Start date as `MM-DD-YYYY`.
    pub fn start_label(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    /// End date as `MM-DD-YYYY`.
    pub fn end_label(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }
}

impl Slot {
    /// Creates a slot entry.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

impl Week {
    /// Creates a week with both slots empty.
    pub fn new(window: WeekWindow) -> Self {
        Self {
            window,
            agent1: None,
            agent2: None,
        }
    }

    /// Returns a slot.
    pub fn slot(&self, position: SlotPosition) -> Option<&Slot> {
        match position {
            SlotPosition::First => self.agent1.as_ref(),
            SlotPosition::Second => self.agent2.as_ref(),
        }
    }

    /// Fills a slot, replacing any previous occupant.
    pub fn set_slot(&mut self, position: SlotPosition, slot: Slot) {
        match position {
            SlotPosition::First => self.agent1 = Some(slot),
            SlotPosition::Second => self.agent2 = Some(slot),
        }
    }

    /// Positions that are still empty, first slot first.
    pub fn empty_slots(&self) -> Vec<SlotPosition> {
        [SlotPosition::First, SlotPosition::Second]
            .into_iter()
            .filter(|&p| self.slot(p).is_none())
            .collect()
    }

    /// Name in the other slot, if any.
    pub fn partner_of(&self, position: SlotPosition) -> Option<&str> {
        let other = match position {
            SlotPosition::First => SlotPosition::Second,
            SlotPosition::Second => SlotPosition::First,
        };
        self.slot(other).map(|s| s.name.as_str())
    }

    /// Number of filled slots (0..=2).
    pub fn filled_count(&self) -> usize {
        usize::from(self.agent1.is_some()) + usize::from(self.agent2.is_some())
    }
}
