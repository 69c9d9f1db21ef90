//! Roster change detection.
//!
//! Compares a previous roster snapshot against the current one, field by
//! field, keyed by agent name.
//!
//! # Rules
//! - Iteration follows the previous snapshot's row order, then column order.
//! - Lookups in the current roster use the last row with a given name.
//! - Agents only present in the current roster (new hires) are not reported.
//! - Agents missing from the current roster are returned separately by
//!   [`departed_agents`], not as change records.

use std::fmt;

use crate::models::{Agent, Roster};

/// A roster column that can change between snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterField {
    /// `Name` column.
    Name,
    /// `Email` column.
    Email,
    /// `Available` column.
    Available,
}

/// One changed field for one agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    /// Agent name (from the previous snapshot).
    pub name: String,
    /// Which column changed.
    pub field: RosterField,
    /// Previous value.
    pub old: String,
    /// Current value.
    pub new: String,
}

impl RosterField {
    /// All fields, in roster column order.
    pub const ALL: [RosterField; 3] = [Self::Name, Self::Email, Self::Available];

    /// Column header for this field.
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Available => "Available",
        }
    }

    fn value_of(self, agent: &Agent) -> &str {
        match self {
            Self::Name => agent.name.as_str(),
            Self::Email => agent.email.as_str(),
            Self::Available => agent.availability_label(),
        }
    }
}

impl fmt::Display for ChangeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Change in {} for employee {}: {} -> {}",
            self.field.label(),
            self.name,
            self.old,
            self.new
        )
    }
}

/// Lists field-level differences between two roster snapshots.
///
/// Pure: performs no I/O and does not log.
pub fn detect_changes(previous: &Roster, current: &Roster) -> Vec<ChangeRecord> {
    let mut changes = Vec::new();

    for old in &previous.agents {
        let Some(new) = current.find(&old.name) else {
            continue;
        };
        for field in RosterField::ALL {
            let (old_value, new_value) = (field.value_of(old), field.value_of(new));
            if old_value != new_value {
                changes.push(ChangeRecord {
                    name: old.name.clone(),
                    field,
                    old: old_value.to_string(),
                    new: new_value.to_string(),
                });
            }
        }
    }

    changes
}

/// Names in the previous snapshot that no longer appear in the current one.
pub fn departed_agents<'a>(previous: &'a Roster, current: &Roster) -> Vec<&'a str> {
    previous
        .agents
        .iter()
        .filter(|a| current.find(&a.name).is_none())
        .map(|a| a.name.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_change() {
        let previous = Roster::new().with_agent(Agent::new("A", "a@x.com"));
        let current = Roster::new().with_agent(Agent::new("A", "b@x.com"));

        let changes: Vec<String> = detect_changes(&previous, &current)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            changes,
            vec!["Change in Email for employee A: a@x.com -> b@x.com"]
        );
    }

    #[test]
    fn test_no_changes() {
        let roster = Roster::new()
            .with_agent(Agent::new("A", "a@x.com"))
            .with_agent(Agent::new("B", "b@x.com").with_available(false));
        assert!(detect_changes(&roster, &roster.clone()).is_empty());
    }

    #[test]
    fn test_order_follows_previous_then_fields() {
        let previous = Roster::new()
            .with_agent(Agent::new("B", "b@x.com"))
            .with_agent(Agent::new("A", "a@x.com"));
        let current = Roster::new()
            .with_agent(Agent::new("A", "a2@x.com").with_available(false))
            .with_agent(Agent::new("B", "b@x.com").with_available(false));

        let changes = detect_changes(&previous, &current);
        let rendered: Vec<String> = changes.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec![
                "Change in Available for employee B: yes -> no",
                "Change in Email for employee A: a@x.com -> a2@x.com",
                "Change in Available for employee A: yes -> no",
            ]
        );
        assert_eq!(changes[1].field, RosterField::Email);
    }

    #[test]
    fn test_new_hires_not_reported() {
        let previous = Roster::new().with_agent(Agent::new("A", "a@x.com"));
        let current = Roster::new()
            .with_agent(Agent::new("A", "a@x.com"))
            .with_agent(Agent::new("N", "n@x.com"));
        assert!(detect_changes(&previous, &current).is_empty());
    }

    #[test]
    fn test_departures_listed_separately() {
        let previous = Roster::new()
            .with_agent(Agent::new("A", "a@x.com"))
            .with_agent(Agent::new("Gone", "g@x.com"));
        let current = Roster::new().with_agent(Agent::new("A", "a@x.com"));

        assert!(detect_changes(&previous, &current).is_empty());
        assert_eq!(departed_agents(&previous, &current), vec!["Gone"]);
    }

    #[test]
    fn test_duplicate_in_current_uses_last_row() {
        let previous = Roster::new().with_agent(Agent::new("A", "a@x.com"));
        let current = Roster::new()
            .with_agent(Agent::new("A", "a@x.com"))
            .with_agent(Agent::new("A", "late@x.com"));
        let changes = detect_changes(&previous, &current);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].new, "late@x.com");
    }
}
