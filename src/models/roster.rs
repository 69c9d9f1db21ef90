//! Roster model.
//!
//! A roster is the ordered list of agents as loaded at one point in time.
//! Row order is preserved; it drives the iteration order of change
//! detection and the seeding order of assignment counts.
//!
//! # Duplicate names
//! Names are not required to be unique. Lookups resolve to the **last**
//! row carrying the name.

use std::collections::HashSet;

use tracing::warn;

use super::Agent;
use crate::store::Table;
use crate::validation::{parse_availability, validate_roster, ValidationErrors, ROSTER_COLUMNS};

/// An ordered snapshot of agents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    /// Agents in source row order.
    pub agents: Vec<Agent>,
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an agent.
    pub fn with_agent(mut self, agent: Agent) -> Self {
        self.agents.push(agent);
        self
    }

    /// Builds a roster from a table after validating it.
    ///
    /// Logs a warning for each name that appears more than once.
    pub fn from_table(table: &Table) -> Result<Self, ValidationErrors> {
        validate_roster(table)?;

        let agents: Vec<Agent> = table
            .rows
            .iter()
            .map(|row| Agent {
                name: row[0].clone(),
                email: row[1].clone(),
                available: parse_availability(&row[2]).unwrap_or(false),
            })
            .collect();

        let roster = Self { agents };
        for name in roster.duplicate_names() {
            warn!(name = %name, "Duplicate roster name; the last row wins in lookups");
        }
        Ok(roster)
    }

    /// Renders the roster back into a table.
    pub fn to_table(&self) -> Table {
        let mut table = Table::new(ROSTER_COLUMNS);
        for agent in &self.agents {
            table.push_row([
                agent.name.as_str(),
                agent.email.as_str(),
                agent.availability_label(),
            ]);
        }
        table
    }

    /// Finds an agent by name (last matching row).
    pub fn find(&self, name: &str) -> Option<&Agent> {
        self.agents.iter().rev().find(|a| a.name == name)
    }

    /// Email for a name, if the agent exists.
    pub fn email_of(&self, name: &str) -> Option<&str> {
        self.find(name).map(|a| a.email.as_str())
    }

    /// Names of available agents in row order.
    pub fn available_names(&self) -> Vec<String> {
        self.agents
            .iter()
            .filter(|a| a.available)
            .map(|a| a.name.clone())
            .collect()
    }

    /// Number of available agents.
    pub fn available_count(&self) -> usize {
        self.agents.iter().filter(|a| a.available).count()
    }

    /// Names that occur on more than one row, in first-seen order.
    pub fn duplicate_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut duplicates = Vec::new();
        for agent in &self.agents {
            let name = agent.name.as_str();
            if !seen.insert(name) && reported.insert(name) {
                duplicates.push(name);
            }
        }
        duplicates
    }

    /// Number of agents.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Whether the roster has no agents.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    fn sample_table() -> Table {
        Table::new(ROSTER_COLUMNS)
            .with_row(["A", "a@x.com", "yes"])
            .with_row(["B", "b@x.com", "NO"])
            .with_row(["C", "c@x.com", "Yes"])
    }

    #[test]
    fn test_from_table() {
        let roster = Roster::from_table(&sample_table()).unwrap();
        assert_eq!(roster.len(), 3);
        assert!(!roster.find("B").unwrap().available);
        assert_eq!(roster.available_names(), vec!["A", "C"]);
        assert_eq!(roster.available_count(), 2);
    }

    #[test]
    fn test_from_table_rejects_bad_headers() {
        let table = Table::new(["Name", "Mail", "Avail"]);
        let errors = Roster::from_table(&table).unwrap_err();
        assert!(errors.has(ValidationErrorKind::InvalidHeaders));
    }

    #[test]
    fn test_duplicate_name_last_wins() {
        let roster = Roster::new()
            .with_agent(Agent::new("A", "first@x.com"))
            .with_agent(Agent::new("B", "b@x.com"))
            .with_agent(Agent::new("A", "second@x.com"));
        assert_eq!(roster.email_of("A"), Some("second@x.com"));
        assert_eq!(roster.duplicate_names(), vec!["A"]);
        assert_eq!(roster.email_of("Z"), None);
    }

    #[test]
    fn test_to_table_normalizes_availability() {
        let roster = Roster::from_table(&sample_table()).unwrap();
        let table = roster.to_table();
        assert_eq!(table.columns, ROSTER_COLUMNS);
        assert_eq!(table.rows[1], vec!["B", "b@x.com", "no"]);
        assert_eq!(table.rows[2][2], "yes");
    }
}
