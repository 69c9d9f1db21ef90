//! Agent model.
//!
//! Agents are the people who staff the weekly duty slots. Each agent has
//! a name (the natural key), a contact email, and an availability flag.

/// A person who can be assigned to duty weeks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agent {
    /// Display name, used as the lookup key.
    pub name: String,
    /// Contact email copied into the schedule.
    pub email: String,
    /// Whether the agent takes part in this run's rotation.
    pub available: bool,
}

impl Agent {
    /// Creates an available agent.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            available: true,
        }
    }

    /// Sets availability.
    pub fn with_available(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    /// Availability rendered the way roster tables spell it.
    pub fn availability_label(&self) -> &'static str {
        if self.available {
            "yes"
        } else {
            "no"
        }
    }
}
