//! Least-loaded backfill for empty duty slots.
//!
//! When the number of available agents is odd, the rotation leaves one
//! pair without a second member. Backfill fills every empty slot with the
//! agent that currently holds the fewest assignments.
//!
//! # Tie-break
//! Among the agents sharing the minimum count, the first one in counts
//! order wins, skipping the agent already on duty in the same week. If
//! that agent is the only one at the minimum, it is used anyway.
//!
//! Counts are updated after every slot, so the minimum is re-read for the
//! next slot.

use tracing::{debug, info};

use crate::models::{AssignmentCounts, Roster, Schedule, Slot};

/// Whether the available-agent count leaves gaps for backfill.
pub fn needs_backfill(available_count: usize) -> bool {
    available_count % 2 == 1
}

/// Picks the agent for a slot whose week partner is `partner`.
pub fn least_assigned_agent<'a>(
    counts: &'a AssignmentCounts,
    partner: Option<&str>,
) -> Option<&'a str> {
    let candidates = counts.least_assigned();
    let preferred = candidates.iter().copied().find(|name| Some(*name) != partner);
    preferred.or_else(|| candidates.first().copied())
}

/// Fills every empty slot in week order, first slot before second.
///
/// Returns the number of slots filled. Slots stay empty only when
/// `counts` is empty.
pub fn backfill(schedule: &mut Schedule, counts: &mut AssignmentCounts, roster: &Roster) -> usize {
    let mut filled = 0;

    for week in &mut schedule.weeks {
        for position in week.empty_slots() {
            let Some(name) =
                least_assigned_agent(counts, week.partner_of(position)).map(str::to_string)
            else {
                info!(
                    start = %week.window.start_label(),
                    "No least assigned agent available. Skipping assignment."
                );
                continue;
            };

            debug!(start = %week.window.start_label(), agent = %name, "Backfilling slot");
            counts.increment(&name);
            let email = roster.email_of(&name).unwrap_or_default();
            week.set_slot(position, Slot::new(name.as_str(), email));
            filled += 1;
        }
    }

    filled
}
