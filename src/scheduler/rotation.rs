//! Randomized pair rotation.
//!
//! # Algorithm
//!
//! 1. Shuffle the available agent names with the caller's RNG.
//! 2. Pop two names at a time off the end of the shuffled list. An odd
//!    list leaves a final pair with an empty second member.
//! 3. Treat the pairs as a circular queue: each week takes the front pair
//!    and pushes it back.
//!
//! With `k` available agents there are `ceil(k/2)` pairs, and after `m`
//! weeks every pair has been on duty `floor(m / pairs)` or one more time.
//! Pairing is random per run but the rotation order is fixed once drawn.
//!
//! # Complexity
//! O(k + w) where k=available agents, w=weeks.

use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::error::{RotationError, RotationResult};
use crate::models::{Roster, Schedule, Slot, SlotPosition, WeekWindow};

/// Two agents on duty together. The second member is absent for the
/// leftover agent of an odd roster.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pair {
    /// First agent.
    pub first: String,
    /// Second agent, if any.
    pub second: Option<String>,
}

/// Shuffles names and groups them into pairs.
pub fn generate_pairs<R: Rng + ?Sized>(mut names: Vec<String>, rng: &mut R) -> Vec<Pair> {
    names.shuffle(rng);
    let mut pairs = Vec::with_capacity(names.len().div_ceil(2));
    while let Some(first) = names.pop() {
        let second = names.pop();
        pairs.push(Pair { first, second });
    }
    pairs
}

/// Assigns rotating pairs of available agents to week windows.
#[derive(Debug, Clone, Copy, Default)]
pub struct RotationAssigner;

impl RotationAssigner {
    /// Creates an assigner.
    pub fn new() -> Self {
        Self
    }

    /// Builds a schedule with one pair per window.
    ///
    /// # Errors
    /// [`RotationError::NoAvailableAgents`] when no roster agent is available.
    pub fn assign<R: Rng + ?Sized>(
        &self,
        roster: &Roster,
        windows: &[WeekWindow],
        rng: &mut R,
    ) -> RotationResult<Schedule> {
        let pairs = generate_pairs(roster.available_names(), rng);
        self.assign_pairs(roster, windows, pairs)
    }

    /// Rotates an already drawn pair list across the windows.
    pub fn assign_pairs(
        &self,
        roster: &Roster,
        windows: &[WeekWindow],
        pairs: Vec<Pair>,
    ) -> RotationResult<Schedule> {
        let mut queue: VecDeque<Pair> = pairs.into();
        let mut schedule = Schedule::from_windows(windows);

        for week in &mut schedule.weeks {
            let pair = queue.pop_front().ok_or(RotationError::NoAvailableAgents)?;
            debug!(
                start = %week.window.start_label(),
                end = %week.window.end_label(),
                first = %pair.first,
                second = ?pair.second,
                "Assigning duties"
            );

            week.set_slot(SlotPosition::First, slot_for(roster, &pair.first));
            if let Some(second) = &pair.second {
                week.set_slot(SlotPosition::Second, slot_for(roster, second));
            }

            queue.push_back(pair);
        }

        if queue.is_empty() {
            return Err(RotationError::NoAvailableAgents);
        }
        Ok(schedule)
    }
}

fn slot_for(roster: &Roster, name: &str) -> Slot {
    Slot::new(name, roster.email_of(name).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Agent;
    use crate::scheduler::generate_windows;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn roster(n: usize) -> Roster {
        (0..n).fold(Roster::new(), |r, i| {
            r.with_agent(Agent::new(format!("agent{i}"), format!("agent{i}@x.com")))
        })
    }

    fn windows(n: usize) -> Vec<WeekWindow> {
        generate_windows(NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(), n)
    }

    fn pair_key(week: &crate::models::Week) -> (String, Option<String>) {
        (
            week.agent1.as_ref().unwrap().name.clone(),
            week.agent2.as_ref().map(|s| s.name.clone()),
        )
    }

    #[test]
    fn test_pairs_even() {
        let mut rng = StdRng::seed_from_u64(7);
        let names: Vec<String> = ["A", "B", "C", "D"].map(String::from).to_vec();
        let pairs = generate_pairs(names, &mut rng);
        assert_eq!(pairs.len(), 2);
        assert!(pairs.iter().all(|p| p.second.is_some()));

        let mut everyone: Vec<&str> = pairs
            .iter()
            .flat_map(|p| std::iter::once(p.first.as_str()).chain(p.second.as_deref()))
            .collect();
        everyone.sort_unstable();
        assert_eq!(everyone, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_pairs_odd_has_single_trailing_gap() {
        let mut rng = StdRng::seed_from_u64(11);
        let names: Vec<String> = ["A", "B", "C"].map(String::from).to_vec();
        let pairs = generate_pairs(names, &mut rng);
        assert_eq!(pairs.len(), 2);
        assert!(pairs[0].second.is_some());
        assert!(pairs[1].second.is_none());
    }

    #[test]
    fn test_same_seed_same_rotation() {
        let r = roster(6);
        let w = windows(12);
        let a = RotationAssigner::new()
            .assign(&r, &w, &mut StdRng::seed_from_u64(42))
            .unwrap();
        let b = RotationAssigner::new()
            .assign(&r, &w, &mut StdRng::seed_from_u64(42))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rotation_is_cyclic_and_balanced() {
        for k in 1..=9 {
            let r = roster(k);
            let w = windows(52);
            let schedule = RotationAssigner::new()
                .assign(&r, &w, &mut StdRng::seed_from_u64(k as u64))
                .unwrap();

            let expected_pairs = k.div_ceil(2);
            let mut appearances: HashMap<(String, Option<String>), usize> = HashMap::new();
            for week in &schedule.weeks {
                *appearances.entry(pair_key(week)).or_default() += 1;
            }
            assert_eq!(appearances.len(), expected_pairs, "k={k}");

            let floor = 52 / expected_pairs;
            for count in appearances.values() {
                assert!(*count == floor || *count == floor + 1, "k={k}");
            }

            for (i, week) in schedule.weeks.iter().enumerate().skip(expected_pairs) {
                assert_eq!(pair_key(week), pair_key(&schedule.weeks[i - expected_pairs]));
            }
        }
    }

    #[test]
    fn test_emails_come_from_roster() {
        let r = Roster::new()
            .with_agent(Agent::new("A", "a@x.com"))
            .with_agent(Agent::new("B", "b@x.com"));
        let schedule = RotationAssigner::new()
            .assign(&r, &windows(1), &mut StdRng::seed_from_u64(1))
            .unwrap();
        let week = &schedule.weeks[0];
        for slot in [&week.agent1, &week.agent2].into_iter().flatten() {
            assert_eq!(slot.email, format!("{}@x.com", slot.name.to_lowercase()));
        }
    }

    #[test]
    fn test_unavailable_agents_excluded() {
        let r = Roster::new()
            .with_agent(Agent::new("A", "a@x.com"))
            .with_agent(Agent::new("B", "b@x.com").with_available(false));
        let schedule = RotationAssigner::new()
            .assign(&r, &windows(4), &mut StdRng::seed_from_u64(3))
            .unwrap();
        assert_eq!(schedule.weeks_for_agent("A"), 4);
        assert_eq!(schedule.weeks_for_agent("B"), 0);
        assert_eq!(schedule.filled_slots(), 4);
    }

    #[test]
    fn test_no_available_agents() {
        let r = Roster::new().with_agent(Agent::new("A", "a@x.com").with_available(false));
        let err = RotationAssigner::new()
            .assign(&r, &windows(4), &mut StdRng::seed_from_u64(3))
            .unwrap_err();
        assert!(matches!(err, RotationError::NoAvailableAgents));

        let err = RotationAssigner::new()
            .assign(&Roster::new(), &[], &mut StdRng::seed_from_u64(3))
            .unwrap_err();
        assert!(matches!(err, RotationError::NoAvailableAgents));
    }
}
