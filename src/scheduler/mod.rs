//! Rotation schedulers.
//!
//! Builds the live schedule in three steps:
//!
//! 1. [`generate_windows`] lays out the Monday–Friday weeks.
//! 2. [`RotationAssigner`] shuffles available agents into pairs and cycles
//!    them across the weeks.
//! 3. [`backfill`] fills slots left empty by an odd roster with the
//!    least-loaded agent.
//!
//! # Fairness
//!
//! Rotation gives every pair the same number of weeks (±1). Backfill then
//! always picks an agent at the current minimum count.

mod backfill;
mod rotation;
mod window;

pub use backfill::{backfill, least_assigned_agent, needs_backfill};
pub use rotation::{generate_pairs, Pair, RotationAssigner};
pub use window::{generate_windows, week_anchor, DEFAULT_NUM_WEEKS};
