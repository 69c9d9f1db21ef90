//! Weekly duty rotation engine.
//!
//! Assigns agents from a roster to recurring Monday–Friday duty weeks,
//! balances workload across the schedule, and keeps versioned backups of
//! the roster and schedule between runs.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Agent`, `Roster`, `WeekWindow`, `Week`,
//!   `Schedule`, `AssignmentCounts`
//! - **`validation`**: Roster checks (headers, emails, availability values)
//! - **`changes`**: Field-level diff between two roster snapshots
//! - **`scheduler`**: Week windows, pair rotation, least-loaded backfill
//! - **`backup`**: Timestamped backups with per-name retention
//! - **`store`**: Tabular persistence (`TableStore`, JSON implementation)
//! - **`job`**: The end-to-end batch run
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use u_rotation::models::{Agent, AssignmentCounts, Roster};
//! use u_rotation::scheduler::{backfill, generate_windows, needs_backfill, RotationAssigner};
//!
//! let roster = Roster::new()
//!     .with_agent(Agent::new("Ada", "ada@example.com"))
//!     .with_agent(Agent::new("Brian", "brian@example.com"))
//!     .with_agent(Agent::new("Cleo", "cleo@example.com"));
//! let today = NaiveDate::from_ymd_opt(2024, 5, 8).unwrap();
//! let windows = generate_windows(today, 52);
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let mut schedule = RotationAssigner::new().assign(&roster, &windows, &mut rng).unwrap();
//! let mut counts = AssignmentCounts::seeded(roster.available_names()).tally(&schedule);
//! if needs_backfill(roster.available_count()) {
//!     backfill(&mut schedule, &mut counts, &roster);
//! }
//! assert_eq!(schedule.empty_slots(), 0);
//! assert_eq!(counts.total(), 104);
//! ```

pub mod backup;
pub mod changes;
pub mod clock;
pub mod config;
pub mod error;
pub mod job;
pub mod models;
pub mod scheduler;
pub mod store;
pub mod validation;

pub use error::{RotationError, RotationResult};
