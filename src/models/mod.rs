//! Duty rotation domain models.
//!
//! Provides the core data types for a rotation run: the roster that goes
//! in, and the schedule and counts that come out.
//!
//! # Domain Mappings
//!
//! | u-rotation | On-call | Support desk | Facilities |
//! |------------|---------|--------------|------------|
//! | Agent | Engineer | Support agent | Caretaker |
//! | Roster | Team list | Staff sheet | Duty list |
//! | Week | On-call week | Desk week | Duty week |
//! | Schedule | Rotation plan | Desk plan | Duty plan |

mod agent;
mod counts;
mod roster;
mod schedule;
mod week;

pub use agent::Agent;
pub use counts::{AssignmentCounts, COUNTS_COLUMNS, COUNTS_SHEET};
pub use roster::Roster;
pub use schedule::{Schedule, WEEKS_COLUMNS, WEEKS_SHEET};
pub use week::{Slot, SlotPosition, Week, WeekWindow, DATE_FORMAT};
