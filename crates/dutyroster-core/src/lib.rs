//! Duty roster core.
//!
//! Personnel rotate on a 21-day leave cycle by leave track (123, 456, 789),
//! teams take turns leading each month, and every day's named shifts are
//! filled by validated assignments. Anyone on duty but not on a shift is
//! packed into standby groups.
//!
//! [`DutyRoster`] is the usual entry point; the pieces it hands out
//! ([`AssignmentValidator`], [`StandbyGroupBuilder`], [`RosterViews`],
//! [`RosterAdmin`]) can also be built directly over any
//! [`EmployeeDirectory`] and [`AssignmentStore`].

pub mod admin;
pub mod assign;
pub mod config;
pub mod error;
pub mod locks;
pub mod models;
pub mod roster;
pub mod rotation;
pub mod standby;
pub mod store;
pub mod team_order;
pub mod views;

#[cfg(test)]
mod fixtures;

pub use admin::RosterAdmin;
pub use assign::AssignmentValidator;
pub use config::RosterConfig;
pub use error::{Result, RosterError};
pub use locks::DateLocks;
pub use roster::DutyRoster;
pub use rotation::{parse_date, DutyState, RotationCalendar};
pub use standby::{pack_groups, StandbyGroupBuilder};
pub use store::{AssignmentStore, EmployeeDirectory, JsonRosterStore, MemoryRoster, StoreError};
pub use team_order::team_rank;
pub use views::{MemberStatus, RosterViews, TeamStatus};
