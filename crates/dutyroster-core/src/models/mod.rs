//! Data models for the duty roster.
//!
//! - `Person`, `Rank`, `PersonId`: directory records
//! - `LeaveTrack`: the three rotating rest schedules
//! - `Team`, `TeamId`: the twelve active teams and their cohorts
//! - `ShiftName`, `ShiftCatalog`: staffable shifts and their rank requirements
//! - `DutyAssignment`, `RosterEntry`: committed assignments and the printed roster
//! - `StandbyGroup`, `StandbyMember`: grouping output for off-shift personnel

pub mod assignment;
pub mod person;
pub mod shift;
pub mod standby;
pub mod team;
pub mod track;

pub use assignment::{DutyAssignment, RosterEntry};
pub use person::{Person, PersonId, Rank};
pub use shift::{ShiftCatalog, ShiftDefinition, ShiftName};
pub use standby::{StandbyGroup, StandbyMember};
pub use team::{Team, TeamId, TeamKind, REGULAR_TEAMS, SPECIAL_TEAMS};
pub use track::LeaveTrack;
