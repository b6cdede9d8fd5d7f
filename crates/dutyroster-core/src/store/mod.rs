//! Storage seams for the roster.
//!
//! The engine never touches a database directly. It reads people through an
//! `EmployeeDirectory` and reads/writes assignments through an
//! `AssignmentStore`. Two implementations ship with the crate:
//!
//! - `MemoryRoster`: thread-safe in-memory store, used by tests and embedders
//! - `JsonRosterStore`: one JSON snapshot file, rewritten atomically on every write

pub mod json;
pub mod memory;

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{DutyAssignment, Person, PersonId, Rank, ShiftName, Team, TeamId};

pub use json::{JsonRosterStore, Snapshot};
pub use memory::{MemoryRoster, RosterData};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Constraint violated: {0}")]
    Conflict(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Read access to personnel records, plus atomic batch updates for roster administration.
pub trait EmployeeDirectory: Send + Sync {
    fn get_person(&self, id: &PersonId) -> Result<Option<Person>, StoreError>;

    fn get_team(&self, id: TeamId) -> Result<Option<Team>, StoreError>;

    fn list_by_rank(&self, rank: Rank) -> Result<Vec<Person>, StoreError>;

    /// People on any of `teams`, ordered by team. Order within a team is stable.
    fn list_by_teams(&self, teams: &[TeamId]) -> Result<Vec<Person>, StoreError>;

    /// Replace the records of existing people. Either every record is written or none is.
    fn update_people(&self, people: &[Person]) -> Result<(), StoreError>;
}

/// Committed duty assignments.
///
/// Each write is its own transaction: on error the store is left exactly as it was.
/// Implementations enforce the two uniqueness constraints and report violations
/// as `StoreError::Conflict`.
pub trait AssignmentStore: Send + Sync {
    fn find(&self, shift: ShiftName, date: NaiveDate) -> Result<Option<DutyAssignment>, StoreError>;

    fn find_by_person(
        &self,
        person: &PersonId,
        date: NaiveDate,
    ) -> Result<Option<DutyAssignment>, StoreError>;

    fn list_for_date(&self, date: NaiveDate) -> Result<Vec<DutyAssignment>, StoreError>;

    fn insert(&self, assignment: &DutyAssignment) -> Result<(), StoreError>;

    /// Overwrite the assignment for `(assignment.shift, assignment.date)`,
    /// which must currently be held by `previous`.
    fn update(&self, previous: &PersonId, assignment: &DutyAssignment) -> Result<(), StoreError>;
}
