use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{LeaveTrack, PersonId, Rank, ShiftName, TeamId};
use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Unknown person: {0}")]
    UnknownPerson(PersonId),

    #[error("Unknown team: {0}")]
    UnknownTeam(String),

    #[error("Unknown shift: {0}")]
    UnknownShift(String),

    #[error("Unknown leave track: {0}")]
    UnknownTrack(String),

    #[error("Unknown rank: {0}")]
    UnknownRank(String),

    #[error("{shift} requires {required}, but {person} is {actual}")]
    RankMismatch {
        shift: ShiftName,
        person: PersonId,
        required: Rank,
        actual: Rank,
    },

    #[error("{person} is off duty on {date} (track {track})")]
    OffDuty {
        person: PersonId,
        date: NaiveDate,
        track: LeaveTrack,
    },

    #[error("{shift} on {date} is already assigned to {person}")]
    AlreadyAssigned {
        shift: ShiftName,
        date: NaiveDate,
        person: PersonId,
    },

    #[error("{person} is already assigned to {shift} on {date}")]
    DoubleBooked {
        person: PersonId,
        date: NaiveDate,
        shift: ShiftName,
    },

    #[error("{shift} on {date} has no assignment")]
    NotAssigned { shift: ShiftName, date: NaiveDate },

    #[error("{shift} on {date} is held by {actual}, not {expected}")]
    AssignmentMismatch {
        shift: ShiftName,
        date: NaiveDate,
        expected: PersonId,
        actual: PersonId,
    },

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("Computation error: {0}")]
    Computation(String),

    #[error("{person} is not a member of team {team}")]
    NotInTeam { person: PersonId, team: TeamId },

    #[error("Invalid position {position} (team has {size} members)")]
    InvalidPosition { position: usize, size: usize },

    #[error("Nothing to update")]
    NothingToUpdate,
}

impl RosterError {
    /// True for errors caused by the request itself rather than the backing store.
    pub fn is_validation(&self) -> bool {
        !matches!(self, RosterError::Storage(_) | RosterError::Computation(_))
    }
}

pub type Result<T> = std::result::Result<T, RosterError>;
