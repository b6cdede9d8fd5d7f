use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::person::{PersonId, Rank};
use super::shift::ShiftName;
use super::team::TeamId;
use super::track::LeaveTrack;

/// Binding of one person to one named shift on one date.
///
/// Ranks are snapshotted when the assignment is written so the printed roster
/// keeps its order even if the person later changes team or track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutyAssignment {
    pub shift: ShiftName,
    pub date: NaiveDate,
    pub person_id: PersonId,
    pub priority_rank: u8,
    pub team_rank: u8,
}

/// One line of the daily roster handed to the report renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
pub struct RosterEntry {
    pub shift: ShiftName,
    pub person_id: PersonId,
    pub name: String,
    pub rank: Rank,
    pub team: TeamId,
    pub track: LeaveTrack,
    pub team_rank: u8,
    pub priority_rank: u8,
}
