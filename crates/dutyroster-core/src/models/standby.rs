use serde::{Deserialize, Serialize};

use super::person::{Person, PersonId};
use super::team::TeamId;
use super::track::LeaveTrack;

/// An off-shift person placed in a standby group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
pub struct StandbyMember {
    pub person_id: PersonId,
    pub name: String,
    pub team: TeamId,
    pub track: LeaveTrack,
    pub team_rank: u8,
    /// 0 for members of the special teams, which are ordered by team rank only.
    pub priority_rank: u8,
}

impl StandbyMember {
    pub fn new(person: &Person, priority_rank: u8, team_rank: u8) -> Self {
        Self {
            person_id: person.id.clone(),
            name: person.name.clone(),
            team: person.team,
            track: person.track,
            team_rank,
            priority_rank,
        }
    }
}

/// A cluster of team leads and line officers on standby for a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
pub struct StandbyGroup {
    /// 1-based, in formation order.
    pub number: usize,
    pub leads: Vec<StandbyMember>,
    pub officers: Vec<StandbyMember>,
    /// The final group holding whoever was left over. It may have several
    /// leads, no lead at all, or fewer officers than a full group.
    pub is_tail: bool,
}

impl StandbyGroup {
    pub fn lead(&self) -> Option<&StandbyMember> {
        self.leads.first()
    }

    pub fn len(&self) -> usize {
        self.leads.len() + self.officers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn members(&self) -> impl Iterator<Item = &StandbyMember> {
        self.leads.iter().chain(self.officers.iter())
    }
}
