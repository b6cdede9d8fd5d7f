use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::team::TeamId;
use super::track::LeaveTrack;
use crate::error::RosterError;

/// Unique badge identifier of a person in the directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[serde(transparent)]
pub struct PersonId(String);

impl PersonId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PersonId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for PersonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Job rank. Shifts are restricted to exactly one rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[serde(rename_all = "snake_case")]
pub enum Rank {
    LineOfficer,
    TeamLead,
    DeputyCommander,
}

impl Rank {
    pub const ALL: [Rank; 3] = [Rank::LineOfficer, Rank::TeamLead, Rank::DeputyCommander];

    /// Higher is more senior.
    pub fn seniority(&self) -> u8 {
        match self {
            Rank::LineOfficer => 1,
            Rank::TeamLead => 2,
            Rank::DeputyCommander => 3,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Rank::LineOfficer => "line_officer",
            Rank::TeamLead => "team_lead",
            Rank::DeputyCommander => "deputy_commander",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Rank::LineOfficer => "line officer",
            Rank::TeamLead => "team lead",
            Rank::DeputyCommander => "deputy commander",
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Rank {
    type Err = RosterError;

    /// Accepts the snake_case key, kebab-case, or the display name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        Rank::ALL
            .into_iter()
            .find(|rank| rank.key() == normalized)
            .ok_or_else(|| RosterError::UnknownRank(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub rank: Rank,
    pub team: TeamId,
    pub track: LeaveTrack,
}

impl Person {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        rank: Rank,
        team: TeamId,
        track: LeaveTrack,
    ) -> Self {
        Self {
            id: PersonId::new(id),
            name: name.into(),
            rank,
            team,
            track,
        }
    }

    /// Name with team suffix, e.g. "Chen Wei (team 3)"
    pub fn display_name(&self) -> String {
        format!("{} (team {})", self.name, self.team)
    }

    pub fn is_line_officer(&self) -> bool {
        self.rank == Rank::LineOfficer
    }

    pub fn is_team_lead(&self) -> bool {
        self.rank == Rank::TeamLead
    }
}
