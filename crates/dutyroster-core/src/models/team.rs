use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RosterError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[serde(transparent)]
pub struct TeamId(u8);

impl TeamId {
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TeamId {
    type Err = RosterError;

    /// Parses the numeric part; accepts "3" and "team 3".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().trim_start_matches("team").trim();
        digits
            .parse::<u8>()
            .map(TeamId)
            .map_err(|_| RosterError::UnknownTeam(s.to_string()))
    }
}

/// Regular teams 1-9 in cohort order.
pub const REGULAR_TEAMS: [TeamId; 9] = [
    TeamId(1),
    TeamId(2),
    TeamId(3),
    TeamId(4),
    TeamId(5),
    TeamId(6),
    TeamId(7),
    TeamId(8),
    TeamId(9),
];

/// Teams outside the cohort rotation.
pub const SPECIAL_TEAMS: [TeamId; 3] = [TeamId(11), TeamId(13), TeamId(14)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamKind {
    /// Member of cohort 1, 2 or 3 (teams 1-3, 4-6, 7-9).
    Regular { cohort: u8 },
    Special,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub kind: TeamKind,
}

impl Team {
    /// Look up one of the twelve active teams.
    pub fn from_id(id: TeamId) -> Option<Team> {
        let kind = match id.0 {
            1..=9 => TeamKind::Regular {
                cohort: (id.0 - 1) / 3 + 1,
            },
            11 | 13 | 14 => TeamKind::Special,
            _ => return None,
        };
        Some(Team { id, kind })
    }

    pub fn all() -> impl Iterator<Item = Team> {
        REGULAR_TEAMS
            .into_iter()
            .chain(SPECIAL_TEAMS)
            .filter_map(Team::from_id)
    }

    pub fn is_special(&self) -> bool {
        self.kind == TeamKind::Special
    }

    /// Other teams sharing this team's cohort (including itself).
    pub fn cohort_members(&self) -> Vec<TeamId> {
        match self.kind {
            TeamKind::Regular { cohort } => {
                let first = (cohort - 1) * 3 + 1;
                (first..first + 3).map(TeamId).collect()
            }
            TeamKind::Special => SPECIAL_TEAMS.to_vec(),
        }
    }
}
