use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RosterError;

/// One of the three leave tracks, each a phase offset into the shared 21-day cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
pub enum LeaveTrack {
    #[serde(rename = "123")]
    Track123,
    #[serde(rename = "456")]
    Track456,
    #[serde(rename = "789")]
    Track789,
}

impl LeaveTrack {
    pub const ALL: [LeaveTrack; 3] = [LeaveTrack::Track123, LeaveTrack::Track456, LeaveTrack::Track789];

    /// Days this track lags behind the rotation epoch.
    pub fn offset(&self) -> i64 {
        match self {
            LeaveTrack::Track123 => 0,
            LeaveTrack::Track456 => 14,
            LeaveTrack::Track789 => 7,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LeaveTrack::Track123 => "123",
            LeaveTrack::Track456 => "456",
            LeaveTrack::Track789 => "789",
        }
    }

    /// Track handed out to the member at a 0-based position within a team's order:
    /// the first three members get 123, the next three 456, everyone else 789.
    pub fn for_position(index: usize) -> Self {
        match index {
            0..=2 => LeaveTrack::Track123,
            3..=5 => LeaveTrack::Track456,
            _ => LeaveTrack::Track789,
        }
    }
}

impl std::fmt::Display for LeaveTrack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for LeaveTrack {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        LeaveTrack::ALL
            .into_iter()
            .find(|track| track.label() == trimmed)
            .ok_or_else(|| RosterError::UnknownTrack(s.to_string()))
    }
}
