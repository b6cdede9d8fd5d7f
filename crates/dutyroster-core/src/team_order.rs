//! Monthly team order.
//!
//! Each team has a base order of 1, 2 or 3 within its cohort. The order rotates
//! every month on a three-month cycle, so every team leads its cohort one month
//! in three.

use crate::error::{Result, RosterError};
use crate::models::{Team, TeamId};

/// Base order of an active team, `None` for unrecognized ids.
pub fn base_rank(team: TeamId) -> Option<u8> {
    match team.get() {
        1 | 4 | 7 => Some(2),
        2 | 5 | 8 => Some(3),
        3 | 6 | 9 => Some(1),
        11 => Some(1),
        13 => Some(2),
        14 => Some(3),
        _ => None,
    }
}

/// Which month of the three-month rotation `month` (1-12) falls on.
pub fn rotation_month(month: u32) -> u32 {
    (month + 2) % 3 + 1
}

/// Team order (1-3) of `team` in calendar month `month`.
pub fn team_rank(team: TeamId, month: u32) -> Result<u8> {
    if !(1..=12).contains(&month) {
        return Err(RosterError::InvalidDate(format!("month {} out of range 1..=12", month)));
    }
    let base = base_rank(team).ok_or_else(|| RosterError::UnknownTeam(team.to_string()))?;

    let rank = match (rotation_month(month), base) {
        (1, rank) => rank,
        (2, 3) => 2,
        (2, 2) => 1,
        (2, _) => 3,
        (_, 3) => 1,
        (_, 2) => 3,
        (_, _) => 2,
    };
    Ok(rank)
}

/// Order of every active team for `month`.
pub fn month_ranks(month: u32) -> Result<Vec<(TeamId, u8)>> {
    Team::all()
        .map(|team| team_rank(team.id, month).map(|rank| (team.id, rank)))
        .collect()
}
