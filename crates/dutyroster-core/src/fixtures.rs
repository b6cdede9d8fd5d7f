//! Sample roster shared by the unit tests.
//!
//! Regular teams 1-9 each have one lead and six officers. Lead tracks cycle
//! 123/456/789 by team; officers 1-2 are on 123, 3-4 on 456, 5-6 on 789.
//! Special teams 11/13/14 have one lead on 123 and two officers (123, 789).
//! Two deputy commanders sit on teams 14 and 13.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::models::{LeaveTrack, Person, PersonId, Rank, TeamId, REGULAR_TEAMS, SPECIAL_TEAMS};
use crate::store::MemoryRoster;

pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Rotation epoch: track 123 on phase 0, 456 resting, 789 on phase 14.
pub(crate) fn epoch_saturday() -> NaiveDate {
    date(2024, 1, 6)
}

pub(crate) fn id(s: &str) -> PersonId {
    PersonId::from(s)
}

pub(crate) fn sample_people() -> Vec<Person> {
    let mut people = Vec::new();

    for (i, team) in REGULAR_TEAMS.into_iter().enumerate() {
        let t = team.get();
        people.push(Person::new(
            format!("L{}", t),
            format!("Lead {}", t),
            Rank::TeamLead,
            team,
            LeaveTrack::ALL[i % 3],
        ));
        for k in 1..=6u8 {
            let track = match k {
                1 | 2 => LeaveTrack::Track123,
                3 | 4 => LeaveTrack::Track456,
                _ => LeaveTrack::Track789,
            };
            people.push(Person::new(
                format!("O{}-{}", t, k),
                format!("Officer {}-{}", t, k),
                Rank::LineOfficer,
                team,
                track,
            ));
        }
    }

    for team in SPECIAL_TEAMS {
        let t = team.get();
        people.push(Person::new(
            format!("L{}", t),
            format!("Lead {}", t),
            Rank::TeamLead,
            team,
            LeaveTrack::Track123,
        ));
        for (k, track) in [(1, LeaveTrack::Track123), (2, LeaveTrack::Track789)] {
            people.push(Person::new(
                format!("O{}-{}", t, k),
                format!("Officer {}-{}", t, k),
                Rank::LineOfficer,
                team,
                track,
            ));
        }
    }

    people.push(Person::new("D1", "Deputy 1", Rank::DeputyCommander, TeamId::new(14), LeaveTrack::Track123));
    people.push(Person::new("D2", "Deputy 2", Rank::DeputyCommander, TeamId::new(13), LeaveTrack::Track456));
    people
}

pub(crate) fn sample_roster() -> Arc<MemoryRoster> {
    Arc::new(MemoryRoster::new(sample_people()))
}
