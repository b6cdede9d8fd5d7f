//! Read-only roster views for the presentation layer.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::error::{Result, RosterError};
use crate::locks::{poisoned, DateLocks};
use crate::models::{LeaveTrack, Person, PersonId, Rank, RosterEntry, TeamId};
use crate::rotation::RotationCalendar;
use crate::store::{AssignmentStore, EmployeeDirectory};
use crate::team_order::team_rank;

/// Duty state of one person on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
pub struct MemberStatus {
    pub person_id: PersonId,
    pub name: String,
    pub rank: Rank,
    pub track: LeaveTrack,
    pub on_duty: bool,
    /// 0 when resting.
    pub priority_rank: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
pub struct TeamStatus {
    pub team: TeamId,
    pub team_rank: u8,
    pub members: Vec<MemberStatus>,
}

pub struct RosterViews {
    directory: Arc<dyn EmployeeDirectory>,
    store: Arc<dyn AssignmentStore>,
    calendar: RotationCalendar,
    locks: Arc<DateLocks>,
}

impl RosterViews {
    pub fn new(
        directory: Arc<dyn EmployeeDirectory>,
        store: Arc<dyn AssignmentStore>,
        calendar: RotationCalendar,
        locks: Arc<DateLocks>,
    ) -> Self {
        Self {
            directory,
            store,
            calendar,
            locks,
        }
    }

    /// Assignments for `date` ordered by shift, then team order, then day order.
    pub fn daily_roster(&self, date: NaiveDate) -> Result<Vec<RosterEntry>> {
        self.calendar.ensure_in_range(date)?;
        let lock = self.locks.for_date(date)?;
        let _guard = lock.read().map_err(|_| poisoned(date))?;

        let mut entries = Vec::new();
        for assignment in self.store.list_for_date(date)? {
            let person = self
                .directory
                .get_person(&assignment.person_id)?
                .ok_or_else(|| RosterError::UnknownPerson(assignment.person_id.clone()))?;
            entries.push(RosterEntry {
                shift: assignment.shift,
                person_id: person.id,
                name: person.name,
                rank: person.rank,
                team: person.team,
                track: person.track,
                team_rank: assignment.team_rank,
                priority_rank: assignment.priority_rank,
            });
        }
        entries.sort_by_key(|e| (e.shift.display_index(), e.team_rank, e.priority_rank));
        Ok(entries)
    }

    pub fn person_status(&self, id: &PersonId, date: NaiveDate) -> Result<MemberStatus> {
        self.calendar.ensure_in_range(date)?;
        let person = self
            .directory
            .get_person(id)?
            .ok_or_else(|| RosterError::UnknownPerson(id.clone()))?;
        Ok(self.status_of(&person, date))
    }

    /// Team order for the month plus every member's duty state on `date`.
    pub fn team_status(&self, team: TeamId, date: NaiveDate) -> Result<TeamStatus> {
        self.calendar.ensure_in_range(date)?;
        if self.directory.get_team(team)?.is_none() {
            return Err(RosterError::UnknownTeam(team.to_string()));
        }
        let members = self.directory.list_by_teams(&[team])?;
        if members.is_empty() {
            return Err(RosterError::UnknownTeam(format!("{} has no members", team)));
        }

        Ok(TeamStatus {
            team,
            team_rank: team_rank(team, date.month())?,
            members: members.iter().map(|p| self.status_of(p, date)).collect(),
        })
    }

    /// Tracks resting on `date`. A plain calendar lookup, so any date is accepted.
    pub fn resting_tracks(&self, date: NaiveDate) -> Vec<LeaveTrack> {
        self.calendar.resting_tracks(date)
    }

    fn status_of(&self, person: &Person, date: NaiveDate) -> MemberStatus {
        let priority_rank = self.calendar.priority_rank(date, person.track);
        MemberStatus {
            person_id: person.id.clone(),
            name: person.name.clone(),
            rank: person.rank,
            track: person.track,
            on_duty: priority_rank > 0,
            priority_rank,
        }
    }
}
