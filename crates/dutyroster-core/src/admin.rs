//! Team membership and leave-track administration.
//!
//! A team's member order is seniority first, then leave track, then id. Track
//! changes are written back through [`EmployeeDirectory::update_people`] in a
//! single batch, so a failed check leaves every member untouched.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::info;

use crate::error::{Result, RosterError};
use crate::models::{LeaveTrack, Person, PersonId, TeamId};
use crate::store::EmployeeDirectory;

pub struct RosterAdmin {
    directory: Arc<dyn EmployeeDirectory>,
}

impl RosterAdmin {
    pub fn new(directory: Arc<dyn EmployeeDirectory>) -> Self {
        Self { directory }
    }

    /// Members of `team` in display order. Fails with `UnknownTeam` when the
    /// team is unrecognized or has nobody in it.
    pub fn team_members(&self, team: TeamId) -> Result<Vec<Person>> {
        self.ensure_team(team)?;
        let mut members = self.directory.list_by_teams(&[team])?;
        if members.is_empty() {
            return Err(RosterError::UnknownTeam(format!("{} has no members", team)));
        }
        members.sort_by(|a, b| {
            b.rank
                .seniority()
                .cmp(&a.rank.seniority())
                .then(a.track.cmp(&b.track))
                .then(a.id.cmp(&b.id))
        });
        Ok(members)
    }

    /// Move a person to another team and/or leave track.
    pub fn update_member(
        &self,
        id: &PersonId,
        team: Option<TeamId>,
        track: Option<LeaveTrack>,
    ) -> Result<Person> {
        if team.is_none() && track.is_none() {
            return Err(RosterError::NothingToUpdate);
        }
        let mut person = self
            .directory
            .get_person(id)?
            .ok_or_else(|| RosterError::UnknownPerson(id.clone()))?;

        if let Some(team) = team {
            self.ensure_team(team)?;
            person.team = team;
        }
        if let Some(track) = track {
            person.track = track;
        }

        self.directory.update_people(std::slice::from_ref(&person))?;
        info!(person = %person.id, team = %person.team, track = %person.track, "Member updated");
        Ok(person)
    }

    /// Set the leave track of several members of one team at once.
    pub fn bulk_update_tracks(
        &self,
        team: TeamId,
        changes: &[(PersonId, LeaveTrack)],
    ) -> Result<Vec<Person>> {
        if changes.is_empty() {
            return Err(RosterError::NothingToUpdate);
        }
        let members = self.team_members(team)?;

        let mut updated = Vec::with_capacity(changes.len());
        for (id, track) in changes {
            let mut person = member_of(&members, id, team)?.clone();
            person.track = *track;
            updated.push(person);
        }

        self.directory.update_people(&updated)?;
        info!(team = %team, count = updated.len(), "Leave tracks updated");
        Ok(updated)
    }

    /// Exchange the leave tracks of two members of the same team.
    pub fn swap_tracks(&self, team: TeamId, a: &PersonId, b: &PersonId) -> Result<(Person, Person)> {
        let members = self.team_members(team)?;
        let mut first = member_of(&members, a, team)?.clone();
        let mut second = member_of(&members, b, team)?.clone();

        std::mem::swap(&mut first.track, &mut second.track);
        self.directory
            .update_people(&[first.clone(), second.clone()])?;
        info!(team = %team, a = %first.id, b = %second.id, "Leave tracks swapped");
        Ok((first, second))
    }

    /// Move members to new 1-based positions and re-derive every member's
    /// leave track from the resulting order.
    ///
    /// Moved members land exactly on their requested positions; everyone else
    /// keeps their relative order and fills the remaining positions.
    pub fn reorder_members(
        &self,
        team: TeamId,
        changes: &[(PersonId, usize)],
    ) -> Result<Vec<Person>> {
        if changes.is_empty() {
            return Err(RosterError::NothingToUpdate);
        }
        let members = self.team_members(team)?;
        let size = members.len();

        let mut requested: HashMap<&PersonId, usize> = HashMap::new();
        let mut taken = HashSet::new();
        for (id, position) in changes {
            member_of(&members, id, team)?;
            if *position == 0 || *position > size || !taken.insert(*position) {
                return Err(RosterError::InvalidPosition {
                    position: *position,
                    size,
                });
            }
            if requested.insert(id, position - 1).is_some() {
                return Err(RosterError::InvalidPosition {
                    position: *position,
                    size,
                });
            }
        }

        let slots = assign_slots(&members, &requested);
        let mut ordered: Vec<(usize, Person)> = slots.into_iter().zip(members).collect();
        ordered.sort_by_key(|(slot, _)| *slot);

        let reordered: Vec<Person> = ordered
            .into_iter()
            .enumerate()
            .map(|(index, (_, mut person))| {
                person.track = LeaveTrack::for_position(index);
                person
            })
            .collect();

        self.directory.update_people(&reordered)?;
        info!(team = %team, moved = changes.len(), "Team reordered");
        Ok(reordered)
    }

    fn ensure_team(&self, team: TeamId) -> Result<()> {
        match self.directory.get_team(team)? {
            Some(_) => Ok(()),
            None => Err(RosterError::UnknownTeam(team.to_string())),
        }
    }
}

fn member_of<'a>(members: &'a [Person], id: &PersonId, team: TeamId) -> Result<&'a Person> {
    members
        .iter()
        .find(|p| &p.id == id)
        .ok_or_else(|| RosterError::NotInTeam {
            person: id.clone(),
            team,
        })
}

/// Target slot for each member, index-aligned with `members`.
fn assign_slots(members: &[Person], requested: &HashMap<&PersonId, usize>) -> Vec<usize> {
    let occupied: HashSet<usize> = requested.values().copied().collect();
    let mut free = (0..members.len()).filter(|slot| !occupied.contains(slot));

    members
        .iter()
        .map(|person| match requested.get(&person.id) {
            Some(slot) => *slot,
            // One free slot exists per unmoved member
            None => free.next().unwrap_or(members.len()),
        })
        .collect()
}
