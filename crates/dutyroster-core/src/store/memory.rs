use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{AssignmentStore, EmployeeDirectory, StoreError};
use crate::models::{DutyAssignment, Person, PersonId, Rank, ShiftName, Team, TeamId};

/// Everything a roster store holds. Shared by the in-memory and file-backed stores.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RosterData {
    #[serde(default)]
    pub people: Vec<Person>,
    #[serde(default)]
    pub assignments: Vec<DutyAssignment>,
}

impl RosterData {
    pub fn new(people: Vec<Person>) -> Self {
        Self {
            people,
            assignments: Vec::new(),
        }
    }

    pub fn person(&self, id: &PersonId) -> Option<&Person> {
        self.people.iter().find(|p| &p.id == id)
    }

    pub fn by_rank(&self, rank: Rank) -> Vec<Person> {
        self.people.iter().filter(|p| p.rank == rank).cloned().collect()
    }

    pub fn by_teams(&self, teams: &[TeamId]) -> Vec<Person> {
        let mut people: Vec<Person> = self
            .people
            .iter()
            .filter(|p| teams.contains(&p.team))
            .cloned()
            .collect();
        // Stable: keeps directory order within a team
        people.sort_by_key(|p| p.team);
        people
    }

    pub fn replace_people(&mut self, updated: &[Person]) -> Result<(), StoreError> {
        let mut positions = Vec::with_capacity(updated.len());
        for person in updated {
            let index = self
                .people
                .iter()
                .position(|p| p.id == person.id)
                .ok_or_else(|| StoreError::NotFound(format!("person {}", person.id)))?;
            positions.push(index);
        }
        for (index, person) in positions.into_iter().zip(updated) {
            self.people[index] = person.clone();
        }
        Ok(())
    }

    pub fn find(&self, shift: ShiftName, date: NaiveDate) -> Option<&DutyAssignment> {
        self.assignments
            .iter()
            .find(|a| a.shift == shift && a.date == date)
    }

    pub fn find_by_person(&self, person: &PersonId, date: NaiveDate) -> Option<&DutyAssignment> {
        self.assignments
            .iter()
            .find(|a| &a.person_id == person && a.date == date)
    }

    pub fn for_date(&self, date: NaiveDate) -> Vec<DutyAssignment> {
        self.assignments
            .iter()
            .filter(|a| a.date == date)
            .cloned()
            .collect()
    }

    pub fn insert_assignment(&mut self, assignment: &DutyAssignment) -> Result<(), StoreError> {
        if let Some(existing) = self.find(assignment.shift, assignment.date) {
            return Err(StoreError::Conflict(format!(
                "{} on {} already held by {}",
                assignment.shift, assignment.date, existing.person_id
            )));
        }
        if let Some(existing) = self.find_by_person(&assignment.person_id, assignment.date) {
            return Err(StoreError::Conflict(format!(
                "{} already holds {} on {}",
                assignment.person_id, existing.shift, assignment.date
            )));
        }
        self.assignments.push(assignment.clone());
        Ok(())
    }

    pub fn update_assignment(
        &mut self,
        previous: &PersonId,
        assignment: &DutyAssignment,
    ) -> Result<(), StoreError> {
        let index = self
            .assignments
            .iter()
            .position(|a| {
                a.shift == assignment.shift && a.date == assignment.date && &a.person_id == previous
            })
            .ok_or_else(|| {
                StoreError::NotFound(format!(
                    "{} on {} held by {}",
                    assignment.shift, assignment.date, previous
                ))
            })?;

        let clash = self.assignments.iter().enumerate().find(|(i, a)| {
            *i != index && a.date == assignment.date && a.person_id == assignment.person_id
        });
        if let Some((_, other)) = clash {
            return Err(StoreError::Conflict(format!(
                "{} already holds {} on {}",
                assignment.person_id, other.shift, assignment.date
            )));
        }

        self.assignments[index] = assignment.clone();
        Ok(())
    }
}

/// Thread-safe in-memory directory and assignment store.
#[derive(Debug, Default)]
pub struct MemoryRoster {
    data: RwLock<RosterData>,
}

impl MemoryRoster {
    pub fn new(people: Vec<Person>) -> Self {
        Self::with_data(RosterData::new(people))
    }

    pub fn with_data(data: RosterData) -> Self {
        Self {
            data: RwLock::new(data),
        }
    }

    /// Copy of the current contents.
    pub fn snapshot(&self) -> Result<RosterData, StoreError> {
        Ok(self.read()?.clone())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, RosterData>, StoreError> {
        self.data
            .read()
            .map_err(|_| StoreError::Unavailable("roster lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, RosterData>, StoreError> {
        self.data
            .write()
            .map_err(|_| StoreError::Unavailable("roster lock poisoned".to_string()))
    }
}

impl EmployeeDirectory for MemoryRoster {
    fn get_person(&self, id: &PersonId) -> Result<Option<Person>, StoreError> {
        Ok(self.read()?.person(id).cloned())
    }

    fn get_team(&self, id: TeamId) -> Result<Option<Team>, StoreError> {
        Ok(Team::from_id(id))
    }

    fn list_by_rank(&self, rank: Rank) -> Result<Vec<Person>, StoreError> {
        Ok(self.read()?.by_rank(rank))
    }

    fn list_by_teams(&self, teams: &[TeamId]) -> Result<Vec<Person>, StoreError> {
        Ok(self.read()?.by_teams(teams))
    }

    fn update_people(&self, people: &[Person]) -> Result<(), StoreError> {
        self.write()?.replace_people(people)
    }
}

impl AssignmentStore for MemoryRoster {
    fn find(&self, shift: ShiftName, date: NaiveDate) -> Result<Option<DutyAssignment>, StoreError> {
        Ok(self.read()?.find(shift, date).cloned())
    }

    fn find_by_person(
        &self,
        person: &PersonId,
        date: NaiveDate,
    ) -> Result<Option<DutyAssignment>, StoreError> {
        Ok(self.read()?.find_by_person(person, date).cloned())
    }

    fn list_for_date(&self, date: NaiveDate) -> Result<Vec<DutyAssignment>, StoreError> {
        Ok(self.read()?.for_date(date))
    }

    fn insert(&self, assignment: &DutyAssignment) -> Result<(), StoreError> {
        self.write()?.insert_assignment(assignment)
    }

    fn update(&self, previous: &PersonId, assignment: &DutyAssignment) -> Result<(), StoreError> {
        self.write()?.update_assignment(previous, assignment)
    }
}
