use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::memory::RosterData;
use super::{AssignmentStore, EmployeeDirectory, StoreError};
use crate::models::{DutyAssignment, Person, PersonId, Rank, ShiftName, Team, TeamId};

/// Persisted roster state and the time it was written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot<T> {
    pub data: T,
    pub saved_at: DateTime<Utc>,
}

impl<T> Snapshot<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            saved_at: Utc::now(),
        }
    }
}

/// Directory and assignment store persisted as a single JSON snapshot.
///
/// The snapshot is held in memory. Every write is applied to a copy, written to
/// a sibling temp file and renamed over the original; the in-memory state only
/// changes once the rename succeeded.
pub struct JsonRosterStore {
    path: PathBuf,
    state: RwLock<Snapshot<RosterData>>,
}

impl JsonRosterStore {
    /// Open an existing snapshot, or start empty if the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let snapshot = match Self::load(&path)? {
            Some(snapshot) => snapshot,
            None => {
                debug!(path = %path.display(), "No roster snapshot found, starting empty");
                Snapshot::new(RosterData::default())
            }
        };
        Ok(Self {
            path,
            state: RwLock::new(snapshot),
        })
    }

    /// Create (or overwrite) a snapshot seeded with `people`.
    pub fn create(path: impl Into<PathBuf>, people: Vec<Person>) -> Result<Self, StoreError> {
        let store = Self {
            path: path.into(),
            state: RwLock::new(Snapshot::new(RosterData::new(people))),
        };
        store.persist(&*store.read()?)?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> Result<Option<Snapshot<RosterData>>, StoreError> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(path)?;
        let snapshot: Snapshot<RosterData> = serde_json::from_str(&contents)?;
        debug!(
            path = %path.display(),
            people = snapshot.data.people.len(),
            assignments = snapshot.data.assignments.len(),
            "Loaded roster snapshot"
        );
        Ok(Some(snapshot))
    }

    fn persist(&self, snapshot: &Snapshot<RosterData>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let contents = serde_json::to_string_pretty(snapshot)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, contents)?;
        if let Err(e) = std::fs::rename(&tmp, &self.path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }

    fn mutate(&self, apply: impl FnOnce(&mut RosterData) -> Result<(), StoreError>) -> Result<(), StoreError> {
        let mut state = self.write()?;
        let mut next = state.data.clone();
        apply(&mut next)?;
        let snapshot = Snapshot::new(next);
        self.persist(&snapshot)?;
        *state = snapshot;
        Ok(())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Snapshot<RosterData>>, StoreError> {
        self.state
            .read()
            .map_err(|_| StoreError::Unavailable("snapshot lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Snapshot<RosterData>>, StoreError> {
        self.state
            .write()
            .map_err(|_| StoreError::Unavailable("snapshot lock poisoned".to_string()))
    }
}

impl EmployeeDirectory for JsonRosterStore {
    fn get_person(&self, id: &PersonId) -> Result<Option<Person>, StoreError> {
        Ok(self.read()?.data.person(id).cloned())
    }

    fn get_team(&self, id: TeamId) -> Result<Option<Team>, StoreError> {
        Ok(Team::from_id(id))
    }

    fn list_by_rank(&self, rank: Rank) -> Result<Vec<Person>, StoreError> {
        Ok(self.read()?.data.by_rank(rank))
    }

    fn list_by_teams(&self, teams: &[TeamId]) -> Result<Vec<Person>, StoreError> {
        Ok(self.read()?.data.by_teams(teams))
    }

    fn update_people(&self, people: &[Person]) -> Result<(), StoreError> {
        self.mutate(|data| data.replace_people(people))
    }
}

impl AssignmentStore for JsonRosterStore {
    fn find(&self, shift: ShiftName, date: NaiveDate) -> Result<Option<DutyAssignment>, StoreError> {
        Ok(self.read()?.data.find(shift, date).cloned())
    }

    fn find_by_person(
        &self,
        person: &PersonId,
        date: NaiveDate,
    ) -> Result<Option<DutyAssignment>, StoreError> {
        Ok(self.read()?.data.find_by_person(person, date).cloned())
    }

    fn list_for_date(&self, date: NaiveDate) -> Result<Vec<DutyAssignment>, StoreError> {
        Ok(self.read()?.data.for_date(date))
    }

    fn insert(&self, assignment: &DutyAssignment) -> Result<(), StoreError> {
        self.mutate(|data| data.insert_assignment(assignment))
    }

    fn update(&self, previous: &PersonId, assignment: &DutyAssignment) -> Result<(), StoreError> {
        self.mutate(|data| data.update_assignment(previous, assignment))
    }
}
