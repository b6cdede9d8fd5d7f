//! Entry point tying the calendar, the stores and the per-date locks together.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use crate::admin::RosterAdmin;
use crate::assign::AssignmentValidator;
use crate::config::RosterConfig;
use crate::error::Result;
use crate::locks::DateLocks;
use crate::models::{DutyAssignment, PersonId, ShiftName, StandbyGroup};
use crate::rotation::RotationCalendar;
use crate::standby::{StandbyGroupBuilder, DEFAULT_GROUP_SIZE};
use crate::store::{AssignmentStore, EmployeeDirectory, JsonRosterStore};
use crate::views::RosterViews;

/// A duty roster over one directory and one assignment store.
///
/// Every component handed out shares the same lock table, so an assignment
/// made through [`DutyRoster::validator`] is never seen half-done by
/// [`DutyRoster::standby`] or [`DutyRoster::views`].
pub struct DutyRoster {
    directory: Arc<dyn EmployeeDirectory>,
    store: Arc<dyn AssignmentStore>,
    calendar: RotationCalendar,
    group_size: usize,
    locks: Arc<DateLocks>,
}

impl DutyRoster {
    pub fn new(
        directory: Arc<dyn EmployeeDirectory>,
        store: Arc<dyn AssignmentStore>,
        calendar: RotationCalendar,
    ) -> Self {
        Self {
            directory,
            store,
            calendar,
            group_size: DEFAULT_GROUP_SIZE,
            locks: Arc::new(DateLocks::new()),
        }
    }

    /// Use one backend for both people and assignments.
    pub fn with_backend<B>(backend: Arc<B>, calendar: RotationCalendar) -> Self
    where
        B: EmployeeDirectory + AssignmentStore + 'static,
    {
        Self::new(backend.clone(), backend, calendar)
    }

    /// Open the JSON data file named by `config`.
    pub fn from_config(config: &RosterConfig) -> anyhow::Result<Self> {
        let path = config.data_path()?;
        debug!(path = %path.display(), "Opening roster data");
        let store = Arc::new(JsonRosterStore::open(path)?);
        Ok(Self::with_backend(store, config.calendar()).with_group_size(config.standby_group_size))
    }

    pub fn with_group_size(mut self, group_size: usize) -> Self {
        self.group_size = group_size;
        self
    }

    pub fn calendar(&self) -> &RotationCalendar {
        &self.calendar
    }

    pub fn validator(&self) -> AssignmentValidator {
        AssignmentValidator::new(
            self.directory.clone(),
            self.store.clone(),
            self.calendar,
            self.locks.clone(),
        )
    }

    pub fn standby(&self) -> StandbyGroupBuilder {
        StandbyGroupBuilder::new(
            self.directory.clone(),
            self.store.clone(),
            self.calendar,
            self.locks.clone(),
        )
        .with_group_size(self.group_size)
    }

    pub fn views(&self) -> RosterViews {
        RosterViews::new(
            self.directory.clone(),
            self.store.clone(),
            self.calendar,
            self.locks.clone(),
        )
    }

    pub fn admin(&self) -> RosterAdmin {
        RosterAdmin::new(self.directory.clone())
    }

    pub fn propose_assignment(
        &self,
        shift: ShiftName,
        person_id: &PersonId,
        date: NaiveDate,
    ) -> Result<DutyAssignment> {
        self.validator().propose_assignment(shift, person_id, date)
    }

    pub fn replace_assignment(
        &self,
        shift: ShiftName,
        old_person_id: &PersonId,
        new_person_id: &PersonId,
        date: NaiveDate,
    ) -> Result<DutyAssignment> {
        self.validator()
            .replace_assignment(shift, old_person_id, new_person_id, date)
    }

    pub fn build_groups(&self, date: NaiveDate) -> Result<Vec<StandbyGroup>> {
        self.standby().build_groups(date)
    }
}
