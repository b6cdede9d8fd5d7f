//! Validation and commit of single shift assignments.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use tracing::{debug, info};

use crate::error::{Result, RosterError};
use crate::locks::{poisoned, DateLocks};
use crate::models::{DutyAssignment, Person, PersonId, ShiftCatalog, ShiftName};
use crate::rotation::RotationCalendar;
use crate::store::{AssignmentStore, EmployeeDirectory};
use crate::team_order::team_rank;

pub struct AssignmentValidator {
    directory: Arc<dyn EmployeeDirectory>,
    store: Arc<dyn AssignmentStore>,
    calendar: RotationCalendar,
    catalog: ShiftCatalog,
    locks: Arc<DateLocks>,
}

impl AssignmentValidator {
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
            catalog: ShiftCatalog,
            locks,
        }
    }

    /// Assign `person_id` to an unfilled `shift` on `date`.
    ///
    /// Checks run in order and the first failure is returned:
    /// shift already filled, unknown person, wrong rank, off duty, double booked.
    pub fn propose_assignment(
        &self,
        shift: ShiftName,
        person_id: &PersonId,
        date: NaiveDate,
    ) -> Result<DutyAssignment> {
        self.calendar.ensure_in_range(date)?;
        let lock = self.locks.for_date(date)?;
        let _guard = lock.write().map_err(|_| poisoned(date))?;

        if let Some(existing) = self.store.find(shift, date)? {
            debug!(%shift, %date, holder = %existing.person_id, "Shift already filled");
            return Err(RosterError::AlreadyAssigned {
                shift,
                date,
                person: existing.person_id,
            });
        }

        let person = self.eligible_person(shift, person_id, date, None)?;
        let assignment = self.build_assignment(shift, &person, date)?;
        self.store.insert(&assignment)?;

        info!(
            %shift,
            %date,
            person = %person.id,
            team_rank = assignment.team_rank,
            priority_rank = assignment.priority_rank,
            "Assigned shift"
        );
        Ok(assignment)
    }

    /// Hand `shift` on `date` from `old_person_id` to `new_person_id`, re-validating
    /// the new holder and recomputing both ranks.
    pub fn replace_assignment(
        &self,
        shift: ShiftName,
        old_person_id: &PersonId,
        new_person_id: &PersonId,
        date: NaiveDate,
    ) -> Result<DutyAssignment> {
        self.calendar.ensure_in_range(date)?;
        let lock = self.locks.for_date(date)?;
        let _guard = lock.write().map_err(|_| poisoned(date))?;

        let current = self
            .store
            .find(shift, date)?
            .ok_or(RosterError::NotAssigned { shift, date })?;
        if &current.person_id != old_person_id {
            return Err(RosterError::AssignmentMismatch {
                shift,
                date,
                expected: old_person_id.clone(),
                actual: current.person_id,
            });
        }

        let person = self.eligible_person(shift, new_person_id, date, Some(&current))?;
        let assignment = self.build_assignment(shift, &person, date)?;
        self.store.update(old_person_id, &assignment)?;

        info!(
            %shift,
            %date,
            old = %old_person_id,
            new = %person.id,
            team_rank = assignment.team_rank,
            priority_rank = assignment.priority_rank,
            "Replaced shift holder"
        );
        Ok(assignment)
    }

    /// Person, rank, duty-day and double-booking checks. `replacing` is the
    /// assignment being overwritten, which does not count as a second booking.
    fn eligible_person(
        &self,
        shift: ShiftName,
        person_id: &PersonId,
        date: NaiveDate,
        replacing: Option<&DutyAssignment>,
    ) -> Result<Person> {
        let person = self
            .directory
            .get_person(person_id)?
            .ok_or_else(|| RosterError::UnknownPerson(person_id.clone()))?;

        let required = self.catalog.required_rank(shift);
        if person.rank != required {
            debug!(%shift, person = %person.id, rank = %person.rank, "Rank mismatch");
            return Err(RosterError::RankMismatch {
                shift,
                person: person.id,
                required,
                actual: person.rank,
            });
        }

        if !self.calendar.is_on_duty(date, person.track) {
            debug!(%date, person = %person.id, track = %person.track, "Person is on rest");
            return Err(RosterError::OffDuty {
                person: person.id,
                date,
                track: person.track,
            });
        }

        if let Some(existing) = self.store.find_by_person(&person.id, date)? {
            let is_replaced = replacing.is_some_and(|r| r.shift == existing.shift);
            if !is_replaced {
                debug!(%date, person = %person.id, holds = %existing.shift, "Double booking");
                return Err(RosterError::DoubleBooked {
                    person: person.id,
                    date,
                    shift: existing.shift,
                });
            }
        }

        Ok(person)
    }

    fn build_assignment(&self, shift: ShiftName, person: &Person, date: NaiveDate) -> Result<DutyAssignment> {
        Ok(DutyAssignment {
            shift,
            date,
            person_id: person.id.clone(),
            priority_rank: self.calendar.priority_rank(date, person.track),
            team_rank: team_rank(person.team, date.month())?,
        })
    }
}
