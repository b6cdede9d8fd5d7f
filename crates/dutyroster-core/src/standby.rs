//! Standby groups: everyone on duty but not on a named shift, packed into
//! groups of one team lead and nine line officers.
//!
//! Candidates are ordered by day order, then team order, then team number.
//! Special teams follow the regular teams, ordered by team order alone.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use tracing::{debug, info};

use crate::error::{Result, RosterError};
use crate::locks::{poisoned, DateLocks};
use crate::models::{
    Person, PersonId, StandbyGroup, StandbyMember, TeamId, REGULAR_TEAMS, SPECIAL_TEAMS,
};
use crate::rotation::RotationCalendar;
use crate::store::{AssignmentStore, EmployeeDirectory};
use crate::team_order::team_rank;

pub const DEFAULT_GROUP_SIZE: usize = 9;

pub struct StandbyGroupBuilder {
    directory: Arc<dyn EmployeeDirectory>,
    store: Arc<dyn AssignmentStore>,
    calendar: RotationCalendar,
    locks: Arc<DateLocks>,
    group_size: usize,
}

#[derive(Debug, Default)]
struct Candidates {
    leads: Vec<StandbyMember>,
    officers: Vec<StandbyMember>,
}

impl Candidates {
    fn push(&mut self, person: &Person, priority_rank: u8, team_rank: u8) {
        let member = StandbyMember::new(person, priority_rank, team_rank);
        if person.is_team_lead() {
            self.leads.push(member);
        } else if person.is_line_officer() {
            self.officers.push(member);
        }
    }
}

impl StandbyGroupBuilder {
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
            group_size: DEFAULT_GROUP_SIZE,
        }
    }

    /// Officers per full group. Values below 1 are treated as 1.
    pub fn with_group_size(mut self, group_size: usize) -> Self {
        self.group_size = group_size.max(1);
        self
    }

    pub fn build_groups(&self, date: NaiveDate) -> Result<Vec<StandbyGroup>> {
        self.calendar.ensure_in_range(date)?;
        let lock = self.locks.for_date(date)?;
        let _guard = lock.read().map_err(|_| poisoned(date))?;

        let assigned: HashSet<PersonId> = self
            .store
            .list_for_date(date)?
            .into_iter()
            .map(|a| a.person_id)
            .collect();

        let candidates = self.collect_candidates(date, &assigned)?;
        debug!(
            %date,
            assigned = assigned.len(),
            leads = candidates.leads.len(),
            officers = candidates.officers.len(),
            "Collected standby candidates"
        );

        let groups = pack_groups(candidates.leads, candidates.officers, self.group_size);
        info!(%date, groups = groups.len(), "Built standby groups");
        Ok(groups)
    }

    fn collect_candidates(&self, date: NaiveDate, assigned: &HashSet<PersonId>) -> Result<Candidates> {
        let month = date.month();
        let mut candidates = Candidates::default();

        // Regular teams: sort by (day order, team order). The sort is stable, so
        // people sharing a key stay in team order.
        let mut regular = Vec::new();
        for person in self.available(&REGULAR_TEAMS, date, assigned)? {
            let priority = self.calendar.priority_rank(date, person.track);
            let team = rank_for(&person, month)?;
            regular.push((person, priority, team));
        }
        regular.sort_by_key(|(_, priority, team)| (*priority, *team));
        for (person, priority, team) in &regular {
            candidates.push(person, *priority, *team);
        }

        // Special teams: team order only, no day order.
        let mut special = Vec::new();
        for person in self.available(&SPECIAL_TEAMS, date, assigned)? {
            let team = rank_for(&person, month)?;
            special.push((person, team));
        }
        special.sort_by_key(|(_, team)| *team);
        for (person, team) in &special {
            candidates.push(person, 0, *team);
        }

        Ok(candidates)
    }

    /// Leads and officers on `teams` who are on duty and hold no shift, in team order.
    fn available(
        &self,
        teams: &[TeamId],
        date: NaiveDate,
        assigned: &HashSet<PersonId>,
    ) -> Result<Vec<Person>> {
        let mut people: Vec<Person> = self
            .directory
            .list_by_teams(teams)?
            .into_iter()
            .filter(|p| p.is_team_lead() || p.is_line_officer())
            .filter(|p| !assigned.contains(&p.id))
            .filter(|p| self.calendar.is_on_duty(date, p.track))
            .collect();
        people.sort_by_key(|p| p.team);
        Ok(people)
    }
}

fn rank_for(person: &Person, month: u32) -> Result<u8> {
    team_rank(person.team, month).map_err(|e| {
        RosterError::Computation(format!("no team order for {} on team {}: {}", person.id, person.team, e))
    })
}

/// Pack candidates into groups of one lead and `group_size` officers, in list
/// order, then put whoever is left into a single tail group.
pub fn pack_groups(
    leads: Vec<StandbyMember>,
    officers: Vec<StandbyMember>,
    group_size: usize,
) -> Vec<StandbyGroup> {
    let group_size = group_size.max(1);
    let mut leads = leads.into_iter();
    let mut officers = officers.into_iter();
    let mut groups = Vec::new();

    while officers.len() >= group_size {
        let Some(lead) = leads.next() else { break };
        groups.push(StandbyGroup {
            number: groups.len() + 1,
            leads: vec![lead],
            officers: officers.by_ref().take(group_size).collect(),
            is_tail: false,
        });
    }

    let remaining_leads: Vec<StandbyMember> = leads.collect();
    let remaining_officers: Vec<StandbyMember> = officers.collect();
    if !remaining_leads.is_empty() || !remaining_officers.is_empty() {
        groups.push(StandbyGroup {
            number: groups.len() + 1,
            leads: remaining_leads,
            officers: remaining_officers,
            is_tail: true,
        });
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{date, epoch_saturday, id, sample_people, sample_roster};
    use crate::models::{DutyAssignment, LeaveTrack, Rank, ShiftName, Team};
    use crate::store::{MemoryRoster, StoreError};

    fn builder(roster: &Arc<MemoryRoster>) -> StandbyGroupBuilder {
        StandbyGroupBuilder::new(
            roster.clone(),
            roster.clone(),
            RotationCalendar::default(),
            Arc::new(DateLocks::new()),
        )
    }

    fn ids(members: &[StandbyMember]) -> Vec<String> {
        members.iter().map(|m| m.person_id.to_string()).collect()
    }

    fn assign(roster: &MemoryRoster, shift: ShiftName, person: &str) {
        roster
            .insert(&DutyAssignment {
                shift,
                date: epoch_saturday(),
                person_id: id(person),
                priority_rank: 1,
                team_rank: 1,
            })
            .unwrap();
    }

    #[test]
    fn test_sample_day_groups() {
        let roster = sample_roster();
        let groups = builder(&roster).build_groups(epoch_saturday()).unwrap();

        assert_eq!(groups.len(), 5);
        assert_eq!(groups.iter().map(|g| g.number).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);

        let first = &groups[0];
        assert_eq!(first.lead().unwrap().person_id, id("L1"));
        assert_eq!(
            ids(&first.officers),
            vec!["O3-1", "O3-2", "O6-1", "O6-2", "O9-1", "O9-2", "O1-1", "O1-2", "O4-1"]
        );

        let leads: Vec<String> = groups[..4]
            .iter()
            .map(|g| g.lead().unwrap().person_id.to_string())
            .collect();
        assert_eq!(leads, vec!["L1", "L4", "L7", "L3"]);

        // 789 officers are day order 2 and come after every 123 officer
        assert_eq!(groups[2].officers[0].person_id, id("O3-5"));
        assert!(groups[2].officers.iter().all(|m| m.priority_rank == 2));

        let tail = &groups[4];
        assert!(tail.is_tail);
        assert_eq!(ids(&tail.leads), vec!["L6", "L9", "L11", "L13", "L14"]);
        assert_eq!(
            ids(&tail.officers),
            vec!["O11-1", "O11-2", "O13-1", "O13-2", "O14-1", "O14-2"]
        );
        assert!(tail.members().filter(|m| m.team.get() > 9).all(|m| m.priority_rank == 0));
    }

    #[test]
    fn test_wednesday_rest_phase_members_queue_last() {
        // Sunday epoch: track 123 is on rest phase 10 on Wednesday 2024-01-17
        let roster = sample_roster();
        let builder = StandbyGroupBuilder::new(
            roster.clone(),
            roster.clone(),
            RotationCalendar::new(date(2024, 1, 7)),
            Arc::new(DateLocks::new()),
        );
        let groups = builder.build_groups(date(2024, 1, 17)).unwrap();

        let regular: Vec<&StandbyMember> = groups
            .iter()
            .flat_map(|g| g.officers.iter())
            .filter(|m| m.team.get() <= 9)
            .collect();
        assert_eq!(regular.len(), 54);
        assert_eq!((regular[0].track, regular[0].priority_rank), (LeaveTrack::Track789, 1));
        assert!(regular.windows(2).all(|w| w[0].priority_rank <= w[1].priority_rank));

        let (earlier, overridden) = regular.split_at(36);
        assert!(earlier.iter().all(|m| m.priority_rank < 3));
        assert!(overridden
            .iter()
            .all(|m| m.track == LeaveTrack::Track123 && m.priority_rank == 3));
        assert_eq!(overridden[17].person_id, id("O8-2"));

        assert_eq!(groups[0].lead().unwrap().person_id, id("L3"));
    }

    #[test]
    fn test_full_groups_have_one_lead_and_nine_officers() {
        let roster = sample_roster();
        let groups = builder(&roster).build_groups(epoch_saturday()).unwrap();
        for group in groups.iter().filter(|g| !g.is_tail) {
            assert_eq!(group.leads.len(), 1);
            assert_eq!(group.officers.len(), 9);
        }
        assert_eq!(groups.iter().filter(|g| g.is_tail).count(), 1);
        assert!(groups.last().unwrap().is_tail);
    }

    #[test]
    fn test_nobody_appears_twice_and_only_eligible_people_appear() {
        let roster = sample_roster();
        let groups = builder(&roster).build_groups(epoch_saturday()).unwrap();

        let mut seen = HashSet::new();
        for member in groups.iter().flat_map(|g| g.members()) {
            assert!(seen.insert(member.person_id.clone()), "{} listed twice", member.person_id);
            assert_ne!(member.track, LeaveTrack::Track456);
        }
        assert!(!seen.contains(&id("D1")));

        let expected = sample_people()
            .into_iter()
            .filter(|p| p.rank != Rank::DeputyCommander && p.track != LeaveTrack::Track456)
            .count();
        assert_eq!(seen.len(), expected);
    }

    #[test]
    fn test_assigned_people_are_excluded() {
        let roster = sample_roster();
        assign(&roster, ShiftName::A, "O3-1");
        assign(&roster, ShiftName::DayDutyOfficer, "L1");

        let groups = builder(&roster).build_groups(epoch_saturday()).unwrap();
        let first = &groups[0];
        assert_eq!(first.lead().unwrap().person_id, id("L4"));
        assert_eq!(first.officers[0].person_id, id("O3-2"));
        assert!(groups
            .iter()
            .flat_map(|g| g.members())
            .all(|m| m.person_id != id("O3-1") && m.person_id != id("L1")));

        // 41 officers: four full groups and five left for the tail
        assert_eq!(groups.len(), 5);
        assert_eq!(groups[4].officers.len(), 5);
    }

    #[test]
    fn test_empty_day_has_no_groups() {
        let roster = Arc::new(MemoryRoster::default());
        assert!(builder(&roster).build_groups(epoch_saturday()).unwrap().is_empty());
    }

    #[test]
    fn test_custom_group_size() {
        let roster = sample_roster();
        let groups = builder(&roster).with_group_size(4).build_groups(epoch_saturday()).unwrap();
        // Nine leads, 42 officers: nine groups of four, six officers left over
        assert_eq!(groups.len(), 10);
        assert!(groups[..9].iter().all(|g| g.officers.len() == 4 && !g.is_tail));
        assert!(groups[9].leads.is_empty());
        assert_eq!(groups[9].officers.len(), 6);
    }

    #[test]
    fn test_pack_groups_edges() {
        let member = |n: usize| StandbyMember {
            person_id: PersonId::new(format!("P{}", n)),
            name: format!("P{}", n),
            team: TeamId::new(1),
            track: LeaveTrack::Track123,
            team_rank: 1,
            priority_rank: 1,
        };
        let make = |range: std::ops::Range<usize>| range.map(member).collect::<Vec<_>>();

        assert!(pack_groups(Vec::new(), Vec::new(), 9).is_empty());

        let exact = pack_groups(make(0..3), make(100..127), 9);
        assert_eq!(exact.len(), 3);
        assert!(exact.iter().all(|g| !g.is_tail));

        let no_leads = pack_groups(Vec::new(), make(100..105), 9);
        assert_eq!(no_leads.len(), 1);
        assert!(no_leads[0].is_tail && no_leads[0].leads.is_empty());

        let short = pack_groups(make(0..1), make(100..120), 9);
        assert_eq!(short.len(), 2);
        assert_eq!(short[1].officers.len(), 11);
        assert!(short[1].leads.is_empty());

        let leads_only = pack_groups(make(0..2), Vec::new(), 9);
        assert_eq!(leads_only.len(), 1);
        assert_eq!(leads_only[0].leads.len(), 2);
    }

    struct BrokenDirectory;

    impl EmployeeDirectory for BrokenDirectory {
        fn get_person(&self, _id: &PersonId) -> std::result::Result<Option<Person>, StoreError> {
            Ok(None)
        }

        fn get_team(&self, id: TeamId) -> std::result::Result<Option<Team>, StoreError> {
            Ok(Team::from_id(id))
        }

        fn list_by_rank(&self, _rank: Rank) -> std::result::Result<Vec<Person>, StoreError> {
            Ok(Vec::new())
        }

        fn list_by_teams(&self, _teams: &[TeamId]) -> std::result::Result<Vec<Person>, StoreError> {
            // Ignores the filter and hands back a person on a disbanded team
            Ok(vec![Person::new("X1", "Ghost", Rank::LineOfficer, TeamId::new(10), LeaveTrack::Track123)])
        }

        fn update_people(&self, _people: &[Person]) -> std::result::Result<(), StoreError> {
            Err(StoreError::Unavailable("read only".to_string()))
        }
    }

    #[test]
    fn test_inconsistent_directory_is_a_computation_error() {
        let builder = StandbyGroupBuilder::new(
            Arc::new(BrokenDirectory),
            Arc::new(MemoryRoster::default()),
            RotationCalendar::default(),
            Arc::new(DateLocks::new()),
        );
        let result = builder.build_groups(epoch_saturday());
        assert!(matches!(result, Err(RosterError::Computation(_))));
    }
}
