//! The 21-day leave rotation.
//!
//! Every track follows the same cycle, shifted by its offset:
//!
//! | phase  | state    |
//! |--------|----------|
//! | 0-6    | on duty  |
//! | 7-10   | rest     |
//! | 11-18  | on duty  |
//! | 19-20  | rest     |
//!
//! Wednesdays are on duty for every track regardless of phase.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{Result, RosterError};
use crate::models::LeaveTrack;

pub const CYCLE_LENGTH: i64 = 21;

/// Day order across the first on-duty segment (phases 0-6).
const FIRST_SEGMENT_ORDERS: [u8; 7] = [1, 2, 2, 1, 2, 1, 2];

/// Day order across the second on-duty segment (phases 11-18).
const SECOND_SEGMENT_ORDERS: [u8; 8] = [1, 2, 1, 2, 1, 1, 2, 3];

const SECOND_SEGMENT_START: u8 = 11;

/// Day order for a track pulled in on a Wednesday that falls on a rest phase.
/// Such members queue behind everyone on a regular duty day.
pub const WEDNESDAY_OVERRIDE_RANK: u8 = 3;

/// Saturday 2024-01-06, phase 0 of track 123.
pub fn default_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 6).expect("2024-01-06 is a valid date")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DutyState {
    /// Regular duty day of the cycle.
    Working { rank: u8 },
    /// Rest phase overridden because the date is a Wednesday.
    WednesdayOverride,
    Resting,
}

impl DutyState {
    pub fn is_on_duty(&self) -> bool {
        !matches!(self, DutyState::Resting)
    }

    pub fn priority_rank(&self) -> u8 {
        match self {
            DutyState::Working { rank } => *rank,
            DutyState::WednesdayOverride => WEDNESDAY_OVERRIDE_RANK,
            DutyState::Resting => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationCalendar {
    epoch: NaiveDate,
}

impl Default for RotationCalendar {
    fn default() -> Self {
        Self::new(default_epoch())
    }
}

impl RotationCalendar {
    pub fn new(epoch: NaiveDate) -> Self {
        Self { epoch }
    }

    pub fn epoch(&self) -> NaiveDate {
        self.epoch
    }

    /// Position of `date` within the track's 21-day cycle.
    pub fn phase(&self, date: NaiveDate, track: LeaveTrack) -> u8 {
        let days = (date - self.epoch).num_days();
        (days - track.offset()).rem_euclid(CYCLE_LENGTH) as u8
    }

    pub fn duty_state(&self, date: NaiveDate, track: LeaveTrack) -> DutyState {
        match cycle_rank(self.phase(date, track)) {
            Some(rank) => DutyState::Working { rank },
            None if date.weekday() == Weekday::Wed => DutyState::WednesdayOverride,
            None => DutyState::Resting,
        }
    }

    pub fn is_on_duty(&self, date: NaiveDate, track: LeaveTrack) -> bool {
        self.duty_state(date, track).is_on_duty()
    }

    /// Day order 1-3 for an on-duty track, 0 when resting.
    pub fn priority_rank(&self, date: NaiveDate, track: LeaveTrack) -> u8 {
        self.duty_state(date, track).priority_rank()
    }

    /// Day order of every track on `date`.
    pub fn day_orders(&self, date: NaiveDate) -> [(LeaveTrack, u8); 3] {
        LeaveTrack::ALL.map(|track| (track, self.priority_rank(date, track)))
    }

    /// Tracks on rest for `date`. Always empty on a Wednesday.
    pub fn resting_tracks(&self, date: NaiveDate) -> Vec<LeaveTrack> {
        LeaveTrack::ALL
            .into_iter()
            .filter(|track| !self.is_on_duty(date, *track))
            .collect()
    }

    /// Rejects dates before the rotation started.
    pub fn ensure_in_range(&self, date: NaiveDate) -> Result<()> {
        if date < self.epoch {
            return Err(RosterError::InvalidDate(format!(
                "{} is before the rotation epoch {}",
                date, self.epoch
            )));
        }
        Ok(())
    }
}

/// Day order from the cycle tables, `None` on a rest phase.
fn cycle_rank(phase: u8) -> Option<u8> {
    match phase {
        0..=6 => Some(FIRST_SEGMENT_ORDERS[phase as usize]),
        11..=18 => Some(SECOND_SEGMENT_ORDERS[(phase - SECOND_SEGMENT_START) as usize]),
        _ => None,
    }
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|e| RosterError::InvalidDate(format!("{}: {}", input, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_epoch_day_track_123() {
        let calendar = RotationCalendar::default();
        let day = date(2024, 1, 6);
        assert_eq!(day.weekday(), Weekday::Sat);
        assert!(calendar.is_on_duty(day, LeaveTrack::Track123));
        assert_eq!(calendar.priority_rank(day, LeaveTrack::Track123), 1);
    }

    #[test]
    fn test_first_rest_day_track_123() {
        let calendar = RotationCalendar::default();
        // Phase 6 is still the last on-duty day of the first segment
        assert_eq!(calendar.priority_rank(date(2024, 1, 12), LeaveTrack::Track123), 2);
        // Phase 7 starts the four-day rest
        assert!(!calendar.is_on_duty(date(2024, 1, 13), LeaveTrack::Track123));
        assert_eq!(calendar.priority_rank(date(2024, 1, 13), LeaveTrack::Track123), 0);
    }

    #[test]
    fn test_three_weeks_later_repeats() {
        let calendar = RotationCalendar::default();
        let first = date(2024, 1, 6);
        let later = date(2024, 1, 27);
        assert_eq!(
            calendar.duty_state(first, LeaveTrack::Track123),
            calendar.duty_state(later, LeaveTrack::Track123)
        );
    }

    #[test]
    fn test_phase_sequence_track_123() {
        let calendar = RotationCalendar::default();
        let expected: [u8; 21] = [1, 2, 2, 1, 2, 1, 2, 0, 0, 0, 0, 1, 2, 1, 2, 1, 1, 2, 3, 0, 0];
        let ranks: Vec<u8> = (0..21)
            .map(|n| calendar.priority_rank(default_epoch() + Duration::days(n), LeaveTrack::Track123))
            .collect();
        assert_eq!(ranks, expected.to_vec());
    }

    #[test]
    fn test_track_offsets() {
        let calendar = RotationCalendar::default();
        let epoch = default_epoch();
        // 456 lags by 14 days, so the epoch sits on its phase 7
        assert_eq!(calendar.phase(epoch, LeaveTrack::Track456), 7);
        assert_eq!(calendar.phase(epoch, LeaveTrack::Track789), 14);
        assert_eq!(calendar.priority_rank(epoch, LeaveTrack::Track456), 0);
        assert_eq!(calendar.priority_rank(epoch, LeaveTrack::Track789), 2);
    }

    #[test]
    fn test_every_wednesday_is_on_duty() {
        // A Sunday epoch lets Wednesdays land on rest phases
        for epoch in [default_epoch(), date(2024, 1, 7), date(2023, 12, 31)] {
            let calendar = RotationCalendar::new(epoch);
            let mut day = date(2024, 1, 3);
            while day < date(2024, 12, 31) {
                for track in LeaveTrack::ALL {
                    assert!(calendar.is_on_duty(day, track), "{} {} epoch {}", day, track, epoch);
                }
                day += Duration::days(7);
            }
        }
    }

    #[test]
    fn test_wednesday_override_rank() {
        let calendar = RotationCalendar::new(date(2024, 1, 7));
        // 2024-01-17 is a Wednesday, ten days after the epoch
        let wednesday = date(2024, 1, 17);
        assert_eq!(wednesday.weekday(), Weekday::Wed);
        assert_eq!(calendar.phase(wednesday, LeaveTrack::Track123), 10);
        assert_eq!(
            calendar.duty_state(wednesday, LeaveTrack::Track123),
            DutyState::WednesdayOverride
        );
        assert_eq!(calendar.priority_rank(wednesday, LeaveTrack::Track123), WEDNESDAY_OVERRIDE_RANK);
        // The day before is a normal rest day
        assert_eq!(calendar.priority_rank(date(2024, 1, 16), LeaveTrack::Track123), 0);
    }

    #[test]
    fn test_default_epoch_never_needs_override() {
        // Offsets are whole weeks and the cycle is three weeks, so with a
        // Saturday epoch Wednesdays always fall on a duty phase
        let calendar = RotationCalendar::default();
        let mut day = date(2024, 1, 10);
        for _ in 0..60 {
            for track in LeaveTrack::ALL {
                assert!(matches!(calendar.duty_state(day, track), DutyState::Working { .. }));
            }
            day += Duration::days(7);
        }
    }

    #[test]
    fn test_periodicity_and_zero_rank_law() {
        for epoch in [default_epoch(), date(2024, 1, 7)] {
            let calendar = RotationCalendar::new(epoch);
            for n in -30..400 {
                let day = date(2024, 3, 1) + Duration::days(n);
                let later = day + Duration::days(CYCLE_LENGTH);
                for track in LeaveTrack::ALL {
                    let rank = calendar.priority_rank(day, track);
                    assert_eq!(rank == 0, !calendar.is_on_duty(day, track));
                    assert!(rank <= 3);

                    let overridden = |d: NaiveDate| {
                        calendar.duty_state(d, track) == DutyState::WednesdayOverride
                    };
                    if !overridden(day) && !overridden(later) {
                        assert_eq!(rank, calendar.priority_rank(later, track));
                        assert_eq!(calendar.is_on_duty(day, track), calendar.is_on_duty(later, track));
                    }
                }
            }
        }
    }

    #[test]
    fn test_dates_before_epoch_still_cycle() {
        let calendar = RotationCalendar::default();
        let before = date(2023, 12, 16); // 21 days before the epoch
        assert_eq!(calendar.phase(before, LeaveTrack::Track123), 0);
        assert!(calendar.ensure_in_range(before).is_err());
        assert!(calendar.ensure_in_range(default_epoch()).is_ok());
    }

    #[test]
    fn test_day_orders_and_resting_tracks() {
        let calendar = RotationCalendar::default();
        let day = date(2024, 1, 13);
        assert_eq!(
            calendar.day_orders(day),
            [
                (LeaveTrack::Track123, 0),
                (LeaveTrack::Track456, 2),
                (LeaveTrack::Track789, 1)
            ]
        );
        assert_eq!(calendar.resting_tracks(day), vec![LeaveTrack::Track123]);
        assert!(calendar.resting_tracks(date(2024, 1, 10)).is_empty());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-01-06").unwrap(), default_epoch());
        assert!(matches!(parse_date("2024/01/06"), Err(RosterError::InvalidDate(_))));
        assert!(matches!(parse_date("2024-02-30"), Err(RosterError::InvalidDate(_))));
    }
}
