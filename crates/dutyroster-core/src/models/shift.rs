use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::person::Rank;
use crate::error::RosterError;

/// Named shifts that can be staffed on a given date, in roster display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[serde(rename_all = "snake_case")]
pub enum ShiftName {
    #[serde(rename = "A")]
    A,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "E")]
    E,
    UpperDuty,
    LowerDuty,
    DayDutyOfficer,
    NightDutyOfficer,
    DeputyOnCall,
    DayDutyManager,
    NightDutyManager,
    DayArmoryKeeper,
    NightArmoryKeeper,
}

impl ShiftName {
    pub const ALL: [ShiftName; 14] = [
        ShiftName::A,
        ShiftName::B,
        ShiftName::C,
        ShiftName::D,
        ShiftName::E,
        ShiftName::UpperDuty,
        ShiftName::LowerDuty,
        ShiftName::DayDutyOfficer,
        ShiftName::NightDutyOfficer,
        ShiftName::DeputyOnCall,
        ShiftName::DayDutyManager,
        ShiftName::NightDutyManager,
        ShiftName::DayArmoryKeeper,
        ShiftName::NightArmoryKeeper,
    ];

    /// 1-based position on the printed daily roster.
    pub fn display_index(&self) -> u8 {
        *self as u8 + 1
    }

    pub fn key(&self) -> &'static str {
        match self {
            ShiftName::A => "A",
            ShiftName::B => "B",
            ShiftName::C => "C",
            ShiftName::D => "D",
            ShiftName::E => "E",
            ShiftName::UpperDuty => "upper_duty",
            ShiftName::LowerDuty => "lower_duty",
            ShiftName::DayDutyOfficer => "day_duty_officer",
            ShiftName::NightDutyOfficer => "night_duty_officer",
            ShiftName::DeputyOnCall => "deputy_on_call",
            ShiftName::DayDutyManager => "day_duty_manager",
            ShiftName::NightDutyManager => "night_duty_manager",
            ShiftName::DayArmoryKeeper => "day_armory_keeper",
            ShiftName::NightArmoryKeeper => "night_armory_keeper",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ShiftName::A => "A shift",
            ShiftName::B => "B shift",
            ShiftName::C => "C shift",
            ShiftName::D => "D shift",
            ShiftName::E => "E shift",
            ShiftName::UpperDuty => "Upper duty",
            ShiftName::LowerDuty => "Lower duty",
            ShiftName::DayDutyOfficer => "Day duty officer",
            ShiftName::NightDutyOfficer => "Night duty officer",
            ShiftName::DeputyOnCall => "On-call deputy commander",
            ShiftName::DayDutyManager => "Day duty manager",
            ShiftName::NightDutyManager => "Night duty manager",
            ShiftName::DayArmoryKeeper => "Day armory keeper",
            ShiftName::NightArmoryKeeper => "Night armory keeper",
        }
    }
}

impl std::fmt::Display for ShiftName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for ShiftName {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let normalized = trimmed.to_lowercase().replace(['-', ' '], "_");
        ShiftName::ALL
            .into_iter()
            .find(|shift| {
                shift.key().eq_ignore_ascii_case(&normalized)
                    || shift.display_name().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| RosterError::UnknownShift(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShiftDefinition {
    pub shift: ShiftName,
    pub required_rank: Rank,
}

/// Static table of which rank may staff which shift.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShiftCatalog;

impl ShiftCatalog {
    pub fn required_rank(&self, shift: ShiftName) -> Rank {
        match shift {
            ShiftName::A
            | ShiftName::B
            | ShiftName::C
            | ShiftName::D
            | ShiftName::E
            | ShiftName::UpperDuty
            | ShiftName::LowerDuty
            | ShiftName::DayDutyManager
            | ShiftName::NightDutyManager
            | ShiftName::DayArmoryKeeper
            | ShiftName::NightArmoryKeeper => Rank::LineOfficer,
            ShiftName::DayDutyOfficer | ShiftName::NightDutyOfficer => Rank::TeamLead,
            ShiftName::DeputyOnCall => Rank::DeputyCommander,
        }
    }

    pub fn definitions(&self) -> Vec<ShiftDefinition> {
        ShiftName::ALL
            .into_iter()
            .map(|shift| ShiftDefinition {
                shift,
                required_rank: self.required_rank(shift),
            })
            .collect()
    }

    /// Shifts a person of the given rank may be proposed for.
    pub fn shifts_for(&self, rank: Rank) -> Vec<ShiftName> {
        ShiftName::ALL
            .into_iter()
            .filter(|shift| self.required_rank(*shift) == rank)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_rank_counts() {
        let catalog = ShiftCatalog;
        assert_eq!(catalog.definitions().len(), 14);
        assert_eq!(catalog.shifts_for(Rank::LineOfficer).len(), 11);
        assert_eq!(
            catalog.shifts_for(Rank::TeamLead),
            vec![ShiftName::DayDutyOfficer, ShiftName::NightDutyOfficer]
        );
        assert_eq!(catalog.shifts_for(Rank::DeputyCommander), vec![ShiftName::DeputyOnCall]);
    }

    #[test]
    fn test_display_index_follows_roster_order() {
        assert_eq!(ShiftName::A.display_index(), 1);
        assert_eq!(ShiftName::NightDutyOfficer.display_index(), 9);
        assert_eq!(ShiftName::DeputyOnCall.display_index(), 10);
        assert_eq!(ShiftName::NightArmoryKeeper.display_index(), 14);
    }

    #[test]
    fn test_parse_shift() {
        assert_eq!("a".parse::<ShiftName>().unwrap(), ShiftName::A);
        assert_eq!("upper-duty".parse::<ShiftName>().unwrap(), ShiftName::UpperDuty);
        assert_eq!("Night armory keeper".parse::<ShiftName>().unwrap(), ShiftName::NightArmoryKeeper);
        assert!(matches!("F".parse::<ShiftName>(), Err(RosterError::UnknownShift(_))));
    }

    #[test]
    fn test_serde_keys() {
        assert_eq!(serde_json::to_string(&ShiftName::A).unwrap(), "\"A\"");
        assert_eq!(
            serde_json::to_string(&ShiftName::DeputyOnCall).unwrap(),
            "\"deputy_on_call\""
        );
    }
}
