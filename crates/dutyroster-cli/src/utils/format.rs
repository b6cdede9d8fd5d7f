use dutyroster_core::models::{RosterEntry, StandbyGroup, StandbyMember};
use dutyroster_core::MemberStatus;

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Day order for display: "-" when resting.
pub fn format_priority(priority_rank: u8) -> String {
    if priority_rank == 0 {
        "-".to_string()
    } else {
        priority_rank.to_string()
    }
}

pub fn format_roster_entry(entry: &RosterEntry) -> String {
    format!(
        "{:<22} {:<10} {:<20} team {:<3} track {}  team order {}  day order {}",
        entry.shift.display_name(),
        entry.person_id,
        truncate_string(&entry.name, 20),
        entry.team,
        entry.track,
        entry.team_rank,
        format_priority(entry.priority_rank),
    )
}

pub fn format_member_status(member: &MemberStatus) -> String {
    format!(
        "{:<10} {:<20} {:<17} track {}  {}",
        member.person_id,
        truncate_string(&member.name, 20),
        member.rank.display_name(),
        member.track,
        if member.on_duty {
            format!("on duty (day order {})", member.priority_rank)
        } else {
            "resting".to_string()
        },
    )
}

fn format_standby_member(member: &StandbyMember) -> String {
    format!(
        "{} {} (team {}, track {})",
        member.person_id, member.name, member.team, member.track
    )
}

/// Multi-line rendering of one standby group.
pub fn format_group(group: &StandbyGroup) -> String {
    let title = if group.is_tail {
        format!("Group {} (remaining)", group.number)
    } else {
        format!("Group {}", group.number)
    };

    let mut lines = vec![title];
    for lead in &group.leads {
        lines.push(format!("  lead     {}", format_standby_member(lead)));
    }
    for officer in &group.officers {
        lines.push(format!("  officer  {}", format_standby_member(officer)));
    }
    lines.join("\n")
}
