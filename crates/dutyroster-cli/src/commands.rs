//! Command-line parsing and dispatch.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use dutyroster_core::models::{LeaveTrack, Person, PersonId, ShiftName, TeamId};
use dutyroster_core::{parse_date, DutyRoster, JsonRosterStore, RosterConfig};

use crate::utils::{format_group, format_member_status, format_priority, format_roster_entry};

pub const USAGE: &str = "\
Usage: dutyroster <command> [args]

Commands:
  status <date>                        Day order of each leave track
  roster <date>                        Assigned shifts for a date
  person <id> <date>                   Duty state of one person
  team <team> <date>                   Team order and member duty states
  assign <shift> <person> <date>       Assign a person to an open shift
  replace <shift> <old> <new> <date>   Hand a shift to someone else
  standby <date> [--json]              Standby groups for a date
  members <team>                       Team members in order
  move <person> [--team N] [--track T] Change a person's team or track
  swap <team> <a> <b>                  Swap two members' leave tracks
  reorder <team> <id>=<pos>...         Reorder members and re-derive tracks
  import <people.json>                 Create the data file from a people list

Dates are YYYY-MM-DD. Set RUST_LOG=debug for diagnostics.";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Status(NaiveDate),
    Roster(NaiveDate),
    Person(PersonId, NaiveDate),
    Team(TeamId, NaiveDate),
    Assign(ShiftName, PersonId, NaiveDate),
    Replace(ShiftName, PersonId, PersonId, NaiveDate),
    Standby { date: NaiveDate, json: bool },
    Members(TeamId),
    Move {
        person: PersonId,
        team: Option<TeamId>,
        track: Option<LeaveTrack>,
    },
    Swap(TeamId, PersonId, PersonId),
    Reorder(TeamId, Vec<(PersonId, usize)>),
    Import(PathBuf),
    Help,
}

impl Command {
    /// Parse arguments following the program name.
    pub fn parse(args: &[String]) -> Result<Self> {
        let Some((name, rest)) = args.split_first() else {
            return Ok(Command::Help);
        };
        let rest: Vec<&str> = rest.iter().map(String::as_str).collect();

        let command = match (name.as_str(), rest.as_slice()) {
            ("status", [date]) => Command::Status(parse_date(date)?),
            ("roster", [date]) => Command::Roster(parse_date(date)?),
            ("person", [id, date]) => Command::Person(PersonId::from(*id), parse_date(date)?),
            ("team", [team, date]) => Command::Team(team.parse()?, parse_date(date)?),
            ("assign", [shift, person, date]) => {
                Command::Assign(shift.parse()?, PersonId::from(*person), parse_date(date)?)
            }
            ("replace", [shift, old, new, date]) => Command::Replace(
                shift.parse()?,
                PersonId::from(*old),
                PersonId::from(*new),
                parse_date(date)?,
            ),
            ("standby", [date]) => Command::Standby {
                date: parse_date(date)?,
                json: false,
            },
            ("standby", [date, "--json"]) | ("standby", ["--json", date]) => Command::Standby {
                date: parse_date(date)?,
                json: true,
            },
            ("members", [team]) => Command::Members(team.parse()?),
            ("move", [person, flags @ ..]) if !flags.is_empty() => parse_move(person, flags)?,
            ("swap", [team, a, b]) => {
                Command::Swap(team.parse()?, PersonId::from(*a), PersonId::from(*b))
            }
            ("reorder", [team, moves @ ..]) if !moves.is_empty() => {
                let moves = moves
                    .iter()
                    .map(|m| parse_position(m))
                    .collect::<Result<Vec<_>>>()?;
                Command::Reorder(team.parse()?, moves)
            }
            ("import", [path]) => Command::Import(PathBuf::from(*path)),
            ("help" | "--help" | "-h", _) => Command::Help,
            (other, _) => bail!("Unrecognized command or arguments: {}\n\n{}", other, USAGE),
        };
        Ok(command)
    }
}

fn parse_move(person: &str, flags: &[&str]) -> Result<Command> {
    let mut team = None;
    let mut track = None;
    let mut iter = flags.iter();
    while let Some(flag) = iter.next() {
        let value = iter
            .next()
            .with_context(|| format!("{} needs a value", flag))?;
        match *flag {
            "--team" => team = Some(value.parse()?),
            "--track" => track = Some(value.parse()?),
            other => bail!("Unknown option: {}", other),
        }
    }
    Ok(Command::Move {
        person: PersonId::from(person),
        team,
        track,
    })
}

/// `ID=POS`, position 1-based.
fn parse_position(arg: &str) -> Result<(PersonId, usize)> {
    let (id, position) = arg
        .split_once('=')
        .with_context(|| format!("Expected <id>=<position>, got {}", arg))?;
    let position = position
        .parse::<usize>()
        .with_context(|| format!("Invalid position in {}", arg))?;
    Ok((PersonId::from(id), position))
}

pub fn run(command: Command, config: &RosterConfig) -> Result<()> {
    if let Command::Help = command {
        println!("{}", USAGE);
        return Ok(());
    }
    if let Command::Import(ref source) = command {
        return import(source, config);
    }

    let roster = DutyRoster::from_config(config)?;
    match command {
        Command::Status(date) => {
            let calendar = roster.calendar();
            println!("{}", date.format("%A %Y-%m-%d"));
            for (track, rank) in calendar.day_orders(date) {
                let state = if rank == 0 { "resting" } else { "on duty" };
                println!("  track {}  {:<8} day order {}", track, state, format_priority(rank));
            }
        }
        Command::Roster(date) => {
            let entries = roster.views().daily_roster(date)?;
            if entries.is_empty() {
                println!("No shifts assigned on {}", date);
            }
            for entry in &entries {
                println!("{}", format_roster_entry(entry));
            }
        }
        Command::Person(id, date) => {
            let status = roster.views().person_status(&id, date)?;
            println!("{}", format_member_status(&status));
        }
        Command::Team(team, date) => {
            let status = roster.views().team_status(team, date)?;
            println!("Team {} on {} (team order {})", status.team, date, status.team_rank);
            for member in &status.members {
                println!("  {}", format_member_status(member));
            }
        }
        Command::Assign(shift, person, date) => {
            let assignment = roster.propose_assignment(shift, &person, date)?;
            println!(
                "Assigned {} to {} on {} (team order {}, day order {})",
                assignment.person_id, shift, date, assignment.team_rank, assignment.priority_rank
            );
        }
        Command::Replace(shift, old, new, date) => {
            let assignment = roster.replace_assignment(shift, &old, &new, date)?;
            println!(
                "Replaced {} with {} on {} {} (team order {}, day order {})",
                old, assignment.person_id, shift, date, assignment.team_rank, assignment.priority_rank
            );
        }
        Command::Standby { date, json } => {
            let groups = roster.build_groups(date)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&groups)?);
            } else if groups.is_empty() {
                println!("Nobody on standby on {}", date);
            } else {
                let blocks: Vec<String> = groups.iter().map(format_group).collect();
                println!("{}", blocks.join("\n\n"));
            }
        }
        Command::Members(team) => {
            for (position, person) in roster.admin().team_members(team)?.iter().enumerate() {
                println!(
                    "{:>2}. {:<10} {:<20} {:<17} track {}",
                    position + 1,
                    person.id,
                    person.name,
                    person.rank.display_name(),
                    person.track
                );
            }
        }
        Command::Move {
            person,
            team,
            track,
        } => {
            let updated = roster.admin().update_member(&person, team, track)?;
            println!(
                "{} is now on team {}, track {}",
                updated.display_name(),
                updated.team,
                updated.track
            );
        }
        Command::Swap(team, a, b) => {
            let (first, second) = roster.admin().swap_tracks(team, &a, &b)?;
            println!(
                "{} -> track {}, {} -> track {}",
                first.id, first.track, second.id, second.track
            );
        }
        Command::Reorder(team, moves) => {
            let members = roster.admin().reorder_members(team, &moves)?;
            for (position, person) in members.iter().enumerate() {
                println!("{:>2}. {:<10} track {}", position + 1, person.id, person.track);
            }
        }
        Command::Import(_) | Command::Help => {}
    }
    Ok(())
}

fn import(source: &Path, config: &RosterConfig) -> Result<()> {
    let contents = std::fs::read_to_string(source)
        .with_context(|| format!("Failed to read {}", source.display()))?;
    let people: Vec<Person> = serde_json::from_str(&contents)
        .with_context(|| format!("Expected a JSON list of people in {}", source.display()))?;

    let target = config.data_path()?;
    if target.exists() {
        bail!("{} already exists", target.display());
    }
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let count = people.len();
    JsonRosterStore::create(&target, people)?;
    println!("Imported {} people into {}", count, target.display());
    Ok(())
}
