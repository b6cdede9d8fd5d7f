//! Text formatting for terminal output.

pub mod format;

pub use format::{format_group, format_member_status, format_priority, format_roster_entry};
