//! Weekly schedule interpretation
//!
//! Turns the free-form schedule stored on a player record into ordered
//! [`ScheduleEntry`] values, then answers "what's on today" and "which date is
//! each entry this week".
//!
//! Pipeline: raw string → structured (JSON) or free-text parse → entries →
//! optional today filter / week dating

pub mod calendar;
pub mod parser;

pub use calendar::{today_entries, week_start, with_dates};
pub use parser::{parse_schedule, parse_schedule_with_report, ParsedSchedule, ScheduleSource};

use crate::types::{Day, ScheduleEntry};
use chrono::NaiveDate;

/// Stateless entry point for schedule interpretation
pub struct ScheduleInterpreter;

impl ScheduleInterpreter {
    /// Parse a raw schedule string. Never fails; malformed input yields fewer entries.
    pub fn parse(raw: &str) -> Vec<ScheduleEntry> {
        parse_schedule(raw)
    }

    /// Parse a schedule field that may be absent
    pub fn parse_opt(raw: Option<&str>) -> Vec<ScheduleEntry> {
        raw.map(parse_schedule).unwrap_or_default()
    }

    /// Parse and report which path produced the entries
    pub fn parse_with_report(raw: &str) -> ParsedSchedule {
        parse_schedule_with_report(raw)
    }

    /// Entries scheduled on `today`
    pub fn today_entries(entries: &[ScheduleEntry], today: impl Into<Day>) -> Vec<ScheduleEntry> {
        today_entries(entries, today.into())
    }

    /// Entries dated against the week beginning `week_start_monday`, sorted by date
    pub fn with_dates(entries: &[ScheduleEntry], week_start_monday: NaiveDate) -> Vec<ScheduleEntry> {
        with_dates(entries, week_start_monday)
    }
}
