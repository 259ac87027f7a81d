//! Calendar helpers over parsed schedule entries

use crate::types::{Day, ScheduleEntry};
use chrono::{Datelike, Days, NaiveDate};

/// Entries scheduled on `today`
pub fn today_entries(entries: &[ScheduleEntry], today: Day) -> Vec<ScheduleEntry> {
    entries.iter().filter(|e| e.day == today).cloned().collect()
}

/// Attach calendar dates for the week starting on `week_start_monday`.
///
/// Each entry lands on `week_start_monday + day offset`; the result is sorted
/// by date, keeping source order for entries on the same day.
pub fn with_dates(entries: &[ScheduleEntry], week_start_monday: NaiveDate) -> Vec<ScheduleEntry> {
    let mut dated: Vec<ScheduleEntry> = entries
        .iter()
        .map(|entry| ScheduleEntry {
            date: week_start_monday.checked_add_days(Days::new(entry.day.offset() as u64)),
            ..entry.clone()
        })
        .collect();

    dated.sort_by_key(|e| e.date);
    dated
}

/// Monday on or before `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let back = date.weekday().num_days_from_monday() as u64;
    date.checked_sub_days(Days::new(back)).unwrap_or(date)
}
