//! Core types shared across the crate
//!
//! Schedule entries and the aggregated player card that flow out of the two
//! transforms. Score inputs live in [`crate::performance::types`].

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Day of the week, serialized as its 3-letter short code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Day {
    /// Canonical Monday-first week
    pub const ALL: [Day; 7] = [
        Day::Mon,
        Day::Tue,
        Day::Wed,
        Day::Thu,
        Day::Fri,
        Day::Sat,
        Day::Sun,
    ];

    /// 3-letter short code ("Mon")
    pub fn code(&self) -> &'static str {
        match self {
            Day::Mon => "Mon",
            Day::Tue => "Tue",
            Day::Wed => "Wed",
            Day::Thu => "Thu",
            Day::Fri => "Fri",
            Day::Sat => "Sat",
            Day::Sun => "Sun",
        }
    }

    /// Lowercase English weekday name ("monday")
    pub fn full_name(&self) -> &'static str {
        match self {
            Day::Mon => "monday",
            Day::Tue => "tuesday",
            Day::Wed => "wednesday",
            Day::Thu => "thursday",
            Day::Fri => "friday",
            Day::Sat => "saturday",
            Day::Sun => "sunday",
        }
    }

    /// Days since Monday (Mon = 0 .. Sun = 6)
    pub fn offset(&self) -> u32 {
        match self {
            Day::Mon => 0,
            Day::Tue => 1,
            Day::Wed => 2,
            Day::Thu => 3,
            Day::Fri => 4,
            Day::Sat => 5,
            Day::Sun => 6,
        }
    }

    /// Resolve a day name as written by a coach or player.
    ///
    /// Full English names match case-insensitively; anything else is matched on
    /// its first three characters against the short codes, so "Tues", "thurs"
    /// and "SAT" all resolve. Returns `None` when neither rule matches.
    pub fn from_name(name: &str) -> Option<Day> {
        let lowered = name.trim().to_lowercase();
        if let Some(day) = Day::ALL.iter().find(|d| d.full_name() == lowered) {
            return Some(*day);
        }

        let prefix: String = lowered.chars().take(3).collect();
        Day::ALL
            .iter()
            .find(|d| d.code().eq_ignore_ascii_case(&prefix))
            .copied()
    }
}

impl From<Weekday> for Day {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => Day::Mon,
            Weekday::Tue => Day::Tue,
            Weekday::Wed => Day::Wed,
            Weekday::Thu => Day::Thu,
            Weekday::Fri => Day::Fri,
            Weekday::Sat => Day::Sat,
            Weekday::Sun => Day::Sun,
        }
    }
}

impl From<Day> for Weekday {
    fn from(day: Day) -> Self {
        match day {
            Day::Mon => Weekday::Mon,
            Day::Tue => Weekday::Tue,
            Day::Wed => Weekday::Wed,
            Day::Thu => Weekday::Thu,
            Day::Fri => Weekday::Fri,
            Day::Sat => Weekday::Sat,
            Day::Sun => Weekday::Sun,
        }
    }
}

impl std::fmt::Display for Day {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// One scheduled activity on a day of the week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Day of the week
    pub day: Day,
    /// Activity description (never empty, never "null")
    pub activity: String,
    /// Time of day as written in the source ("6pm", "18:30")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Concrete calendar date, set by `with_dates`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl ScheduleEntry {
    pub fn new(day: Day, activity: impl Into<String>, time: Option<String>) -> Self {
        Self {
            day,
            activity: activity.into(),
            time,
            date: None,
        }
    }
}

/// Which score family a stat row came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatCategory {
    Behaviour,
    ActivityRating,
    BestSelf,
}

/// A single displayable metric on the player card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatRow {
    /// Stored metric key ("bravery", "best_self")
    pub key: String,
    /// Display label ("Bravery", "Best Self")
    pub label: String,
    /// Source family
    pub category: StatCategory,
    /// Score on the 0-10 scale; `None` renders as "no data"
    pub value: Option<f64>,
}

/// Unified rating profile for one player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedPerformance {
    pub profile_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Overall rating in 0..=99; 0 when `has_data` is false
    pub overall_rating: u8,
    /// True iff at least one stat row carries a value
    pub has_data: bool,
    /// Behaviour rows first, then activity ratings, then best-self
    pub stats: Vec<StatRow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_from_full_name_case_insensitive() {
        assert_eq!(Day::from_name("Monday"), Some(Day::Mon));
        assert_eq!(Day::from_name("  WEDNESDAY "), Some(Day::Wed));
        assert_eq!(Day::from_name("sunday"), Some(Day::Sun));
    }

    #[test]
    fn test_day_from_abbreviation() {
        assert_eq!(Day::from_name("Tues"), Some(Day::Tue));
        assert_eq!(Day::from_name("thurs"), Some(Day::Thu));
        assert_eq!(Day::from_name("SAT"), Some(Day::Sat));
    }

    #[test]
    fn test_day_unknown_name() {
        assert_eq!(Day::from_name("funday"), None);
        assert_eq!(Day::from_name(""), None);
    }

    #[test]
    fn test_day_offsets_follow_week() {
        for (i, day) in Day::ALL.iter().enumerate() {
            assert_eq!(day.offset() as usize, i);
        }
    }

    #[test]
    fn test_weekday_round_trip() {
        for day in Day::ALL {
            let weekday: Weekday = day.into();
            assert_eq!(Day::from(weekday), day);
        }
    }

    #[test]
    fn test_entry_serializes_short_code() {
        let entry = ScheduleEntry::new(Day::Fri, "Gym", None);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["day"], "Fri");
        assert!(json.get("time").is_none());
        assert!(json.get("date").is_none());
    }
}
