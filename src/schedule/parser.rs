//! Weekly schedule parsing
//!
//! Accepts the three shapes a player's schedule field has been stored in over
//! time: a JSON object keyed by day, a JSON array of `{day, activity, time}`
//! rows, and free text such as "Monday: training 6pm, Thursday match".
//! Nothing here returns an error; unreadable input degrades to fewer entries.

use crate::types::{Day, ScheduleEntry};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::OnceLock;
use tracing::debug;

/// How a raw schedule string was interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleSource {
    /// Input was empty or a null literal
    Empty,
    /// Input parsed as a JSON object or array
    Structured,
    /// Input looked like JSON but failed to parse; free-text scan was used
    MalformedStructured,
    /// Free-text scan found at least one weekday
    FreeText,
    /// Free-text scan found no weekday names
    NoWeekdayFound,
}

/// Entries plus a record of which parsing path produced them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedSchedule {
    pub entries: Vec<ScheduleEntry>,
    pub source: ScheduleSource,
    /// Source items dropped (missing fields, unknown day, empty activity)
    pub skipped: usize,
}

/// Parse a raw schedule string into entries
pub fn parse_schedule(raw: &str) -> Vec<ScheduleEntry> {
    parse_schedule_with_report(raw).entries
}

/// Parse a raw schedule string, keeping the diagnostic classification
pub fn parse_schedule_with_report(raw: &str) -> ParsedSchedule {
    let trimmed = raw.trim();

    if trimmed.is_empty() || is_null_literal(trimmed) {
        debug!("schedule input empty");
        return ParsedSchedule {
            entries: Vec::new(),
            source: ScheduleSource::Empty,
            skipped: 0,
        };
    }

    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        match parse_structured(trimmed) {
            Ok((entries, skipped)) => {
                debug!(entries = entries.len(), skipped, "parsed structured schedule");
                return ParsedSchedule {
                    entries,
                    source: ScheduleSource::Structured,
                    skipped,
                };
            }
            Err(error) => {
                debug!(%error, "structured schedule malformed, scanning as free text");
                let (entries, skipped) = scan_free_text(trimmed);
                return ParsedSchedule {
                    entries,
                    source: ScheduleSource::MalformedStructured,
                    skipped,
                };
            }
        }
    }

    let (entries, skipped) = scan_free_text(trimmed);
    let source = if entries.is_empty() && skipped == 0 {
        debug!("no weekday names found in free-text schedule");
        ScheduleSource::NoWeekdayFound
    } else {
        debug!(entries = entries.len(), skipped, "scanned free-text schedule");
        ScheduleSource::FreeText
    };

    ParsedSchedule {
        entries,
        source,
        skipped,
    }
}

fn is_null_literal(s: &str) -> bool {
    s.eq_ignore_ascii_case("null") || s.eq_ignore_ascii_case("undefined")
}

fn parse_structured(raw: &str) -> Result<(Vec<ScheduleEntry>, usize), serde_json::Error> {
    let value: Value = serde_json::from_str(raw)?;
    Ok(match value {
        Value::Array(items) => parse_array(&items),
        Value::Object(map) => parse_object(&map),
        _ => (Vec::new(), 0),
    })
}

/// `[{"day": "monday", "activity": "Training", "time": "6pm"}, ...]`
fn parse_array(items: &[Value]) -> (Vec<ScheduleEntry>, usize) {
    let mut entries = Vec::new();
    let mut skipped = 0;

    for item in items {
        let fields = match item.as_object() {
            Some(fields) => fields,
            None => {
                skipped += 1;
                continue;
            }
        };

        let day = fields
            .get("day")
            .and_then(Value::as_str)
            .and_then(Day::from_name);
        let activity = fields.get("activity").filter(|v| !v.is_null());

        match (day, activity) {
            (Some(day), Some(activity)) => {
                let time = explicit_time(fields.get("time"));
                match build_entry(day, &render_value(activity), time) {
                    Some(entry) => entries.push(entry),
                    None => skipped += 1,
                }
            }
            _ => skipped += 1,
        }
    }

    (entries, skipped)
}

/// `{"monday": "Training 6pm", "tuesday": {"activity": "Match", "time": "7pm"}}`
fn parse_object(map: &Map<String, Value>) -> (Vec<ScheduleEntry>, usize) {
    let mut entries = Vec::new();
    let mut skipped = 0;

    for (key, value) in map {
        let day = match Day::from_name(key) {
            Some(day) => day,
            None => {
                skipped += 1;
                continue;
            }
        };

        let (activity, time) = match value {
            Value::String(text) => (text.clone(), None),
            Value::Object(fields) if fields.contains_key("activity") => (
                fields.get("activity").map(render_value).unwrap_or_default(),
                explicit_time(fields.get("time")),
            ),
            Value::Object(fields) => (join_values(fields.values()), None),
            other => (render_value(other), None),
        };

        match build_entry(day, &activity, time) {
            Some(entry) => entries.push(entry),
            None => skipped += 1,
        }
    }

    (entries, skipped)
}

/// Scan prose for "<Weekday>[:] <text>" up to the next comma or newline
fn scan_free_text(text: &str) -> (Vec<ScheduleEntry>, usize) {
    let mut entries = Vec::new();
    let mut skipped = 0;

    for (day, pattern) in weekday_patterns() {
        let Some(captures) = pattern.captures(text) else {
            continue;
        };
        match build_entry(*day, &captures[1], None) {
            Some(entry) => entries.push(entry),
            None => skipped += 1,
        }
    }

    (entries, skipped)
}

/// Clean the activity text, split out a time token, and reject empty results
fn build_entry(day: Day, raw_activity: &str, time: Option<String>) -> Option<ScheduleEntry> {
    let cleaned = clean_activity(raw_activity);

    let (activity, time) = match time {
        Some(time) => (cleaned, Some(time)),
        None => extract_time(&cleaned),
    };

    if activity.is_empty() || activity.eq_ignore_ascii_case("null") {
        return None;
    }

    Some(ScheduleEntry::new(day, activity, time))
}

/// Strip JSON residue (`{`, `}`, `"`), turn underscores into spaces, collapse whitespace
pub fn clean_activity(text: &str) -> String {
    let stripped: String = text
        .chars()
        .filter(|c| !matches!(c, '{' | '}' | '"'))
        .map(|c| if c == '_' { ' ' } else { c })
        .collect();
    collapse_whitespace(&stripped)
}

/// Split the first time-like token ("6pm", "18:30", "7 am") out of an activity.
///
/// Returns the remaining activity text and the token, if one was found.
pub fn extract_time(text: &str) -> (String, Option<String>) {
    let Some(found) = time_token_pattern().find(text) else {
        return (trim_separators(text), None);
    };

    let token = found.as_str().trim().to_string();
    let remainder = format!("{} {}", &text[..found.start()], &text[found.end()..]);

    (trim_separators(&collapse_whitespace(&remainder)), Some(token))
}

fn trim_separators(text: &str) -> String {
    text.trim_matches(|c: char| matches!(c, '-' | '@' | ',' | ':') || c.is_whitespace())
        .to_string()
}

fn explicit_time(value: Option<&Value>) -> Option<String> {
    let text = match value? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Array(items) => join_values(items.iter()),
        Value::Object(fields) => join_values(fields.values()),
        other => other.to_string(),
    }
}

fn join_values<'a>(values: impl Iterator<Item = &'a Value>) -> String {
    values
        .filter(|v| !v.is_null())
        .map(render_value)
        .collect::<Vec<_>>()
        .join(", ")
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn time_token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)\b\d{1,2}(?::\d{2})?(?:\s*(?:am|pm))?\b").expect("time token pattern")
    })
}

fn weekday_patterns() -> &'static [(Day, Regex)] {
    static PATTERNS: OnceLock<Vec<(Day, Regex)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        Day::ALL
            .iter()
            .map(|day| {
                let pattern = format!(r"(?i)\b{}\b:?[ \t]*([^,\n]+)", day.full_name());
                (*day, Regex::new(&pattern).expect("weekday pattern"))
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(day: Day, activity: &str, time: Option<&str>) -> ScheduleEntry {
        ScheduleEntry::new(day, activity, time.map(str::to_string))
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_schedule("").is_empty());
        assert!(parse_schedule("   \n\t").is_empty());
        assert!(parse_schedule("null").is_empty());
        assert_eq!(
            parse_schedule_with_report("").source,
            ScheduleSource::Empty
        );
    }

    #[test]
    fn test_object_string_value_splits_time() {
        let entries = parse_schedule(r#"{"monday": "Training 6pm"}"#);
        assert_eq!(entries, vec![entry(Day::Mon, "Training", Some("6pm"))]);
    }

    #[test]
    fn test_object_nested_activity_and_time() {
        let entries = parse_schedule(r#"{"monday":{"activity":"Match","time":"7pm"}}"#);
        assert_eq!(entries, vec![entry(Day::Mon, "Match", Some("7pm"))]);
    }

    #[test]
    fn test_object_preserves_source_order() {
        let entries = parse_schedule(
            r#"{"friday": "Gym", "monday": "Training", "Wednesday": "Swim"}"#,
        );
        let days: Vec<Day> = entries.iter().map(|e| e.day).collect();
        assert_eq!(days, vec![Day::Fri, Day::Mon, Day::Wed]);
    }

    #[test]
    fn test_object_other_mapping_joins_values() {
        let entries = parse_schedule(
            r#"{"tuesday": {"morning": "skills_session", "evening": "recovery"}}"#,
        );
        assert_eq!(
            entries,
            vec![entry(Day::Tue, "skills session, recovery", None)]
        );
    }

    #[test]
    fn test_object_drops_null_and_empty() {
        let report = parse_schedule_with_report(
            r#"{"monday": null, "tuesday": "", "wednesday": "null", "thursday": "Rest"}"#,
        );
        assert_eq!(report.entries, vec![entry(Day::Thu, "Rest", None)]);
        assert_eq!(report.skipped, 3);
        assert_eq!(report.source, ScheduleSource::Structured);
    }

    #[test]
    fn test_object_strips_json_residue() {
        let entries = parse_schedule(r#"{"saturday": "{\"match_day\"}"}"#);
        assert_eq!(entries, vec![entry(Day::Sat, "match day", None)]);
    }

    #[test]
    fn test_object_unknown_day_skipped() {
        let report = parse_schedule_with_report(r#"{"funday": "Party", "sun": "Rest"}"#);
        assert_eq!(report.entries, vec![entry(Day::Sun, "Rest", None)]);
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn test_array_form() {
        let entries = parse_schedule(
            r#"[
                {"day": "Thursday", "activity": "Match", "time": "7:30pm"},
                {"day": "monday", "activity": "Training"},
                {"activity": "No day"},
                {"day": "Friday"}
            ]"#,
        );
        assert_eq!(
            entries,
            vec![
                entry(Day::Thu, "Match", Some("7:30pm")),
                entry(Day::Mon, "Training", None),
            ]
        );
    }

    #[test]
    fn test_malformed_json_falls_back_to_free_text() {
        let report = parse_schedule_with_report("garbled{not json");
        assert!(report.entries.is_empty());
        assert_eq!(report.source, ScheduleSource::NoWeekdayFound);

        let report = parse_schedule_with_report("{monday: training 6pm");
        assert_eq!(report.source, ScheduleSource::MalformedStructured);
        assert_eq!(report.entries, vec![entry(Day::Mon, "training", Some("6pm"))]);
    }

    #[test]
    fn test_free_text_is_monday_first() {
        let entries = parse_schedule(
            "Thursday: match 7pm, Monday training 6:30pm\nSaturday - recovery swim",
        );
        assert_eq!(
            entries,
            vec![
                entry(Day::Mon, "training", Some("6:30pm")),
                entry(Day::Thu, "match", Some("7pm")),
                entry(Day::Sat, "recovery swim", None),
            ]
        );
    }

    #[test]
    fn test_free_text_case_insensitive() {
        let entries = parse_schedule("WEDNESDAY: Gym");
        assert_eq!(entries, vec![entry(Day::Wed, "Gym", None)]);
    }

    #[test]
    fn test_free_text_without_weekdays() {
        let report = parse_schedule_with_report("We train most evenings");
        assert!(report.entries.is_empty());
        assert_eq!(report.source, ScheduleSource::NoWeekdayFound);
    }

    #[test]
    fn test_extract_time_variants() {
        assert_eq!(
            extract_time("Training 6pm"),
            ("Training".to_string(), Some("6pm".to_string()))
        );
        assert_eq!(
            extract_time("18:30 Swim"),
            ("Swim".to_string(), Some("18:30".to_string()))
        );
        assert_eq!(
            extract_time("Match @ 7 PM"),
            ("Match".to_string(), Some("7 PM".to_string()))
        );
        assert_eq!(extract_time("Rest day"), ("Rest day".to_string(), None));
    }

    #[test]
    fn test_extract_time_ignores_digits_inside_words() {
        assert_eq!(
            extract_time("U12 squad"),
            ("U12 squad".to_string(), None)
        );
    }

    #[test]
    fn test_every_day_code_is_canonical() {
        let entries = parse_schedule(
            r#"{"monday":"a","tuesday":"b","wednesday":"c","thursday":"d","friday":"e","saturday":"f","sunday":"g"}"#,
        );
        assert_eq!(entries.len(), 7);
        for (entry, day) in entries.iter().zip(Day::ALL) {
            assert_eq!(entry.day, day);
        }
    }
}
