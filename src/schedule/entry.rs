//! Schedule entry model
//!
//! Backend records arrive with either a multi-day `daysOfWeek` string or a
//! legacy single `dayOfWeek` integer. Both are resolved into a [`DaySet`]
//! while deserializing, so nothing downstream ever sees the wire duality.

use super::days::DaySet;
use super::time;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Shown when a section has no room
pub const ROOM_PLACEHOLDER: &str = "TBD";

/// Shown when a section has no faculty member
pub const FACULTY_PLACEHOLDER: &str = "Not assigned";

/// One course-section meeting pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireScheduleEntry", into = "WireScheduleEntry")]
pub struct ScheduleEntry {
    pub id: String,
    pub course_id: String,
    pub course_code: String,
    pub course_name: String,
    pub faculty_id: Option<String>,
    pub faculty_name: Option<String>,
    pub room_id: Option<String>,
    pub room_label: Option<String>,
    pub days: DaySet,
    pub start_time: String,
    pub end_time: String,
    pub section: i64,
    pub student_count: u32,
}

impl ScheduleEntry {
    /// True when the entry occurs on at least one weekday
    pub fn is_scheduled(&self) -> bool {
        !self.days.is_empty()
    }

    pub fn room_display(&self) -> &str {
        self.room_label.as_deref().unwrap_or(ROOM_PLACEHOLDER)
    }

    pub fn faculty_display(&self) -> &str {
        self.faculty_name.as_deref().unwrap_or(FACULTY_PLACEHOLDER)
    }

    pub fn time_display(&self) -> String {
        time::format_range(&self.start_time, &self.end_time)
    }
}

// ==================== Wire Format ====================

/// Identifiers come back as strings from some endpoints and numbers from others
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum WireId {
    Number(i64),
    Text(String),
}

impl From<WireId> for String {
    fn from(id: WireId) -> Self {
        match id {
            WireId::Number(n) => n.to_string(),
            WireId::Text(s) => s,
        }
    }
}

/// `daysOfWeek` as a delimited string, or already split into a list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum WireDays {
    Text(String),
    List(Vec<serde_json::Value>),
}

/// Where an entry's days came from, resolved once per record
#[derive(Debug)]
enum DaySource {
    Multi(Vec<String>),
    Single(i64),
    Unscheduled,
}

impl DaySource {
    fn from_wire(days_of_week: Option<WireDays>, day_of_week: Option<i64>) -> Self {
        match (days_of_week, day_of_week) {
            (Some(WireDays::Text(text)), _) if !text.is_empty() => {
                DaySource::Multi(text.split(',').map(str::to_string).collect())
            }
            (Some(WireDays::List(values)), _) if !values.is_empty() => DaySource::Multi(
                values
                    .into_iter()
                    .map(|v| match v {
                        serde_json::Value::String(s) => s,
                        other => other.to_string(),
                    })
                    .collect(),
            ),
            (_, Some(day)) => DaySource::Single(day),
            _ => DaySource::Unscheduled,
        }
    }

    fn resolve(self) -> DaySet {
        match self {
            DaySource::Multi(tokens) => DaySet::from_tokens(tokens),
            DaySource::Single(day) => DaySet::decode(None, Some(day)),
            DaySource::Unscheduled => DaySet::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireScheduleEntry {
    id: WireId,
    #[serde(alias = "course_id")]
    course_id: WireId,
    #[serde(default, alias = "course_code")]
    course_code: Option<String>,
    #[serde(default, alias = "course_name")]
    course_name: Option<String>,
    #[serde(default, alias = "faculty_id", skip_serializing_if = "Option::is_none")]
    faculty_id: Option<WireId>,
    #[serde(default, alias = "faculty_name", skip_serializing_if = "Option::is_none")]
    faculty_name: Option<String>,
    #[serde(default, alias = "room_id", skip_serializing_if = "Option::is_none")]
    room_id: Option<WireId>,
    #[serde(default, alias = "room_label", skip_serializing_if = "Option::is_none")]
    room_label: Option<String>,
    #[serde(default, alias = "days_of_week")]
    days_of_week: Option<WireDays>,
    #[serde(default, alias = "day_of_week", skip_serializing)]
    day_of_week: Option<i64>,
    #[serde(default, alias = "start_time")]
    start_time: Option<String>,
    #[serde(default, alias = "end_time")]
    end_time: Option<String>,
    #[serde(default)]
    section: Option<i64>,
    #[serde(default, alias = "student_count")]
    student_count: Option<u32>,
}

impl From<WireScheduleEntry> for ScheduleEntry {
    fn from(wire: WireScheduleEntry) -> Self {
        let id: String = wire.id.into();
        let days = DaySource::from_wire(wire.days_of_week, wire.day_of_week).resolve();
        if days.is_empty() {
            debug!("Schedule {} has no meeting days", id);
        }

        Self {
            id,
            course_id: wire.course_id.into(),
            course_code: wire.course_code.unwrap_or_default(),
            course_name: wire.course_name.unwrap_or_default(),
            faculty_id: wire.faculty_id.map(Into::into),
            faculty_name: wire.faculty_name,
            room_id: wire.room_id.map(Into::into),
            room_label: wire.room_label,
            days,
            start_time: wire.start_time.unwrap_or_default(),
            end_time: wire.end_time.unwrap_or_default(),
            section: wire.section.unwrap_or(1),
            student_count: wire.student_count.unwrap_or(0),
        }
    }
}

impl From<ScheduleEntry> for WireScheduleEntry {
    fn from(entry: ScheduleEntry) -> Self {
        Self {
            id: WireId::Text(entry.id),
            course_id: WireId::Text(entry.course_id),
            course_code: Some(entry.course_code),
            course_name: Some(entry.course_name),
            faculty_id: entry.faculty_id.map(WireId::Text),
            faculty_name: entry.faculty_name,
            room_id: entry.room_id.map(WireId::Text),
            room_label: entry.room_label,
            days_of_week: Some(WireDays::Text(entry.days.encode())),
            day_of_week: None,
            start_time: Some(entry.start_time),
            end_time: Some(entry.end_time),
            section: Some(entry.section),
            student_count: Some(entry.student_count),
        }
    }
}
