//! Aggregate statistics over a schedule listing

use super::days::DAYS_IN_WEEK;
use super::entry::ScheduleEntry;
use super::grid::WeeklyGrid;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Totals shown above a schedule listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSummary {
    /// Weekdays with at least one session (0..=7)
    pub active_days: usize,
    pub unique_courses: usize,
    /// Sum of per-section counts; a student in two sections counts twice
    pub total_students: u64,
    pub enrollment_per_schedule: BTreeMap<String, u32>,
    pub sessions_per_day: [usize; DAYS_IN_WEEK],
}

pub fn summarize(entries: &[ScheduleEntry], grid: &WeeklyGrid<'_>) -> ScheduleSummary {
    let unique_courses = entries
        .iter()
        .map(|e| e.course_id.as_str())
        .collect::<HashSet<_>>()
        .len();

    ScheduleSummary {
        active_days: grid.active_days(),
        unique_courses,
        total_students: entries.iter().map(|e| u64::from(e.student_count)).sum(),
        enrollment_per_schedule: entries
            .iter()
            .map(|e| (e.id.clone(), e.student_count))
            .collect(),
        sessions_per_day: grid.sessions_per_day(),
    }
}

/// Annotation appended to a schedule option, e.g. "(12 students)"
pub fn enrollment_label(count: u32) -> String {
    format!("({} students)", count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::grid::tests::entry;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_summarize() {
        let mut monday = entry("s1", "A", "1", "09:00");
        monday.student_count = 10;
        let mut wednesday = entry("s2", "B", "3", "09:00");
        wednesday.student_count = 15;
        let entries = vec![monday, wednesday];
        let grid = WeeklyGrid::project(&entries);

        let summary = summarize(&entries, &grid);
        assert_eq!(summary.active_days, 2);
        assert_eq!(summary.total_students, 25);
        assert_eq!(summary.unique_courses, 2);
        assert_eq!(
            summary.enrollment_per_schedule,
            BTreeMap::from([("s1".to_string(), 10), ("s2".to_string(), 15)])
        );
    }

    #[test]
    fn test_sections_of_same_course_sum_students() {
        let mut first = entry("s1", "A", "1,3", "09:00");
        first.student_count = 20;
        let mut second = entry("s2", "A", "2", "13:00");
        second.section = 2;
        second.student_count = 20;
        let unscheduled = entry("s3", "B", "", "09:00");
        let entries = vec![first, second, unscheduled];
        let grid = WeeklyGrid::project(&entries);

        let summary = summarize(&entries, &grid);
        assert_eq!(summary.active_days, 3);
        assert_eq!(summary.unique_courses, 2);
        assert_eq!(summary.total_students, 40);
        assert_eq!(summary.sessions_per_day, [0, 1, 1, 1, 0, 0, 0]);
    }

    #[test]
    fn test_empty() {
        let entries: Vec<ScheduleEntry> = Vec::new();
        let grid = WeeklyGrid::project(&entries);
        assert_eq!(summarize(&entries, &grid), ScheduleSummary::default());
    }

    #[test]
    fn test_enrollment_label() {
        assert_eq!(enrollment_label(12), "(12 students)");
    }
}
