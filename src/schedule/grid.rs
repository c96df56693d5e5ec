//! Weekly grid projection
//!
//! Expands schedule entries into seven weekday buckets. Buckets hold
//! references into the caller's entries and are ordered by start time.

use super::days::{DAYS_IN_WEEK, DISPLAY_ORDER};
use super::entry::ScheduleEntry;
use super::time;
use chrono::{Datelike, NaiveDate};
use tracing::debug;

/// Entries bucketed by weekday index (0 = Sunday)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeeklyGrid<'a> {
    buckets: [Vec<&'a ScheduleEntry>; DAYS_IN_WEEK],
}

impl<'a> WeeklyGrid<'a> {
    /// Project entries onto the week.
    ///
    /// Each entry lands once in every bucket its day-set names. Entries with
    /// no days land nowhere. Buckets are stably sorted by raw start time.
    pub fn project<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a ScheduleEntry>,
    {
        let mut grid = Self::default();
        let mut skipped = 0usize;

        for entry in entries {
            if entry.days.is_empty() {
                skipped += 1;
                continue;
            }
            for day in entry.days.iter() {
                grid.buckets[usize::from(day)].push(entry);
            }
        }

        for bucket in grid.buckets.iter_mut() {
            bucket.sort_by(|a, b| time::compare(&a.start_time, &b.start_time));
        }

        debug!(
            "Projected weekly grid: {} sessions, {} unscheduled entries",
            grid.session_count(),
            skipped
        );
        grid
    }

    /// Sessions on a weekday. Out-of-range indices have no sessions.
    pub fn day(&self, day: u8) -> &[&'a ScheduleEntry] {
        self.buckets
            .get(usize::from(day))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Sessions on the weekday of a calendar date
    pub fn on_date(&self, date: NaiveDate) -> &[&'a ScheduleEntry] {
        self.day(date.weekday().num_days_from_sunday() as u8)
    }

    /// Walk buckets in a caller-chosen column order
    pub fn columns<'g>(
        &'g self,
        order: &'g [u8],
    ) -> impl Iterator<Item = (u8, &'g [&'a ScheduleEntry])> + 'g {
        order.iter().map(move |&day| (day, self.day(day)))
    }

    /// Monday-first columns, Sunday last
    pub fn display_columns(&self) -> impl Iterator<Item = (u8, &[&'a ScheduleEntry])> + '_ {
        self.columns(&DISPLAY_ORDER)
    }

    /// Number of weekdays with at least one session
    pub fn active_days(&self) -> usize {
        self.buckets.iter().filter(|b| !b.is_empty()).count()
    }

    /// Bucket sizes, indexed by weekday
    pub fn sessions_per_day(&self) -> [usize; DAYS_IN_WEEK] {
        let mut counts = [0; DAYS_IN_WEEK];
        for (count, bucket) in counts.iter_mut().zip(self.buckets.iter()) {
            *count = bucket.len();
        }
        counts
    }

    /// Total weekly sessions across all buckets
    pub fn session_count(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }
}

/// Entries that occur on no weekday and are invisible to the grid
pub fn unscheduled<'a, I>(entries: I) -> Vec<&'a ScheduleEntry>
where
    I: IntoIterator<Item = &'a ScheduleEntry>,
{
    entries.into_iter().filter(|e| !e.is_scheduled()).collect()
}
