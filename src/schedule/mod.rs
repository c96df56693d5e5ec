//! Recurring class-schedule model
//!
//! Pure, synchronous derivations over schedule records fetched from the
//! backend: day-set decoding, weekly grids, day-count policy checks, course
//! colors, totals and time display.

pub mod colors;
pub mod days;
pub mod entry;
pub mod grid;
pub mod policy;
pub mod stats;
pub mod time;

pub use colors::CourseColors;
pub use days::{DayNameStyle, DaySet};
pub use entry::ScheduleEntry;
pub use grid::WeeklyGrid;
pub use policy::{DayCountPolicy, DaySelector, ValidationError};
pub use stats::ScheduleSummary;
