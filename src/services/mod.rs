//! Services built on the schedule model and tenant settings

pub mod schedule_view;

pub use schedule_view::{DayColumn, ScheduleService, SessionCard, WeeklyView};
