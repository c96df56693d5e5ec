//! Schedule view service - Turns backend schedule records into screen-ready views
//!
//! Combines the weekly grid, course colors and totals for one listing, and
//! applies each tenant's day-count policy to create/edit forms.

use crate::config::ScheduleConfig;
use crate::db::{Database, TenantPolicy, TenantSetting, DAYS_PER_WEEK_KEY};
use crate::schedule::days::day_name;
use crate::schedule::grid::unscheduled;
use crate::schedule::stats::{enrollment_label, summarize};
use crate::schedule::{
    CourseColors, DayNameStyle, DaySelector, DaySet, ScheduleEntry, ScheduleSummary,
    ValidationError, WeeklyGrid,
};
use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;
use tracing::{debug, info};

/// Schedule view service backed by tenant settings
pub struct ScheduleService {
    config: ScheduleConfig,
    db: Database,
}

/// One session card in a weekday column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCard {
    pub schedule_id: String,
    pub course_id: String,
    pub course_code: String,
    pub course_name: String,
    pub section: i64,
    pub faculty: String,
    pub room: String,
    pub days: String,
    pub start_time: String,
    pub end_time: String,
    pub time: String,
    pub color: Option<String>,
    pub student_count: u32,
    pub enrollment: String,
}

/// One weekday column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayColumn {
    pub day: u8,
    pub name: &'static str,
    pub short_name: &'static str,
    pub sessions: Vec<SessionCard>,
}

/// Everything a weekly schedule screen renders
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyView {
    pub columns: Vec<DayColumn>,
    pub today: u8,
    pub today_sessions: Vec<String>,
    pub summary: ScheduleSummary,
    pub unscheduled: Vec<String>,
}

impl ScheduleService {
    /// Create a new schedule view service
    pub fn new(config: &ScheduleConfig, db: Database) -> Self {
        Self {
            config: config.clone(),
            db,
        }
    }

    pub fn allow_day_edit(&self) -> bool {
        self.config.allow_day_edit
    }

    // ==================== Policy ====================

    /// Load a tenant's day-count policy
    pub async fn policy_for(&self, tenant_id: &str) -> Result<TenantPolicy> {
        let raw = self
            .db
            .get_setting(tenant_id, DAYS_PER_WEEK_KEY)
            .await?
            .map(|s| s.value);
        let policy = TenantPolicy::resolve(tenant_id, raw, &self.config.default_days_per_week);
        debug!(
            "Tenant {} requires {} day(s) per week",
            tenant_id,
            policy.days_per_week.required()
        );
        Ok(policy)
    }

    /// Store a tenant's raw days-per-week value and return the coerced policy.
    ///
    /// A blank value removes the tenant's setting so the configured default applies.
    pub async fn set_policy(&self, tenant_id: &str, raw: &str) -> Result<TenantPolicy> {
        let raw = raw.trim();
        if raw.is_empty() {
            self.db.clear_setting(tenant_id, DAYS_PER_WEEK_KEY).await?;
        } else {
            self.db
                .set_setting(TenantSetting::new(tenant_id, DAYS_PER_WEEK_KEY, raw))
                .await?;
        }
        let policy = TenantPolicy::resolve(
            tenant_id,
            Some(raw.to_string()),
            &self.config.default_days_per_week,
        );
        info!(
            "Tenant {} set days per week to {:?} (effective {})",
            tenant_id,
            raw,
            policy.days_per_week.required()
        );
        Ok(policy)
    }

    /// Rebuild the day picker for a form, given the days currently selected.
    ///
    /// `existing` marks a schedule that has already been saved.
    pub async fn selector_for(
        &self,
        tenant_id: &str,
        days: DaySet,
        existing: bool,
    ) -> Result<DaySelector> {
        let policy = self.policy_for(tenant_id).await?.days_per_week;
        Ok(if existing {
            DaySelector::edit(policy, days, self.config.allow_day_edit)
        } else {
            DaySelector::restore(policy, days)
        })
    }

    /// Check a submitted day selection against the tenant's policy
    pub async fn validate_days(
        &self,
        tenant_id: &str,
        days: DaySet,
        existing: bool,
    ) -> Result<Result<DaySet, ValidationError>> {
        let selector = self.selector_for(tenant_id, days, existing).await?;
        Ok(selector.submit().cloned())
    }

    /// Apply one click in the day picker
    pub async fn toggle_day(
        &self,
        tenant_id: &str,
        current: DaySet,
        day: u8,
        existing: bool,
    ) -> Result<DaySet> {
        let mut selector = self.selector_for(tenant_id, current, existing).await?;
        selector.toggle(day);
        Ok(selector.into_selected())
    }

    // ==================== Weekly View ====================

    /// Weekly view as of today
    pub fn weekly_view(&self, entries: &[ScheduleEntry]) -> WeeklyView {
        self.weekly_view_on(entries, Local::now().date_naive())
    }

    /// Weekly view for a given "today"
    pub fn weekly_view_on(&self, entries: &[ScheduleEntry], today: NaiveDate) -> WeeklyView {
        let grid = WeeklyGrid::project(entries);
        let colors = CourseColors::assign(entries, &self.config.palette);

        let columns = grid
            .display_columns()
            .map(|(day, sessions)| DayColumn {
                day,
                name: day_name(day, DayNameStyle::Full),
                short_name: day_name(day, DayNameStyle::Short),
                sessions: sessions.iter().map(|e| session_card(e, &colors)).collect(),
            })
            .collect();

        let view = WeeklyView {
            columns,
            today: today.weekday().num_days_from_sunday() as u8,
            today_sessions: grid.on_date(today).iter().map(|e| e.id.clone()).collect(),
            summary: summarize(entries, &grid),
            unscheduled: unscheduled(entries).into_iter().map(|e| e.id.clone()).collect(),
        };

        debug!(
            "Built weekly view: {} entries, {} active days, {} unscheduled",
            entries.len(),
            view.summary.active_days,
            view.unscheduled.len()
        );
        view
    }
}

fn session_card(entry: &ScheduleEntry, colors: &CourseColors) -> SessionCard {
    SessionCard {
        schedule_id: entry.id.clone(),
        course_id: entry.course_id.clone(),
        course_code: entry.course_code.clone(),
        course_name: entry.course_name.clone(),
        section: entry.section,
        faculty: entry.faculty_display().to_string(),
        room: entry.room_display().to_string(),
        days: entry.days.format(DayNameStyle::Short),
        start_time: entry.start_time.clone(),
        end_time: entry.end_time.clone(),
        time: entry.time_display(),
        color: colors.get(&entry.course_id).map(str::to_string),
        student_count: entry.student_count,
        enrollment: enrollment_label(entry.student_count),
    }
}
