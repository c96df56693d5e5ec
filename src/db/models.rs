//! Database models for SmartAttend

use crate::schedule::DayCountPolicy;
use serde::{Deserialize, Serialize};

/// Settings key holding the required number of schedule days per week
pub const DAYS_PER_WEEK_KEY: &str = "days_per_week";

/// Tenant setting record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantSetting {
    pub tenant_id: String,
    pub key: String,
    pub value: String,
    pub updated_at: i64,
}

impl TenantSetting {
    pub fn new(
        tenant_id: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            key: key.into(),
            value: value.into(),
            updated_at: chrono::Utc::now().timestamp(),
        }
    }
}

/// A tenant's day-count policy along with the raw value it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantPolicy {
    pub tenant_id: String,
    pub days_per_week: DayCountPolicy,
    /// Stored value, if the tenant has one
    pub raw: Option<String>,
}

impl TenantPolicy {
    /// Coerce a stored value, falling back to `fallback` when nothing is stored.
    ///
    /// A blank stored value counts as nothing stored.
    pub fn resolve(tenant_id: impl Into<String>, raw: Option<String>, fallback: &str) -> Self {
        let raw = raw.filter(|s| !s.trim().is_empty());
        let days_per_week = DayCountPolicy::parse(raw.as_deref().or(Some(fallback)));
        Self {
            tenant_id: tenant_id.into(),
            days_per_week,
            raw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_stored_value() {
        let policy = TenantPolicy::resolve("t1", Some("2".to_string()), "1");
        assert_eq!(policy.days_per_week.required(), 2);
        assert_eq!(policy.raw.as_deref(), Some("2"));
    }

    #[test]
    fn test_resolve_bad_value_defaults_to_one() {
        let policy = TenantPolicy::resolve("t1", Some("two".to_string()), "3");
        assert_eq!(policy.days_per_week.required(), 1);
    }

    #[test]
    fn test_resolve_missing_uses_fallback() {
        assert_eq!(TenantPolicy::resolve("t1", None, "3").days_per_week.required(), 3);
        assert_eq!(TenantPolicy::resolve("t1", None, "").days_per_week.required(), 1);
    }

    #[test]
    fn test_resolve_blank_value_uses_fallback() {
        let policy = TenantPolicy::resolve("t1", Some("  ".to_string()), "3");
        assert_eq!(policy.days_per_week.required(), 3);
        assert_eq!(policy.raw, None);
    }
}
