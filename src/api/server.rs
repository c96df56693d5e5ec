//! HTTP server exposing schedule views to the web front end

use super::error::ApiError;
use crate::config::Config;
use crate::db::{Database, TenantPolicy};
use crate::schedule::days::{deserialize_days, DAYS_IN_WEEK};
use crate::schedule::{DayNameStyle, DaySet, ScheduleEntry};
use crate::services::ScheduleService;
use anyhow::{Context, Result};
use axum::{
    extract::{Json, Path, State},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared state for API handlers
pub struct AppState {
    pub config: Config,
    pub schedules: ScheduleService,
}

impl AppState {
    pub fn new(config: Config, db: Database) -> Self {
        let schedules = ScheduleService::new(&config.schedule, db);
        Self { config, schedules }
    }
}

/// Build the API router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/tenants/:tenant/policy", get(get_policy).put(put_policy))
        .route("/tenants/:tenant/schedules/weekly", post(weekly_view))
        .route("/tenants/:tenant/schedules/validate", post(validate_days))
        .route("/tenants/:tenant/schedules/toggle", post(toggle_day))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind the API listener, then serve it in the background.
///
/// A bind failure is returned to the caller instead of ending the task.
pub async fn start_server(config: Config, db: Database) -> Result<JoinHandle<Result<()>>> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind API server to {}", addr))?;
    info!("API server listening on {}", addr);

    let state = Arc::new(AppState::new(config, db));
    Ok(tokio::spawn(async move {
        axum::serve(listener, router(state))
            .await
            .context("API server error")
    }))
}

/// Health check endpoint
async fn health() -> &'static str {
    "OK"
}

// ==================== Policy ====================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PolicyResponse {
    #[serde(flatten)]
    policy: TenantPolicy,
    allow_day_edit: bool,
}

/// Settings UIs send the value as a string, older ones as a number
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PolicyUpdate {
    #[serde(default)]
    days_per_week: serde_json::Value,
}

impl PolicyUpdate {
    /// Raw setting text. Null becomes blank, which clears the tenant's value.
    fn raw(self) -> String {
        use serde_json::Value;

        match self.days_per_week {
            Value::String(s) => s,
            Value::Null => String::new(),
            Value::Number(n) => match (n.as_u64(), n.as_f64()) {
                (Some(whole), _) => whole.to_string(),
                (None, Some(f)) if f >= 0.0 && f.fract() == 0.0 => (f as u64).to_string(),
                _ => n.to_string(),
            },
            other => other.to_string(),
        }
    }
}

async fn get_policy(
    State(state): State<Arc<AppState>>,
    Path(tenant): Path<String>,
) -> Result<Json<PolicyResponse>, ApiError> {
    let policy = state.schedules.policy_for(&tenant).await?;
    Ok(Json(PolicyResponse {
        policy,
        allow_day_edit: state.schedules.allow_day_edit(),
    }))
}

async fn put_policy(
    State(state): State<Arc<AppState>>,
    Path(tenant): Path<String>,
    Json(update): Json<PolicyUpdate>,
) -> Result<Json<PolicyResponse>, ApiError> {
    let policy = state.schedules.set_policy(&tenant, &update.raw()).await?;
    Ok(Json(PolicyResponse {
        policy,
        allow_day_edit: state.schedules.allow_day_edit(),
    }))
}

// ==================== Schedules ====================

async fn weekly_view(
    State(state): State<Arc<AppState>>,
    Path(tenant): Path<String>,
    Json(entries): Json<Vec<ScheduleEntry>>,
) -> Json<crate::services::WeeklyView> {
    info!("POST /tenants/{}/schedules/weekly ({} entries)", tenant, entries.len());
    Json(state.schedules.weekly_view(&entries))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DaysRequest {
    #[serde(deserialize_with = "deserialize_days")]
    days: DaySet,
    /// The schedule has already been saved
    #[serde(default)]
    existing: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ToggleRequest {
    #[serde(deserialize_with = "deserialize_days")]
    current: DaySet,
    day: u8,
    #[serde(default)]
    existing: bool,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
struct DaysResponse {
    days: DaySet,
    days_of_week: String,
    label: String,
}

impl From<DaySet> for DaysResponse {
    fn from(days: DaySet) -> Self {
        Self {
            days_of_week: days.encode(),
            label: days.format(DayNameStyle::Full),
            days,
        }
    }
}

async fn validate_days(
    State(state): State<Arc<AppState>>,
    Path(tenant): Path<String>,
    Json(request): Json<DaysRequest>,
) -> Result<Json<DaysResponse>, ApiError> {
    let days = state
        .schedules
        .validate_days(&tenant, request.days, request.existing)
        .await??;
    Ok(Json(days.into()))
}

async fn toggle_day(
    State(state): State<Arc<AppState>>,
    Path(tenant): Path<String>,
    Json(request): Json<ToggleRequest>,
) -> Result<Json<DaysResponse>, ApiError> {
    if usize::from(request.day) >= DAYS_IN_WEEK {
        return Err(ApiError::BadRequest(format!(
            "day must be between 0 and 6, got {}",
            request.day
        )));
    }
    let days = state
        .schedules
        .toggle_day(&tenant, request.current, request.day, request.existing)
        .await?;
    Ok(Json(days.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::ValidationError;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tower::ServiceExt;

    async fn state() -> Arc<AppState> {
        let db = Database::in_memory().await.unwrap();
        db.migrate().await.unwrap();
        Arc::new(AppState::new(Config::default(), db))
    }

    async fn send(
        state: Arc<AppState>,
        method: Method,
        uri: &str,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = router(state).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_start_server_fails_when_port_taken() {
        let taken = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let mut config = Config::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = taken.local_addr().unwrap().port();

        let db = Database::in_memory().await.unwrap();
        let Err(err) = start_server(config, db).await else {
            panic!("server started on a port that is already bound");
        };
        assert!(err.to_string().starts_with("Failed to bind API server"));
    }

    #[tokio::test]
    async fn test_day_requests_accept_wire_string() {
        let state = state().await;
        state.schedules.set_policy("t1", "2").await.unwrap();

        let (status, body) = send(
            state.clone(),
            Method::POST,
            "/tenants/t1/schedules/validate",
            json!({ "days": "5,1" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["daysOfWeek"], json!("1,5"));

        let (status, body) = send(
            state.clone(),
            Method::POST,
            "/tenants/t1/schedules/validate",
            json!({ "days": [3] }),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["required"], json!(2));
        assert_eq!(body["actual"], json!(1));

        let (status, body) = send(
            state,
            Method::POST,
            "/tenants/t1/schedules/toggle",
            json!({ "current": "1,3", "day": 3 }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["days"], json!([1]));
    }

    #[tokio::test]
    async fn test_put_policy_value_forms() {
        let state = state().await;

        let (status, body) = send(
            state.clone(),
            Method::PUT,
            "/tenants/t1/policy",
            json!({ "daysPerWeek": 2.0 }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["daysPerWeek"], json!(2));
        assert_eq!(body["raw"], json!("2"));

        let (status, body) = send(
            state.clone(),
            Method::PUT,
            "/tenants/t1/policy",
            json!({ "daysPerWeek": null }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["daysPerWeek"], json!(1));
        assert_eq!(body["raw"], json!(null));

        let (_, body) = send(state, Method::GET, "/tenants/t1/policy", json!(null)).await;
        assert_eq!(body["raw"], json!(null));
    }

    #[tokio::test]
    async fn test_policy_endpoints() {
        let state = state().await;

        let Json(initial) = get_policy(State(state.clone()), Path("t1".to_string()))
            .await
            .unwrap();
        assert_eq!(initial.policy.days_per_week.required(), 1);
        assert!(!initial.allow_day_edit);

        let update = PolicyUpdate {
            days_per_week: json!(3),
        };
        let Json(updated) = put_policy(State(state.clone()), Path("t1".to_string()), Json(update))
            .await
            .unwrap();
        assert_eq!(updated.policy.days_per_week.required(), 3);
        assert_eq!(updated.policy.raw.as_deref(), Some("3"));

        let body = serde_json::to_value(&updated).unwrap();
        assert_eq!(body["tenantId"], json!("t1"));
        assert_eq!(body["daysPerWeek"], json!(3));
        assert_eq!(body["allowDayEdit"], json!(false));
    }

    #[tokio::test]
    async fn test_validate_endpoint() {
        let state = state().await;
        state.schedules.set_policy("t1", "2").await.unwrap();

        let request = DaysRequest {
            days: DaySet::parse("5,1"),
            existing: false,
        };
        let Json(ok) = validate_days(State(state.clone()), Path("t1".to_string()), Json(request))
            .await
            .unwrap();
        assert_eq!(ok.days_of_week, "1,5");
        assert_eq!(ok.label, "Friday / Monday");

        let request = DaysRequest {
            days: DaySet::parse("5"),
            existing: false,
        };
        let err = validate_days(State(state), Path("t1".to_string()), Json(request))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::Validation(ValidationError::CountMismatch {
                required: 2,
                actual: 1
            })
        ));
    }

    #[tokio::test]
    async fn test_toggle_endpoint() {
        let state = state().await;
        state.schedules.set_policy("t1", "2").await.unwrap();

        let request = ToggleRequest {
            current: DaySet::parse("1,3"),
            day: 5,
            existing: false,
        };
        let Json(capped) = toggle_day(State(state.clone()), Path("t1".to_string()), Json(request))
            .await
            .unwrap();
        assert_eq!(capped.days, DaySet::parse("1,3"));

        let request = ToggleRequest {
            current: DaySet::parse("1,3"),
            day: 9,
            existing: false,
        };
        let err = toggle_day(State(state), Path("t1".to_string()), Json(request))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_weekly_endpoint_accepts_wire_records() {
        let state = state().await;
        let entries: Vec<ScheduleEntry> = serde_json::from_value(json!([
            { "id": 1, "courseId": 10, "daysOfWeek": "1,3", "startTime": "10:00", "studentCount": 10 },
            { "id": 2, "courseId": 11, "dayOfWeek": 3, "startTime": "08:00", "studentCount": 15 },
            { "id": 3, "courseId": 12 }
        ]))
        .unwrap();

        let Json(view) = weekly_view(State(state), Path("t1".to_string()), Json(entries)).await;
        assert_eq!(view.summary.active_days, 2);
        assert_eq!(view.summary.total_students, 25);
        assert_eq!(view.unscheduled, vec!["3"]);

        let wednesday = view.columns.iter().find(|c| c.day == 3).unwrap();
        let ids: Vec<&str> = wednesday.sessions.iter().map(|s| s.schedule_id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
    }
}
