use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/live", get(live))
        .route("/info", get(info))
}

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
    storage: &'static str,
    timestamp: String,
}

async fn root(State(state): State<AppState>) -> Response {
    Json(HealthStatus {
        status: "ok",
        storage: state.repository().storage_mode(),
        timestamp: timestamp(Utc::now()),
    })
    .into_response()
}

#[derive(Serialize)]
struct Liveness {
    status: &'static str,
    uptime: u64,
    timestamp: String,
}

async fn live(State(state): State<AppState>) -> Response {
    Json(Liveness {
        status: "healthy",
        uptime: state.uptime_seconds(),
        timestamp: timestamp(Utc::now()),
    })
    .into_response()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ServiceInfo {
    service: &'static str,
    version: &'static str,
    storage: &'static str,
    ai_configured: bool,
    start_time: String,
    uptime: u64,
}

async fn info(State(state): State<AppState>) -> Response {
    Json(ServiceInfo {
        service: "zhongwen-backend",
        version: env!("CARGO_PKG_VERSION"),
        storage: state.repository().storage_mode(),
        ai_configured: state.enricher().is_available(),
        start_time: timestamp(state.started_at_system().into()),
        uptime: state.uptime_seconds(),
    })
    .into_response()
}

fn timestamp(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}
