use axum::extract::State;
use axum::response::{IntoResponse, Response};

use crate::response::ok;
use crate::routes::repo_error;
use crate::state::AppState;

pub async fn global(State(state): State<AppState>) -> Response {
    match state.repository().global_stats().await {
        Ok(stats) => ok(stats),
        Err(err) => repo_error(err).into_response(),
    }
}
