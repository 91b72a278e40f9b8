mod categories;
mod health;
mod import;
mod lessons;
mod stats;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;

use crate::response::AppError;
use crate::services::repository::RepoError;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/health", health::router())
        .route("/api/categories", get(categories::list))
        .route("/api/lessons", get(lessons::list).post(lessons::save))
        .route("/api/lessons/:id", axum::routing::delete(lessons::remove))
        .route("/api/lessons/:id/vocabulary", get(lessons::vocabulary))
        .route("/api/lessons/:id/quiz", get(lessons::quiz))
        .route(
            "/api/lessons/:id/dictation/check",
            post(lessons::check_dictation),
        )
        .route("/api/scopes/:scope/vocabulary", get(lessons::scope_vocabulary))
        .route("/api/import", post(import::smart_import))
        .route("/api/stats", get(stats::global))
        .fallback(fallback_handler)
        .with_state(state)
}

async fn fallback_handler() -> Response {
    AppError::new(StatusCode::NOT_FOUND, "NOT_FOUND", "Không tìm thấy tài nguyên.").into_response()
}

pub(crate) fn repo_error(err: RepoError) -> AppError {
    match err {
        RepoError::StaticLesson(id) => {
            AppError::conflict(format!("Bài học hệ thống ({id}) không thể chỉnh sửa."))
        }
        other => {
            tracing::warn!(error = %other, "repository operation failed");
            AppError::internal("Máy chủ gặp lỗi, vui lòng thử lại sau.")
        }
    }
}

pub(crate) fn parse_scope(raw: &str) -> Result<crate::models::Scope, AppError> {
    raw.parse()
        .map_err(|_| AppError::validation("Scope không hợp lệ."))
}
