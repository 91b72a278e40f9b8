use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::models::{Lesson, VocabularyItem};
use crate::response::{ok, AppError};
use crate::routes::{parse_scope, repo_error};
use crate::services::enrichment::EnrichError;
use crate::services::llm_provider::LlmError;
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRequest {
    scope: String,
    title: String,
    raw_words: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImportResponse {
    lesson: Lesson,
    vocabulary: Vec<VocabularyItem>,
    saved_to: &'static str,
}

/// Smart import: enrich a raw word list into structured vocabulary, then
/// persist it as a new lesson. A zero-item enrichment result is a failure,
/// never an empty lesson.
pub async fn smart_import(
    State(state): State<AppState>,
    Json(payload): Json<ImportRequest>,
) -> Response {
    let scope = match parse_scope(&payload.scope) {
        Ok(scope) => scope,
        Err(err) => return err.into_response(),
    };

    if payload.title.trim().is_empty() || payload.raw_words.trim().is_empty() {
        return AppError::validation("Vui lòng nhập tên bài và danh sách từ.").into_response();
    }

    let vocabulary = match state.enricher().enrich(&payload.raw_words).await {
        Ok(items) => items,
        Err(err) => return enrich_error(err).into_response(),
    };
    if vocabulary.is_empty() {
        return AppError::validation("Vui lòng nhập danh sách từ.").into_response();
    }

    let repository = state.repository();
    let number = match repository.next_lesson_number(&scope).await {
        Ok(number) => number,
        Err(err) => return repo_error(err).into_response(),
    };

    let lesson = Lesson {
        id: format!("lesson-{}", uuid::Uuid::new_v4()),
        number,
        title: payload.title.trim().to_string(),
        description: format!("{} từ mới", vocabulary.len()),
    };

    match repository.save_lesson(&scope, &lesson, &vocabulary).await {
        Ok(target) => ok(ImportResponse {
            lesson,
            vocabulary,
            saved_to: target.as_str(),
        }),
        Err(err) => repo_error(err).into_response(),
    }
}

fn enrich_error(err: EnrichError) -> AppError {
    match err {
        EnrichError::Llm(LlmError::Disabled(_)) => {
            AppError::unavailable("Dịch vụ AI chưa được cấu hình.")
        }
        other => {
            tracing::warn!(error = %other, "vocabulary enrichment failed");
            AppError::new(
                StatusCode::BAD_GATEWAY,
                "ENRICHMENT_FAILED",
                "Lỗi AI không thể phân tích văn bản. Vui lòng thử lại.",
            )
        }
    }
}
