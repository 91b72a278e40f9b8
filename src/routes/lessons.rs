use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::models::{Lesson, VocabularyItem};
use crate::response::{ok, AppError};
use crate::routes::{parse_scope, repo_error};
use crate::services::study;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ScopeQuery {
    scope: String,
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ScopeQuery>,
) -> Response {
    let scope = match parse_scope(&query.scope) {
        Ok(scope) => scope,
        Err(err) => return err.into_response(),
    };

    match state.repository().lessons_for_scope(&scope).await {
        Ok(lessons) => ok(lessons),
        Err(err) => repo_error(err).into_response(),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonPayload {
    #[serde(default)]
    id: String,
    number: Option<i64>,
    title: String,
    #[serde(default)]
    description: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveLessonRequest {
    scope: String,
    lesson: LessonPayload,
    vocabulary: Vec<VocabularyItem>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SavedLessonResponse {
    lesson: Lesson,
    vocabulary: Vec<VocabularyItem>,
    saved_to: &'static str,
}

pub async fn save(
    State(state): State<AppState>,
    Json(payload): Json<SaveLessonRequest>,
) -> Response {
    let scope = match parse_scope(&payload.scope) {
        Ok(scope) => scope,
        Err(err) => return err.into_response(),
    };

    if payload.lesson.title.trim().is_empty() {
        return AppError::validation("Vui lòng nhập tên bài học.").into_response();
    }
    if payload.vocabulary.is_empty() {
        return AppError::validation("Bài học phải có ít nhất một từ vựng.").into_response();
    }
    if payload.vocabulary.iter().any(|item| item.word.trim().is_empty()) {
        return AppError::validation("Từ vựng không được để trống.").into_response();
    }

    let repository = state.repository();
    let batch = chrono::Utc::now().timestamp_millis();

    let number = match payload.lesson.number {
        Some(number) => number,
        None => match repository.next_lesson_number(&scope).await {
            Ok(number) => number,
            Err(err) => return repo_error(err).into_response(),
        },
    };

    let vocabulary: Vec<VocabularyItem> = payload
        .vocabulary
        .into_iter()
        .enumerate()
        .map(|(idx, mut item)| {
            if item.id.trim().is_empty() {
                item.id = format!("custom-{batch}-{idx:03}");
            }
            item
        })
        .collect();

    let lesson = Lesson {
        id: if payload.lesson.id.trim().is_empty() {
            format!("lesson-{}", uuid::Uuid::new_v4())
        } else {
            payload.lesson.id
        },
        number,
        title: payload.lesson.title,
        description: if payload.lesson.description.trim().is_empty() {
            format!("{} từ mới", vocabulary.len())
        } else {
            payload.lesson.description
        },
    };

    match repository.save_lesson(&scope, &lesson, &vocabulary).await {
        Ok(target) => ok(SavedLessonResponse {
            lesson,
            vocabulary,
            saved_to: target.as_str(),
        }),
        Err(err) => repo_error(err).into_response(),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeletedLessonResponse {
    deleted: bool,
    removed_from: &'static str,
}

pub async fn remove(
    State(state): State<AppState>,
    Path(lesson_id): Path<String>,
    Query(query): Query<ScopeQuery>,
) -> Response {
    let scope = match parse_scope(&query.scope) {
        Ok(scope) => scope,
        Err(err) => return err.into_response(),
    };

    match state.repository().delete_lesson(&scope, &lesson_id).await {
        Ok(target) => ok(DeletedLessonResponse {
            deleted: true,
            removed_from: target.as_str(),
        }),
        Err(err) => repo_error(err).into_response(),
    }
}

pub async fn vocabulary(
    State(state): State<AppState>,
    Path(lesson_id): Path<String>,
) -> Response {
    match state.repository().vocabulary_for_lesson(&lesson_id).await {
        Ok(items) => ok(items),
        Err(err) => repo_error(err).into_response(),
    }
}

pub async fn quiz(State(state): State<AppState>, Path(lesson_id): Path<String>) -> Response {
    match state.repository().vocabulary_for_lesson(&lesson_id).await {
        Ok(mut items) => {
            study::shuffle(&mut items);
            ok(items)
        }
        Err(err) => repo_error(err).into_response(),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictationCheckRequest {
    item_id: String,
    answer: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DictationCheckResponse {
    correct: bool,
    expected: String,
}

pub async fn check_dictation(
    State(state): State<AppState>,
    Path(lesson_id): Path<String>,
    Json(payload): Json<DictationCheckRequest>,
) -> Response {
    let items = match state.repository().vocabulary_for_lesson(&lesson_id).await {
        Ok(items) => items,
        Err(err) => return repo_error(err).into_response(),
    };

    let Some(item) = items.into_iter().find(|item| item.id == payload.item_id) else {
        return AppError::not_found("Không tìm thấy từ vựng.").into_response();
    };

    ok(DictationCheckResponse {
        correct: study::check_answer(&item.example_zh, &payload.answer),
        expected: item.example_zh,
    })
}

pub async fn scope_vocabulary(
    State(state): State<AppState>,
    Path(scope): Path<String>,
) -> Response {
    let scope = match parse_scope(&scope) {
        Ok(scope) => scope,
        Err(err) => return err.into_response(),
    };

    match state.repository().vocabulary_for_scope(&scope).await {
        Ok(items) => ok(items),
        Err(err) => repo_error(err).into_response(),
    }
}
