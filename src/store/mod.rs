pub mod rows;

use std::time::Duration;

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{Lesson, Scope, VocabularyItem};
use crate::store::rows::{LessonRow, VocabularyRow};

const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("JSON decode failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("row count missing from response")]
    MissingCount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreCounts {
    pub lessons: i64,
    pub words: i64,
}

/// Client for the hosted table service (PostgREST dialect). Constructed only
/// when both connection parameters are present; without it the repository
/// routes every operation to the local cache.
#[derive(Clone)]
pub struct RemoteStore {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl RemoteStore {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let timeout = Duration::from_millis(env_u64("STORE_TIMEOUT").unwrap_or(DEFAULT_TIMEOUT_MS));
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        }
    }

    pub fn from_env() -> Option<Self> {
        from_parts(env_string("STORE_URL"), env_string("STORE_API_KEY"))
    }

    pub async fn upsert_lesson(&self, scope: &Scope, lesson: &Lesson) -> Result<(), StoreError> {
        let rows = [LessonRow::from_lesson(scope, lesson)];
        let request = self
            .client
            .post(self.table_url("lessons"))
            .query(&[("on_conflict", "id")])
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&rows);
        self.send(request).await?;
        Ok(())
    }

    /// Replaces a lesson's vocabulary set: upsert by the natural key
    /// `(lesson_id, word)`, then delete rows whose word is no longer in the
    /// set. At no point does the lesson sit with zero vocabulary.
    pub async fn replace_vocabulary(
        &self,
        lesson_id: &str,
        items: &[VocabularyItem],
    ) -> Result<(), StoreError> {
        if items.is_empty() {
            return self.delete_vocabulary_rows(lesson_id).await;
        }

        let rows: Vec<VocabularyRow> = items
            .iter()
            .map(|item| VocabularyRow::from_item(lesson_id, item))
            .collect();
        let upsert = self
            .client
            .post(self.table_url("vocabulary"))
            .query(&[("on_conflict", "lesson_id,word")])
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&rows);
        self.send(upsert).await?;

        let delete_stale = self
            .client
            .delete(self.table_url("vocabulary"))
            .query(&[
                ("lesson_id", format!("eq.{lesson_id}")),
                ("word", stale_words_filter(items)),
            ]);
        self.send(delete_stale).await?;
        Ok(())
    }

    pub async fn query_lessons_by_scope(&self, scope: &Scope) -> Result<Vec<Lesson>, StoreError> {
        let request = self.client.get(self.table_url("lessons")).query(&[
            ("level", format!("eq.{}", scope.key())),
            ("order", "number.asc".to_string()),
        ]);
        let rows: Vec<LessonRow> = self.fetch_json(request).await?;
        Ok(rows.into_iter().map(Lesson::from).collect())
    }

    pub async fn query_vocabulary_by_lesson(
        &self,
        lesson_id: &str,
    ) -> Result<Vec<VocabularyItem>, StoreError> {
        let request = self.client.get(self.table_url("vocabulary")).query(&[
            ("lesson_id", format!("eq.{lesson_id}")),
            ("order", "id.asc".to_string()),
        ]);
        let rows: Vec<VocabularyRow> = self.fetch_json(request).await?;
        Ok(rows.into_iter().map(VocabularyItem::from).collect())
    }

    /// Vocabulary rows first, then the lesson row. A failure between the two
    /// requests can leave an empty lesson behind, never dangling vocabulary.
    pub async fn delete_lesson_cascade(&self, lesson_id: &str) -> Result<(), StoreError> {
        self.delete_vocabulary_rows(lesson_id).await?;
        let request = self
            .client
            .delete(self.table_url("lessons"))
            .query(&[("id", format!("eq.{lesson_id}"))]);
        self.send(request).await?;
        Ok(())
    }

    /// Two independent count queries; the pair may be mutually inconsistent
    /// under concurrent writes, which is acceptable for a display statistic.
    pub async fn count_all(&self) -> Result<StoreCounts, StoreError> {
        let lessons = self.count_table("lessons").await?;
        let words = self.count_table("vocabulary").await?;
        Ok(StoreCounts { lessons, words })
    }

    async fn delete_vocabulary_rows(&self, lesson_id: &str) -> Result<(), StoreError> {
        let request = self
            .client
            .delete(self.table_url("vocabulary"))
            .query(&[("lesson_id", format!("eq.{lesson_id}"))]);
        self.send(request).await?;
        Ok(())
    }

    async fn count_table(&self, table: &str) -> Result<i64, StoreError> {
        let request = self
            .client
            .get(self.table_url(table))
            .query(&[("select", "id")])
            .header("Prefer", "count=exact")
            .header("Range", "0-0");
        let response = self.send(request).await?;
        response
            .headers()
            .get("content-range")
            .and_then(|value| value.to_str().ok())
            .and_then(parse_content_range_total)
            .ok_or(StoreError::MissingCount)
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, StoreError> {
        let response = self.send(request).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, StoreError> {
        let response = request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::HttpStatus { status, body });
        }
        Ok(response)
    }
}

fn from_parts(url: Option<String>, api_key: Option<String>) -> Option<RemoteStore> {
    match (url, api_key) {
        (Some(url), Some(key)) => Some(RemoteStore::new(url, key)),
        _ => None,
    }
}

// PostgREST `in` list with quoted values. Words never contain commas (the
// tokenizer splits on them); embedded double quotes are stripped rather than
// escaped since they cannot appear in dictionary headwords.
fn stale_words_filter(items: &[VocabularyItem]) -> String {
    let quoted: Vec<String> = items
        .iter()
        .map(|item| format!("\"{}\"", item.word.replace('"', "")))
        .collect();
    format!("not.in.({})", quoted.join(","))
}

// Content-Range arrives as `0-0/57` or `*/0`; the total sits after the slash.
fn parse_content_range_total(raw: &str) -> Option<i64> {
    let total = raw.rsplit('/').next()?;
    total.trim().parse().ok()
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_u64(key: &str) -> Option<u64> {
    env_string(key)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_both_connection_parameters() {
        assert!(from_parts(None, None).is_none());
        assert!(from_parts(Some("https://db.example.com".into()), None).is_none());
        assert!(from_parts(None, Some("key".into())).is_none());
        assert!(from_parts(
            Some("https://db.example.com/".into()),
            Some("key".into())
        )
        .is_some());
    }

    #[test]
    fn table_url_trims_trailing_slash() {
        let store = RemoteStore::new("https://db.example.com/", "key");
        assert_eq!(
            store.table_url("lessons"),
            "https://db.example.com/rest/v1/lessons"
        );
    }

    #[test]
    fn content_range_totals() {
        assert_eq!(parse_content_range_total("0-0/57"), Some(57));
        assert_eq!(parse_content_range_total("*/0"), Some(0));
        assert_eq!(parse_content_range_total("*/*"), None);
        assert_eq!(parse_content_range_total("garbage"), None);
    }

    #[test]
    fn stale_filter_quotes_each_word() {
        let items = vec![
            VocabularyItem {
                id: "1".into(),
                word: "你好".into(),
                pinyin: String::new(),
                part_of_speech: String::new(),
                definition_vi: String::new(),
                definition_en: String::new(),
                example_zh: String::new(),
                example_vi: String::new(),
                image_url: None,
            },
            VocabularyItem {
                id: "2".into(),
                word: "谢\"谢".into(),
                pinyin: String::new(),
                part_of_speech: String::new(),
                definition_vi: String::new(),
                definition_en: String::new(),
                example_zh: String::new(),
                example_vi: String::new(),
                image_url: None,
            },
        ];
        assert_eq!(stale_words_filter(&items), "not.in.(\"你好\",\"谢谢\")");
    }
}
