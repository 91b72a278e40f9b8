use std::sync::Arc;

use futures::future::try_join_all;
use serde::Serialize;
use thiserror::Error;

use crate::cache::{CacheError, LocalCache};
use crate::models::{Lesson, Scope, VocabularyItem};
use crate::seed;
use crate::store::{RemoteStore, StoreError};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("curated lesson {0} is read-only")]
    StaticLesson(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// Which persistence path accepted a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistTarget {
    Remote,
    LocalCache,
}

impl PersistTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            PersistTarget::Remote => "remote",
            PersistTarget::LocalCache => "localCache",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStats {
    pub total_lessons: i64,
    pub total_words: i64,
}

/// Single entry point for lesson and vocabulary access. Stateless: every
/// call recomputes from static seed data plus whichever of the remote store
/// and the local cache is in play.
///
/// Routing rules: the remote store is used whenever configured; writes fall
/// back to the local cache when the remote write fails; reads never fall
/// back (a remote read error surfaces to the caller).
pub struct LessonRepository {
    store: Option<Arc<RemoteStore>>,
    cache: Arc<LocalCache>,
}

impl LessonRepository {
    pub fn new(store: Option<Arc<RemoteStore>>, cache: Arc<LocalCache>) -> Self {
        Self { store, cache }
    }

    pub fn from_env() -> Self {
        let store = RemoteStore::from_env().map(Arc::new);
        let cache = Arc::new(LocalCache::from_env());
        match &store {
            Some(_) => tracing::info!("remote store configured, local cache on standby"),
            None => tracing::info!(cache_dir = %cache.root().display(), "remote store not configured, using local cache"),
        }
        Self::new(store, cache)
    }

    pub fn storage_mode(&self) -> &'static str {
        if self.store.is_some() {
            "remote"
        } else {
            "local"
        }
    }

    /// Static seed lessons for the scope concatenated with dynamic lessons,
    /// stable-sorted ascending by `number` so equal numbers keep insertion
    /// order.
    pub async fn lessons_for_scope(&self, scope: &Scope) -> Result<Vec<Lesson>, RepoError> {
        let mut lessons = seed::static_lessons(scope);
        match &self.store {
            Some(store) => lessons.extend(store.query_lessons_by_scope(scope).await?),
            None => lessons.extend(self.cache.load_lessons(scope)),
        }
        lessons.sort_by_key(|lesson| lesson.number);
        Ok(lessons)
    }

    /// A static lesson id resolves to the built-in list verbatim and is
    /// never merged with dynamic rows sharing the id.
    pub async fn vocabulary_for_lesson(
        &self,
        lesson_id: &str,
    ) -> Result<Vec<VocabularyItem>, RepoError> {
        if let Some(items) = seed::static_vocabulary(lesson_id) {
            return Ok(items);
        }
        match &self.store {
            Some(store) => Ok(store.query_vocabulary_by_lesson(lesson_id).await?),
            None => Ok(self.cache.load_vocabulary(lesson_id)),
        }
    }

    /// Per-lesson vocabulary fetched in parallel and joined; a single
    /// failure discards the whole combined result.
    pub async fn vocabulary_for_scope(
        &self,
        scope: &Scope,
    ) -> Result<Vec<VocabularyItem>, RepoError> {
        let lessons = self.lessons_for_scope(scope).await?;
        let fetches = lessons
            .iter()
            .map(|lesson| self.vocabulary_for_lesson(&lesson.id));
        let results = try_join_all(fetches).await?;
        Ok(results.into_iter().flatten().collect())
    }

    /// Attempts the remote store first; a failed remote write is logged and
    /// retried against the local cache. The call reports success if either
    /// path accepted the write, and which one did.
    pub async fn save_lesson(
        &self,
        scope: &Scope,
        lesson: &Lesson,
        vocabulary: &[VocabularyItem],
    ) -> Result<PersistTarget, RepoError> {
        if seed::is_static_lesson(&lesson.id) {
            return Err(RepoError::StaticLesson(lesson.id.clone()));
        }

        if let Some(store) = &self.store {
            match save_remote(store, scope, lesson, vocabulary).await {
                Ok(()) => return Ok(PersistTarget::Remote),
                Err(err) => {
                    tracing::warn!(error = %err, lesson_id = %lesson.id, "remote save failed, falling back to local cache");
                }
            }
        }

        self.save_local(scope, lesson, vocabulary)?;
        Ok(PersistTarget::LocalCache)
    }

    /// Mirrors `save_lesson`'s attempt-with-fallback.
    pub async fn delete_lesson(
        &self,
        scope: &Scope,
        lesson_id: &str,
    ) -> Result<PersistTarget, RepoError> {
        if seed::is_static_lesson(lesson_id) {
            return Err(RepoError::StaticLesson(lesson_id.to_string()));
        }

        if let Some(store) = &self.store {
            match store.delete_lesson_cascade(lesson_id).await {
                Ok(()) => return Ok(PersistTarget::Remote),
                Err(err) => {
                    tracing::warn!(error = %err, lesson_id, "remote delete failed, falling back to local cache");
                }
            }
        }

        self.cache.delete_lesson(scope, lesson_id)?;
        Ok(PersistTarget::LocalCache)
    }

    /// Pass-through to the remote count queries; zeros when unconfigured.
    pub async fn global_stats(&self) -> Result<GlobalStats, RepoError> {
        match &self.store {
            Some(store) => {
                let counts = store.count_all().await?;
                Ok(GlobalStats {
                    total_lessons: counts.lessons,
                    total_words: counts.words,
                })
            }
            None => Ok(GlobalStats {
                total_lessons: 0,
                total_words: 0,
            }),
        }
    }

    pub async fn next_lesson_number(&self, scope: &Scope) -> Result<i64, RepoError> {
        let lessons = self.lessons_for_scope(scope).await?;
        Ok(lessons
            .iter()
            .map(|lesson| lesson.number)
            .max()
            .unwrap_or(0)
            + 1)
    }

    fn save_local(
        &self,
        scope: &Scope,
        lesson: &Lesson,
        vocabulary: &[VocabularyItem],
    ) -> Result<(), CacheError> {
        let mut lessons = self.cache.load_lessons(scope);
        match lessons.iter_mut().find(|l| l.id == lesson.id) {
            Some(slot) => *slot = lesson.clone(),
            None => lessons.push(lesson.clone()),
        }
        lessons.sort_by_key(|l| l.number);
        self.cache.save_lessons(scope, &lessons)?;
        self.cache.save_vocabulary(&lesson.id, vocabulary)?;
        Ok(())
    }
}

async fn save_remote(
    store: &RemoteStore,
    scope: &Scope,
    lesson: &Lesson,
    vocabulary: &[VocabularyItem],
) -> Result<(), StoreError> {
    store.upsert_lesson(scope, lesson).await?;
    store.replace_vocabulary(&lesson.id, vocabulary).await?;
    Ok(())
}
