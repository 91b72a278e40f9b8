pub mod keys;

use std::fs;
use std::io;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::models::{Lesson, Scope, VocabularyItem};

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache IO failed: {0}")]
    Io(#[from] io::Error),
    #[error("cache serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// File-backed key-value persistence, one JSON document per key.
///
/// Best-effort fallback storage, never the system of record when a remote
/// store is configured. Reads treat a missing or unparsable file as an empty
/// collection; writes surface their failure so callers can decide whether to
/// warn the user.
#[derive(Debug, Clone)]
pub struct LocalCache {
    root: PathBuf,
}

impl LocalCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn from_env() -> Self {
        let root = std::env::var("ZW_DATA_DIR")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                dirs::data_local_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("com.zhongwen.app")
            });
        Self::new(root)
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    pub fn load_lessons(&self, scope: &Scope) -> Vec<Lesson> {
        self.read_value(&keys::lessons_key(scope)).unwrap_or_default()
    }

    pub fn save_lessons(&self, scope: &Scope, lessons: &[Lesson]) -> Result<(), CacheError> {
        self.write_value(&keys::lessons_key(scope), &lessons)
    }

    pub fn load_vocabulary(&self, lesson_id: &str) -> Vec<VocabularyItem> {
        self.read_value(&keys::vocabulary_key(lesson_id))
            .unwrap_or_default()
    }

    pub fn save_vocabulary(
        &self,
        lesson_id: &str,
        items: &[VocabularyItem],
    ) -> Result<(), CacheError> {
        self.write_value(&keys::vocabulary_key(lesson_id), &items)
    }

    /// Removes the lesson from the scope's list (read-filter-write) and
    /// drops its vocabulary key entirely.
    pub fn delete_lesson(&self, scope: &Scope, lesson_id: &str) -> Result<(), CacheError> {
        let remaining: Vec<Lesson> = self
            .load_lessons(scope)
            .into_iter()
            .filter(|lesson| lesson.id != lesson_id)
            .collect();
        self.save_lessons(scope, &remaining)?;
        self.remove_key(&keys::vocabulary_key(lesson_id))?;
        Ok(())
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    fn read_value<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.key_path(key);
        let payload = fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&payload) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(key, error = %err, "discarding unparsable cache entry");
                None
            }
        }
    }

    fn write_value<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        fs::create_dir_all(&self.root)?;
        let payload = serde_json::to_string(value)?;
        fs::write(self.key_path(key), payload)?;
        Ok(())
    }

    fn remove_key(&self, key: &str) -> Result<(), CacheError> {
        match fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_lesson(id: &str, number: i64) -> Lesson {
        Lesson {
            id: id.to_string(),
            number,
            title: format!("Bài {number}"),
            description: String::new(),
        }
    }

    #[test]
    fn missing_key_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let cache = LocalCache::new(dir.path());
        let scope: Scope = "hsk1".parse().unwrap();
        assert!(cache.load_lessons(&scope).is_empty());
        assert!(cache.load_vocabulary("nope").is_empty());
    }

    #[test]
    fn lessons_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let cache = LocalCache::new(dir.path());
        let scope: Scope = "hsk2".parse().unwrap();
        let lessons = vec![sample_lesson("a", 1), sample_lesson("b", 2)];

        cache.save_lessons(&scope, &lessons).unwrap();
        assert_eq!(cache.load_lessons(&scope), lessons);
    }

    #[test]
    fn unparsable_entry_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let cache = LocalCache::new(dir.path());
        let scope: Scope = "hsk1".parse().unwrap();

        fs::create_dir_all(dir.path()).unwrap();
        fs::write(
            dir.path().join("zw_v2_hsk1_lessons.json"),
            "{not valid json",
        )
        .unwrap();

        assert!(cache.load_lessons(&scope).is_empty());
    }

    #[test]
    fn delete_lesson_filters_list_and_drops_vocabulary() {
        let dir = tempfile::tempdir().unwrap();
        let cache = LocalCache::new(dir.path());
        let scope: Scope = "hsk1".parse().unwrap();

        cache
            .save_lessons(&scope, &[sample_lesson("keep", 1), sample_lesson("drop", 2)])
            .unwrap();
        cache
            .save_vocabulary(
                "drop",
                &[VocabularyItem {
                    id: "v1".into(),
                    word: "水".into(),
                    pinyin: "shuǐ".into(),
                    part_of_speech: String::new(),
                    definition_vi: String::new(),
                    definition_en: String::new(),
                    example_zh: String::new(),
                    example_vi: String::new(),
                    image_url: None,
                }],
            )
            .unwrap();

        cache.delete_lesson(&scope, "drop").unwrap();

        let remaining = cache.load_lessons(&scope);
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, "keep");
        assert!(cache.load_vocabulary("drop").is_empty());
    }

    #[test]
    fn delete_of_unknown_lesson_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let cache = LocalCache::new(dir.path());
        let scope: Scope = "hsk1".parse().unwrap();
        cache.delete_lesson(&scope, "ghost").unwrap();
        assert!(cache.load_lessons(&scope).is_empty());
    }
}
