use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;

use zhongwen_backend_rust::cache::LocalCache;
use zhongwen_backend_rust::create_app_with;
use zhongwen_backend_rust::services::enrichment::Enricher;
use zhongwen_backend_rust::services::llm_provider::{LlmConfig, LlmProvider};
use zhongwen_backend_rust::services::repository::LessonRepository;
use zhongwen_backend_rust::state::AppState;

/// App with no remote store, no AI credentials and a throwaway cache
/// directory, so tests never touch the network or each other's data.
pub fn create_test_app() -> Router {
    let repository = LessonRepository::new(None, Arc::new(LocalCache::new(unique_cache_dir())));
    let enricher = Enricher::new(LlmProvider::new(LlmConfig::disabled()));
    create_app_with(AppState::new(Arc::new(repository), Arc::new(enricher)))
}

fn unique_cache_dir() -> PathBuf {
    std::env::temp_dir().join(format!("zhongwen-test-{}", uuid::Uuid::new_v4()))
}
