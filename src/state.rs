use std::sync::Arc;
use std::time::{Instant, SystemTime};

use crate::services::enrichment::Enricher;
use crate::services::repository::LessonRepository;

#[derive(Clone)]
pub struct AppState {
    started_at: Instant,
    started_at_system: SystemTime,
    repository: Arc<LessonRepository>,
    enricher: Arc<Enricher>,
}

impl AppState {
    pub fn new(repository: Arc<LessonRepository>, enricher: Arc<Enricher>) -> Self {
        Self {
            started_at: Instant::now(),
            started_at_system: SystemTime::now(),
            repository,
            enricher,
        }
    }

    pub fn from_env() -> Self {
        Self::new(
            Arc::new(LessonRepository::from_env()),
            Arc::new(Enricher::from_env()),
        )
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    pub fn started_at_system(&self) -> SystemTime {
        self.started_at_system
    }

    pub fn repository(&self) -> Arc<LessonRepository> {
        Arc::clone(&self.repository)
    }

    pub fn enricher(&self) -> Arc<Enricher> {
        Arc::clone(&self.enricher)
    }
}
