use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::TeacherBackend;
use crate::errors::ServiceError;
use crate::teacher::Teacher;

/// Vec-backed backend for tests and ephemeral runs.
#[derive(Default)]
pub struct InMemoryBackend {
    records: RwLock<Vec<Teacher>>,
    fail_saves: AtomicBool,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an already-persisted collection.
    pub fn with_records(records: Vec<Teacher>) -> Self {
        Self { records: RwLock::new(records), fail_saves: AtomicBool::new(false) }
    }

    /// Make every subsequent save fail with a persistence error.
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    pub async fn snapshot(&self) -> Vec<Teacher> {
        self.records.read().await.clone()
    }
}

#[async_trait]
impl TeacherBackend for InMemoryBackend {
    async fn load(&self) -> Result<Vec<Teacher>, ServiceError> {
        Ok(self.records.read().await.clone())
    }

    async fn save(&self, teachers: &[Teacher]) -> Result<(), ServiceError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(ServiceError::Persistence("simulated write failure".into()));
        }
        *self.records.write().await = teachers.to_vec();
        Ok(())
    }
}
