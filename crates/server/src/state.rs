use service::TeacherStore;

use crate::errors::StatusPolicy;

/// Shared handler state. Cheap to clone: the store is `Arc`-backed.
#[derive(Clone)]
pub struct AppState {
    pub store: TeacherStore,
    pub status_policy: StatusPolicy,
}

impl AppState {
    pub fn new(store: TeacherStore, status_policy: StatusPolicy) -> Self {
        Self { store, status_policy }
    }
}
