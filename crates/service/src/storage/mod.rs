//! Persistence backends for the teacher store.
//!
//! A backend only knows how to read the whole collection and overwrite the
//! whole collection; id assignment, validation and locking live in
//! [`crate::teacher::TeacherStore`].

use async_trait::async_trait;

use crate::errors::ServiceError;
use crate::teacher::Teacher;

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileBackend;
pub use memory::InMemoryBackend;

/// Whole-value read/replace over the persisted teacher array.
/// Implementations can be file-backed, in-memory, or remote blobs.
#[async_trait]
pub trait TeacherBackend: Send + Sync {
    /// Current collection in persisted order. An absent document is an empty collection.
    async fn load(&self) -> Result<Vec<Teacher>, ServiceError>;
    /// Replace the persisted collection with `teachers`.
    async fn save(&self, teachers: &[Teacher]) -> Result<(), ServiceError>;
}
