use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use super::TeacherBackend;
use crate::errors::ServiceError;
use crate::teacher::Teacher;

/// JSON file-backed teacher collection.
///
/// The file holds a single array of teacher objects. Every save rewrites the
/// whole document through a sibling temp file followed by a rename, so readers
/// never observe a half-written array.
#[derive(Clone, Debug)]
pub struct JsonFileBackend {
    file_path: PathBuf,
    pretty: bool,
}

impl JsonFileBackend {
    /// Point the backend at `path`, creating its parent directory if needed.
    /// The file itself is not created until the first save.
    pub async fn new<P: Into<PathBuf>>(path: P, pretty: bool) -> Result<Self, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(ServiceError::persistence)?;
        }
        Ok(Self { file_path, pretty })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.file_path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.file_path.with_file_name(name)
    }
}

#[async_trait]
impl TeacherBackend for JsonFileBackend {
    async fn load(&self) -> Result<Vec<Teacher>, ServiceError> {
        let bytes = match fs::read(&self.file_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(ServiceError::persistence(e)),
        };
        // a zero-length file is what a crashed editor or `touch` leaves behind
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        serde_json::from_slice(&bytes)
            .map_err(|e| ServiceError::Persistence(format!("{}: {e}", self.file_path.display())))
    }

    async fn save(&self, teachers: &[Teacher]) -> Result<(), ServiceError> {
        let data = if self.pretty {
            serde_json::to_vec_pretty(teachers)
        } else {
            serde_json::to_vec(teachers)
        }
        .map_err(ServiceError::persistence)?;

        let tmp = self.tmp_path();
        fs::write(&tmp, data).await.map_err(ServiceError::persistence)?;
        fs::rename(&tmp, &self.file_path).await.map_err(ServiceError::persistence)?;
        debug!(path = %self.file_path.display(), count = teachers.len(), "teachers persisted");
        Ok(())
    }
}
