//! Environment/runtime helpers
//!
//! Sanity checks run once at startup, after the store is opened.

use std::path::Path;

use tracing::{info, warn};

/// Check the configured data file path. A directory there is an error; a
/// missing file is fine (it reads as an empty collection) and is only reported.
pub async fn ensure_env(data_file: &Path) -> anyhow::Result<()> {
    match tokio::fs::metadata(data_file).await {
        Ok(meta) if meta.is_dir() => {
            return Err(anyhow::anyhow!("{} is a directory, expected a JSON file", data_file.display()));
        }
        Ok(_) => info!(path = %data_file.display(), "using existing data file"),
        Err(_) => warn!(path = %data_file.display(), "data file not found; starting with an empty collection"),
    }
    Ok(())
}
