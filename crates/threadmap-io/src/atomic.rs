//! Crash-safe file writes.
//!
//! Content is written to a sibling temporary file (`{name}.{ext}.tmp`),
//! flushed, and renamed over the target. A failed write removes the
//! temporary file and leaves any existing target untouched.

use crate::error::{Error, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};

/// Atomically replace the file at `path` with `contents`.
///
/// # Errors
///
/// Returns [`Error::Io`] if the temporary file cannot be created or
/// written, or if the rename fails (for example when `path` is a directory).
pub async fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let temp_path = temp_path_for(path);

    let result = match write_temp_file(&temp_path, contents).await {
        Ok(()) => tokio::fs::rename(&temp_path, path).await.map_err(Error::from),
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        // Best-effort cleanup
        let _ = tokio::fs::remove_file(&temp_path).await;
        tracing::debug!(path = %path.display(), error = %e, "Atomic write failed");
        return Err(e);
    }
    Ok(())
}

/// Temporary path used while writing `path`.
pub fn temp_path_for(path: &Path) -> PathBuf {
    let extension = match path.extension() {
        Some(ext) => {
            let mut ext = ext.to_os_string();
            ext.push(".tmp");
            ext
        }
        None => OsString::from("tmp"),
    };
    path.with_extension(extension)
}

async fn write_temp_file(temp_path: &Path, contents: &[u8]) -> Result<()> {
    let file = File::create(temp_path).await?;
    let mut writer = BufWriter::new(file);
    writer.write_all(contents).await?;
    writer.flush().await?;
    Ok(())
}
