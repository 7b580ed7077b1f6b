use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("download directory missing or not writable: {0}")]
    DownloadDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Handle to one saved PDF on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadHandle {
    pub path: PathBuf,
    pub byte_len: u64,
}

/// Ensure the download directory exists; create if missing.
pub fn ensure_download_dir(dir: &Path) -> Result<(), DownloadError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| DownloadError::DownloadDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(DownloadError::DownloadDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| DownloadError::DownloadDir(e.to_string()))?;
    }
    // Basic writability probe: try creating a temp file.
    NamedTempFile::new_in(dir).map_err(|e| DownloadError::DownloadDir(e.to_string()))?;
    Ok(())
}

/// Owns the directory where generated PDFs land. Saves go through a
/// temp file then a rename, so a crash never leaves a partial PDF
/// under the final name.
#[derive(Debug, Clone)]
pub struct DownloadStore {
    dir: PathBuf,
}

impl DownloadStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn save(&self, filename: &str, bytes: &[u8]) -> Result<DownloadHandle, DownloadError> {
        ensure_download_dir(&self.dir)?;

        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(bytes)?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        // Replace an existing file under the same name.
        if target.exists() {
            fs::remove_file(&target)?;
        }
        tmp.persist(&target)
            .map_err(|e| DownloadError::Io(e.error))?;
        Ok(DownloadHandle {
            path: target,
            byte_len: bytes.len() as u64,
        })
    }

    /// Deletes a superseded download. A file already gone is fine;
    /// the user may have moved or removed it themselves.
    pub fn release(&self, path: &Path) -> Result<(), DownloadError> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(DownloadError::Io(err)),
        }
    }
}
