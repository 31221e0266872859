//! Temporary files owned by a single upload.
//!
//! Both types delete their file when dropped, so every exit path from the pipeline
//! (success, early return, panic) releases local disk exactly once.

use std::io;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::fs::File;

/// Buffered upload: a private temp file plus an async handle to it.
pub struct ScratchFile {
    file: File,
    // Dropping this removes the file from disk.
    temp: NamedTempFile,
}

impl ScratchFile {
    /// Create `tubely-upload-*.mp4` inside `dir`.
    pub fn create_in(dir: &Path) -> io::Result<Self> {
        let temp = tempfile::Builder::new()
            .prefix("tubely-upload-")
            .suffix(".mp4")
            .tempfile_in(dir)?;
        let file = File::from_std(temp.as_file().try_clone()?);
        Ok(Self { file, temp })
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    pub fn file_mut(&mut self) -> &mut File {
        &mut self.file
    }
}

/// Guard for a path that some other process writes to (the remux output).
///
/// The file need not exist yet; a missing file on drop is not an error.
#[derive(Debug)]
pub struct ScratchPath {
    path: PathBuf,
}

impl ScratchPath {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchPath {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    path = %self.path.display(),
                    "Failed to remove scratch file"
                );
            }
        }
    }
}
