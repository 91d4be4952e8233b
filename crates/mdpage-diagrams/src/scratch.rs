//! Scratch directory lifecycle for diagram processing.

use std::io;
use std::path::Path;

use tempfile::TempDir;

/// Uniquely named temporary directory for intermediate artifacts.
///
/// Acquired once per [`MermaidSubstituter`](crate::MermaidSubstituter) and
/// released by an explicit, idempotent [`release`](Scratch::release) call.
/// Deletion failures are logged, never returned: a leaked scratch directory
/// is a leak, not a correctness bug.
pub(crate) struct Scratch {
    dir: Option<TempDir>,
}

impl Scratch {
    /// Create a new scratch directory.
    pub(crate) fn acquire() -> io::Result<Self> {
        let dir = tempfile::tempdir()?;
        tracing::debug!(path = %dir.path().display(), "Scratch directory created");
        Ok(Self { dir: Some(dir) })
    }

    /// Path to the scratch directory, or `None` after release.
    pub(crate) fn path(&self) -> Option<&Path> {
        self.dir.as_ref().map(TempDir::path)
    }

    /// Recursively delete the scratch directory.
    ///
    /// Safe to call multiple times; calls after the first are no-ops.
    pub(crate) fn release(&mut self) {
        if let Some(dir) = self.dir.take() {
            let path = dir.path().to_path_buf();
            if let Err(e) = dir.close() {
                tracing::warn!(path = %path.display(), error = %e, "Failed to remove scratch directory");
            } else {
                tracing::debug!(path = %path.display(), "Scratch directory removed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_creates_directory() {
        let scratch = Scratch::acquire().unwrap();
        assert!(scratch.path().unwrap().is_dir());
    }

    #[test]
    fn test_release_removes_directory() {
        let mut scratch = Scratch::acquire().unwrap();
        let path = scratch.path().unwrap().to_path_buf();
        scratch.release();
        assert!(!path.exists());
        assert!(scratch.path().is_none());
    }

    #[test]
    fn test_release_is_idempotent() {
        let mut scratch = Scratch::acquire().unwrap();
        scratch.release();
        scratch.release();
        assert!(scratch.path().is_none());
    }
}
