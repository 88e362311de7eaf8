//! Scratch directory for segment files awaiting persistence.

use crate::export::Container;
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use uuid::Uuid;

/// Process-private scratch directory.
///
/// Each exported segment is first written here under a freshly generated
/// UUID file name, then moved into the media library. The directory and
/// everything still in it is removed when the value is dropped, which in
/// practice means when the process winds down. Individual segment files are
/// never cleaned up per call.
pub struct ScratchDir {
    dir: TempDir,
}

impl ScratchDir {
    /// Create a new scratch directory.
    pub fn new() -> Result<Self> {
        let dir = TempDir::with_prefix("vidsplit-")
            .map_err(|e| Error::InvalidInput(format!("could not create scratch dir: {}", e)))?;
        Ok(Self { dir })
    }

    /// Get the scratch directory path.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Allocate a fresh path for one segment in the given container format.
    ///
    /// The file is not created; the path is unique per call.
    pub fn segment_path(&self, container: Container) -> PathBuf {
        self.dir
            .path()
            .join(format!("{}.{}", Uuid::new_v4(), container.extension()))
    }

    /// Remove the directory and its contents now instead of at drop.
    ///
    /// Best effort; an error means some contents may linger until the OS
    /// cleans the temp location.
    pub fn close(self) -> Result<()> {
        self.dir.close().map_err(Error::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_paths_are_unique() {
        let scratch = ScratchDir::new().unwrap();
        let a = scratch.segment_path(Container::Mp4);
        let b = scratch.segment_path(Container::Mp4);
        assert_ne!(a, b);
        assert!(a.starts_with(scratch.path()));
        assert_eq!(a.extension().unwrap(), "mp4");
    }

    #[test]
    fn test_container_extension_applied() {
        let scratch = ScratchDir::new().unwrap();
        let path = scratch.segment_path(Container::Mov);
        assert_eq!(path.extension().unwrap(), "mov");
    }

    #[test]
    fn test_close_removes_directory() {
        let scratch = ScratchDir::new().unwrap();
        let dir = scratch.path().to_path_buf();
        std::fs::write(dir.join("leftover.mp4"), b"x").unwrap();
        scratch.close().unwrap();
        assert!(!dir.exists());
    }
}
