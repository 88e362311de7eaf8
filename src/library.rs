//! Media library persistence and the access gate in front of it.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Outcome of an access check against the library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessStatus {
    /// Segments may be saved.
    Granted,
    /// Saving is not possible; the reason includes a remediation hint.
    Denied { reason: String },
}

/// Gate consulted before any segment is exported.
///
/// Resolving to `Granted` may involve work (creating the library directory
/// on first use); a session must not start on `Denied`.
#[async_trait]
pub trait AccessGate: Send + Sync {
    async fn check_or_request_access(&self) -> AccessStatus;
}

/// Errors raised while persisting a segment into the library.
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error("could not save segment into library at {}: {source}", path.display())]
    Save {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Destination directory finished segments are filed into.
#[derive(Debug, Clone)]
pub struct MediaLibrary {
    root: PathBuf,
}

impl MediaLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Get the library directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Move one finished segment from its scratch path into the library.
    ///
    /// Keeps the scratch file name, so repeated splits of the same source
    /// produce independent sets of files. Falls back to copy-and-remove when
    /// a rename crosses filesystems.
    pub fn save(&self, scratch_file: &Path) -> Result<PathBuf, LibraryError> {
        let file_name = scratch_file.file_name().ok_or_else(|| LibraryError::Save {
            path: self.root.clone(),
            source: std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("scratch path has no file name: {}", scratch_file.display()),
            ),
        })?;

        let dest = self.root.join(file_name);

        if std::fs::rename(scratch_file, &dest).is_err() {
            std::fs::copy(scratch_file, &dest).map_err(|e| LibraryError::Save {
                path: dest.clone(),
                source: e,
            })?;
            let _ = std::fs::remove_file(scratch_file);
        }

        tracing::debug!("Saved segment to {:?}", dest);
        Ok(dest)
    }
}

#[async_trait]
impl AccessGate for MediaLibrary {
    /// Grant access when the library directory exists and is writable,
    /// creating it on first use. Everything else is denied with a hint at
    /// what to fix.
    async fn check_or_request_access(&self) -> AccessStatus {
        if let Err(e) = std::fs::create_dir_all(&self.root) {
            return AccessStatus::Denied {
                reason: format!(
                    "could not create library directory {}: {}. \
                     Check the path and its permissions, or pass --library.",
                    self.root.display(),
                    e
                ),
            };
        }

        // A directory we cannot write into is as good as denied
        let probe = self.root.join(".vidsplit-access");
        match std::fs::write(&probe, b"") {
            Ok(()) => {
                let _ = std::fs::remove_file(&probe);
                AccessStatus::Granted
            }
            Err(e) => AccessStatus::Denied {
                reason: format!(
                    "library directory {} is not writable: {}. \
                     Check its permissions, or pass --library.",
                    self.root.display(),
                    e
                ),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_access_granted_for_writable_directory() {
        let dir = tempfile::tempdir().unwrap();
        let library = MediaLibrary::new(dir.path());
        assert_eq!(
            library.check_or_request_access().await,
            AccessStatus::Granted
        );
    }

    #[tokio::test]
    async fn test_access_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("new").join("library");
        let library = MediaLibrary::new(&root);
        assert_eq!(
            library.check_or_request_access().await,
            AccessStatus::Granted
        );
        assert!(root.is_dir());
    }

    #[tokio::test]
    async fn test_access_denied_when_root_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("occupied");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let library = MediaLibrary::new(&blocker);
        match library.check_or_request_access().await {
            AccessStatus::Denied { reason } => {
                assert!(reason.contains("occupied"));
            }
            AccessStatus::Granted => panic!("expected denial"),
        }
    }

    #[test]
    fn test_save_moves_file_into_library() {
        let scratch = tempfile::tempdir().unwrap();
        let lib_dir = tempfile::tempdir().unwrap();

        let segment = scratch.path().join("abc123.mp4");
        std::fs::write(&segment, b"segment bytes").unwrap();

        let library = MediaLibrary::new(lib_dir.path());
        let saved = library.save(&segment).unwrap();

        assert_eq!(saved, lib_dir.path().join("abc123.mp4"));
        assert!(saved.exists());
        assert!(!segment.exists());
    }

    #[test]
    fn test_save_missing_scratch_file_fails() {
        let lib_dir = tempfile::tempdir().unwrap();
        let library = MediaLibrary::new(lib_dir.path());
        let err = library.save(Path::new("/nonexistent/xyz.mp4")).unwrap_err();
        assert!(matches!(err, LibraryError::Save { .. }));
    }
}
