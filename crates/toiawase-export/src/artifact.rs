use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempPath;

/// A temporary export file on local disk.
///
/// The file is removed when the artifact is dropped, on success and error
/// paths alike. A failed removal is logged and otherwise ignored.
#[derive(Debug)]
pub struct ExportArtifact {
    location: PathBuf,
    temp: Option<TempPath>,
}

impl ExportArtifact {
    pub(crate) fn new(temp: TempPath) -> Self {
        Self {
            location: temp.to_path_buf(),
            temp: Some(temp),
        }
    }

    pub fn path(&self) -> &Path {
        &self.location
    }

    pub async fn open(&self) -> io::Result<tokio::fs::File> {
        tokio::fs::File::open(&self.location).await
    }

    /// Remove the file now and report the outcome instead of logging it.
    pub fn cleanup(mut self) -> io::Result<()> {
        match self.temp.take() {
            Some(temp) => temp.close(),
            None => Ok(()),
        }
    }
}

impl Drop for ExportArtifact {
    fn drop(&mut self) {
        if let Some(temp) = self.temp.take() {
            match temp.close() {
                Ok(()) => {
                    tracing::debug!(path = %self.location.display(), "Removed export artifact");
                }
                Err(e) => {
                    tracing::warn!(
                        path = %self.location.display(),
                        error = %e,
                        "Failed to remove export artifact"
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let temp = tempfile::NamedTempFile::new_in(dir.path()).unwrap().into_temp_path();
        let artifact = ExportArtifact::new(temp);
        let path = artifact.path().to_path_buf();
        assert!(path.exists());

        drop(artifact);
        assert!(!path.exists());
    }

    #[test]
    fn test_drop_tolerates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let temp = tempfile::NamedTempFile::new_in(dir.path()).unwrap().into_temp_path();
        let artifact = ExportArtifact::new(temp);
        std::fs::remove_file(artifact.path()).unwrap();

        // must not panic
        drop(artifact);
    }

    #[test]
    fn test_cleanup_reports_errors() {
        let dir = tempfile::tempdir().unwrap();
        let temp = tempfile::NamedTempFile::new_in(dir.path()).unwrap().into_temp_path();
        let artifact = ExportArtifact::new(temp);
        std::fs::remove_file(artifact.path()).unwrap();

        assert!(artifact.cleanup().is_err());
    }
}
