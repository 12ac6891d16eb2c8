//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use domgen_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{DomgenError, DomgenResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> DomgenResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> DomgenResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn read_file(&self, path: &Path) -> DomgenResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }
}

pub(crate) fn map_io_error(path: &Path, e: io::Error, operation: &str) -> DomgenError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_then_read() {
        let temp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let dir = temp.path().join("src/Persistence");
        let file = dir.join("InvoiceMapper.php");

        fs.create_dir_all(&dir).unwrap();
        fs.write_file(&file, "<?php").unwrap();

        assert!(fs.exists(&file));
        assert_eq!(fs.read_file(&file).unwrap(), "<?php");
    }

    #[test]
    fn missing_file_reports_path() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.stub");

        let err = LocalFilesystem::new().read_file(&missing).unwrap_err();

        match err {
            DomgenError::Application(ApplicationError::FilesystemError { path, reason }) => {
                assert_eq!(path, missing);
                assert!(reason.starts_with("Failed to read file"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
