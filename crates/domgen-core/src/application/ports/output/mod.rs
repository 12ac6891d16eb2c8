//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `domgen-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::DomainStructure;
use crate::error::DomgenResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `domgen_adapters::filesystem::LocalFilesystem` (production)
/// - `domgen_adapters::filesystem::MemoryFilesystem` (testing)
///
/// Failures are reported as `ApplicationError::FilesystemError` carrying the
/// offending path.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> DomgenResult<()>;

    /// Write content to a file, replacing any existing content.
    fn write_file(&self, path: &Path, content: &str) -> DomgenResult<()>;

    /// Read a whole file as UTF-8.
    fn read_file(&self, path: &Path) -> DomgenResult<String>;
}

/// Port for reading the domain model.
///
/// Implemented by:
/// - `domgen_adapters::domain_loader::FileDomainLoader` (TOML/JSON descriptions)
/// - `domgen_adapters::domain_loader::MemoryDomainLoader` (prebuilt structures)
#[cfg_attr(test, mockall::automock)]
pub trait DomainStructureLoader {
    /// Build the domain structure. Called once per invocation.
    fn load_structure(&self) -> DomgenResult<DomainStructure>;
}
