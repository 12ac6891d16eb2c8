//! Infrastructure adapters for domgen.
//!
//! This crate implements the ports defined in `domgen_core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod builtin_stubs;
pub mod domain_loader;
pub mod filesystem;
pub mod stub_library;

// Re-export commonly used adapters
pub use domain_loader::{FileDomainLoader, MemoryDomainLoader};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use stub_library::{StubLibrary, StubOrigin};
