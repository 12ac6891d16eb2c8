//! Application layer for domgen.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ScaffoldService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer and the generator
//! registry but contains no generation rules itself.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    ObjectInspection, PropertyDecision, ScaffoldReport, ScaffoldRequest, ScaffoldService,
    StubSource,
};

// Re-export port traits (for adapter implementation)
pub use ports::{DomainStructureLoader, Filesystem};

pub use error::ApplicationError;
