// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for domgen.
//!
//! This module contains the domain model the generators operate over, plus
//! the pure text machinery (context accumulation, stub substitution, naming).
//! All I/O is handled via ports defined in the application layer.
//!
//! - **No I/O**: No filesystem, network, or external calls
//! - **Immutable model**: `DomainStructure` is read-only once built
//! - **Deterministic**: same model in, same text out
//!
// Public API - what the world sees
pub mod context;
pub mod entities;
pub mod error;
pub mod filter;
pub mod naming;
pub mod stub;
pub mod value_objects;

// Re-exports for convenience
pub use context::{CodeBuilderContext, ConstructorParameter};
pub use entities::{
    ClassName, DomainObjectStructure, DomainStructure, PropertyDescriptor,
    common::NAMESPACE_SEPARATOR,
};
pub use error::{DomainError, ErrorCategory};
pub use filter::ObjectFilter;
pub use naming::{CodeConvention, NamespaceDirectoryResolver, NamespaceRoot};
pub use stub::{Replacements, StubRenderer};
pub use value_objects::{
    ColourType, FileType, GeoType, ObjectKind, PropertyType, ScalarType, TemporalType, WebType,
};
