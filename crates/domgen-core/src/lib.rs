//! domgen Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain model, the property code generators and
//! the application layer for domgen, following hexagonal (ports and
//! adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           domgen-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │            (ScaffoldService)            │
//! │         Orchestrates Use Cases          │
//! └──────────┬───────────────────┬──────────┘
//!            │ dispatches        │ uses
//!            ▼                   ▼
//! ┌────────────────────┐ ┌──────────────────┐
//! │ GeneratorRegistry  │ │ Ports (Traits)   │
//! │ (one generator per │ │ Filesystem,      │
//! │  property type)    │ │ DomainLoader     │
//! └─────────┬──────────┘ └────────┬─────────┘
//!           │                     │ implemented by
//!           ▼                     ▼
//! ┌────────────────────┐ ┌──────────────────┐
//! │   Domain Layer     │ │ domgen-adapters  │
//! │ (DomainStructure,  │ │ (LocalFilesystem,│
//! │  Context, Stubs)   │ │  FileDomainLoader│
//! └────────────────────┘ └──────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use domgen_core::prelude::*;
//!
//! let domain = loader.load_structure()?;
//! let service = ScaffoldService::new(Box::new(filesystem), GeneratorRegistry::default());
//!
//! let request = ScaffoldRequest::new(
//!     ObjectFilter::new("App\\Domain\\*")?,
//!     StubSource::Path("stubs/mapper.stub".into()),
//!     |object| format!("src/{}Mapper.php", object.short_name()).into(),
//! );
//! let report = service.scaffold(&domain, &request)?;
//! ```

pub mod domain;

pub mod generation;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ObjectInspection, PropertyDecision, ScaffoldReport, ScaffoldRequest, ScaffoldService,
        StubSource,
        ports::{DomainStructureLoader, Filesystem},
    };
    pub use crate::domain::{
        ClassName, CodeBuilderContext, CodeConvention, DomainObjectStructure, DomainStructure,
        NamespaceDirectoryResolver, NamespaceRoot, ObjectFilter, ObjectKind, PropertyDescriptor,
        PropertyType, Replacements,
    };
    pub use crate::error::{DomgenError, DomgenResult};
    pub use crate::generation::{
        FileStorageConfig, GeneratorConfig, GeneratorRegistry, PropertyCodeGenerator,
    };
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
