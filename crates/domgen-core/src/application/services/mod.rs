//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer, the generator registry and the
//! ports to accomplish use cases like "scaffold a mapper for every entity".

pub mod scaffold_service;

pub use scaffold_service::{
    ObjectInspection, PropertyDecision, ScaffoldReport, ScaffoldRequest, ScaffoldService,
    StubSource,
};
