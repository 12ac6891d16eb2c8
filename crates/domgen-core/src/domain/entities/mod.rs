pub mod common;
pub mod domain_structure;

pub use crate::domain::DomainError;
pub use common::ClassName;
pub use domain_structure::{DomainObjectStructure, DomainStructure, PropertyDescriptor};
