// ============================================================================
// domain/error.rs - DOMAIN MODEL AND DISPATCH ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (reported after the run aborts)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Model Errors
    // ========================================================================
    #[error("Invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("Domain object '{name}' is defined more than once")]
    DuplicateObject { name: String },

    #[error("Property '{property}' is defined more than once on '{object}'")]
    DuplicateProperty { object: String, property: String },

    #[error("Invalid property type '{value}': {reason}")]
    InvalidPropertyType { value: String, reason: String },

    #[error("Invalid object filter '{pattern}': {reason}")]
    InvalidFilter { pattern: String, reason: String },

    // ========================================================================
    // Lookup Errors
    // ========================================================================
    #[error("Property '{property}' not found on '{object}'")]
    PropertyNotFound { object: String, property: String },

    // ========================================================================
    // Dispatch Errors
    // ========================================================================
    #[error("Cannot find property generator for '{object}::{property}' in domain '{domain}'")]
    UnsupportedProperty {
        domain: String,
        object: String,
        property: String,
    },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidName { name, .. } => vec![
                format!("'{}' is not a valid class or property name", name),
                "Class names look like 'App\\Domain\\Invoice'".into(),
                "Property names must start with a letter or underscore".into(),
            ],
            Self::DuplicateObject { name } => vec![
                format!("Remove the second definition of '{}'", name),
            ],
            Self::DuplicateProperty { object, property } => vec![
                format!("'{}' declares '{}' twice", object, property),
                "Property names must be unique within an object".into(),
            ],
            Self::InvalidPropertyType { .. } => vec![
                "Known types: string, int, float, bool, date, time, datetime, money, ...".into(),
                "Object references use the class name, e.g. 'App\\Domain\\Supplier'".into(),
                "Collections use 'collection<...>'".into(),
            ],
            Self::InvalidFilter { .. } => vec![
                "Filters are class names with '*' wildcards, e.g. 'App\\Domain\\*'".into(),
            ],
            Self::UnsupportedProperty { .. } => vec![
                "The generator registry has no fallback generator".into(),
                "This is a configuration error in the generator registry".into(),
            ],
            _ => vec!["Check the domain description and try again".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidName { .. }
            | Self::DuplicateObject { .. }
            | Self::DuplicateProperty { .. }
            | Self::InvalidPropertyType { .. }
            | Self::InvalidFilter { .. } => ErrorCategory::Validation,
            Self::PropertyNotFound { .. } => ErrorCategory::NotFound,
            Self::UnsupportedProperty { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
