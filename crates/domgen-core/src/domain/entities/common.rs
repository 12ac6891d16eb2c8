use super::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Namespace separator of the generated language.
pub const NAMESPACE_SEPARATOR: char = '\\';

/// A fully-qualified class name, e.g. `App\Domain\Invoice`.
///
/// Invariant: never empty, no leading separator, every segment is a valid
/// identifier. Enforced at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClassName(String);

impl ClassName {
    /// Fallible constructor. A single leading `\` is accepted and stripped.
    pub fn new(name: impl AsRef<str>) -> Result<Self, DomainError> {
        let raw = name.as_ref().trim();
        let name = raw.strip_prefix(NAMESPACE_SEPARATOR).unwrap_or(raw);

        if name.is_empty() {
            return Err(DomainError::InvalidName {
                name: raw.into(),
                reason: "class name cannot be empty".into(),
            });
        }

        for segment in name.split(NAMESPACE_SEPARATOR) {
            if !is_identifier(segment) {
                return Err(DomainError::InvalidName {
                    name: raw.into(),
                    reason: format!("'{segment}' is not a valid name segment"),
                });
            }
        }

        Ok(Self(name.to_string()))
    }

    /// The class name without its namespace (`Invoice`).
    pub fn short_name(&self) -> &str {
        self.0
            .rsplit_once(NAMESPACE_SEPARATOR)
            .map_or(self.0.as_str(), |(_, short)| short)
    }

    /// The namespace without the class name (`App\Domain`), empty for global classes.
    pub fn namespace(&self) -> &str {
        self.0
            .rsplit_once(NAMESPACE_SEPARATOR)
            .map_or("", |(namespace, _)| namespace)
    }

    /// Build a sibling class name in another namespace.
    pub fn in_namespace(namespace: &str, short_name: &str) -> Result<Self, DomainError> {
        let namespace = namespace.trim_matches(NAMESPACE_SEPARATOR);
        if namespace.is_empty() {
            Self::new(short_name)
        } else {
            Self::new(format!("{namespace}{NAMESPACE_SEPARATOR}{short_name}"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ClassName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ClassName> for String {
    fn from(value: ClassName) -> Self {
        value.0
    }
}

impl AsRef<str> for ClassName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub(crate) fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
