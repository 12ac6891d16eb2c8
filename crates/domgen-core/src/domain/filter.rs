//! Glob filter over fully-qualified object names.

use regex::Regex;

use crate::domain::{DomainObjectStructure, DomainStructure, error::DomainError};

/// Case-sensitive, anchored glob where `*` matches any run of characters
/// (namespace separators included).
///
/// Surrounding spaces and `\` are trimmed, so `\App\Domain\*` and
/// `App\Domain\*` are the same filter.
#[derive(Debug, Clone)]
pub struct ObjectFilter {
    pattern: String,
    /// `None` matches everything.
    regex: Option<Regex>,
}

impl ObjectFilter {
    pub fn new(pattern: &str) -> Result<Self, DomainError> {
        let trimmed = pattern.trim_matches(|c| c == ' ' || c == '\\');
        if trimmed.is_empty() {
            return Err(DomainError::InvalidFilter {
                pattern: pattern.into(),
                reason: "filter cannot be empty, use '*' to match everything".into(),
            });
        }

        let body = trimmed
            .split('*')
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(".*");

        let regex = Regex::new(&format!("^{body}$")).map_err(|e| DomainError::InvalidFilter {
            pattern: pattern.into(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            pattern: trimmed.to_string(),
            regex: Some(regex),
        })
    }

    /// Filter matching every object.
    pub fn any() -> Self {
        Self {
            pattern: "*".into(),
            regex: None,
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn matches(&self, name: &str) -> bool {
        self.regex.as_ref().is_none_or(|regex| regex.is_match(name))
    }

    /// Objects of `domain` matching this filter, in declaration order.
    pub fn apply<'d>(&self, domain: &'d DomainStructure) -> Vec<&'d DomainObjectStructure> {
        domain
            .objects()
            .filter(|object| self.matches(object.name().as_str()))
            .collect()
    }
}
