//! Naming conventions for generated code and output locations.

use std::path::{Path, PathBuf};

use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};

use crate::domain::entities::common::{ClassName, NAMESPACE_SEPARATOR};

/// How generated identifiers are derived from domain names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodeConvention;

impl CodeConvention {
    pub fn new() -> Self {
        Self
    }

    /// `issuedAt` → `ISSUED_AT`
    pub fn constant_name(&self, property: &str) -> String {
        property.to_case(Case::Snake).to_uppercase()
    }

    /// `Invoice::ISSUED_AT`
    pub fn property_reference(&self, class: &ClassName, property: &str) -> String {
        format!("{}::{}", class.short_name(), self.constant_name(property))
    }

    /// `issuedAt` → `issued_at`
    pub fn column_name(&self, property: &str) -> String {
        property.to_case(Case::Snake)
    }

    /// `PurchaseOrder` → `purchase_orders`
    pub fn table_name(&self, class: &ClassName) -> String {
        format!("{}s", class.short_name().to_case(Case::Snake))
    }

    /// Join table for a collection property: `invoice_lines`.
    pub fn collection_table_name(&self, owner: &ClassName, property: &str) -> String {
        format!(
            "{}_{}",
            owner.short_name().to_case(Case::Snake),
            property.to_case(Case::Snake)
        )
    }

    /// `PurchaseOrder` → `purchase_order_id`
    pub fn foreign_key(&self, class: &ClassName) -> String {
        format!("{}_id", class.short_name().to_case(Case::Snake))
    }
}

/// One configured namespace → directory mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceRoot {
    pub namespace: String,
    pub directory: PathBuf,
}

impl NamespaceRoot {
    pub fn new(namespace: impl Into<String>, directory: impl Into<PathBuf>) -> Self {
        Self {
            namespace: namespace.into(),
            directory: directory.into(),
        }
    }
}

/// Maps class namespaces to output directories.
///
/// The longest configured namespace prefix wins; remaining namespace
/// segments become subdirectories. Unmapped namespaces map one segment per
/// directory under the output root.
#[derive(Debug, Clone)]
pub struct NamespaceDirectoryResolver {
    output_root: PathBuf,
    roots: Vec<NamespaceRoot>,
}

impl NamespaceDirectoryResolver {
    pub fn new(output_root: impl Into<PathBuf>, roots: Vec<NamespaceRoot>) -> Self {
        Self {
            output_root: output_root.into(),
            roots,
        }
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Directory holding classes of `namespace`.
    pub fn directory_for(&self, namespace: &str) -> PathBuf {
        let namespace = namespace.trim_matches(NAMESPACE_SEPARATOR);

        let best = self
            .roots
            .iter()
            .filter_map(|root| {
                let prefix = root.namespace.trim_matches(NAMESPACE_SEPARATOR);
                strip_namespace_prefix(namespace, prefix).map(|rest| (prefix.len(), root, rest))
            })
            .max_by_key(|(len, _, _)| *len);

        let (mut dir, rest) = match best {
            Some((_, root, rest)) => (self.output_root.join(&root.directory), rest),
            None => (self.output_root.clone(), namespace),
        };

        for segment in rest.split(NAMESPACE_SEPARATOR).filter(|s| !s.is_empty()) {
            dir.push(segment);
        }
        dir
    }

    /// Source file for `class`, e.g. `src/Domain/Invoice.php`.
    pub fn file_for(&self, class: &ClassName, extension: &str) -> PathBuf {
        self.directory_for(class.namespace())
            .join(format!("{}.{extension}", class.short_name()))
    }
}

/// `App\Domain` minus prefix `App` is `Domain`; prefix must end on a segment boundary.
fn strip_namespace_prefix<'a>(namespace: &'a str, prefix: &str) -> Option<&'a str> {
    if prefix.is_empty() {
        return Some(namespace);
    }
    let rest = namespace.strip_prefix(prefix)?;
    if rest.is_empty() {
        Some(rest)
    } else {
        rest.strip_prefix(NAMESPACE_SEPARATOR)
    }
}
