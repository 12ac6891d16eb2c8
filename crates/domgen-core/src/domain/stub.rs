//! Stub rendering: fill placeholders from a [`CodeBuilderContext`].
//!
//! # Placeholders
//!
//! | Placeholder | Content |
//! |-------------|---------|
//! | `{imports}` | `use X;` lines |
//! | `{properties}` | documented `protected $name;` declarations |
//! | `{constructor_params}` | `, Type $a, Type $b` (empty when there are none) |
//! | `{initializers}` | `$this->name = $name;` lines |
//!
//! Caller replacements are merged on top, so a caller key equal to a derived
//! placeholder wins.
//!
//! # Edge Cases
//!
//! - `{unknown}` → remains as literal `{unknown}` (no error)
//! - Replacement values are never rescanned: a value containing `{imports}`
//!   is emitted as-is
//! - Overlapping keys: the longest key matching at a position wins

use std::collections::BTreeMap;

use crate::domain::context::CodeBuilderContext;

/// Placeholder → replacement text. Keys include their delimiters (`{class}`).
pub type Replacements = BTreeMap<String, String>;

pub const IMPORTS: &str = "{imports}";
pub const PROPERTIES: &str = "{properties}";
pub const CONSTRUCTOR_PARAMS: &str = "{constructor_params}";
pub const INITIALIZERS: &str = "{initializers}";

/// Renders stub text against a finished context.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubRenderer;

impl StubRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        stub: &str,
        context: &CodeBuilderContext,
        replacements: &Replacements,
    ) -> String {
        let mut table = self.derived_blocks(context);
        table.extend(
            replacements
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );

        substitute(stub, &table)
    }

    /// The four blocks computed from the context.
    pub fn derived_blocks(&self, context: &CodeBuilderContext) -> Replacements {
        let parameters = context.constructor_parameter_list();
        let constructor_params = if parameters.is_empty() {
            String::new()
        } else {
            format!(", {}", parameters.join(", "))
        };

        Replacements::from([
            (IMPORTS.to_string(), context.import_statements().join("\n")),
            (PROPERTIES.to_string(), context.property_declarations().join("\n")),
            (CONSTRUCTOR_PARAMS.to_string(), constructor_params),
            (INITIALIZERS.to_string(), context.initializers().join("\n")),
        ])
    }
}

/// Single-pass literal substitution.
///
/// At each position the longest matching key is replaced and scanning resumes
/// after it; replaced text is never rescanned.
pub fn substitute(text: &str, table: &Replacements) -> String {
    let mut keys: Vec<&str> = table
        .keys()
        .map(String::as_str)
        .filter(|key| !key.is_empty())
        .collect();
    keys.sort_by(|a, b| b.len().cmp(&a.len()));

    let mut out = String::with_capacity(text.len());
    let mut offset = 0;

    while offset < text.len() {
        let rest = &text[offset..];

        if let Some(key) = keys.iter().find(|key| rest.starts_with(**key)) {
            out.push_str(&table[*key]);
            offset += key.len();
            continue;
        }

        match rest.chars().next() {
            Some(ch) => {
                out.push(ch);
                offset += ch.len_utf8();
            }
            None => break,
        }
    }

    out
}
