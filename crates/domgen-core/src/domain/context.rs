//! Per-object accumulator of generator side effects.

use std::collections::BTreeMap;

use crate::domain::entities::common::{ClassName, NAMESPACE_SEPARATOR};

const INDENT: &str = "    ";

/// A `(type, name)` pair injected through the generated constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorParameter {
    type_name: String,
    name: String,
}

impl ConstructorParameter {
    pub fn new(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            name: name.into(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Docblock type: the short name without the nullable marker.
    fn doc_type(&self) -> &str {
        let bare = self.type_name.trim_start_matches('?');
        bare.rsplit_once('\\').map_or(bare, |(_, short)| short)
    }
}

/// Write-only accumulator for one object's generation pass.
///
/// Imports map each class to the local name generated code uses for it.
/// Short names that would clash get the nearest namespace segments prepended
/// (`App\Shipping\Status` becomes `ShippingStatus`). Constructor parameters
/// keep registration order, which equals property declaration order when
/// generators run in that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeBuilderContext {
    owner: Option<ClassName>,
    imports: BTreeMap<String, String>,
    constructor_parameters: Vec<ConstructorParameter>,
}

impl CodeBuilderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context for generating code about `owner`. Its short name is reserved
    /// and it never appears in [`Self::import_statements`]; stubs name it
    /// through `{fqcn}` themselves.
    pub fn for_object(owner: &ClassName) -> Self {
        Self {
            owner: Some(owner.clone()),
            ..Self::default()
        }
    }

    /// Register a namespace import and return the name to refer to it by.
    /// Registering the same class again returns the same name.
    pub fn add_import(&mut self, class: &ClassName) -> String {
        if self.owner.as_ref() == Some(class) {
            return class.short_name().to_string();
        }
        if let Some(alias) = self.imports.get(class.as_str()) {
            return alias.clone();
        }

        let alias = self.free_alias(class);
        self.imports
            .insert(class.as_str().to_string(), alias.clone());
        alias
    }

    /// PHP class names are case-insensitive.
    fn alias_taken(&self, alias: &str) -> bool {
        self.owner
            .iter()
            .map(ClassName::short_name)
            .chain(self.imports.values().map(String::as_str))
            .any(|taken| taken.eq_ignore_ascii_case(alias))
    }

    fn free_alias(&self, class: &ClassName) -> String {
        let mut alias = class.short_name().to_string();
        let mut segments = class
            .namespace()
            .rsplit(NAMESPACE_SEPARATOR)
            .filter(|segment| !segment.is_empty());

        while self.alias_taken(&alias) {
            match segments.next() {
                Some(segment) => alias = format!("{segment}{alias}"),
                None => break,
            }
        }

        let base = alias.clone();
        let mut suffix = 2;
        while self.alias_taken(&alias) {
            alias = format!("{base}{suffix}");
            suffix += 1;
        }
        alias
    }

    /// Register a constructor parameter. A name already present is a no-op.
    pub fn add_constructor_parameter(
        &mut self,
        type_name: impl Into<String>,
        name: impl Into<String>,
    ) -> bool {
        let name = name.into();
        if self.constructor_parameters.iter().any(|p| p.name == name) {
            return false;
        }
        self.constructor_parameters
            .push(ConstructorParameter::new(type_name, name));
        true
    }

    /// Imported classes in sorted order, the owner excluded.
    pub fn imports(&self) -> impl Iterator<Item = &str> {
        self.imports.keys().map(String::as_str)
    }

    pub fn has_import(&self, class: &str) -> bool {
        self.imports.contains_key(class)
    }

    pub fn constructor_parameters(&self) -> &[ConstructorParameter] {
        &self.constructor_parameters
    }

    /// `use X;` statements, `use X as Alias;` where the short name clashed.
    pub fn import_statements(&self) -> Vec<String> {
        self.imports
            .iter()
            .map(|(class, alias)| {
                let short = class
                    .rsplit_once(NAMESPACE_SEPARATOR)
                    .map_or(class.as_str(), |(_, short)| short);
                if short == alias {
                    format!("use {class};")
                } else {
                    format!("use {class} as {alias};")
                }
            })
            .collect()
    }

    /// Documented field declaration per constructor parameter.
    pub fn property_declarations(&self) -> Vec<String> {
        self.constructor_parameters
            .iter()
            .map(|p| {
                format!(
                    "{INDENT}/**\n{INDENT} * @var {}\n{INDENT} */\n{INDENT}protected ${};\n",
                    p.doc_type(),
                    p.name
                )
            })
            .collect()
    }

    /// `Type $name` per constructor parameter.
    pub fn constructor_parameter_list(&self) -> Vec<String> {
        self.constructor_parameters
            .iter()
            .map(|p| format!("{} ${}", p.type_name, p.name))
            .collect()
    }

    /// `$this->name = $name;` per constructor parameter.
    pub fn initializers(&self) -> Vec<String> {
        self.constructor_parameters
            .iter()
            .map(|p| format!("{INDENT}{INDENT}$this->{0} = ${0};", p.name))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_import_is_noop() {
        let mut ctx = CodeBuilderContext::new();
        let money = ClassName::new("Dms\\Common\\Structure\\Money\\Money").unwrap();
        assert_eq!(ctx.add_import(&money), "Money");
        assert_eq!(ctx.add_import(&money), "Money");
        assert_eq!(ctx.imports().count(), 1);
    }

    #[test]
    fn constructor_parameters_keep_registration_order() {
        let mut ctx = CodeBuilderContext::new();
        ctx.add_constructor_parameter("Supplier", "vendor");
        ctx.add_constructor_parameter("Money", "total");
        ctx.add_constructor_parameter("int", "count");
        assert_eq!(
            ctx.constructor_parameter_list(),
            vec!["Supplier $vendor", "Money $total", "int $count"]
        );
    }

    #[test]
    fn duplicate_parameter_name_is_noop() {
        let mut ctx = CodeBuilderContext::new();
        assert!(ctx.add_constructor_parameter("Money", "total"));
        assert!(!ctx.add_constructor_parameter("int", "total"));
        assert_eq!(ctx.constructor_parameters().len(), 1);
        assert_eq!(ctx.constructor_parameters()[0].type_name(), "Money");
    }

    #[test]
    fn derived_blocks() {
        let mut ctx = CodeBuilderContext::new();
        ctx.add_constructor_parameter("?Money", "total");

        assert_eq!(
            ctx.property_declarations(),
            vec!["    /**\n     * @var Money\n     */\n    protected $total;\n"]
        );
        assert_eq!(ctx.initializers(), vec!["        $this->total = $total;"]);
    }

    #[test]
    fn import_statements_are_sorted() {
        let mut ctx = CodeBuilderContext::new();
        ctx.add_import(&ClassName::new("B\\Other").unwrap());
        ctx.add_import(&ClassName::new("A\\Thing").unwrap());
        assert_eq!(ctx.import_statements(), vec!["use A\\Thing;", "use B\\Other;"]);
    }

    #[test]
    fn clashing_short_names_are_aliased() {
        let mut ctx = CodeBuilderContext::new();
        let billing = ClassName::new("App\\Billing\\Status").unwrap();
        let shipping = ClassName::new("App\\Shipping\\Status").unwrap();

        assert_eq!(ctx.add_import(&billing), "Status");
        assert_eq!(ctx.add_import(&shipping), "ShippingStatus");
        assert_eq!(ctx.add_import(&shipping), "ShippingStatus");
        assert_eq!(
            ctx.import_statements(),
            vec![
                "use App\\Billing\\Status;",
                "use App\\Shipping\\Status as ShippingStatus;",
            ]
        );
    }

    #[test]
    fn clash_check_ignores_case() {
        let mut ctx = CodeBuilderContext::new();
        ctx.add_import(&ClassName::new("App\\Domain\\Status").unwrap());
        assert_eq!(
            ctx.add_import(&ClassName::new("App\\Legacy\\STATUS").unwrap()),
            "LegacySTATUS"
        );
    }

    #[test]
    fn global_classes_fall_back_to_a_suffix() {
        let mut ctx = CodeBuilderContext::new();
        ctx.add_import(&ClassName::new("Vendor\\Status").unwrap());
        ctx.add_import(&ClassName::new("VendorStatus").unwrap());
        assert_eq!(ctx.add_import(&ClassName::new("Status").unwrap()), "Status2");
    }

    #[test]
    fn owner_is_reserved_but_not_imported() {
        let owner = ClassName::new("App\\Domain\\Category").unwrap();
        let mut ctx = CodeBuilderContext::for_object(&owner);

        assert_eq!(ctx.add_import(&owner), "Category");
        assert_eq!(
            ctx.add_import(&ClassName::new("App\\Legacy\\Category").unwrap()),
            "LegacyCategory"
        );
        assert!(!ctx.has_import("App\\Domain\\Category"));
        assert_eq!(
            ctx.import_statements(),
            vec!["use App\\Legacy\\Category as LegacyCategory;"]
        );
    }
}
