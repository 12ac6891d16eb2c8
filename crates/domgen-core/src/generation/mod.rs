//! Property code generators and the priority-ordered registry that
//! dispatches each property to exactly one of them.
//!
//! # Design Rationale
//!
//! Every property category is handled by one standalone strategy
//! implementing [`PropertyCodeGenerator`]. The [`GeneratorRegistry`] asks
//! them in a fixed order and the first one whose `supports` predicate holds
//! generates the property. Order matters where categories overlap: the
//! entity generators accept any object defined in the domain, so the
//! value-object generators must be asked first.
//!
//! # Adding a New Category
//!
//! 1. Implement [`PropertyCodeGenerator`] in a new module here
//! 2. Insert it into [`GeneratorRegistry::standard`] before any generator
//!    whose `supports` would also accept its properties
//! 3. That's it, the scaffold service picks it up

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{
    ClassName, CodeBuilderContext, CodeConvention, DomainError, DomainObjectStructure,
    DomainStructure, PropertyDescriptor,
};

pub mod colour;
pub mod date_time;
pub mod fallback;
pub mod file;
pub mod geo;
pub mod money;
pub mod relation;
pub mod scalar;
pub mod web;

pub use colour::ColourGenerator;
pub use date_time::DateTimeGenerator;
pub use fallback::FallbackGenerator;
pub use file::FileGenerator;
pub use geo::{CountryGenerator, GeoGenerator};
pub use money::{CurrencyGenerator, MoneyGenerator};
pub use relation::{
    EntityCollectionGenerator, EntityGenerator, EnumGenerator, ValueObjectCollectionGenerator,
    ValueObjectGenerator,
};
pub use scalar::ScalarGenerator;
pub use web::WebGenerator;

// ── Contract ─────────────────────────────────────────────────────────────────

/// One property category's code generation strategy.
pub trait PropertyCodeGenerator: Send + Sync {
    /// Stable identifier used in diagnostics.
    fn name(&self) -> &'static str;

    /// Whether this generator handles `property` of `object`.
    ///
    /// Pure and total: an unknown property name yields `false`.
    fn supports(
        &self,
        domain: &DomainStructure,
        object: &DomainObjectStructure,
        property: &str,
    ) -> bool;

    /// Produce the mapping fragment for `property`, registering its imports
    /// and constructor parameter on `context`.
    fn generate(
        &self,
        domain: &DomainStructure,
        object: &DomainObjectStructure,
        property: &str,
        context: &mut CodeBuilderContext,
    ) -> Result<String, DomainError>;
}

// ── Configuration ────────────────────────────────────────────────────────────

/// Where generated file mappings store uploads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStorageConfig {
    /// Private uploads (`file` properties).
    pub uploads_dir: String,
    /// Publicly served uploads (`image` properties).
    pub public_uploads_dir: String,
}

impl Default for FileStorageConfig {
    fn default() -> Self {
        Self {
            uploads_dir: "storage/app/uploads".into(),
            public_uploads_dir: "public/uploads".into(),
        }
    }
}

/// Everything the standard generators are configured with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub convention: CodeConvention,
    pub storage: FileStorageConfig,
}

// ── Registry ─────────────────────────────────────────────────────────────────

/// Ordered chain of generators. Read-only once built.
pub struct GeneratorRegistry {
    generators: Vec<Box<dyn PropertyCodeGenerator>>,
}

impl GeneratorRegistry {
    /// An empty registry. Without a fallback, dispatch can fail.
    pub fn empty() -> Self {
        Self {
            generators: Vec::new(),
        }
    }

    /// The standard chain, most specific first.
    pub fn standard(config: GeneratorConfig) -> Self {
        let c = config.convention;
        Self::empty()
            .with(ScalarGenerator::new(c))
            .with(DateTimeGenerator::new(c))
            .with(FileGenerator::new(c, config.storage))
            .with(ColourGenerator::new(c))
            .with(GeoGenerator::new(c))
            .with(CountryGenerator::new(c))
            .with(MoneyGenerator::new(c))
            .with(CurrencyGenerator::new(c))
            .with(WebGenerator::new(c))
            .with(EnumGenerator::new(c))
            .with(ValueObjectGenerator::new(c))
            .with(ValueObjectCollectionGenerator::new(c))
            .with(EntityGenerator::new(c))
            .with(EntityCollectionGenerator::new(c))
            .with(FallbackGenerator::new(c))
    }

    /// Append a generator at the lowest priority.
    pub fn with(mut self, generator: impl PropertyCodeGenerator + 'static) -> Self {
        self.generators.push(Box::new(generator));
        self
    }

    /// First generator supporting the property.
    pub fn resolve(
        &self,
        domain: &DomainStructure,
        object: &DomainObjectStructure,
        property: &str,
    ) -> Result<&dyn PropertyCodeGenerator, DomainError> {
        let generator = self
            .generators
            .iter()
            .find(|g| g.supports(domain, object, property))
            .ok_or_else(|| DomainError::UnsupportedProperty {
                domain: domain.name().to_string(),
                object: object.name().to_string(),
                property: property.to_string(),
            })?;

        debug!(
            object = %object.name(),
            property,
            generator = generator.name(),
            "generator resolved"
        );
        Ok(generator.as_ref())
    }

    /// Resolve and run the generator for one property.
    pub fn generate(
        &self,
        domain: &DomainStructure,
        object: &DomainObjectStructure,
        property: &str,
        context: &mut CodeBuilderContext,
    ) -> Result<String, DomainError> {
        self.resolve(domain, object, property)?
            .generate(domain, object, property, context)
    }

    /// Generator names in priority order.
    pub fn names(&self) -> Vec<&'static str> {
        self.generators.iter().map(|g| g.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self::standard(GeneratorConfig::default())
    }
}

impl std::fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorRegistry")
            .field("generators", &self.names())
            .finish()
    }
}

// ── Shared helpers ───────────────────────────────────────────────────────────

/// Look up `property` on `object`.
pub(crate) fn lookup<'o>(
    object: &'o DomainObjectStructure,
    property: &str,
) -> Result<&'o PropertyDescriptor, DomainError> {
    object
        .property(property)
        .ok_or_else(|| DomainError::PropertyNotFound {
            object: object.name().to_string(),
            property: property.to_string(),
        })
}

/// `?Type` for nullable properties.
pub(crate) fn parameter_type(type_name: &str, nullable: bool) -> String {
    if nullable {
        format!("?{type_name}")
    } else {
        type_name.to_string()
    }
}

/// Import `class` and inject it under the property's name. Returns the local
/// name the class was imported as.
pub(crate) fn inject_class(
    context: &mut CodeBuilderContext,
    class: &ClassName,
    property: &PropertyDescriptor,
) -> String {
    let alias = context.add_import(class);
    context.add_constructor_parameter(
        parameter_type(&alias, property.is_nullable()),
        property.name(),
    );
    alias
}

/// `$map->property(Invoice::TOTAL)->to('total')->{mapping};`
pub(crate) fn column_mapping(
    convention: &CodeConvention,
    object: &DomainObjectStructure,
    property: &PropertyDescriptor,
    mapping: &str,
) -> String {
    format!(
        "$map->property({})->to('{}'){}->{mapping};",
        convention.property_reference(object.name(), property.name()),
        convention.column_name(property.name()),
        nullable_marker(property),
    )
}

/// `$map->embedded(Invoice::TOTAL)->withColumnsPrefixedBy('total_')->to(Money::class);`
pub(crate) fn embedded_mapping(
    convention: &CodeConvention,
    object: &DomainObjectStructure,
    property: &PropertyDescriptor,
    class_alias: &str,
) -> String {
    format!(
        "$map->embedded({})->withColumnsPrefixedBy('{}_'){}->to({class_alias}::class);",
        convention.property_reference(object.name(), property.name()),
        convention.column_name(property.name()),
        nullable_marker(property),
    )
}

fn nullable_marker(property: &PropertyDescriptor) -> &'static str {
    if property.is_nullable() {
        "->nullable()"
    } else {
        ""
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    fn resolved_name(tag: &str) -> &'static str {
        let domain = domain_with(&[("subject", tag)]);
        GeneratorRegistry::default()
            .resolve(&domain, invoice(&domain), "subject")
            .unwrap()
            .name()
    }

    #[test]
    fn each_category_dispatches_to_its_generator() {
        let cases = [
            ("string", "scalar"),
            ("bool", "scalar"),
            ("date", "date-time"),
            ("timezoned-datetime", "date-time"),
            ("image", "file"),
            ("transparent-colour", "colour"),
            ("street-address", "geo"),
            ("country", "country"),
            ("money", "money"),
            ("currency", "currency"),
            ("url", "web"),
            ("enum<App\\Domain\\Status>", "enum"),
            ("App\\Domain\\Status", "enum"),
            ("App\\Domain\\Address", "value-object"),
            ("collection<App\\Domain\\Address>", "value-object-collection"),
            ("App\\Domain\\Supplier", "entity"),
            ("Supplier", "entity"),
            ("collection<App\\Domain\\Supplier>", "entity-collection"),
        ];

        for (tag, expected) in cases {
            assert_eq!(resolved_name(tag), expected, "type tag {tag}");
        }
    }

    #[test]
    fn unrecognised_descriptors_fall_back() {
        for tag in [
            "mixed",
            "App\\Elsewhere\\Thing",
            "collection<int>",
            "collection<money>",
            "collection<Status>",
        ] {
            assert_eq!(resolved_name(tag), "fallback", "type tag {tag}");
        }
    }

    #[test]
    fn value_object_collection_beats_entity_collection() {
        let domain = domain_with(&[("lines", "collection<App\\Domain\\Address>")]);
        let object = invoice(&domain);

        // The generic generator would accept it too.
        assert!(EntityCollectionGenerator::new(CodeConvention::new()).supports(
            &domain,
            object,
            "lines"
        ));

        let registry = GeneratorRegistry::default();
        assert_eq!(
            registry.resolve(&domain, object, "lines").unwrap().name(),
            "value-object-collection"
        );
    }

    #[test]
    fn registration_order_decides_overlaps() {
        let domain = domain_with(&[("home", "App\\Domain\\Address")]);
        let c = CodeConvention::new();
        let generic_first = GeneratorRegistry::empty()
            .with(EntityGenerator::new(c))
            .with(ValueObjectGenerator::new(c));

        assert_eq!(
            generic_first
                .resolve(&domain, invoice(&domain), "home")
                .unwrap()
                .name(),
            "entity"
        );
    }

    #[test]
    fn empty_registry_reports_unsupported_property() {
        let domain = domain_with(&[("total", "money")]);
        let err = GeneratorRegistry::empty()
            .resolve(&domain, invoice(&domain), "total")
            .err()
            .unwrap();

        assert_eq!(
            err,
            DomainError::UnsupportedProperty {
                domain: "billing".into(),
                object: "App\\Domain\\Invoice".into(),
                property: "total".into(),
            }
        );
    }

    #[test]
    fn unknown_property_is_never_supported() {
        let domain = domain_with(&[]);
        let registry = GeneratorRegistry::default();
        // Only the fallback accepts unknown names; the specific ones must not.
        assert_eq!(
            registry
                .resolve(&domain, invoice(&domain), "ghost")
                .unwrap()
                .name(),
            "fallback"
        );
        let err = registry
            .generate(&domain, invoice(&domain), "ghost", &mut CodeBuilderContext::new())
            .unwrap_err();
        assert!(matches!(err, DomainError::PropertyNotFound { .. }));
    }

    #[test]
    fn standard_registry_ends_with_fallback() {
        let names = GeneratorRegistry::default().names();
        assert_eq!(names.len(), 15);
        assert_eq!(names.first(), Some(&"scalar"));
        assert_eq!(names.last(), Some(&"fallback"));
    }
}
