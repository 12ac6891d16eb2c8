//! Properties referring to other objects: enums, value objects, entities and
//! collections of them.
//!
//! References are resolved against the [`DomainStructure`], so a short name
//! such as `Supplier` is imported under its full class name.

use crate::domain::{
    ClassName, CodeBuilderContext, CodeConvention, DomainError, DomainObjectStructure,
    DomainStructure, ObjectKind, PropertyDescriptor, PropertyType,
};
use crate::generation::{
    PropertyCodeGenerator, column_mapping, embedded_mapping, inject_class, lookup,
    parameter_type,
};

const VALUE_OBJECT_COLLECTION: &str = "Dms\\Core\\Model\\ValueObjectCollection";
const ENTITY_COLLECTION: &str = "Dms\\Core\\Model\\EntityCollection";

/// Full class name of `class` within `domain`, or `class` itself when the
/// domain does not define it.
fn resolved(domain: &DomainStructure, class: &ClassName) -> ClassName {
    domain
        .resolve(class)
        .map_or_else(|| class.clone(), |object| object.name().clone())
}

/// Domain objects other than enums can be the target of a relation.
fn relatable(domain: &DomainStructure, class: &ClassName) -> bool {
    domain
        .resolve(class)
        .is_some_and(|object| object.kind() != ObjectKind::Enum)
}

/// Referenced class of an `Object` property.
fn referenced<'p>(property: &'p PropertyDescriptor) -> Option<&'p ClassName> {
    property.property_type().object_class()
}

/// Element class of a `collection<Object>` property.
fn element_class<'p>(property: &'p PropertyDescriptor) -> Option<&'p ClassName> {
    property
        .property_type()
        .element()
        .and_then(PropertyType::object_class)
}

fn unexpected(property: &PropertyDescriptor, expected: &str) -> DomainError {
    DomainError::InvalidPropertyType {
        value: property.property_type().to_string(),
        reason: format!("expected {expected}"),
    }
}

/// Inject a collection type and import the element class. Returns the local
/// name of the element class.
fn inject_collection(
    context: &mut CodeBuilderContext,
    collection: &ClassName,
    element: &ClassName,
    property: &PropertyDescriptor,
) -> String {
    let collection = context.add_import(collection);
    let element = context.add_import(element);
    context.add_constructor_parameter(
        parameter_type(&collection, property.is_nullable()),
        property.name(),
    );
    element
}

// ── Enum ─────────────────────────────────────────────────────────────────────

/// `enum<X>` properties, and references to objects of kind enum.
#[derive(Debug, Clone, Copy)]
pub struct EnumGenerator {
    convention: CodeConvention,
}

impl EnumGenerator {
    pub fn new(convention: CodeConvention) -> Self {
        Self { convention }
    }

    fn enum_class<'p>(
        domain: &DomainStructure,
        property: &'p PropertyDescriptor,
    ) -> Option<&'p ClassName> {
        match property.property_type() {
            PropertyType::Enum(class) => Some(class),
            PropertyType::Object(class) if domain.kind_of(class) == Some(ObjectKind::Enum) => {
                Some(class)
            }
            _ => None,
        }
    }
}

impl PropertyCodeGenerator for EnumGenerator {
    fn name(&self) -> &'static str {
        "enum"
    }

    fn supports(
        &self,
        domain: &DomainStructure,
        object: &DomainObjectStructure,
        property: &str,
    ) -> bool {
        object
            .property(property)
            .is_some_and(|p| Self::enum_class(domain, p).is_some())
    }

    fn generate(
        &self,
        domain: &DomainStructure,
        object: &DomainObjectStructure,
        property: &str,
        context: &mut CodeBuilderContext,
    ) -> Result<String, DomainError> {
        let descriptor = lookup(object, property)?;
        let class = Self::enum_class(domain, descriptor)
            .map(|class| resolved(domain, class))
            .ok_or_else(|| unexpected(descriptor, "an enum"))?;

        let alias = inject_class(context, &class, descriptor);
        Ok(column_mapping(
            &self.convention,
            object,
            descriptor,
            &format!("asEnum({alias}::class)"),
        ))
    }
}

// ── Value objects ────────────────────────────────────────────────────────────

/// References to value objects of the domain, embedded in the owner's table.
#[derive(Debug, Clone, Copy)]
pub struct ValueObjectGenerator {
    convention: CodeConvention,
}

impl ValueObjectGenerator {
    pub fn new(convention: CodeConvention) -> Self {
        Self { convention }
    }
}

impl PropertyCodeGenerator for ValueObjectGenerator {
    fn name(&self) -> &'static str {
        "value-object"
    }

    fn supports(
        &self,
        domain: &DomainStructure,
        object: &DomainObjectStructure,
        property: &str,
    ) -> bool {
        object
            .property(property)
            .and_then(referenced)
            .is_some_and(|class| domain.kind_of(class) == Some(ObjectKind::ValueObject))
    }

    fn generate(
        &self,
        domain: &DomainStructure,
        object: &DomainObjectStructure,
        property: &str,
        context: &mut CodeBuilderContext,
    ) -> Result<String, DomainError> {
        let descriptor = lookup(object, property)?;
        let class = referenced(descriptor)
            .map(|class| resolved(domain, class))
            .ok_or_else(|| unexpected(descriptor, "a value object"))?;

        let alias = inject_class(context, &class, descriptor);
        Ok(embedded_mapping(&self.convention, object, descriptor, &alias))
    }
}

/// Collections of value objects, stored in a child table keyed by the owner.
#[derive(Debug, Clone, Copy)]
pub struct ValueObjectCollectionGenerator {
    convention: CodeConvention,
}

impl ValueObjectCollectionGenerator {
    pub fn new(convention: CodeConvention) -> Self {
        Self { convention }
    }
}

impl PropertyCodeGenerator for ValueObjectCollectionGenerator {
    fn name(&self) -> &'static str {
        "value-object-collection"
    }

    fn supports(
        &self,
        domain: &DomainStructure,
        object: &DomainObjectStructure,
        property: &str,
    ) -> bool {
        object
            .property(property)
            .and_then(element_class)
            .is_some_and(|class| domain.kind_of(class) == Some(ObjectKind::ValueObject))
    }

    fn generate(
        &self,
        domain: &DomainStructure,
        object: &DomainObjectStructure,
        property: &str,
        context: &mut CodeBuilderContext,
    ) -> Result<String, DomainError> {
        let descriptor = lookup(object, property)?;
        let element = element_class(descriptor)
            .map(|class| resolved(domain, class))
            .ok_or_else(|| unexpected(descriptor, "a collection of value objects"))?;

        let alias = inject_collection(
            context,
            &ClassName::new(VALUE_OBJECT_COLLECTION)?,
            &element,
            descriptor,
        );

        let c = &self.convention;
        Ok(format!(
            "$map->embeddedCollection({})->toTable('{}')->withPrimaryKey('id')->withForeignKeyToParentAs('{}')->to({alias}::class);",
            c.property_reference(object.name(), descriptor.name()),
            c.collection_table_name(object.name(), descriptor.name()),
            c.foreign_key(object.name()),
        ))
    }
}

// ── Entities ─────────────────────────────────────────────────────────────────

/// References to entities and value objects of the domain, mapped as a
/// many-to-one relation.
#[derive(Debug, Clone, Copy)]
pub struct EntityGenerator {
    convention: CodeConvention,
}

impl EntityGenerator {
    pub fn new(convention: CodeConvention) -> Self {
        Self { convention }
    }
}

impl PropertyCodeGenerator for EntityGenerator {
    fn name(&self) -> &'static str {
        "entity"
    }

    fn supports(
        &self,
        domain: &DomainStructure,
        object: &DomainObjectStructure,
        property: &str,
    ) -> bool {
        object
            .property(property)
            .and_then(referenced)
            .is_some_and(|class| relatable(domain, class))
    }

    fn generate(
        &self,
        domain: &DomainStructure,
        object: &DomainObjectStructure,
        property: &str,
        context: &mut CodeBuilderContext,
    ) -> Result<String, DomainError> {
        let descriptor = lookup(object, property)?;
        let class = referenced(descriptor)
            .map(|class| resolved(domain, class))
            .ok_or_else(|| unexpected(descriptor, "an object reference"))?;

        let alias = inject_class(context, &class, descriptor);

        let c = &self.convention;
        Ok(format!(
            "$map->relation({})->to({alias}::class)->manyToOne()->withRelatedIdAs('{}_id');",
            c.property_reference(object.name(), descriptor.name()),
            c.column_name(descriptor.name()),
        ))
    }
}

/// Collections of non-enum domain objects, mapped as a one-to-many relation.
#[derive(Debug, Clone, Copy)]
pub struct EntityCollectionGenerator {
    convention: CodeConvention,
}

impl EntityCollectionGenerator {
    pub fn new(convention: CodeConvention) -> Self {
        Self { convention }
    }
}

impl PropertyCodeGenerator for EntityCollectionGenerator {
    fn name(&self) -> &'static str {
        "entity-collection"
    }

    fn supports(
        &self,
        domain: &DomainStructure,
        object: &DomainObjectStructure,
        property: &str,
    ) -> bool {
        object
            .property(property)
            .and_then(element_class)
            .is_some_and(|class| relatable(domain, class))
    }

    fn generate(
        &self,
        domain: &DomainStructure,
        object: &DomainObjectStructure,
        property: &str,
        context: &mut CodeBuilderContext,
    ) -> Result<String, DomainError> {
        let descriptor = lookup(object, property)?;
        let element = element_class(descriptor)
            .map(|class| resolved(domain, class))
            .ok_or_else(|| unexpected(descriptor, "a collection of objects"))?;

        let alias = inject_collection(
            context,
            &ClassName::new(ENTITY_COLLECTION)?,
            &element,
            descriptor,
        );

        let c = &self.convention;
        Ok(format!(
            "$map->relation({})->to({alias}::class)->toMany()->withParentIdAs('{}');",
            c.property_reference(object.name(), descriptor.name()),
            c.foreign_key(object.name()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::test_support::*;

    fn run(
        generator: &dyn PropertyCodeGenerator,
        tag: &str,
    ) -> (String, CodeBuilderContext) {
        let domain = domain_with(&[("subject", tag)]);
        let mut ctx = CodeBuilderContext::new();
        let code = generator
            .generate(&domain, invoice(&domain), "subject", &mut ctx)
            .unwrap();
        (code, ctx)
    }

    #[test]
    fn enum_reference_by_kind() {
        let (code, ctx) = run(&EnumGenerator::new(CodeConvention::new()), "Status");
        assert_eq!(
            code,
            "$map->property(Invoice::SUBJECT)->to('subject')->asEnum(Status::class);"
        );
        assert!(ctx.has_import("App\\Domain\\Status"));
    }

    #[test]
    fn explicit_enum_outside_the_domain() {
        let (code, ctx) = run(
            &EnumGenerator::new(CodeConvention::new()),
            "enum<Vendor\\Lib\\Level>",
        );
        assert!(code.ends_with("->asEnum(Level::class);"));
        assert!(ctx.has_import("Vendor\\Lib\\Level"));
    }

    #[test]
    fn value_object_is_embedded() {
        let (code, ctx) = run(
            &ValueObjectGenerator::new(CodeConvention::new()),
            "App\\Domain\\Address",
        );
        assert_eq!(
            code,
            "$map->embedded(Invoice::SUBJECT)->withColumnsPrefixedBy('subject_')->to(Address::class);"
        );
        assert_eq!(ctx.constructor_parameter_list(), vec!["Address $subject"]);
    }

    #[test]
    fn value_object_collection_uses_child_table() {
        let (code, ctx) = run(
            &ValueObjectCollectionGenerator::new(CodeConvention::new()),
            "collection<Address>",
        );
        assert_eq!(
            code,
            "$map->embeddedCollection(Invoice::SUBJECT)->toTable('invoice_subject')->withPrimaryKey('id')->withForeignKeyToParentAs('invoice_id')->to(Address::class);"
        );
        assert!(ctx.has_import(VALUE_OBJECT_COLLECTION));
        assert!(ctx.has_import("App\\Domain\\Address"));
        assert_eq!(
            ctx.constructor_parameter_list(),
            vec!["ValueObjectCollection $subject"]
        );
    }

    #[test]
    fn entity_short_name_imports_full_class() {
        let (code, ctx) = run(&EntityGenerator::new(CodeConvention::new()), "Supplier");
        assert_eq!(
            code,
            "$map->relation(Invoice::SUBJECT)->to(Supplier::class)->manyToOne()->withRelatedIdAs('subject_id');"
        );
        assert_eq!(
            ctx.imports().collect::<Vec<_>>(),
            vec!["App\\Domain\\Supplier"]
        );
        assert_eq!(ctx.constructor_parameter_list(), vec!["Supplier $subject"]);
    }

    #[test]
    fn entity_collection_is_one_to_many() {
        let (code, ctx) = run(
            &EntityCollectionGenerator::new(CodeConvention::new()),
            "collection<App\\Domain\\Supplier>",
        );
        assert_eq!(
            code,
            "$map->relation(Invoice::SUBJECT)->to(Supplier::class)->toMany()->withParentIdAs('invoice_id');"
        );
        assert!(ctx.has_import(ENTITY_COLLECTION));
        assert_eq!(
            ctx.constructor_parameter_list(),
            vec!["EntityCollection $subject"]
        );
    }

    #[test]
    fn unresolved_references_are_not_supported() {
        let domain = domain_with(&[("other", "App\\Elsewhere\\Thing")]);
        let c = CodeConvention::new();
        let object = invoice(&domain);

        assert!(!EntityGenerator::new(c).supports(&domain, object, "other"));
        assert!(!ValueObjectGenerator::new(c).supports(&domain, object, "other"));
        assert!(!EnumGenerator::new(c).supports(&domain, object, "other"));
    }

    #[test]
    fn enums_are_not_relation_targets() {
        let domain = domain_with(&[("status", "Status"), ("history", "collection<Status>")]);
        let c = CodeConvention::new();
        let object = invoice(&domain);

        assert!(!EntityGenerator::new(c).supports(&domain, object, "status"));
        assert!(!EntityCollectionGenerator::new(c).supports(&domain, object, "history"));
    }

    #[test]
    fn clashing_reference_uses_its_alias() {
        let domain = domain_with(&[("subject", "Supplier")]);
        let mut ctx = CodeBuilderContext::new();
        ctx.add_import(&class("Vendor\\Lib\\Supplier"));

        let code = EntityGenerator::new(CodeConvention::new())
            .generate(&domain, invoice(&domain), "subject", &mut ctx)
            .unwrap();

        assert_eq!(
            code,
            "$map->relation(Invoice::SUBJECT)->to(DomainSupplier::class)->manyToOne()->withRelatedIdAs('subject_id');"
        );
        assert_eq!(ctx.constructor_parameter_list(), vec!["DomainSupplier $subject"]);
        assert!(
            ctx.import_statements()
                .contains(&"use App\\Domain\\Supplier as DomainSupplier;".to_string())
        );
    }

    #[test]
    fn self_reference_uses_the_owner_name() {
        let domain = domain_with(&[("parent", "Invoice")]);
        let object = invoice(&domain);
        let mut ctx = CodeBuilderContext::for_object(object.name());

        let code = EntityGenerator::new(CodeConvention::new())
            .generate(&domain, object, "parent", &mut ctx)
            .unwrap();

        assert!(code.contains("->to(Invoice::class)"));
        assert_eq!(ctx.imports().count(), 0);
    }
}
