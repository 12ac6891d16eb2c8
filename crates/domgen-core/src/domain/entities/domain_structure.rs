//! The in-memory domain model: objects and their typed properties.
//!
//! Built once per invocation (usually by a `DomainStructureLoader` adapter)
//! and read-only afterwards.

use crate::domain::{
    entities::common::{ClassName, is_identifier},
    error::DomainError,
    value_objects::{ObjectKind, PropertyType},
};

/// One typed property of a domain object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDescriptor {
    name: String,
    property_type: PropertyType,
    nullable: bool,
}

impl PropertyDescriptor {
    pub fn new(name: impl Into<String>, property_type: PropertyType) -> Result<Self, DomainError> {
        let name = name.into();
        if !is_identifier(&name) {
            return Err(DomainError::InvalidName {
                name,
                reason: "property names must be identifiers".into(),
            });
        }

        Ok(Self {
            name,
            property_type,
            nullable: false,
        })
    }

    /// Mark the property as nullable.
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn property_type(&self) -> &PropertyType {
        &self.property_type
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }
}

/// One modeled class and its properties, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainObjectStructure {
    name: ClassName,
    kind: ObjectKind,
    properties: Vec<PropertyDescriptor>,
}

impl DomainObjectStructure {
    pub fn new(name: ClassName, kind: ObjectKind) -> Self {
        Self {
            name,
            kind,
            properties: Vec::new(),
        }
    }

    /// Append a property, rejecting duplicate names.
    pub fn add_property(&mut self, property: PropertyDescriptor) -> Result<(), DomainError> {
        if self.property(property.name()).is_some() {
            return Err(DomainError::DuplicateProperty {
                object: self.name.to_string(),
                property: property.name().to_string(),
            });
        }

        self.properties.push(property);
        Ok(())
    }

    pub fn with_property(mut self, property: PropertyDescriptor) -> Result<Self, DomainError> {
        self.add_property(property)?;
        Ok(self)
    }

    pub fn name(&self) -> &ClassName {
        &self.name
    }

    pub fn short_name(&self) -> &str {
        self.name.short_name()
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name() == name)
    }

    pub fn properties(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.properties.iter()
    }

    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(PropertyDescriptor::name)
    }

    pub fn property_count(&self) -> usize {
        self.properties.len()
    }
}

/// The whole domain model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainStructure {
    name: String,
    objects: Vec<DomainObjectStructure>,
}

impl DomainStructure {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            objects: Vec::new(),
        }
    }

    /// Append an object, rejecting duplicate class names.
    pub fn add_object(&mut self, object: DomainObjectStructure) -> Result<(), DomainError> {
        if self.object(object.name().as_str()).is_some() {
            return Err(DomainError::DuplicateObject {
                name: object.name().to_string(),
            });
        }

        self.objects.push(object);
        Ok(())
    }

    pub fn with_object(mut self, object: DomainObjectStructure) -> Result<Self, DomainError> {
        self.add_object(object)?;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up an object by fully-qualified name.
    pub fn object(&self, name: &str) -> Option<&DomainObjectStructure> {
        let name = name.strip_prefix('\\').unwrap_or(name);
        self.objects.iter().find(|o| o.name().as_str() == name)
    }

    /// Resolve a class reference to a domain object.
    ///
    /// Exact fully-qualified match first; a reference without a namespace
    /// then matches the first object with the same short name.
    pub fn resolve(&self, class: &ClassName) -> Option<&DomainObjectStructure> {
        self.object(class.as_str()).or_else(|| {
            if class.namespace().is_empty() {
                self.objects
                    .iter()
                    .find(|o| o.short_name() == class.short_name())
            } else {
                None
            }
        })
    }

    /// Kind of the referenced class, `None` if it is not part of this domain.
    pub fn kind_of(&self, class: &ClassName) -> Option<ObjectKind> {
        self.resolve(class).map(DomainObjectStructure::kind)
    }

    pub fn objects(&self) -> impl Iterator<Item = &DomainObjectStructure> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
