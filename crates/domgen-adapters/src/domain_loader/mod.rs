//! Domain description loaders.
//!
//! A description is a serialised [`DomainDescription`]:
//!
//! ```toml
//! name = "billing"
//!
//! [[objects]]
//! name = 'App\Domain\Invoice'
//! kind = "entity"
//! properties = [
//!   { name = "total", type = "money" },
//!   { name = "vendor", type = 'App\Domain\Supplier' },
//!   { name = "notes", type = "string", nullable = true },
//! ]
//! ```
//!
//! Type tags are parsed with [`PropertyType`]'s `FromStr`; see
//! `domgen_core::domain::value_objects` for the full list.

mod file;
mod memory;

pub use file::{DescriptionFormat, FileDomainLoader};
pub use memory::MemoryDomainLoader;

use serde::{Deserialize, Serialize};

use domgen_core::domain::{
    ClassName, DomainError, DomainObjectStructure, DomainStructure, ObjectKind,
    PropertyDescriptor, PropertyType,
};

/// Top level of a domain description file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainDescription {
    pub name: String,
    #[serde(default)]
    pub objects: Vec<ObjectDescription>,
}

/// One `[[objects]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectDescription {
    /// Fully-qualified class name.
    pub name: String,
    #[serde(default)]
    pub kind: ObjectKind,
    #[serde(default)]
    pub properties: Vec<PropertyDescription>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDescription {
    pub name: String,
    /// Type tag, e.g. `money` or `collection<App\Domain\Line>`.
    #[serde(rename = "type")]
    pub property_type: String,
    #[serde(default)]
    pub nullable: bool,
}

impl DomainDescription {
    /// Validate and build the in-memory model.
    pub fn into_structure(self) -> Result<DomainStructure, DomainError> {
        let mut domain = DomainStructure::new(self.name);

        for object in self.objects {
            let mut structure =
                DomainObjectStructure::new(ClassName::new(&object.name)?, object.kind);

            for property in object.properties {
                let property_type: PropertyType = property.property_type.parse()?;
                structure.add_property(
                    PropertyDescriptor::new(property.name, property_type)?
                        .nullable(property.nullable),
                )?;
            }

            domain.add_object(structure)?;
        }

        Ok(domain)
    }
}
