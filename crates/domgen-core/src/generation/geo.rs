//! Geographic properties: coordinates, street addresses and countries.

use crate::domain::{
    ClassName, CodeBuilderContext, CodeConvention, DomainError, DomainObjectStructure,
    DomainStructure, GeoType, PropertyType,
};
use crate::generation::{
    PropertyCodeGenerator, column_mapping, embedded_mapping, inject_class, lookup,
};

const LAT_LNG: &str = "Dms\\Common\\Structure\\Geo\\LatLng";
const STREET_ADDRESS: &str = "Dms\\Common\\Structure\\Geo\\StreetAddress";
const STREET_ADDRESS_WITH_LAT_LNG: &str = "Dms\\Common\\Structure\\Geo\\StreetAddressWithLatLng";
const COUNTRY: &str = "Dms\\Common\\Structure\\Geo\\Country";

/// Coordinates and addresses, all embedded over several columns.
#[derive(Debug, Clone, Copy)]
pub struct GeoGenerator {
    convention: CodeConvention,
}

impl GeoGenerator {
    pub fn new(convention: CodeConvention) -> Self {
        Self { convention }
    }
}

impl PropertyCodeGenerator for GeoGenerator {
    fn name(&self) -> &'static str {
        "geo"
    }

    fn supports(&self, _: &DomainStructure, object: &DomainObjectStructure, property: &str) -> bool {
        object
            .property(property)
            .is_some_and(|p| matches!(p.property_type(), PropertyType::Geo(_)))
    }

    fn generate(
        &self,
        _: &DomainStructure,
        object: &DomainObjectStructure,
        property: &str,
        context: &mut CodeBuilderContext,
    ) -> Result<String, DomainError> {
        let descriptor = lookup(object, property)?;
        let PropertyType::Geo(geo) = descriptor.property_type() else {
            return Err(DomainError::InvalidPropertyType {
                value: descriptor.property_type().to_string(),
                reason: "expected a geographic type".into(),
            });
        };

        let class = ClassName::new(match geo {
            GeoType::LatLng => LAT_LNG,
            GeoType::StreetAddress => STREET_ADDRESS,
            GeoType::StreetAddressWithLatLng => STREET_ADDRESS_WITH_LAT_LNG,
        })?;

        let alias = inject_class(context, &class, descriptor);
        Ok(embedded_mapping(&self.convention, object, descriptor, &alias))
    }
}

/// Countries, stored as their enum code.
#[derive(Debug, Clone, Copy)]
pub struct CountryGenerator {
    convention: CodeConvention,
}

impl CountryGenerator {
    pub fn new(convention: CodeConvention) -> Self {
        Self { convention }
    }
}

impl PropertyCodeGenerator for CountryGenerator {
    fn name(&self) -> &'static str {
        "country"
    }

    fn supports(&self, _: &DomainStructure, object: &DomainObjectStructure, property: &str) -> bool {
        object
            .property(property)
            .is_some_and(|p| *p.property_type() == PropertyType::Country)
    }

    fn generate(
        &self,
        _: &DomainStructure,
        object: &DomainObjectStructure,
        property: &str,
        context: &mut CodeBuilderContext,
    ) -> Result<String, DomainError> {
        let descriptor = lookup(object, property)?;
        let class = ClassName::new(COUNTRY)?;

        let alias = inject_class(context, &class, descriptor);
        Ok(column_mapping(
            &self.convention,
            object,
            descriptor,
            &format!("asEnum({alias}::class)"),
        ))
    }
}
