//! Colour properties.

use crate::domain::{
    ClassName, CodeBuilderContext, CodeConvention, ColourType, DomainError,
    DomainObjectStructure, DomainStructure, PropertyType,
};
use crate::generation::{PropertyCodeGenerator, column_mapping, inject_class, lookup};

const COLOUR: &str = "Dms\\Common\\Structure\\Colour\\Colour";
const TRANSPARENT_COLOUR: &str = "Dms\\Common\\Structure\\Colour\\TransparentColour";

#[derive(Debug, Clone, Copy)]
pub struct ColourGenerator {
    convention: CodeConvention,
}

impl ColourGenerator {
    pub fn new(convention: CodeConvention) -> Self {
        Self { convention }
    }
}

impl PropertyCodeGenerator for ColourGenerator {
    fn name(&self) -> &'static str {
        "colour"
    }

    fn supports(&self, _: &DomainStructure, object: &DomainObjectStructure, property: &str) -> bool {
        object
            .property(property)
            .is_some_and(|p| matches!(p.property_type(), PropertyType::Colour(_)))
    }

    fn generate(
        &self,
        _: &DomainStructure,
        object: &DomainObjectStructure,
        property: &str,
        context: &mut CodeBuilderContext,
    ) -> Result<String, DomainError> {
        let descriptor = lookup(object, property)?;
        let PropertyType::Colour(colour) = descriptor.property_type() else {
            return Err(DomainError::InvalidPropertyType {
                value: descriptor.property_type().to_string(),
                reason: "expected a colour".into(),
            });
        };

        let (class, mapping) = match colour {
            ColourType::Colour => (COLOUR, "asColour()"),
            ColourType::TransparentColour => (TRANSPARENT_COLOUR, "asTransparentColour()"),
        };
        let class = ClassName::new(class)?;

        inject_class(context, &class, descriptor);
        Ok(column_mapping(&self.convention, object, descriptor, mapping))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::test_support::*;

    #[test]
    fn transparent_colour() {
        let domain = domain_with(&[("tint", "transparent-colour")]);
        let mut ctx = CodeBuilderContext::new();
        let code = ColourGenerator::new(CodeConvention::new())
            .generate(&domain, invoice(&domain), "tint", &mut ctx)
            .unwrap();

        assert_eq!(
            code,
            "$map->property(Invoice::TINT)->to('tint')->asTransparentColour();"
        );
        assert!(ctx.has_import(TRANSPARENT_COLOUR));
    }
}
