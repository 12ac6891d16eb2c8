//! Catch-all generator, registered last.

use crate::domain::{
    CodeBuilderContext, CodeConvention, DomainError, DomainObjectStructure, DomainStructure,
    PropertyType,
};
use crate::generation::{PropertyCodeGenerator, inject_class, lookup, parameter_type};

/// Accepts every property. Still injects the property so the generated class
/// stays complete, and leaves a comment in place of the mapping.
#[derive(Debug, Clone, Copy)]
pub struct FallbackGenerator {
    convention: CodeConvention,
}

impl FallbackGenerator {
    pub fn new(convention: CodeConvention) -> Self {
        Self { convention }
    }
}

impl PropertyCodeGenerator for FallbackGenerator {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn supports(&self, _: &DomainStructure, _: &DomainObjectStructure, _: &str) -> bool {
        true
    }

    fn generate(
        &self,
        _: &DomainStructure,
        object: &DomainObjectStructure,
        property: &str,
        context: &mut CodeBuilderContext,
    ) -> Result<String, DomainError> {
        let descriptor = lookup(object, property)?;

        match descriptor.property_type() {
            PropertyType::Object(class) | PropertyType::Enum(class) => {
                inject_class(context, class, descriptor);
            }
            PropertyType::Collection(_) => {
                context.add_constructor_parameter(
                    parameter_type("array", descriptor.is_nullable()),
                    descriptor.name(),
                );
            }
            // `mixed` already admits null.
            _ => {
                context.add_constructor_parameter("mixed", descriptor.name());
            }
        }

        Ok(format!(
            "// Unable to determine a mapping for {} (type: {})",
            self.convention
                .property_reference(object.name(), descriptor.name()),
            descriptor.property_type(),
        ))
    }
}
