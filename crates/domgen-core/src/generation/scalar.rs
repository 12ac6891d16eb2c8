//! Builtin scalar properties: `string`, `int`, `float`, `bool`.

use crate::domain::{
    CodeBuilderContext, CodeConvention, DomainError, DomainObjectStructure, DomainStructure,
    PropertyType, ScalarType,
};
use crate::generation::{PropertyCodeGenerator, column_mapping, lookup, parameter_type};

#[derive(Debug, Clone, Copy)]
pub struct ScalarGenerator {
    convention: CodeConvention,
}

impl ScalarGenerator {
    pub fn new(convention: CodeConvention) -> Self {
        Self { convention }
    }
}

impl PropertyCodeGenerator for ScalarGenerator {
    fn name(&self) -> &'static str {
        "scalar"
    }

    fn supports(&self, _: &DomainStructure, object: &DomainObjectStructure, property: &str) -> bool {
        object
            .property(property)
            .is_some_and(|p| matches!(p.property_type(), PropertyType::Scalar(_)))
    }

    fn generate(
        &self,
        _: &DomainStructure,
        object: &DomainObjectStructure,
        property: &str,
        context: &mut CodeBuilderContext,
    ) -> Result<String, DomainError> {
        let descriptor = lookup(object, property)?;
        let PropertyType::Scalar(scalar) = descriptor.property_type() else {
            return Err(DomainError::InvalidPropertyType {
                value: descriptor.property_type().to_string(),
                reason: "expected a scalar".into(),
            });
        };

        let mapping = match scalar {
            ScalarType::String => "asVarchar(255)",
            ScalarType::Int => "asInt()",
            ScalarType::Float => "asDecimal(16, 4)",
            ScalarType::Bool => "asBool()",
        };

        context.add_constructor_parameter(
            parameter_type(scalar.as_str(), descriptor.is_nullable()),
            descriptor.name(),
        );

        Ok(column_mapping(&self.convention, object, descriptor, mapping))
    }
}
