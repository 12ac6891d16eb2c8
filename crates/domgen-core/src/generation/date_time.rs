//! Date and time properties.

use crate::domain::{
    ClassName, CodeBuilderContext, CodeConvention, DomainError, DomainObjectStructure,
    DomainStructure, PropertyType, TemporalType,
};
use crate::generation::{
    PropertyCodeGenerator, column_mapping, embedded_mapping, inject_class, lookup,
};

const DATE: &str = "Dms\\Common\\Structure\\DateTime\\Date";
const TIME_OF_DAY: &str = "Dms\\Common\\Structure\\DateTime\\TimeOfDay";
const DATE_TIME: &str = "DateTimeImmutable";
const TIMEZONED_DATE_TIME: &str = "Dms\\Common\\Structure\\DateTime\\TimezonedDateTime";

#[derive(Debug, Clone, Copy)]
pub struct DateTimeGenerator {
    convention: CodeConvention,
}

impl DateTimeGenerator {
    pub fn new(convention: CodeConvention) -> Self {
        Self { convention }
    }
}

impl PropertyCodeGenerator for DateTimeGenerator {
    fn name(&self) -> &'static str {
        "date-time"
    }

    fn supports(&self, _: &DomainStructure, object: &DomainObjectStructure, property: &str) -> bool {
        object
            .property(property)
            .is_some_and(|p| matches!(p.property_type(), PropertyType::Temporal(_)))
    }

    fn generate(
        &self,
        _: &DomainStructure,
        object: &DomainObjectStructure,
        property: &str,
        context: &mut CodeBuilderContext,
    ) -> Result<String, DomainError> {
        let descriptor = lookup(object, property)?;
        let PropertyType::Temporal(temporal) = descriptor.property_type() else {
            return Err(DomainError::InvalidPropertyType {
                value: descriptor.property_type().to_string(),
                reason: "expected a date or time".into(),
            });
        };

        let (class, mapping) = match temporal {
            TemporalType::Date => (DATE, Some("asDate()")),
            TemporalType::Time => (TIME_OF_DAY, Some("asTime()")),
            TemporalType::DateTime => (DATE_TIME, Some("asDateTime()")),
            // Stored as a timestamp plus timezone column.
            TemporalType::TimezonedDateTime => (TIMEZONED_DATE_TIME, None),
        };
        let class = ClassName::new(class)?;

        let alias = inject_class(context, &class, descriptor);

        Ok(match mapping {
            Some(mapping) => column_mapping(&self.convention, object, descriptor, mapping),
            None => embedded_mapping(&self.convention, object, descriptor, &alias),
        })
    }
}
