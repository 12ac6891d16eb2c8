//! Monetary amounts and currencies.

use crate::domain::{
    ClassName, CodeBuilderContext, CodeConvention, DomainError, DomainObjectStructure,
    DomainStructure, PropertyType,
};
use crate::generation::{
    PropertyCodeGenerator, column_mapping, embedded_mapping, inject_class, lookup,
};

const MONEY: &str = "Dms\\Common\\Structure\\Money\\Money";
const CURRENCY: &str = "Dms\\Common\\Structure\\Money\\Currency";

/// Amount plus currency, embedded over two columns.
#[derive(Debug, Clone, Copy)]
pub struct MoneyGenerator {
    convention: CodeConvention,
}

impl MoneyGenerator {
    pub fn new(convention: CodeConvention) -> Self {
        Self { convention }
    }
}

impl PropertyCodeGenerator for MoneyGenerator {
    fn name(&self) -> &'static str {
        "money"
    }

    fn supports(&self, _: &DomainStructure, object: &DomainObjectStructure, property: &str) -> bool {
        object
            .property(property)
            .is_some_and(|p| *p.property_type() == PropertyType::Money)
    }

    fn generate(
        &self,
        _: &DomainStructure,
        object: &DomainObjectStructure,
        property: &str,
        context: &mut CodeBuilderContext,
    ) -> Result<String, DomainError> {
        let descriptor = lookup(object, property)?;
        let class = ClassName::new(MONEY)?;

        let alias = inject_class(context, &class, descriptor);
        Ok(embedded_mapping(&self.convention, object, descriptor, &alias))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CurrencyGenerator {
    convention: CodeConvention,
}

impl CurrencyGenerator {
    pub fn new(convention: CodeConvention) -> Self {
        Self { convention }
    }
}

impl PropertyCodeGenerator for CurrencyGenerator {
    fn name(&self) -> &'static str {
        "currency"
    }

    fn supports(&self, _: &DomainStructure, object: &DomainObjectStructure, property: &str) -> bool {
        object
            .property(property)
            .is_some_and(|p| *p.property_type() == PropertyType::Currency)
    }

    fn generate(
        &self,
        _: &DomainStructure,
        object: &DomainObjectStructure,
        property: &str,
        context: &mut CodeBuilderContext,
    ) -> Result<String, DomainError> {
        let descriptor = lookup(object, property)?;
        let class = ClassName::new(CURRENCY)?;

        let alias = inject_class(context, &class, descriptor);
        Ok(column_mapping(
            &self.convention,
            object,
            descriptor,
            &format!("asEnum({alias}::class)"),
        ))
    }
}
