//! URLs and email addresses.

use crate::domain::{
    ClassName, CodeBuilderContext, CodeConvention, DomainError, DomainObjectStructure,
    DomainStructure, PropertyType, WebType,
};
use crate::generation::{PropertyCodeGenerator, column_mapping, inject_class, lookup};

const URL: &str = "Dms\\Common\\Structure\\Web\\Url";
const EMAIL_ADDRESS: &str = "Dms\\Common\\Structure\\Web\\EmailAddress";

#[derive(Debug, Clone, Copy)]
pub struct WebGenerator {
    convention: CodeConvention,
}

impl WebGenerator {
    pub fn new(convention: CodeConvention) -> Self {
        Self { convention }
    }
}

impl PropertyCodeGenerator for WebGenerator {
    fn name(&self) -> &'static str {
        "web"
    }

    fn supports(&self, _: &DomainStructure, object: &DomainObjectStructure, property: &str) -> bool {
        object
            .property(property)
            .is_some_and(|p| matches!(p.property_type(), PropertyType::Web(_)))
    }

    fn generate(
        &self,
        _: &DomainStructure,
        object: &DomainObjectStructure,
        property: &str,
        context: &mut CodeBuilderContext,
    ) -> Result<String, DomainError> {
        let descriptor = lookup(object, property)?;
        let PropertyType::Web(web) = descriptor.property_type() else {
            return Err(DomainError::InvalidPropertyType {
                value: descriptor.property_type().to_string(),
                reason: "expected a url or email".into(),
            });
        };

        let (class, mapping) = match web {
            WebType::Url => (URL, "asUrl()"),
            WebType::Email => (EMAIL_ADDRESS, "asEmail()"),
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
    fn email_column() {
        let domain = domain_with(&[("contactEmail", "email")]);
        let mut ctx = CodeBuilderContext::new();
        let code = WebGenerator::new(CodeConvention::new())
            .generate(&domain, invoice(&domain), "contactEmail", &mut ctx)
            .unwrap();

        assert_eq!(
            code,
            "$map->property(Invoice::CONTACT_EMAIL)->to('contact_email')->asEmail();"
        );
        assert_eq!(
            ctx.constructor_parameter_list(),
            vec!["EmailAddress $contactEmail"]
        );
    }
}
