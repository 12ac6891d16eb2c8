//! File and image properties, stored under configured upload directories.

use crate::domain::{
    ClassName, CodeBuilderContext, CodeConvention, DomainError, DomainObjectStructure,
    DomainStructure, FileType, PropertyType,
};
use crate::generation::{
    FileStorageConfig, PropertyCodeGenerator, column_mapping, inject_class, lookup,
};

const FILE: &str = "Dms\\Common\\Structure\\FileSystem\\File";
const IMAGE: &str = "Dms\\Common\\Structure\\FileSystem\\Image";

#[derive(Debug, Clone)]
pub struct FileGenerator {
    convention: CodeConvention,
    storage: FileStorageConfig,
}

impl FileGenerator {
    pub fn new(convention: CodeConvention, storage: FileStorageConfig) -> Self {
        Self {
            convention,
            storage,
        }
    }
}

impl PropertyCodeGenerator for FileGenerator {
    fn name(&self) -> &'static str {
        "file"
    }

    fn supports(&self, _: &DomainStructure, object: &DomainObjectStructure, property: &str) -> bool {
        object
            .property(property)
            .is_some_and(|p| matches!(p.property_type(), PropertyType::File(_)))
    }

    fn generate(
        &self,
        _: &DomainStructure,
        object: &DomainObjectStructure,
        property: &str,
        context: &mut CodeBuilderContext,
    ) -> Result<String, DomainError> {
        let descriptor = lookup(object, property)?;
        let PropertyType::File(file) = descriptor.property_type() else {
            return Err(DomainError::InvalidPropertyType {
                value: descriptor.property_type().to_string(),
                reason: "expected a file".into(),
            });
        };

        let (class, mapping) = match file {
            FileType::File => (FILE, format!("asFile('{}')", self.storage.uploads_dir)),
            FileType::Image => (
                IMAGE,
                format!("asImage('{}')", self.storage.public_uploads_dir),
            ),
        };
        let class = ClassName::new(class)?;

        inject_class(context, &class, descriptor);
        Ok(column_mapping(&self.convention, object, descriptor, &mapping))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::test_support::*;

    #[test]
    fn uses_configured_directories() {
        let domain = domain_with(&[("scan", "file"), ("logo", "image")]);
        let generator = FileGenerator::new(
            CodeConvention::new(),
            FileStorageConfig {
                uploads_dir: "var/private".into(),
                public_uploads_dir: "web/img".into(),
            },
        );
        let mut ctx = CodeBuilderContext::new();

        let scan = generator
            .generate(&domain, invoice(&domain), "scan", &mut ctx)
            .unwrap();
        let logo = generator
            .generate(&domain, invoice(&domain), "logo", &mut ctx)
            .unwrap();

        assert_eq!(
            scan,
            "$map->property(Invoice::SCAN)->to('scan')->asFile('var/private');"
        );
        assert_eq!(
            logo,
            "$map->property(Invoice::LOGO)->to('logo')->asImage('web/img');"
        );
        assert_eq!(
            ctx.constructor_parameter_list(),
            vec!["File $scan", "Image $logo"]
        );
    }
}
