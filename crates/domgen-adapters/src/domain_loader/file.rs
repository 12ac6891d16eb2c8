//! Loads a domain description from a TOML or JSON file.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use domgen_core::{
    application::{ApplicationError, ports::DomainStructureLoader},
    domain::DomainStructure,
    error::DomgenResult,
};

use super::DomainDescription;
use crate::filesystem::map_io_error;

/// Serialisation of a description file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionFormat {
    Toml,
    Json,
}

impl DescriptionFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// [`DomainStructureLoader`] reading a description file from disk.
#[derive(Debug, Clone)]
pub struct FileDomainLoader {
    path: PathBuf,
}

impl FileDomainLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse description text. `origin` names the source in errors.
    pub fn parse(
        text: &str,
        format: DescriptionFormat,
        origin: &str,
    ) -> DomgenResult<DomainStructure> {
        let failed = |reason: String| ApplicationError::LoaderFailed {
            origin: origin.to_string(),
            reason,
        };

        let description: DomainDescription = match format {
            DescriptionFormat::Toml => toml::from_str(text).map_err(|e| failed(e.to_string()))?,
            DescriptionFormat::Json => {
                serde_json::from_str(text).map_err(|e| failed(e.to_string()))?
            }
        };

        Ok(description.into_structure()?)
    }
}

impl DomainStructureLoader for FileDomainLoader {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load_structure(&self) -> DomgenResult<DomainStructure> {
        let origin = self.path.display().to_string();
        let format = DescriptionFormat::from_path(&self.path).ok_or_else(|| {
            ApplicationError::LoaderFailed {
                origin: origin.clone(),
                reason: "unsupported extension, expected .toml or .json".into(),
            }
        })?;

        let text = std::fs::read_to_string(&self.path)
            .map_err(|e| map_io_error(&self.path, e, "read domain description"))?;
        let domain = Self::parse(&text, format, &origin)?;

        debug!(domain = %domain.name(), objects = domain.len(), "loaded domain description");
        Ok(domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domgen_core::{
        domain::{ClassName, DomainError, ObjectKind, PropertyType},
        error::DomgenError,
    };
    use tempfile::TempDir;

    const BILLING_TOML: &str = r#"
name = "billing"

[[objects]]
name = 'App\Domain\Invoice'
kind = "entity"
properties = [
  { name = "total", type = "money" },
  { name = "issuedAt", type = "datetime" },
  { name = "vendor", type = 'App\Domain\Supplier' },
  { name = "lines", type = 'collection<App\Domain\InvoiceLine>' },
  { name = "notes", type = "string", nullable = true },
]

[[objects]]
name = 'App\Domain\Supplier'

[[objects]]
name = 'App\Domain\InvoiceLine'
kind = "value-object"
"#;

    #[test]
    fn loads_toml_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("domain.toml");
        std::fs::write(&path, BILLING_TOML).unwrap();

        let domain = FileDomainLoader::new(&path).load_structure().unwrap();

        assert_eq!(domain.name(), "billing");
        assert_eq!(domain.len(), 3);
        let invoice = domain.object("App\\Domain\\Invoice").unwrap();
        assert!(invoice.property("notes").unwrap().is_nullable());
        assert_eq!(
            domain.kind_of(&ClassName::new("InvoiceLine").unwrap()),
            Some(ObjectKind::ValueObject)
        );
        assert_eq!(
            domain.object("App\\Domain\\Supplier").unwrap().kind(),
            ObjectKind::Entity
        );
    }

    #[test]
    fn parses_json() {
        let json = r#"{
            "name": "billing",
            "objects": [
                { "name": "App\\Domain\\Invoice",
                  "properties": [{ "name": "total", "type": "money" }] }
            ]
        }"#;

        let domain = FileDomainLoader::parse(json, DescriptionFormat::Json, "inline").unwrap();

        assert_eq!(
            domain
                .object("App\\Domain\\Invoice")
                .unwrap()
                .property("total")
                .unwrap()
                .property_type(),
            &PropertyType::Money
        );
    }

    #[test]
    fn syntax_error_names_origin() {
        let err = FileDomainLoader::parse("name = ", DescriptionFormat::Toml, "broken.toml")
            .unwrap_err();

        match err {
            DomgenError::Application(ApplicationError::LoaderFailed { origin, .. }) => {
                assert_eq!(origin, "broken.toml");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn model_errors_pass_through() {
        let toml = r#"
name = "billing"
[[objects]]
name = 'App\Domain\Invoice'
[[objects]]
name = 'App\Domain\Invoice'
"#;
        let err = FileDomainLoader::parse(toml, DescriptionFormat::Toml, "dup.toml").unwrap_err();

        assert!(matches!(
            err,
            DomgenError::Domain(DomainError::DuplicateObject { .. })
        ));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = FileDomainLoader::new("domain.yaml").load_structure().unwrap_err();
        assert!(matches!(
            err,
            DomgenError::Application(ApplicationError::LoaderFailed { .. })
        ));
    }

    #[test]
    fn missing_file_is_a_filesystem_error() {
        let err = FileDomainLoader::new("/does/not/exist.toml")
            .load_structure()
            .unwrap_err();
        assert!(matches!(
            err,
            DomgenError::Application(ApplicationError::FilesystemError { .. })
        ));
    }
}
