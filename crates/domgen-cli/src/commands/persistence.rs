//! `domgen persistence`: repository interface, database repository and ORM
//! mapper for every matching entity.

use std::path::PathBuf;

use tracing::{info, instrument};

use domgen_adapters::{StubLibrary, builtin_stubs};
use domgen_core::{
    application::{ScaffoldReport, ScaffoldRequest, StubSource},
    domain::{
        ClassName, CodeConvention, NAMESPACE_SEPARATOR, NamespaceDirectoryResolver, ObjectFilter,
        ObjectKind, Replacements,
    },
};

use super::{load_domain, parse_filter, print_preview, print_report, scaffold_service};
use crate::{
    cli::{GlobalArgs, PersistenceArgs},
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

pub const SERVICES_NAMESPACE: &str = "{services_namespace}";
pub const INFRASTRUCTURE_NAMESPACE: &str = "{infrastructure_namespace}";
pub const TABLE: &str = "{table}";

/// One generated file per entity.
struct Target {
    stub: &'static str,
    namespace: String,
    file_name: fn(&str) -> String,
}

/// Where each persistence class lives, derived from
/// `generation.persistence_namespace` and `generation.namespace_roots`.
#[derive(Debug, Clone)]
pub struct PersistenceLayout {
    services_namespace: String,
    infrastructure_namespace: String,
    resolver: NamespaceDirectoryResolver,
    convention: CodeConvention,
}

impl PersistenceLayout {
    pub fn new(config: &AppConfig) -> Self {
        let root = config
            .generation
            .persistence_namespace
            .trim_matches(NAMESPACE_SEPARATOR);

        Self {
            services_namespace: format!("{root}\\Services"),
            infrastructure_namespace: format!("{root}\\Infrastructure"),
            resolver: NamespaceDirectoryResolver::new(
                PathBuf::new(),
                config.generation.namespace_roots.clone(),
            ),
            convention: CodeConvention::new(),
        }
    }

    fn targets(&self) -> [Target; 3] {
        [
            Target {
                stub: builtin_stubs::REPOSITORY_INTERFACE,
                namespace: self.services_namespace.clone(),
                file_name: |class| format!("I{class}Repository.php"),
            },
            Target {
                stub: builtin_stubs::DB_REPOSITORY,
                namespace: self.infrastructure_namespace.clone(),
                file_name: |class| format!("Db{class}Repository.php"),
            },
            Target {
                stub: builtin_stubs::MAPPER,
                namespace: format!("{}\\Mapper", self.infrastructure_namespace),
                file_name: |class| format!("{class}Mapper.php"),
            },
        ]
    }

    /// One entity-only request per persistence class.
    pub fn requests(
        &self,
        filter: &ObjectFilter,
        stubs: &StubLibrary,
        overwrite: bool,
    ) -> CliResult<Vec<ScaffoldRequest>> {
        self.targets()
            .into_iter()
            .map(|target| -> CliResult<ScaffoldRequest> {
                let text = stubs
                    .require(target.stub)
                    .with_cli_context(|| format!("loading stub '{}'", target.stub))?;

                let directory = self.resolver.directory_for(&target.namespace);
                let file_name = target.file_name;
                let layout = self.clone();

                Ok(ScaffoldRequest::new(
                    filter.clone(),
                    StubSource::Inline(text.to_string()),
                    move |object| directory.join(file_name(object.short_name())),
                )
                .replacements(move |object| layout.replacements(object.name()))
                .overwrite(overwrite)
                .only(ObjectKind::Entity))
            })
            .collect()
    }

    fn replacements(&self, class: &ClassName) -> Replacements {
        Replacements::from([
            (SERVICES_NAMESPACE.to_string(), self.services_namespace.clone()),
            (
                INFRASTRUCTURE_NAMESPACE.to_string(),
                self.infrastructure_namespace.clone(),
            ),
            (TABLE.to_string(), self.convention.table_name(class)),
        ])
    }
}

#[instrument(skip_all, fields(filter = %args.filter))]
pub fn execute(
    args: PersistenceArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let domain = load_domain(&global, &config)?;
    let filter = parse_filter(&args.filter)?;
    let stubs = StubLibrary::load(config.generation.stub_dir.as_deref())
        .with_cli_context(|| "loading stub overrides")?;

    let service = scaffold_service(&config);
    let requests = PersistenceLayout::new(&config).requests(&filter, &stubs, args.overwrite)?;

    if args.dry_run {
        for request in &requests {
            let rendered = service
                .preview(&domain, request)
                .with_cli_context(|| "rendering persistence classes")?;
            print_preview(&output, &rendered)?;
        }
        return Ok(());
    }

    let mut total = ScaffoldReport::default();
    for request in &requests {
        let report = service
            .scaffold(&domain, request)
            .with_cli_context(|| "scaffolding persistence classes")?;
        print_report(&output, &report)?;

        total.matched = total.matched.max(report.matched);
        total.written.extend(report.written);
        total.skipped.extend(report.skipped);
    }

    if total.matched == 0 {
        output.warning(&format!("No entities match '{}'", filter.pattern()))?;
        return Ok(());
    }

    info!(
        entities = total.matched,
        written = total.written.len(),
        skipped = total.skipped.len(),
        "Persistence scaffolded"
    );
    output.info(&format!(
        "Matched {}, wrote {}, skipped {}",
        total.matched,
        total.written.len(),
        total.skipped.len()
    ))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use domgen_core::domain::DomainObjectStructure;

    fn invoice() -> DomainObjectStructure {
        DomainObjectStructure::new(
            ClassName::new("App\\Domain\\Invoice").unwrap(),
            ObjectKind::Entity,
        )
    }

    fn requests(config: &AppConfig) -> Vec<ScaffoldRequest> {
        PersistenceLayout::new(config)
            .requests(&ObjectFilter::any(), &StubLibrary::builtin(), false)
            .unwrap()
    }

    #[test]
    fn default_layout_paths() {
        let paths: Vec<_> = requests(&AppConfig::default())
            .iter()
            .map(|request| request.output_path_for(&invoice()))
            .collect();

        assert_eq!(
            paths,
            vec![
                PathBuf::from("src/Persistence/Services/IInvoiceRepository.php"),
                PathBuf::from("src/Persistence/Infrastructure/DbInvoiceRepository.php"),
                PathBuf::from("src/Persistence/Infrastructure/Mapper/InvoiceMapper.php"),
            ]
        );
    }

    #[test]
    fn requests_are_entity_only() {
        for request in requests(&AppConfig::default()) {
            assert_eq!(request.kind(), Some(ObjectKind::Entity));
            assert!(!request.is_overwrite());
        }
    }

    #[test]
    fn replacements_follow_the_persistence_namespace() {
        let mut config = AppConfig::default();
        config.generation.persistence_namespace = "\\Shop\\Db\\".into();

        let replacements = requests(&config)[0].replacements_for(&invoice());
        assert_eq!(replacements[SERVICES_NAMESPACE], "Shop\\Db\\Services");
        assert_eq!(replacements[INFRASTRUCTURE_NAMESPACE], "Shop\\Db\\Infrastructure");
        assert_eq!(replacements[TABLE], "invoices");
    }

    #[test]
    fn unmapped_namespace_maps_segment_per_directory() {
        let mut config = AppConfig::default();
        config.generation.persistence_namespace = "Shop".into();

        let path = requests(&config)[2].output_path_for(&invoice());
        assert_eq!(
            path,
            PathBuf::from("Shop/Infrastructure/Mapper/InvoiceMapper.php")
        );
    }
}
