//! `domgen generate`: render a user stub once per matching object.

use std::path::PathBuf;

use tracing::instrument;

use domgen_core::{
    application::{ScaffoldRequest, StubSource},
    domain::{
        DomainObjectStructure, NamespaceDirectoryResolver, ObjectFilter, Replacements,
        stub::substitute,
    },
};

use super::{load_domain, parse_filter, print_preview, print_report, scaffold_service};
use crate::{
    cli::{GenerateArgs, GlobalArgs},
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

pub const CLASS: &str = "{class}";
pub const NAMESPACE_PATH: &str = "{namespace_path}";

/// Expands an output pattern such as `{namespace_path}/{class}Form.php`.
#[derive(Debug, Clone)]
pub struct OutputPattern {
    pattern: String,
    resolver: NamespaceDirectoryResolver,
}

impl OutputPattern {
    pub fn new(pattern: impl Into<String>, resolver: NamespaceDirectoryResolver) -> Self {
        Self {
            pattern: pattern.into(),
            resolver,
        }
    }

    pub fn path_for(&self, object: &DomainObjectStructure) -> PathBuf {
        let namespace_path = self.resolver.directory_for(object.name().namespace());
        let table = Replacements::from([
            (CLASS.to_string(), object.short_name().to_string()),
            (
                NAMESPACE_PATH.to_string(),
                namespace_path.to_string_lossy().into_owned(),
            ),
        ]);
        PathBuf::from(substitute(&self.pattern, &table))
    }
}

/// Build the request described by the flags.
pub fn build_request(args: &GenerateArgs, filter: ObjectFilter, config: &AppConfig) -> ScaffoldRequest {
    let pattern = OutputPattern::new(
        args.output.clone(),
        NamespaceDirectoryResolver::new(PathBuf::new(), config.generation.namespace_roots.clone()),
    );
    let vars: Replacements = args.vars.iter().cloned().collect();

    let request = ScaffoldRequest::new(filter, StubSource::Path(args.stub.clone()), move |object| {
        pattern.path_for(object)
    })
    .replacements(move |_| vars.clone())
    .overwrite(args.overwrite);

    match args.kind {
        Some(kind) => request.only(kind.into()),
        None => request,
    }
}

#[instrument(skip_all, fields(stub = %args.stub.display(), filter = %args.filter))]
pub fn execute(
    args: GenerateArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let domain = load_domain(&global, &config)?;
    let filter = parse_filter(&args.filter)?;
    let request = build_request(&args, filter, &config);
    let service = scaffold_service(&config);

    if args.dry_run {
        let rendered = service
            .preview(&domain, &request)
            .with_cli_context(|| "rendering stub")?;
        if rendered.is_empty() {
            output.warning(&format!("No domain objects match '{}'", args.filter))?;
        }
        return print_preview(&output, &rendered);
    }

    let report = service
        .scaffold(&domain, &request)
        .with_cli_context(|| format!("rendering '{}'", args.stub.display()))?;

    if report.matched == 0 {
        output.warning(&format!("No domain objects match '{}'", args.filter))?;
        return Ok(());
    }

    print_report(&output, &report)?;
    output.info(&format!(
        "Matched {}, wrote {}, skipped {}",
        report.matched,
        report.written.len(),
        report.skipped.len()
    ))?;
    Ok(())
}
