//! Command handlers and the plumbing they share.

use std::path::PathBuf;

use domgen_adapters::{FileDomainLoader, LocalFilesystem};
use domgen_core::{
    application::{ScaffoldReport, ScaffoldService, ports::DomainStructureLoader},
    domain::{DomainStructure, ObjectFilter},
    error::DomgenError,
    generation::GeneratorRegistry,
};

use crate::{
    cli::GlobalArgs,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

pub mod completions;
pub mod config;
pub mod generate;
pub mod init;
pub mod inspect;
pub mod persistence;

/// `--domain` wins over `domain.path`.
pub(crate) fn domain_path(global: &GlobalArgs, config: &AppConfig) -> CliResult<PathBuf> {
    global
        .domain
        .clone()
        .or_else(|| config.domain.path.clone())
        .ok_or(CliError::DomainNotConfigured)
}

/// Load the domain description named by the flags or config.
pub(crate) fn load_domain(global: &GlobalArgs, config: &AppConfig) -> CliResult<DomainStructure> {
    let path = domain_path(global, config)?;
    if !path.is_file() {
        return Err(CliError::DomainNotFound { path });
    }

    FileDomainLoader::new(&path)
        .load_structure()
        .with_cli_context(|| format!("loading '{}'", path.display()))
}

/// Service over the local disk with the standard generator chain.
pub(crate) fn scaffold_service(config: &AppConfig) -> ScaffoldService {
    ScaffoldService::new(
        Box::new(LocalFilesystem::new()),
        GeneratorRegistry::standard(config.generator_config()),
    )
}

pub(crate) fn parse_filter(pattern: &str) -> CliResult<ObjectFilter> {
    ObjectFilter::new(pattern).map_err(|e| CliError::Core(DomgenError::from(e)))
}

/// Print what one scaffold run wrote and kept.
pub(crate) fn print_report(output: &OutputManager, report: &ScaffoldReport) -> CliResult<()> {
    for path in &report.written {
        output.success(&format!("Created {}", path.display()))?;
    }
    for path in &report.skipped {
        output.dim(&format!(
            "Skipped {} (exists, use --overwrite to replace)",
            path.display()
        ))?;
    }
    Ok(())
}

/// Print rendered files instead of writing them.
pub(crate) fn print_preview(output: &OutputManager, rendered: &[(PathBuf, String)]) -> CliResult<()> {
    for (path, content) in rendered {
        output.header(&format!("── {} ──", path.display()))?;
        output.block(content)?;
    }
    Ok(())
}
