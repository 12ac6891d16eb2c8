//! `domgen inspect`: which generator handles each property.

use domgen_core::application::ObjectInspection;

use super::{load_domain, parse_filter, scaffold_service};
use crate::{
    cli::{GlobalArgs, InspectArgs, OutputFormat},
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

pub fn execute(
    args: InspectArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let domain = load_domain(&global, &config)?;
    let filter = parse_filter(&args.filter)?;

    let inspections = scaffold_service(&config)
        .inspect(&domain, &filter)
        .with_cli_context(|| "inspecting domain")?;

    if output.format() == OutputFormat::Json {
        output.json(&inspections)?;
        return Ok(());
    }

    if inspections.is_empty() {
        output.warning(&format!("No domain objects match '{}'", filter.pattern()))?;
        return Ok(());
    }

    for (index, inspection) in inspections.iter().enumerate() {
        if index > 0 {
            output.print("")?;
        }
        output.header(&format!("{} ({})", inspection.class, inspection.kind))?;
        for line in table_lines(inspection) {
            output.print(&line)?;
        }
    }
    Ok(())
}

/// `  name  type  → generator` rows, columns padded to the widest entry.
fn table_lines(inspection: &ObjectInspection) -> Vec<String> {
    if inspection.properties.is_empty() {
        return vec!["  (no properties)".into()];
    }

    let type_label = |nullable: bool, ty: &str| {
        if nullable {
            format!("?{ty}")
        } else {
            ty.to_string()
        }
    };

    let name_width = inspection
        .properties
        .iter()
        .map(|p| p.property.len())
        .max()
        .unwrap_or(0);
    let type_width = inspection
        .properties
        .iter()
        .map(|p| type_label(p.nullable, &p.property_type).len())
        .max()
        .unwrap_or(0);

    inspection
        .properties
        .iter()
        .map(|p| {
            format!(
                "  {:<name_width$}  {:<type_width$}  \u{2192} {}",
                p.property,
                type_label(p.nullable, &p.property_type),
                p.generator
            )
        })
        .collect()
}
