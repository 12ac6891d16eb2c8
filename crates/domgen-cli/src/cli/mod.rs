//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use domgen_core::domain::ObjectKind;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "domgen",
    bin_name = "domgen",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Domain-model driven code scaffolding",
    long_about = "domgen reads a description of your domain objects and scaffolds \
                  repositories, ORM mappers and any other per-object source file \
                  from stubs.",
    after_help = "EXAMPLES:\n\
        \x20 domgen -d domain.toml persistence\n\
        \x20 domgen -d domain.toml persistence 'App\\Domain\\*Order' --overwrite\n\
        \x20 domgen -d domain.toml generate --stub dto.stub --output 'src/Dto/{class}Dto.php'\n\
        \x20 domgen -d domain.toml inspect --output-format json\n\
        \x20 domgen completions bash > /usr/share/bash-completion/completions/domgen",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scaffold repositories and mappers for entities.
    #[command(
        visible_alias = "p",
        about = "Scaffold repositories and ORM mappers for entities",
        after_help = "EXAMPLES:\n\
            \x20 domgen persistence\n\
            \x20 domgen persistence 'App\\Domain\\Invoice'\n\
            \x20 domgen persistence 'App\\Domain\\*' --overwrite\n\
            \x20 domgen persistence --dry-run"
    )]
    Persistence(PersistenceArgs),

    /// Render a custom stub for every matching object.
    #[command(
        visible_alias = "g",
        about = "Render a custom stub for every matching object",
        after_help = "EXAMPLES:\n\
            \x20 domgen generate --stub dto.stub --output 'src/Dto/{class}Dto.php'\n\
            \x20 domgen generate --stub form.stub --output '{namespace_path}/{class}Form.php' --kind entity\n\
            \x20 domgen generate --stub x.stub --output 'out/{class}.php' --var '{author}=Jane'"
    )]
    Generate(GenerateArgs),

    /// Show which generator handles each property.
    #[command(
        visible_alias = "i",
        about = "Show which generator handles each property",
        after_help = "EXAMPLES:\n\
            \x20 domgen inspect\n\
            \x20 domgen inspect 'App\\Domain\\Invoice'\n\
            \x20 domgen inspect --output-format json"
    )]
    Inspect(InspectArgs),

    /// Initialise a domgen configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 domgen init           # default location\n\
            \x20 domgen init --force   # replace an existing file"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 domgen completions bash > ~/.local/share/bash-completion/completions/domgen\n\
            \x20 domgen completions zsh  > ~/.zfunc/_domgen\n\
            \x20 domgen completions fish > ~/.config/fish/completions/domgen.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the domgen configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 domgen config get generation.persistence_namespace\n\
            \x20 domgen config list\n\
            \x20 domgen config path"
    )]
    Config(ConfigCommands),
}

// ── persistence ───────────────────────────────────────────────────────────────

/// Arguments for `domgen persistence`.
#[derive(Debug, Args)]
pub struct PersistenceArgs {
    /// Glob over fully-qualified class names.
    #[arg(
        value_name = "FILTER",
        default_value = "*",
        help = "Class name filter, '*' matches any characters"
    )]
    pub filter: String,

    /// Replace files that already exist.
    #[arg(long = "overwrite", help = "Overwrite existing files")]
    pub overwrite: bool,

    /// Print the rendered files instead of writing them.
    #[arg(long = "dry-run", help = "Show what would be written without writing")]
    pub dry_run: bool,
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `domgen generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Stub file to render.
    #[arg(short = 's', long = "stub", value_name = "FILE", help = "Stub file")]
    pub stub: PathBuf,

    /// Output path pattern; `{class}` and `{namespace_path}` are filled per
    /// object.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATTERN",
        help = "Output path pattern, e.g. 'src/Dto/{class}Dto.php'"
    )]
    pub output: String,

    /// Glob over fully-qualified class names.
    #[arg(
        value_name = "FILTER",
        default_value = "*",
        help = "Class name filter, '*' matches any characters"
    )]
    pub filter: String,

    /// Only render objects of this kind.
    #[arg(short = 'k', long = "kind", value_enum, help = "Restrict to one object kind")]
    pub kind: Option<KindArg>,

    /// Extra `KEY=VALUE` replacements, applied over the derived blocks.
    #[arg(
        long = "var",
        value_name = "KEY=VALUE",
        value_parser = parse_var,
        help = "Extra replacement, e.g. '{author}=Jane' (repeatable)"
    )]
    pub vars: Vec<(String, String)>,

    /// Replace files that already exist.
    #[arg(long = "overwrite", help = "Overwrite existing files")]
    pub overwrite: bool,

    /// Print the rendered files instead of writing them.
    #[arg(long = "dry-run", help = "Show what would be written without writing")]
    pub dry_run: bool,
}

/// Object kinds accepted by `--kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum KindArg {
    Entity,
    #[value(alias = "vo")]
    ValueObject,
    Enum,
}

impl From<KindArg> for ObjectKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Entity => ObjectKind::Entity,
            KindArg::ValueObject => ObjectKind::ValueObject,
            KindArg::Enum => ObjectKind::Enum,
        }
    }
}

/// `KEY=VALUE`; the value may itself contain `=`.
fn parse_var(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}

// ── inspect ───────────────────────────────────────────────────────────────────

/// Arguments for `domgen inspect`.
#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Glob over fully-qualified class names.
    #[arg(
        value_name = "FILTER",
        default_value = "*",
        help = "Class name filter, '*' matches any characters"
    )]
    pub filter: String,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `domgen init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `domgen completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `domgen config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `generation.persistence_namespace`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
