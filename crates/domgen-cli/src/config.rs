//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only sees the [`GeneratorConfig`]
//! derived from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables, `DOMGEN__SECTION__KEY`
//! 3. Config file (`--config`, or the platform config path if present)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use domgen_core::domain::{CodeConvention, NamespaceRoot};
use domgen_core::generation::{FileStorageConfig, GeneratorConfig};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where the domain description lives.
    pub domain: DomainConfig,
    /// Output settings.
    pub output: OutputConfig,
    /// Namespaces, directories and stubs.
    pub generation: GenerationConfig,
    /// Upload directories used by file mappings.
    pub storage: FileStorageConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Root namespace of generated repositories and mappers.
    pub persistence_namespace: String,
    /// Namespace prefix → directory, relative to the working directory.
    pub namespace_roots: Vec<NamespaceRoot>,
    /// Directory of `*.stub` files overriding the built-in stubs.
    pub stub_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            domain: DomainConfig::default(),
            output: OutputConfig {
                no_color: false,
                format: "auto".into(),
            },
            generation: GenerationConfig {
                persistence_namespace: "App\\Persistence".into(),
                namespace_roots: vec![NamespaceRoot::new("App", "src")],
                stub_dir: None,
            },
            storage: FileStorageConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration, starting from defaults.
    ///
    /// `config_file` is the path the user passed via `--config`; it must
    /// exist.  Without it the platform config file is used when present.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };
        Self::load_from(&path, required)
    }

    fn load_from(path: &Path, required: bool) -> anyhow::Result<Self> {
        debug!(path = %path.display(), required, "Loading configuration");

        let defaults = Config::try_from(&Self::default())
            .context("Failed to serialise default configuration")?;

        Config::builder()
            .add_source(defaults)
            .add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(required),
            )
            .add_source(
                Environment::with_prefix("DOMGEN")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from '{}'", path.display()))?
            .try_deserialize()
            .context("Failed to deserialise configuration")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.domgen.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "domgen", "domgen")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".domgen.toml"))
    }

    /// Settings handed to the standard generator registry.
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            convention: CodeConvention::new(),
            storage: self.storage.clone(),
        }
    }
}
