//! Configuration loader for chemtyper.
//!
//! `defaults/chemtyper.default.toml` is embedded into the binary so that the
//! documented defaults and runtime behavior stay in sync. User files are
//! layered on top via [`Loader`] before deserializing into [`ChemConfig`].

use crate::chem::pipeline::ConvertOptions;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../../defaults/chemtyper.default.toml");

/// Project-local settings, picked up from the working directory when present
pub const LOCAL_CONFIG_FILE: &str = "chemtyper.toml";

/// Top-level configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ChemConfig {
    pub convert: ConvertOptions,
    pub cli: CliConfig,
}

/// Command-line front end settings
#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
    /// Default `inspect` format, written `<stage>-<format>`
    pub format: String,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (for CLI flags).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<ChemConfig, ConfigError> {
        let config: ChemConfig = self.builder.build()?.try_deserialize()?;
        log::debug!("loaded configuration: {:?}", config);
        Ok(config)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<ChemConfig, ConfigError> {
    Loader::new().build()
}
