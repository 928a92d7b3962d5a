//! Shared configuration loader for the dicam toolchain.
//!
//! `defaults/dicam.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`DicamConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
pub use config::ConfigError;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/dicam.default.toml");

/// Top-level configuration consumed by dicam applications.
#[derive(Debug, Clone, Deserialize)]
pub struct DicamConfig {
    /// Name of the active theme; must key into `themes`.
    pub theme: String,
    pub page: PageConfig,
    pub fonts: FontsConfig,
    pub layout: LayoutConfig,
    pub themes: HashMap<String, ThemeConfig>,
}

impl DicamConfig {
    /// Look up the active theme.
    pub fn active_theme(&self) -> Result<&ThemeConfig, ConfigError> {
        self.themes.get(&self.theme).ok_or_else(|| {
            ConfigError::Message(format!("unknown theme '{}'", self.theme))
        })
    }
}

/// Page geometry.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageConfig {
    pub width: f64,
    pub padding: f64,
}

/// Body and note fonts.
#[derive(Debug, Clone, Deserialize)]
pub struct FontsConfig {
    pub body: FontConfig,
    pub note: FontConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FontConfig {
    pub family: String,
    pub size: f64,
}

/// Vertical and highlight spacing knobs.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LayoutConfig {
    pub line_spacing: f64,
    pub highlight_padding: f64,
}

/// One named color theme: body text, background, the annotation ink, and the
/// six case colors.
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeConfig {
    pub text: String,
    pub background: String,
    pub annotation: String,
    pub nom: String,
    pub gen: String,
    pub dat: String,
    pub acc: String,
    pub abl: String,
    pub voc: String,
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

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<DicamConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<DicamConfig, ConfigError> {
    Loader::new().build()
}
