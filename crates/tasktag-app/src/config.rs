//! Optional TOML configuration that seeds the tag catalog.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use tasktag_core::Color;
use tracing::debug;

use crate::tag_catalog::TagCatalog;

const CONFIG_DIR: &str = "tasktag";
const CONFIG_FILE: &str = "config.toml";

/// Default location: `$CONFIG_DIR/tasktag/config.toml`.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Tag catalog seeding.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl AppConfig {
    /// Load from `path`, or from [`default_config_path`] when `None`.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path.map(Path::to_path_buf).or_else(default_config_path) else {
            return Ok(Self::default());
        };
        Self::from_file(&path)
    }

    /// Load from an explicit file path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents =
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
        let config = Self::from_toml(&contents).with_context(|| format!("failed to load {}", path.display()))?;
        debug!(path = %path.display(), seeded = config.catalog.tags.len(), "loaded config");
        Ok(config)
    }

    /// Parse and validate TOML text.
    ///
    /// # Errors
    /// Returns an error on malformed TOML or invalid tag entries.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).context("failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Build the tag catalog described by this configuration.
    #[must_use]
    pub fn build_catalog(&self) -> TagCatalog {
        let mut catalog = if self.catalog.predefined {
            TagCatalog::initialize()
        } else {
            TagCatalog::empty()
        };
        for seed in &self.catalog.tags {
            catalog.add_custom(seed.name.trim(), seed.color);
        }
        catalog
    }

    fn validate(&self) -> Result<()> {
        self.catalog.ensure_named_tags()
    }
}

/// `[catalog]` block.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    /// Include the predefined readiness/importance/urgency/sphere tags.
    #[serde(default = "default_true")]
    pub predefined: bool,
    /// Custom tags created at startup, in order.
    #[serde(default)]
    pub tags: Vec<SeedTag>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            predefined: true,
            tags: Vec::new(),
        }
    }
}

impl CatalogConfig {
    fn ensure_named_tags(&self) -> Result<()> {
        for (idx, seed) in self.tags.iter().enumerate() {
            if seed.name.trim().is_empty() {
                bail!("catalog tag #{} must have a non-empty name", idx + 1);
            }
        }
        Ok(())
    }
}

/// `[[catalog.tags]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedTag {
    /// Display name.
    pub name: String,
    /// `#RRGGBB` or `#AARRGGBB`.
    #[serde(default)]
    pub color: Color,
}

const fn default_true() -> bool {
    true
}
