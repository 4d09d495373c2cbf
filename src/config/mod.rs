//! Configuration management for `exhibit.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                       |
//! |-------------|-----------------------------------------------|
//! | `[catalog]` | Example tree location, extensions, language   |
//! | `[serve]`   | Catalog server (port, interface)              |
//! | `[client]`  | Picker options (urls, tags, lang, target)     |
//!
//! # Example
//!
//! ```toml
//! [catalog]
//! dir = "examples"
//! extensions = ["c", "py"]
//!
//! [serve]
//! port = 5277
//!
//! [client]
//! callback_url = "https://caller.example/editor"
//! tags = ["plain"]
//! ```

mod catalog;
mod client;
pub mod defaults;
mod error;
mod serve;

// Internal imports used in this module
use catalog::CatalogConfig;
use client::ClientConfig;
use error::ConfigError;
use serve::ServeConfig;

use crate::catalog::ScanOptions;
use crate::cli::{Cli, Commands};
use crate::client::ClientOptions;
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing exhibit.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExhibitConfig {
    /// CLI arguments reference
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Example tree settings
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Catalog server settings
    #[serde(default)]
    pub serve: ServeConfig,

    /// Picker client settings
    #[serde(default)]
    pub client: ClientConfig,
}

impl ExhibitConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.catalog.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.catalog.root = Some(path.to_path_buf());
    }

    /// Get CLI arguments reference
    pub fn get_cli(&self) -> &'static Cli {
        self.cli.unwrap()
    }

    /// Scan parameters for the configured catalog.
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            lang: Some(self.catalog.default_lang.clone()),
            extensions: self.catalog.extensions.clone(),
        }
    }

    /// Load-time options for the picker client.
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            base_url: self.client.base_url.clone().unwrap_or_default(),
            callback_url: self.client.callback_url.clone().unwrap_or_default(),
            tags: self.client.tags.clone(),
            lang: self.client.lang.clone(),
            target: self.client.target.clone(),
        }
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &'static Cli) {
        self.cli = Some(cli);

        let root = cli
            .root
            .as_ref()
            .cloned()
            .unwrap_or_else(|| self.get_root().to_owned());
        self.update_path_with_root(&root);

        match &cli.command {
            Commands::Serve { interface, port } => {
                Self::update_option(&mut self.serve.interface, interface.as_ref());
                Self::update_option(&mut self.serve.port, port.as_ref());
                if self.client.base_url.is_none() {
                    self.client.base_url = Some(format!(
                        "http://{}:{}",
                        self.serve.interface, self.serve.port
                    ));
                }
            }
            Commands::Scan { lang } => {
                Self::update_option(&mut self.catalog.default_lang, lang.as_ref());
            }
            Commands::Pick {
                base_url,
                callback,
                tags,
                lang,
                ..
            } => {
                if base_url.is_some() {
                    self.client.base_url = base_url.clone();
                }
                if callback.is_some() {
                    self.client.callback_url = callback.clone();
                }
                if let Some(tags) = tags {
                    self.client.tags = split_tags(tags);
                }
                Self::update_option(&mut self.client.lang, lang.as_ref());
            }
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Update all paths relative to root directory and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path) {
        let cli = self.get_cli();

        // Apply CLI overrides first
        Self::update_option(&mut self.catalog.dir, cli.dir.as_ref());

        // Normalize root to absolute path
        let root = Self::normalize_path(root);
        self.set_root(&root);

        // Normalize config path and catalog directory
        self.config_path = Self::normalize_path(&root.join(&cli.config));
        self.catalog.dir = Self::normalize_path(&root.join(&self.catalog.dir));
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration for the current command
    pub fn validate(&self) -> Result<()> {
        let cli = self.get_cli();

        if self.catalog.extensions.is_empty() {
            bail!(ConfigError::Validation(
                "[catalog.extensions] must have at least one element".into()
            ));
        }
        if self
            .catalog
            .extensions
            .iter()
            .any(|ext| ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()))
        {
            bail!(ConfigError::Validation(
                "[catalog.extensions] entries must be alphanumeric".into()
            ));
        }

        if !is_lang_code(&self.catalog.default_lang) {
            bail!(ConfigError::Validation(
                "[catalog.default_lang] must be two lowercase letters".into()
            ));
        }

        if let Some(base_url) = &self.client.base_url
            && !base_url.starts_with("http")
        {
            bail!(ConfigError::Validation(
                "[client.base_url] must start with http:// or https://".into()
            ));
        }

        if cli.is_pick() && self.client.base_url.is_none() {
            bail!("[client.base_url] is required for pick. Set it in exhibit.toml or pass --base-url.");
        }

        Ok(())
    }
}

/// Two lowercase ASCII letters, the variant-language grammar.
fn is_lang_code(s: &str) -> bool {
    s.len() == 2 && s.chars().all(|c| c.is_ascii_lowercase())
}

/// Split a comma-separated tag list, dropping empty segments.
pub fn split_tags(tags: &str) -> Vec<String> {
    tags.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
