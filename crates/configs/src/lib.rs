use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    File,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default = "default_path")]
    pub path: String,
    #[serde(default = "default_document_key")]
    pub document_key: String,
    #[serde(default = "default_session_key")]
    pub session_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            path: default_path(),
            document_key: default_document_key(),
            session_key: default_session_key(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { format: default_log_format() }
    }
}

fn default_path() -> String { "data/portal.json".into() }
fn default_document_key() -> String { "pc_site_v2".into() }
fn default_session_key() -> String { "pc_user".into() }
fn default_log_format() -> String { "compact".into() }

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Read `CONFIG_PATH` (default `config.toml`); a missing file means defaults.
    pub fn load_or_default() -> Result<Self> {
        let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        let mut cfg = if Path::new(&path).exists() { load_from_file(&path)? } else { AppConfig::default() };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.storage.normalize();
        self.storage.validate()?;
        if self.logging.format.trim().is_empty() {
            self.logging.format = default_log_format();
        }
        Ok(())
    }
}

impl StorageConfig {
    fn normalize(&mut self) {
        if self.path.trim().is_empty() {
            self.path = default_path();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.document_key.trim().is_empty() || self.session_key.trim().is_empty() {
            return Err(anyhow!("storage.document_key and storage.session_key must be non-empty"));
        }
        if self.document_key == self.session_key {
            return Err(anyhow!("storage.document_key and storage.session_key must differ"));
        }
        Ok(())
    }
}
