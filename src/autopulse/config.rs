use crate::error::{AutopulseError, Result};
use crate::metadata::MetadataInjector;
use crate::store::fs::DEFAULT_STORAGE_KEY;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_SITE_NAME: &str = "AutoPulse News";
const DEFAULT_ORIGIN: &str = "http://localhost:3000";
const DEFAULT_DESCRIPTION: &str = "The latest in automotive news, reviews, and culture.";
const DEFAULT_PASSPHRASE: &str = "autopulse";

/// Site configuration, stored in `<data_dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SiteConfig {
    /// Appended to page titles and used as the Open Graph site name
    #[serde(default = "default_site_name")]
    pub site_name: String,

    /// Scheme and host the site is served from, used for canonical and sitemap URLs
    #[serde(default = "default_origin")]
    pub origin: String,

    /// Description restored when no article is shown
    #[serde(default = "default_description")]
    pub default_description: String,

    /// Name of the persisted collection document (without `.json`)
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Seed dataset used on first run; the bundled one when unset
    #[serde(default)]
    pub seed_path: Option<PathBuf>,

    #[serde(default = "default_passphrase")]
    pub admin_passphrase: String,
}

fn default_site_name() -> String {
    DEFAULT_SITE_NAME.to_string()
}

fn default_origin() -> String {
    DEFAULT_ORIGIN.to_string()
}

fn default_description() -> String {
    DEFAULT_DESCRIPTION.to_string()
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_passphrase() -> String {
    DEFAULT_PASSPHRASE.to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: default_site_name(),
            origin: default_origin(),
            default_description: default_description(),
            storage_key: default_storage_key(),
            seed_path: None,
            admin_passphrase: default_passphrase(),
        }
    }
}

/// Keys accepted by `config <key> [value]`.
pub const CONFIG_KEYS: &[&str] = &[
    "site-name",
    "origin",
    "default-description",
    "storage-key",
    "seed-path",
    "admin-passphrase",
];

impl SiteConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(AutopulseError::Io)?;
        let config: SiteConfig =
            serde_json::from_str(&content).map_err(AutopulseError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(AutopulseError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(AutopulseError::Serialization)?;
        fs::write(config_path, content).map_err(AutopulseError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "site-name" => Some(self.site_name.clone()),
            "origin" => Some(self.origin.clone()),
            "default-description" => Some(self.default_description.clone()),
            "storage-key" => Some(self.storage_key.clone()),
            "seed-path" => Some(
                self.seed_path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ),
            "admin-passphrase" => Some(self.admin_passphrase.clone()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "site-name" => self.site_name = value.to_string(),
            "origin" => self.origin = value.trim_end_matches('/').to_string(),
            "default-description" => self.default_description = value.to_string(),
            "storage-key" => {
                if value.trim().is_empty() {
                    return Err(AutopulseError::Api("storage-key cannot be empty".into()));
                }
                self.storage_key = value.to_string();
            }
            "seed-path" => {
                self.seed_path = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                }
            }
            "admin-passphrase" => self.admin_passphrase = value.to_string(),
            other => {
                return Err(AutopulseError::Api(format!("Unknown config key: {}", other)));
            }
        }
        Ok(())
    }

    pub fn injector(&self) -> MetadataInjector {
        MetadataInjector::new(
            self.site_name.clone(),
            self.origin.clone(),
            self.default_description.clone(),
        )
    }
}
