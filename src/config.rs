//! Settings for the admin client, read from `config.toml`
//!
//! Lookup order for the file:
//! - `FITNESS_ADMIN_CONFIG` environment variable
//! - `<config dir>/fitness-admin/config.toml`
//!
//! `FITNESS_ADMIN_API_URL` overrides `api.base_url` after the file is read.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::Error;
use crate::list::PAGE_SIZES;

const CONFIG_DIR: &str = "fitness-admin";
const CONFIG_FILENAME: &str = "config.toml";
const CONFIG_ENV: &str = "FITNESS_ADMIN_CONFIG";
const API_URL_ENV: &str = "FITNESS_ADMIN_API_URL";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub api: ApiSettings,
    pub list: ListSettings,
    pub upload: UploadSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Backend root, without a trailing slash
    pub base_url: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListSettings {
    /// Rows per page when a screen opens (5, 10 or 20)
    pub default_page_size: usize,
    /// Quiet period before a search fetch fires
    pub search_debounce_ms: u64,
    /// How many exercises the plan builder loads for its pickers
    pub catalog_limit: usize,
}

impl Default for ListSettings {
    fn default() -> Self {
        Self {
            default_page_size: 5,
            search_debounce_ms: 300,
            catalog_limit: 1000,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct UploadSettings {
    pub max_bytes: usize,
    /// Longest side, in pixels
    pub max_dimension: u32,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            max_bytes: 1024 * 1024,
            max_dimension: 1920,
        }
    }
}

impl Settings {
    /// Load settings from the resolved config path and apply env overrides.
    pub fn load() -> Self {
        let mut settings = match config_path() {
            Some(path) => load_settings(&path),
            None => Settings::default(),
        };
        if let Ok(url) = std::env::var(API_URL_ENV) {
            debug!("Using API URL from {}", API_URL_ENV);
            settings.api.base_url = url;
        }
        settings.validate();
        settings
    }

    /// Coerce out-of-range values back to their defaults.
    pub fn validate(&mut self) {
        if !PAGE_SIZES.contains(&self.list.default_page_size) {
            warn!(
                "default_page_size {} is not one of {:?}, using 5",
                self.list.default_page_size, PAGE_SIZES
            );
            self.list.default_page_size = ListSettings::default().default_page_size;
        }
        let trimmed = self.api.base_url.trim_end_matches('/');
        if trimmed.len() != self.api.base_url.len() {
            self.api.base_url = trimmed.to_string();
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILENAME))
}

/// Read settings from `path`, falling back to defaults on any problem.
pub fn load_settings(path: &Path) -> Settings {
    if !path.exists() {
        debug!("No config file at {:?}, using defaults", path);
        return Settings::default();
    }

    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                warn!("{}", Error::config(format!("{}: {}", path.display(), e)));
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", path, e);
            Settings::default()
        }
    }
}
