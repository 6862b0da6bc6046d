use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

const TOKEN_ENV: &str = "TMDB_ACCESS_TOKEN";
const LANGUAGE_ENV: &str = "TMDB_LANGUAGE";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("could not determine config path (HOME is unset)")]
    NoConfigPath,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no TMDB access token configured; set TMDB_ACCESS_TOKEN or edit the config file")]
    MissingToken,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub access_token: String,
    pub language: String,
    pub api_base_url: String,
    pub image_base_url: String,
    pub search_debounce_ms: u64,
    pub category_limit: usize,
    pub log_filter: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            language: String::from("en-US"),
            api_base_url: String::from(DEFAULT_API_BASE_URL),
            image_base_url: String::from(DEFAULT_IMAGE_BASE_URL),
            search_debounce_ms: 500,
            category_limit: 10,
            log_filter: String::from("marquee=info"),
        }
    }
}

impl AppSettings {
    pub fn config_path() -> Option<PathBuf> {
        std::env::var("HOME").ok().map(|home| {
            PathBuf::from(home)
                .join(".config")
                .join("marquee")
                .join("config.json")
        })
    }

    /// Config file (if present) with environment overrides on top.
    pub fn load() -> Result<Self, SettingsError> {
        let mut settings = match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path)?,
            _ => Self::default(),
        };
        settings.apply_env_overrides(|key| std::env::var(key).ok());
        if !settings.is_valid() {
            return Err(SettingsError::MissingToken);
        }
        Ok(settings)
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self) -> Result<(), SettingsError> {
        let path = Self::config_path().ok_or(SettingsError::NoConfigPath)?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(token) = lookup(TOKEN_ENV).filter(|t| !t.trim().is_empty()) {
            self.access_token = token.trim().to_string();
        }
        if let Some(language) = lookup(LANGUAGE_ENV).filter(|l| !l.trim().is_empty()) {
            self.language = language.trim().to_string();
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.access_token.trim().is_empty()
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}
