use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::SceneroError;
use crate::view::Theme;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Environment variables that override the API keys from the config file.
pub const OMDB_KEY_ENV: &str = "OMDB_API_KEY";
pub const TMDB_KEY_ENV: &str = "TMDB_API_KEY";

/// Top-level application configuration.
///
/// Sections missing from a user file fall back to the built-in ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "built_in_omdb")]
    pub omdb: OmdbConfig,
    #[serde(default = "built_in_tmdb")]
    pub tmdb: TmdbConfig,
    #[serde(default = "built_in_ui")]
    pub ui: UiConfig,
}

/// Shape of `config/default.toml`. Every section is required, so parsing it
/// never consults the per-section defaults of [`AppConfig`].
#[derive(Deserialize)]
struct BuiltIn {
    omdb: OmdbConfig,
    tmdb: TmdbConfig,
    ui: UiConfig,
}

fn built_in() -> BuiltIn {
    toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
}

fn built_in_omdb() -> OmdbConfig {
    built_in().omdb
}

fn built_in_tmdb() -> TmdbConfig {
    built_in().tmdb
}

fn built_in_ui() -> UiConfig {
    built_in().ui
}

/// Search provider endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OmdbConfig {
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
}

/// Catalog provider endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    pub base_url: String,
    /// Prefix for `poster_path` values.
    pub image_base: String,
    #[serde(default)]
    pub api_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub theme: Theme,
}

impl AppConfig {
    /// Load config from the user config file, falling back to built-in defaults.
    pub fn load() -> Result<Self, SceneroError> {
        Self::load_from(&Self::config_path())
    }

    /// Load config from `path` if it exists, otherwise the built-in defaults.
    /// API keys from the environment take precedence over the file.
    pub fn load_from(path: &Path) -> Result<Self, SceneroError> {
        let mut config = Self::read_file(path)?;
        config.apply_key_overrides(
            std::env::var(OMDB_KEY_ENV).ok(),
            std::env::var(TMDB_KEY_ENV).ok(),
        );
        config.validate()?;
        Ok(config)
    }

    /// The file at `path` as written, without environment overrides.
    fn read_file(path: &Path) -> Result<Self, SceneroError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, SceneroError> {
        toml::from_str(content).map_err(|e| SceneroError::Config(e.to_string()))
    }

    /// Replace API keys with non-empty overrides.
    pub fn apply_key_overrides(&mut self, omdb: Option<String>, tmdb: Option<String>) {
        if let Some(key) = omdb.filter(|k| !k.trim().is_empty()) {
            self.omdb.api_key = key;
        }
        if let Some(key) = tmdb.filter(|k| !k.trim().is_empty()) {
            self.tmdb.api_key = key;
        }
    }

    /// Check that every endpoint is an absolute URL.
    pub fn validate(&self) -> Result<(), SceneroError> {
        for (name, value) in [
            ("omdb.base_url", &self.omdb.base_url),
            ("tmdb.base_url", &self.tmdb.base_url),
            ("tmdb.image_base", &self.tmdb.image_base),
        ] {
            url::Url::parse(value)
                .map_err(|e| SceneroError::Config(format!("{name} = {value:?}: {e}")))?;
        }
        if self.omdb.api_key.is_empty() {
            tracing::warn!("no OMDb API key configured, searches will fail");
        }
        if self.tmdb.api_key.is_empty() {
            tracing::warn!("no TMDB API key configured, catalog rows will be empty");
        }
        Ok(())
    }

    /// Record `theme` in the config file at `path`. The rest of the file is
    /// rewritten as read, so keys from the environment never reach disk.
    pub fn save_theme(path: &Path, theme: Theme) -> Result<(), SceneroError> {
        let mut config = Self::read_file(path)?;
        config.ui.theme = theme;
        config.save_to(path)?;
        tracing::debug!(path = %path.display(), %theme, "theme saved");
        Ok(())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SceneroError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| SceneroError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Path to user config file (XDG on Linux, AppData on Windows).
    pub fn config_path() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Directory for the watchlist and log files.
    pub fn data_dir() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "scenero")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let BuiltIn { omdb, tmdb, ui } = built_in();
        Self { omdb, tmdb, ui }
    }
}
