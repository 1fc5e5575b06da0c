//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/pokedex/pokedex.toml`
//! 3. Explicit config file passed on the command line
//! 4. Environment variables: `POKEDEX_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Unified configuration for pokedex.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Root of the catalog REST API
    pub base_url: String,
    /// Entries per page when browsing
    pub page_size: u32,
    /// Entries per request when fetching the full listing for search
    pub search_page_size: u32,
    /// Maximum number of search-as-you-type suggestions
    pub suggestion_limit: usize,
    /// Shortest query that triggers suggestions
    pub min_suggest_len: usize,
    /// Quiet period before a suggestion search fires
    pub debounce_ms: u64,
    /// HTTP request timeout
    pub timeout_secs: u64,
    /// Highest id offered by prev/next navigation
    pub max_id: u32,
    pub user_agent: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: 12,
            search_page_size: 200,
            suggestion_limit: 5,
            min_suggest_len: 2,
            debounce_ms: 300,
            timeout_secs: 10,
            max_id: 1010,
            user_agent: format!("pokedex/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Raw settings for intermediate parsing (`None` = not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub base_url: Option<String>,
    pub page_size: Option<u32>,
    pub search_page_size: Option<u32>,
    pub suggestion_limit: Option<usize>,
    pub min_suggest_len: Option<usize>,
    pub debounce_ms: Option<u64>,
    pub timeout_secs: Option<u64>,
    pub max_id: Option<u32>,
    pub user_agent: Option<String>,
}

/// Get the XDG config directory for pokedex.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "pokedex").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("pokedex.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            base_url: overlay
                .base_url
                .clone()
                .unwrap_or_else(|| self.base_url.clone()),
            page_size: overlay.page_size.unwrap_or(self.page_size),
            search_page_size: overlay.search_page_size.unwrap_or(self.search_page_size),
            suggestion_limit: overlay.suggestion_limit.unwrap_or(self.suggestion_limit),
            min_suggest_len: overlay.min_suggest_len.unwrap_or(self.min_suggest_len),
            debounce_ms: overlay.debounce_ms.unwrap_or(self.debounce_ms),
            timeout_secs: overlay.timeout_secs.unwrap_or(self.timeout_secs),
            max_id: overlay.max_id.unwrap_or(self.max_id),
            user_agent: overlay
                .user_agent
                .clone()
                .unwrap_or_else(|| self.user_agent.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Optional config file given on the command line (must exist)
    pub fn load(explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref(), explicit)
    }

    /// Same as [`Settings::load`] with the global config location made explicit.
    pub fn load_from(
        global: Option<&Path>,
        explicit: Option<&Path>,
    ) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config, if present
        if let Some(global_path) = global {
            if global_path.exists() {
                let raw = load_raw_settings(global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Explicit file: missing is an error
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            let raw = load_raw_settings(path)?;
            current = current.merge_with(&raw);
        }

        // 4. Environment variables (replace - explicit override)
        current = Self::apply_env_overrides(current)?;

        current.normalize();
        current.validate()?;
        Ok(current)
    }

    /// Apply POKEDEX_* environment variables as explicit overrides.
    fn apply_env_overrides(settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("POKEDEX").try_parsing(true))
            .build()
            .map_err(config_err)?;

        let raw: RawSettings = config.try_deserialize().map_err(config_err)?;
        Ok(settings.merge_with(&raw))
    }

    fn normalize(&mut self) {
        let trimmed = self.base_url.trim().trim_end_matches('/').to_string();
        self.base_url = trimmed;
    }

    /// Reject values the listing engine cannot work with.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if self.base_url.is_empty() {
            return Err(ApplicationError::Config {
                message: "base_url must not be empty".to_string(),
            });
        }
        if self.page_size == 0 || self.search_page_size == 0 {
            return Err(ApplicationError::Config {
                message: "page_size and search_page_size must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# pokedex configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/pokedex/pokedex.toml
#   File:   pokedex --config <file>
#   Env:    POKEDEX_* environment variables (e.g. POKEDEX_BASE_URL)

# Root of the catalog REST API
# base_url = "https://pokeapi.co/api/v2"

# Entries per page when browsing
# page_size = 12

# Entries per request when fetching the full listing for search
# search_page_size = 200

# Search-as-you-type
# suggestion_limit = 5
# min_suggest_len = 2
# debounce_ms = 300

# HTTP request timeout in seconds
# timeout_secs = 10

# Highest id offered by prev/next navigation
# max_id = 1010
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
