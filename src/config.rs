//! Layered configuration.
//!
//! Sources, later ones winning:
//! - Default values
//! - `.doxsearch/settings.toml` (searched from the current directory upward),
//!   or the file passed with `--config`
//! - Environment variables
//! - CLI argument overrides (applied by the command layer)
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `DS_` and use double underscores
//! to separate nested levels:
//! - `DS_SEARCH_DIR=docs/html/search` sets `search_dir`
//! - `DS_SEARCH__MAX_RESULTS=20` sets `search.max_results`
//! - `DS_OUTPUT__FORMAT=json` sets `output.format`

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::index::sections::DEFAULT_SECTION;
use crate::io::OutputFormat;

/// Directory holding the settings file.
pub const CONFIG_DIR: &str = ".doxsearch";
/// Settings file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "settings.toml";
const ENV_PREFIX: &str = "DS_";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Generated `search/` directory (or a single table file)
    #[serde(default = "default_search_dir")]
    pub search_dir: PathBuf,

    /// Workspace root directory (where .doxsearch is located)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_root: Option<PathBuf>,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SearchConfig {
    /// Maximum number of records a prefix search returns (0 = unlimited)
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Section queried when none is given
    #[serde(default = "default_section")]
    pub default_section: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OutputConfig {
    /// Output format when `--json` is not passed
    #[serde(default)]
    pub format: OutputFormat,

    /// Prefix joined onto anchors when printing links
    #[serde(default)]
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Default level for all modules
    #[serde(default = "default_log_level")]
    pub default: String,

    /// Per-module overrides, e.g. `loader = "debug"`
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_version() -> u32 {
    1
}
fn default_search_dir() -> PathBuf {
    PathBuf::from("docs/html/search")
}
fn default_max_results() -> usize {
    50
}
fn default_section() -> String {
    DEFAULT_SECTION.to_string()
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            search_dir: default_search_dir(),
            workspace_root: None,
            search: SearchConfig::default(),
            output: OutputConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            default_section: default_section(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            base_url: String::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: HashMap::new(),
        }
    }
}

impl Settings {
    /// Load configuration from all sources
    pub fn load() -> Result<Self, Box<figment::Error>> {
        let config_path = Self::find_workspace_config()
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR).join(CONFIG_FILE));

        Self::figment(&config_path)
            .extract()
            .map_err(Box::new)
            .map(|mut settings: Settings| {
                if settings.workspace_root.is_none() {
                    settings.workspace_root = Self::workspace_root();
                }
                settings
            })
    }

    /// Load configuration from a specific file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        Self::figment(path.as_ref()).extract().map_err(Box::new)
    }

    fn figment(config_path: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(config_path))
            // Double underscore separates nesting levels, single underscores
            // stay inside field names.
            .merge(Env::prefixed(ENV_PREFIX).map(|key| {
                key.as_str().to_lowercase().replace("__", ".").into()
            }))
    }

    /// Find the workspace settings file by walking up from the current directory
    fn find_workspace_config() -> Option<PathBuf> {
        Self::workspace_root().map(|root| root.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Get the workspace root directory (where .doxsearch is located)
    pub fn workspace_root() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;

        current
            .ancestors()
            .find(|ancestor| ancestor.join(CONFIG_DIR).is_dir())
            .map(Path::to_path_buf)
    }

    /// Search directory resolved against the workspace root when relative.
    pub fn resolved_search_dir(&self) -> PathBuf {
        match &self.workspace_root {
            Some(root) if self.search_dir.is_relative() => root.join(&self.search_dir),
            _ => self.search_dir.clone(),
        }
    }

    /// Save current configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let parent = path.as_ref().parent().ok_or("Invalid path")?;
        std::fs::create_dir_all(parent)?;

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Create a default settings file under the current directory
    pub fn init_config_file(force: bool) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let config_path = PathBuf::from(CONFIG_DIR).join(CONFIG_FILE);

        if !force && config_path.exists() {
            return Err("Configuration file already exists. Use --force to overwrite".into());
        }

        // Paths in the file stay relative so the workspace can move.
        let settings = Settings::default();
        settings.save(&config_path)?;

        Ok(config_path)
    }
}
