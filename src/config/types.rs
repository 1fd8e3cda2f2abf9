//! GUI bootstrap configuration data model.

use serde::Deserialize;
use std::path::PathBuf;

use super::defaults::{default_max_depth, DEFAULT_FETCH_MAX_ATTEMPTS, DEFAULT_FETCH_TIMEOUT_SECS};

/// Bootstrap configuration for one GUI.
///
/// `structure`, `stylesheet` and `modules` are URLs; relative locations are
/// resolved against the directory of the configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct GuiConfig {
    /// The name/title of the GUI.
    pub name: String,
    /// Location of the structure document.
    pub structure: String,
    /// Stylesheet applied to the GUI.
    pub stylesheet: String,
    /// Modules to load during startup.
    #[serde(default)]
    pub modules: Vec<String>,
    #[serde(default)]
    pub fetch: FetchConfig,
    /// Deepest widget nesting accepted while resolving the structure.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

/// Transport settings for asset and structure requests.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub timeout_secs: u64,
    /// Total attempts per HTTP request, including the initial one.
    pub max_attempts: u32,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            max_attempts: DEFAULT_FETCH_MAX_ATTEMPTS,
        }
    }
}

/// Where the configuration text was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Path given with the CLI argument.
    Explicit(PathBuf),
    /// `./gui.toml`.
    LocalToml,
    /// `./gui.json`.
    LocalJson,
}

/// Parsed configuration plus the context needed to resolve relative URLs.
#[derive(Debug, Clone)]
pub struct LoadedGuiConfig {
    pub config: GuiConfig,
    /// Directory relative asset locations are resolved against.
    pub base_dir: PathBuf,
    pub source: ConfigSource,
}
