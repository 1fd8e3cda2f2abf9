//! Config-file source discovery.
//!
//! Source order: explicit path > `./gui.toml` > `./gui.json`.

use std::path::{Path, PathBuf};

use crate::error::SettingsError;

use super::defaults::{LOCAL_JSON_CONFIG, LOCAL_TOML_CONFIG};
use super::ConfigSource;

/// Serialization format of a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// `.json` files are JSON; everything else is read as TOML.
    pub(super) fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

/// Read config text from the highest-precedence available source.
pub(super) fn read_config_text_with_sources<FRead>(
    path_override: Option<&str>,
    read_file: &FRead,
) -> Result<(String, ConfigSource, PathBuf), SettingsError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
{
    if let Some(p) = path_override {
        let path = PathBuf::from(p);
        let text = read_file(&path)?;
        return Ok((text, ConfigSource::Explicit(path.clone()), path));
    }

    let toml_path = PathBuf::from(LOCAL_TOML_CONFIG);
    if let Ok(text) = read_file(&toml_path) {
        return Ok((text, ConfigSource::LocalToml, toml_path));
    }
    let json_path = PathBuf::from(LOCAL_JSON_CONFIG);
    if let Ok(text) = read_file(&json_path) {
        return Ok((text, ConfigSource::LocalJson, json_path));
    }

    Err(SettingsError::Invalid(format!(
        "no GUI configuration was declared (expected `{LOCAL_TOML_CONFIG}` or `{LOCAL_JSON_CONFIG}`)"
    )))
}
