//! Top-level config loading pipeline.

use std::path::{Path, PathBuf};

use crate::error::SettingsError;

use super::sources::{read_config_text_with_sources, ConfigFormat};
use super::{GuiConfig, LoadedGuiConfig};

/// Load the GUI bootstrap configuration.
///
/// `path_override` is an explicit config file path (from the CLI argument).
pub fn load_gui_config(path_override: Option<&str>) -> Result<LoadedGuiConfig, SettingsError> {
    load_gui_config_from_sources(path_override, |path| std::fs::read_to_string(path))
}

pub(super) fn load_gui_config_from_sources<FRead>(
    path_override: Option<&str>,
    read_file: FRead,
) -> Result<LoadedGuiConfig, SettingsError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
{
    let (text, source, path) = read_config_text_with_sources(path_override, &read_file)?;
    let config = parse_gui_config(&text, ConfigFormat::for_path(&path))?;
    let base_dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    Ok(LoadedGuiConfig {
        config,
        base_dir,
        source,
    })
}

pub(super) fn parse_gui_config(text: &str, format: ConfigFormat) -> Result<GuiConfig, SettingsError> {
    let config: GuiConfig = match format {
        ConfigFormat::Toml => toml::from_str(text)?,
        ConfigFormat::Json => serde_json::from_str(text)?,
    };
    validate(&config)?;
    Ok(config)
}

fn validate(config: &GuiConfig) -> Result<(), SettingsError> {
    for (field, value) in [
        ("name", &config.name),
        ("structure", &config.structure),
        ("stylesheet", &config.stylesheet),
    ] {
        if value.trim().is_empty() {
            return Err(SettingsError::Invalid(format!("`{field}` must not be empty")));
        }
    }
    if let Some(blank) = config.modules.iter().position(|m| m.trim().is_empty()) {
        return Err(SettingsError::Invalid(format!("`modules[{blank}]` must not be empty")));
    }
    if config.max_depth == 0 {
        return Err(SettingsError::Invalid("`max_depth` must be at least 1".into()));
    }
    if config.fetch.max_attempts == 0 {
        return Err(SettingsError::Invalid("`fetch.max_attempts` must be at least 1".into()));
    }
    Ok(())
}
