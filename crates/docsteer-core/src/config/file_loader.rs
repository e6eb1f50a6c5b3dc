//! File-based configuration loading

use std::path::Path;

use super::DocsteerConfig;
use crate::error::{SteerError, SteerResult};

/// Load configuration from a file
///
/// Supports JSON, TOML, and YAML formats based on file extension.
/// Returns default config if file doesn't exist. A relative catalog path is
/// taken relative to the directory holding the file.
pub fn load_from_file(path: &Path) -> SteerResult<DocsteerConfig> {
    if !path.exists() {
        return Ok(DocsteerConfig::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        SteerError::config(format!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let parse_error = |format: &str, e: &dyn std::fmt::Display| {
        SteerError::config(format!(
            "Failed to parse {} config '{}': {}",
            format,
            path.display(),
            e
        ))
    };

    let mut config: DocsteerConfig = match path.extension().and_then(|s| s.to_str()) {
        Some("toml") => toml::from_str(&content).map_err(|e| parse_error("TOML", &e))?,
        Some("yaml") | Some("yml") => {
            serde_yaml::from_str(&content).map_err(|e| parse_error("YAML", &e))?
        }
        _ => serde_json::from_str(&content).map_err(|e| parse_error("JSON", &e))?,
    };

    if let (Some(catalog), Some(dir)) = (config.catalog.path.as_mut(), path.parent()) {
        if catalog.is_relative() {
            *catalog = dir.join(&*catalog);
        }
    }

    Ok(config)
}
