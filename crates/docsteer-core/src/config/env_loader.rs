//! Environment variable overrides

use std::path::PathBuf;

use super::DocsteerConfig;
use crate::error::{SteerError, SteerResult};

/// Apply `DOCSTEER_*` overrides from the process environment
pub fn apply_env_overrides(config: &mut DocsteerConfig) -> SteerResult<()> {
    apply_overrides_from(config, |key| std::env::var(key).ok())
}

/// Apply overrides from an arbitrary lookup
///
/// Recognized keys: `DOCSTEER_CATALOG`, `DOCSTEER_INSTALLED_DIR`,
/// `DOCSTEER_LOG_LEVEL`, `DOCSTEER_CACHE_TTL` (humantime, e.g. `2m`).
pub fn apply_overrides_from<F>(config: &mut DocsteerConfig, lookup: F) -> SteerResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(catalog) = lookup("DOCSTEER_CATALOG") {
        config.catalog.path = Some(PathBuf::from(catalog));
    }

    if let Some(dir) = lookup("DOCSTEER_INSTALLED_DIR") {
        config.installed_dir = PathBuf::from(dir);
    }

    if let Some(level) = lookup("DOCSTEER_LOG_LEVEL") {
        config.logging.level = level;
    }

    if let Some(ttl) = lookup("DOCSTEER_CACHE_TTL") {
        config.cache.ttl = humantime_serde::re::humantime::parse_duration(&ttl)
            .map_err(|e| SteerError::config(format!("Invalid DOCSTEER_CACHE_TTL value: {}", e)))?;
    }

    Ok(())
}
