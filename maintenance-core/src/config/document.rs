//! Format-agnostic document loading.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::error::{MaintenanceError, MaintenanceResult};

static APP_DIR: &str = "statuspage-maintenance";
static DEFAULT_STATUSPAGE_FILE: &str = "statuspage.yaml";

/// Expand `~` and environment variables in a user-supplied path.
pub fn expand_path(raw: &str) -> PathBuf {
    match shellexpand::full(raw) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => PathBuf::from(shellexpand::tilde(raw).as_ref()),
    }
}

/// Statuspage document used when none is given:
/// ~/.config/statuspage-maintenance/statuspage.yaml
pub fn default_statuspage_path() -> MaintenanceResult<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| MaintenanceError::Config("Could not determine config directory".into()))?
        .join(APP_DIR);

    Ok(config_dir.join(DEFAULT_STATUSPAGE_FILE))
}

/// Read a YAML or TOML document. `.toml` files are TOML, anything else YAML.
pub fn load_document<T: DeserializeOwned>(path: &Path) -> MaintenanceResult<T> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        MaintenanceError::Config(format!("Could not read {}: {}", path.display(), e))
    })?;

    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    if is_toml {
        toml::from_str(&content)
            .map_err(|e| MaintenanceError::Config(format!("{}: {}", path.display(), e)))
    } else {
        serde_yaml::from_str(&content)
            .map_err(|e| MaintenanceError::Config(format!("{}: {}", path.display(), e)))
    }
}
