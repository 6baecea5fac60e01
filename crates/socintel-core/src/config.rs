use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::prefs::StorageArea;

/// Global configuration loaded from `~/.config/socintel/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocintelConfig {
    /// Storage area holding the preference blob: "sync" (default) or "local".
    #[serde(default)]
    pub storage_area: StorageArea,
    /// Idle time in milliseconds before an edited lookup URL is saved.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Optional command used to open lookup URLs (e.g. "xdg-open"). When
    /// unset, lookup URLs are printed.
    #[serde(default)]
    pub launcher: Option<String>,
}

fn default_debounce_ms() -> u64 {
    500
}

impl Default for SocintelConfig {
    fn default() -> Self {
        Self {
            storage_area: StorageArea::default(),
            debounce_ms: default_debounce_ms(),
            launcher: None,
        }
    }
}

impl SocintelConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("socintel")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SocintelConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = SocintelConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: SocintelConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = SocintelConfig::default();
        assert_eq!(cfg.storage_area, StorageArea::Sync);
        assert_eq!(cfg.debounce(), Duration::from_millis(500));
        assert!(cfg.launcher.is_none());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = SocintelConfig {
            launcher: Some("xdg-open".to_string()),
            ..SocintelConfig::default()
        };
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: SocintelConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_toml_empty_file_uses_defaults() {
        let cfg: SocintelConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, SocintelConfig::default());
    }

    #[test]
    fn config_toml_local_area() {
        let toml = r#"
            storage_area = "local"
            debounce_ms = 250
        "#;
        let cfg: SocintelConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.storage_area, StorageArea::Local);
        assert_eq!(cfg.debounce_ms, 250);
    }

    #[test]
    fn config_toml_rejects_unknown_area() {
        assert!(toml::from_str::<SocintelConfig>(r#"storage_area = "cloud""#).is_err());
    }
}
