use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Global configuration loaded from `~/.config/sget/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SgetConfig {
    /// Maximum concurrent connections per download. The effective count is
    /// normalized down for small resources.
    pub max_connections: i64,
    /// Smallest resource size in bytes worth splitting into ranged requests.
    #[serde(default)]
    pub min_split_bytes: i64,
}

impl Default for SgetConfig {
    fn default() -> Self {
        Self {
            max_connections: 16,
            min_split_bytes: 64 * 1024,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("sget")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SgetConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = SgetConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: SgetConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let cfg = SgetConfig::default();
        assert_eq!(cfg.max_connections, 16);
        assert_eq!(cfg.min_split_bytes, 64 * 1024);
    }

    #[test]
    fn toml_roundtrip() {
        let cfg = SgetConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: SgetConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.max_connections, cfg.max_connections);
        assert_eq!(parsed.min_split_bytes, cfg.min_split_bytes);
    }

    #[test]
    fn min_split_defaults_to_zero_when_absent() {
        let cfg: SgetConfig = toml::from_str("max_connections = 8").unwrap();
        assert_eq!(cfg.max_connections, 8);
        assert_eq!(cfg.min_split_bytes, 0);
    }
}
