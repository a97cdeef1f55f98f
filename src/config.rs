use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::query::DEFAULT_WINDOW_DAYS;

pub const DEFAULT_PORT: u16 = 5000;

/// Settings read from `crudewatch.toml`; every key is optional
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrudewatchConfig {
    pub data_dir: PathBuf,
    pub prices_file: String,
    pub events_file: String,
    pub port: u16,
    pub window_days: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for CrudewatchConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            prices_file: "brent_prices.csv".to_string(),
            events_file: "events.csv".to_string(),
            port: DEFAULT_PORT,
            window_days: DEFAULT_WINDOW_DAYS,
            seed: None,
        }
    }
}

impl CrudewatchConfig {
    pub fn prices_path(&self) -> PathBuf {
        self.data_dir.join(&self.prices_file)
    }

    pub fn events_path(&self) -> PathBuf {
        self.data_dir.join(&self.events_file)
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("crudewatch.toml")
}

/// Load the config file, or `None` when it does not exist
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<CrudewatchConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: CrudewatchConfig = toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("invalid config {}: {}", path.display(), e))?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &CrudewatchConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config(Some(&dir.path().join("crudewatch.toml"))).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crudewatch.toml");
        std::fs::write(&path, "port = 8080\nseed = 42\n").unwrap();

        let config = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.window_days, DEFAULT_WINDOW_DAYS);
        assert_eq!(config.prices_path(), PathBuf::from("data").join("brent_prices.csv"));
    }

    #[test]
    fn test_write_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crudewatch.toml");
        let config = CrudewatchConfig::default();

        write_config(&path, &config, false).unwrap();
        assert!(write_config(&path, &config, false).is_err());
        write_config(&path, &config, true).unwrap();

        let reloaded = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crudewatch.toml");
        std::fs::write(&path, "port = \"not a number\"\n").unwrap();
        assert!(load_config(Some(&path)).is_err());
    }
}
