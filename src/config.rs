use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Bundled database file looked up when nothing else is configured
pub const DEFAULT_ASSET: &str = "mobile_ic_database_expanded.db";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct IcfinderConfig {
    /// Bundled database file to copy from
    pub asset: Option<String>,
    /// Directory holding the working copy of the database
    pub data_dir: Option<String>,
    /// History file
    pub history: Option<String>,
    pub history_limit: Option<usize>,
}

impl IcfinderConfig {
    pub fn asset_path(&self, base: &Path) -> PathBuf {
        self.asset
            .as_ref()
            .map(|a| base.join(a))
            .unwrap_or_else(|| base.join(DEFAULT_ASSET))
    }

    pub fn data_dir_path(&self, base: &Path) -> PathBuf {
        self.data_dir
            .as_ref()
            .map(|d| base.join(d))
            .unwrap_or_else(|| default_data_dir_in(base))
    }

    pub fn history_path(&self, base: &Path) -> PathBuf {
        self.history
            .as_ref()
            .map(|h| base.join(h))
            .unwrap_or_else(|| default_data_dir_in(base).join("history.json"))
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit.unwrap_or(crate::history::DEFAULT_CAPACITY)
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("icfinder.toml")
}

pub fn default_data_dir_in(base: &Path) -> PathBuf {
    base.join(".icfinder")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<IcfinderConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: IcfinderConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &IcfinderConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}
