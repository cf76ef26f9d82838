use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_FILE: &str = "data/application_data.json";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_ORIGIN: &str = "http://localhost:3000";

/// Contents of `bidtrack.toml`. Every key is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BidtrackConfig {
    pub data_file: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub allowed_origins: Option<Vec<String>>,
}

impl BidtrackConfig {
    /// The config `bidtrack init` writes, with every default spelled out
    pub fn with_defaults() -> Self {
        Self {
            data_file: Some(DEFAULT_DATA_FILE.to_string()),
            host: Some(DEFAULT_HOST.to_string()),
            port: Some(DEFAULT_PORT),
            allowed_origins: Some(vec![DEFAULT_ORIGIN.to_string()]),
        }
    }

    pub fn data_file(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.data_file.as_ref().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
    }

    pub fn host(&self, flag: Option<String>) -> String {
        flag.or_else(|| self.host.clone())
            .unwrap_or_else(|| DEFAULT_HOST.to_string())
    }

    pub fn port(&self, flag: Option<u16>) -> u16 {
        flag.or(self.port).unwrap_or(DEFAULT_PORT)
    }

    pub fn allowed_origins(&self) -> Vec<String> {
        self.allowed_origins
            .clone()
            .unwrap_or_else(|| vec![DEFAULT_ORIGIN.to_string()])
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("bidtrack.toml")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<BidtrackConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: BidtrackConfig = toml::from_str(&contents)?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &BidtrackConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_data_dir(data_file: &Path) -> anyhow::Result<()> {
    if let Some(parent) = data_file.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
