use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file looked up in the working directory before the platform location
const LOCAL_CONFIG: &str = "yts2nas.toml";
/// Older JSON config layout, still accepted
const LEGACY_CONFIG: &str = "config.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(alias = "NAS")]
    pub nas: NasConfig,
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NasConfig {
    /// Hostname or address, optionally with scheme (`https://nas.local`)
    #[serde(alias = "ip")]
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_failed_log")]
    pub failed_log: PathBuf,
    #[serde(default = "default_delay_secs")]
    pub delay_secs: u64,
}

// Default value functions
fn default_base_url() -> String {
    "https://yts.mx".to_string()
}
fn default_user_agent() -> String {
    "Mozilla/5.0".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_failed_log() -> PathBuf {
    PathBuf::from("logs/failed.txt")
}
fn default_delay_secs() -> u64 {
    2
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            failed_log: default_failed_log(),
            delay_secs: default_delay_secs(),
        }
    }
}

impl Default for NasConfig {
    fn default() -> Self {
        Self {
            host: "http://192.168.1.10".to_string(),
            port: 5000,
            username: "admin".to_string(),
            password: String::new(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            nas: NasConfig::default(),
            index: IndexConfig::default(),
            general: GeneralConfig::default(),
        }
    }
}

impl NasConfig {
    /// Base URL of the web API, e.g. `http://192.168.1.10:5000`
    pub fn base_url(&self) -> String {
        let host = self.host.trim().trim_end_matches('/');
        if host.starts_with("http://") || host.starts_with("https://") {
            format!("{}:{}", host, self.port)
        } else {
            format!("http://{}:{}", host, self.port)
        }
    }
}

impl IndexConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl GeneralConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }
}

pub struct ConfigManager {
    config_file: PathBuf,
    config: Config,
}

impl ConfigManager {
    /// Locate and load the configuration.
    ///
    /// An explicit path must exist. Otherwise `yts2nas.toml` and `config.json`
    /// in the working directory are tried, then `config.toml` in the platform
    /// config directory. When nothing is found a sample is written to the
    /// platform location and loading fails.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.is_file() {
                bail!("Config file not found: {:?}", path);
            }
            return Self::from_path(path);
        }

        for candidate in [LOCAL_CONFIG, LEGACY_CONFIG] {
            let path = Path::new(candidate);
            if path.is_file() {
                return Self::from_path(path);
            }
        }

        let project_dirs =
            ProjectDirs::from("", "", "yts2nas").context("Failed to determine config directory")?;
        let config_file = project_dirs.config_dir().join("config.toml");

        if !config_file.exists() {
            Self::create_sample_config(&config_file)?;
            bail!(
                "No configuration found. A sample was written to {:?}; fill in your NAS details and run again",
                config_file
            );
        }

        Self::from_path(&config_file)
    }

    /// Load and validate a specific config file
    pub fn from_path(path: &Path) -> Result<Self> {
        let config = Self::load_config(path)?;
        let manager = Self {
            config_file: path.to_path_buf(),
            config,
        };
        manager.validate()?;
        Ok(manager)
    }

    /// Get a reference to the current config
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Consume the manager, keeping only the loaded config
    pub fn into_config(self) -> Config {
        self.config
    }

    /// Get the config file path
    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    /// Load config from file, picking the format from the extension
    fn load_config(config_file: &Path) -> Result<Config> {
        let content = fs::read_to_string(config_file)
            .with_context(|| format!("Failed to read config file: {:?}", config_file))?;

        let is_json = config_file
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let config: Config = if is_json {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", config_file))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", config_file))?
        };

        Ok(config)
    }

    /// Write a sample config file with placeholder NAS credentials
    pub fn create_sample_config(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content =
            toml::to_string_pretty(&Config::default()).context("Failed to serialize config")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;

        Ok(())
    }

    /// Validate the current configuration
    pub fn validate(&self) -> Result<()> {
        let nas = &self.config.nas;
        if nas.host.trim().is_empty() {
            bail!("nas.host cannot be empty");
        }
        if nas.port == 0 {
            bail!("nas.port must be greater than 0");
        }
        if nas.username.trim().is_empty() {
            bail!("nas.username cannot be empty");
        }

        let index = &self.config.index;
        if index.timeout_secs == 0 {
            bail!("index.timeout_secs must be greater than 0");
        }
        reqwest::Url::parse(&index.base_url)
            .with_context(|| format!("index.base_url is not a valid URL: {}", index.base_url))?;

        if self.config.general.failed_log.as_os_str().is_empty() {
            bail!("general.failed_log cannot be empty");
        }

        Ok(())
    }
}
