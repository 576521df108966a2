use dirs::home_dir;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::auth::Credentials;
use crate::client::{ClientOptions, BASE_URL, DEFAULT_TIMEOUT};
use crate::error::{Error, Result};
use crate::store::default_token_path;

/// Configuration data stored in ~/.landroid.yml
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Per-request timeout in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// Where to keep the OAuth token; defaults to a file in the temp directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_file: Option<PathBuf>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("client_id", &self.client_id)
            .field("username", &self.username)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("token_file", &self.token_file)
            .finish_non_exhaustive()
    }
}

impl Config {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            self.client_id.clone(),
            self.client_secret.clone(),
            self.username.clone(),
            self.password.clone(),
        )
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            base_url: self
                .base_url
                .clone()
                .unwrap_or_else(|| BASE_URL.to_string()),
            timeout: self
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_TIMEOUT),
            token_file: self.token_file.clone().unwrap_or_else(default_token_path),
        }
    }

    /// Build the configuration from `LANDROID_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key).ok_or_else(|| {
                Error::Config(format!("Environment variable {} is not set", key))
            })
        };

        let timeout_secs = match lookup("LANDROID_TIMEOUT") {
            Some(value) => Some(value.parse::<u64>().map_err(|e| {
                Error::Config(format!("Invalid LANDROID_TIMEOUT `{}`: {}", value, e))
            })?),
            None => None,
        };

        Ok(Self {
            client_id: required("LANDROID_CLIENT_ID")?,
            client_secret: required("LANDROID_CLIENT_SECRET")?,
            username: required("LANDROID_USERNAME")?,
            password: required("LANDROID_PASSWORD")?,
            base_url: lookup("LANDROID_BASE_URL"),
            timeout_secs,
            token_file: lookup("LANDROID_TOKEN_FILE").map(PathBuf::from),
        })
    }
}

/// Get the path to the configuration file (~/.landroid.yml)
pub fn get_config_path() -> Result<PathBuf> {
    let home = home_dir()
        .ok_or_else(|| Error::Config("Failed to determine home directory".to_string()))?;
    Ok(home.join(".landroid.yml"))
}

/// Load configuration from ~/.landroid.yml
pub fn load_config() -> Result<Config> {
    load_config_from(&get_config_path()?)
}

pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Err(Error::Config(format!(
            "Configuration file {} not found",
            path.display()
        )));
    }

    let content = fs::read_to_string(path)?;
    let config = serde_yaml::from_str::<Config>(&content)?;
    debug!("Loaded configuration for user: {}", config.username);
    Ok(config)
}

pub fn save_config_to(path: &Path, config: &Config) -> Result<()> {
    let content = serde_yaml::to_string(config)?;
    fs::write(path, content)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }

    debug!("Saved configuration for user: {}", config.username);
    Ok(())
}
