//! Configuration management for the playlist analyzer.
//!
//! Configuration is resolved exactly once, at startup, into a [`Config`] value
//! that is handed to the auth provider, the Spotify client and the dashboard
//! server. Nothing below this module reads the process environment.
//!
//! Sources are consulted in order and the first source that defines a key wins:
//! 1. Process environment variables
//! 2. `.env` in the current working directory
//! 3. `.env` in the local data directory (`<data_local_dir>/plyzer/.env`)

use std::{collections::HashMap, env, path::PathBuf, time::Duration};

use crate::error::{Error, Result};

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SCOPE: &str =
    "playlist-read-private playlist-read-collaborative user-library-read";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";

const CLIENT_ID: &str = "SPOTIFY_CLIENT_ID";
const CLIENT_SECRET: &str = "SPOTIFY_CLIENT_SECRET";
const REDIRECT_URI: &str = "SPOTIFY_REDIRECT_URI";

/// Where configuration values may come from.
#[derive(Debug, Clone)]
pub enum ConfigSource {
    Environment,
    EnvFile(PathBuf),
}

impl ConfigSource {
    /// The ordered list of sources used by the binary.
    pub fn defaults() -> Vec<ConfigSource> {
        vec![
            ConfigSource::Environment,
            ConfigSource::EnvFile(PathBuf::from(".env")),
            ConfigSource::EnvFile(data_dir().join(".env")),
        ]
    }

    fn describe(&self) -> String {
        match self {
            ConfigSource::Environment => "environment".to_string(),
            ConfigSource::EnvFile(path) => path.display().to_string(),
        }
    }

    fn load(&self) -> HashMap<String, String> {
        match self {
            ConfigSource::Environment => env::vars().collect(),
            ConfigSource::EnvFile(path) => match dotenv::from_path_iter(path) {
                Ok(iter) => iter.filter_map(|entry| entry.ok()).collect(),
                Err(e) => {
                    log::debug!("Skipping config source {}: {}", path.display(), e);
                    HashMap::new()
                }
            },
        }
    }
}

/// Retry and timeout settings for outbound API calls.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub timeout: Duration,
    pub max_retries: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_retries: 3,
            backoff: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (zero based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.backoff.saturating_mul(2u32.saturating_pow(attempt))
    }
}

/// Fully resolved application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub api_url: String,
    pub auth_url: String,
    pub token_url: String,
    pub scope: String,
    pub server_address: String,
    pub retry: RetryPolicy,
}

impl Config {
    /// Resolves the configuration from [`ConfigSource::defaults`].
    pub fn resolve() -> Result<Self> {
        Self::resolve_from(&ConfigSource::defaults())
    }

    /// Resolves the configuration from the given sources, first hit wins.
    pub fn resolve_from(sources: &[ConfigSource]) -> Result<Self> {
        let loaded: Vec<HashMap<String, String>> = sources.iter().map(|s| s.load()).collect();
        let searched = sources
            .iter()
            .map(|s| s.describe())
            .collect::<Vec<_>>()
            .join(", ");

        Self::from_lookup(
            |key| {
                loaded
                    .iter()
                    .find_map(|values| values.get(key).filter(|v| !v.trim().is_empty()))
                    .cloned()
            },
            &searched,
        )
    }

    /// Builds the configuration from a key lookup. `searched` names the
    /// sources behind the lookup for the error message.
    pub fn from_lookup<F>(lookup: F, searched: &str) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let missing: Vec<&str> = [CLIENT_ID, CLIENT_SECRET, REDIRECT_URI]
            .into_iter()
            .filter(|key| lookup(key).is_none_or(|v| v.starts_with("your_")))
            .collect();
        if !missing.is_empty() {
            return Err(Error::AuthConfig(format!(
                "missing {} (searched: {})",
                missing.join(", "),
                searched
            )));
        }

        let or_default =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let defaults = RetryPolicy::default();

        Ok(Config {
            client_id: lookup(CLIENT_ID).unwrap_or_default(),
            client_secret: lookup(CLIENT_SECRET).unwrap_or_default(),
            redirect_uri: lookup(REDIRECT_URI).unwrap_or_default(),
            api_url: or_default("SPOTIFY_API_URL", DEFAULT_API_URL)
                .trim_end_matches('/')
                .to_string(),
            auth_url: or_default("SPOTIFY_AUTH_URL", DEFAULT_AUTH_URL),
            token_url: or_default("SPOTIFY_TOKEN_URL", DEFAULT_TOKEN_URL),
            scope: or_default("SPOTIFY_SCOPE", DEFAULT_SCOPE),
            server_address: or_default("PLYZER_SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
            retry: RetryPolicy {
                timeout: parse_number(&lookup, "PLYZER_REQUEST_TIMEOUT_SECS")?
                    .map(Duration::from_secs)
                    .unwrap_or(defaults.timeout),
                max_retries: parse_number(&lookup, "PLYZER_MAX_RETRIES")?
                    .map(|n| n as u32)
                    .unwrap_or(defaults.max_retries),
                backoff: parse_number(&lookup, "PLYZER_RETRY_BACKOFF_MS")?
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.backoff),
            },
        })
    }
}

fn parse_number<F>(lookup: &F, key: &str) -> Result<Option<u64>>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| Error::Config {
                key: key.to_string(),
                value,
            }),
        None => Ok(None),
    }
}

/// The local data directory of the application, e.g.
/// `~/.local/share/plyzer` on Linux.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("plyzer");
    path
}

/// Writes a `.env` template with placeholder credentials into the data
/// directory. Returns `Ok(false)` if a file is already there.
pub async fn write_env_template() -> Result<bool> {
    let path = data_dir().join(".env");
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    let template = format!(
        "# Spotify API credentials\n\
         {CLIENT_ID}=your_client_id_here\n\
         {CLIENT_SECRET}=your_client_secret_here\n\
         {REDIRECT_URI}=http://{DEFAULT_SERVER_ADDRESS}/callback\n"
    );
    async_fs::write(&path, template).await?;
    Ok(true)
}
