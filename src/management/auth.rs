use std::path::PathBuf;

use chrono::Utc;

use crate::{
    config::{self, Config},
    error::{Error, Result},
    spotify::auth::refresh_token,
    types::Token,
};

/// Seconds before expiry at which a token is already treated as expired.
const EXPIRY_MARGIN_SECS: u64 = 240;

#[derive(Debug)]
pub struct TokenManager {
    token: Token,
    path: PathBuf,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager {
            token,
            path: Self::token_path(),
        }
    }

    /// Uses `path` instead of the default cache location.
    pub fn with_path(token: Token, path: PathBuf) -> Self {
        TokenManager { token, path }
    }

    pub async fn load() -> Result<Self> {
        Self::load_from(Self::token_path()).await
    }

    pub async fn load_from(path: PathBuf) -> Result<Self> {
        let content = async_fs::read_to_string(&path).await.map_err(|e| {
            Error::AuthFlow(format!(
                "no cached token at {} ({})",
                path.display(),
                e
            ))
        })?;
        let token: Token = serde_json::from_str(&content)
            .map_err(|e| Error::AuthFlow(format!("cached token is corrupt: {}", e)))?;
        Ok(Self { token, path })
    }

    pub async fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.token)
            .map_err(|e| Error::AuthFlow(e.to_string()))?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    /// Returns an access token that is valid for at least a few minutes,
    /// refreshing and persisting it first when needed.
    pub async fn get_valid_token(&mut self, config: &Config) -> Result<String> {
        if self.is_expired() {
            log::debug!("Access token expired, refreshing");
            let token = refresh_token(config, &self.token.refresh_token).await?;
            self.token = token;
            if let Err(e) = self.persist().await {
                log::warn!("Failed to persist refreshed token: {}", e);
            }
        }

        Ok(self.token.access_token.clone())
    }

    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now + EXPIRY_MARGIN_SECS >= self.token.obtained_at + self.token.expires_in
    }

    fn token_path() -> PathBuf {
        config::data_dir().join("cache/token.json")
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }
}
