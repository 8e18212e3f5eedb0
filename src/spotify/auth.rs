use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::{Client, Url};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::{
    config::Config,
    error::{Error, Result},
    management::TokenManager,
    server::start_api_server,
    spotify::playlist::SpotifyClient,
    types::{AuthState, Token},
    utils, warning,
};

/// How long `plyzer auth` waits for the browser to hit the callback.
const AUTH_TIMEOUT: Duration = Duration::from_secs(60);

/// Obtains access tokens and builds authenticated clients from an explicit
/// configuration.
///
/// Clones share one token cache, so concurrent dashboard requests refresh an
/// expiring token once.
#[derive(Debug, Clone)]
pub struct AuthProvider {
    config: Arc<Config>,
    tokens: Arc<Mutex<Option<TokenManager>>>,
}

impl AuthProvider {
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            config,
            tokens: Arc::new(Mutex::new(None)),
        }
    }

    /// Uses `token_mgr` instead of loading the cached token on first use.
    pub fn with_token_manager(config: Arc<Config>, token_mgr: TokenManager) -> Self {
        Self {
            config,
            tokens: Arc::new(Mutex::new(Some(token_mgr))),
        }
    }

    pub(crate) fn shared_config(&self) -> Arc<Config> {
        Arc::clone(&self.config)
    }

    /// Builds a client from the cached token, refreshing it when it is about
    /// to expire.
    pub async fn client(&self) -> Result<SpotifyClient> {
        // held across the refresh so a single request renews the token
        let mut tokens = self.tokens.lock().await;
        if tokens.is_none() {
            *tokens = Some(TokenManager::load().await?);
        }
        let access_token = match tokens.as_mut() {
            Some(token_mgr) => token_mgr.get_valid_token(&self.config).await?,
            None => return Err(Error::AuthFlow("no cached token".to_string())),
        };
        drop(tokens);

        SpotifyClient::new(&self.config, access_token)
    }

    /// Runs the authorization-code flow and caches the resulting token.
    ///
    /// 1. Generates a random `state` and stores it in `shared_state`
    /// 2. Starts the local callback server
    /// 3. Opens the authorization URL in the browser (or prints it)
    /// 4. Waits for the callback to place a token in `shared_state`
    /// 5. Persists the token for later analyses
    pub async fn authorize(&self, shared_state: Arc<Mutex<Option<AuthState>>>) -> Result<Token> {
        let state = utils::generate_state();

        {
            let mut lock = shared_state.lock().await;
            *lock = Some(AuthState {
                state: state.clone(),
                token: None,
            });
        }

        let server_state = Arc::clone(&shared_state);
        let server_auth = self.clone();
        let server = tokio::spawn(async move {
            if let Err(e) = start_api_server(server_state, server_auth).await {
                warning!("Callback server stopped: {}", e);
            }
        });

        let auth_url = authorize_url(&self.config, &state)?;
        if webbrowser::open(auth_url.as_str()).is_err() {
            warning!(
                "Failed to open browser. Please navigate to the following URL manually:\n{}",
                auth_url
            )
        }

        let token = wait_for_token(shared_state, AUTH_TIMEOUT).await;
        server.abort();

        match token {
            Some(t) => {
                let token_mgr = TokenManager::new(t.clone());
                token_mgr.persist().await?;
                *self.tokens.lock().await = Some(token_mgr);
                Ok(t)
            }
            None => Err(Error::AuthFlow(
                "authorization failed or timed out".to_string(),
            )),
        }
    }
}

/// The URL the user visits to grant access.
pub fn authorize_url(config: &Config, state: &str) -> Result<Url> {
    Url::parse_with_params(
        &config.auth_url,
        &[
            ("client_id", config.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("state", state),
            ("scope", config.scope.as_str()),
        ],
    )
    .map_err(|e| Error::AuthConfig(format!("invalid authorization URL: {}", e)))
}

async fn wait_for_token(
    shared_state: Arc<Mutex<Option<AuthState>>>,
    max_wait: Duration,
) -> Option<Token> {
    use std::time::Instant;

    let start = Instant::now();

    while start.elapsed() < max_wait {
        let lock = shared_state.lock().await;
        if let Some(token) = lock.as_ref().and_then(|s| s.token.as_ref()) {
            return Some(token.clone());
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Exchanges an authorization code for a token.
pub async fn exchange_code(config: &Config, code: &str) -> Result<Token> {
    let json = token_request(
        config,
        &[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", config.redirect_uri.as_str()),
        ],
    )
    .await?;

    token_from_json(&json, None)
}

/// Obtains a fresh access token for `refresh_token`.
pub async fn refresh_token(config: &Config, refresh_token: &str) -> Result<Token> {
    let json = token_request(
        config,
        &[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ],
    )
    .await?;

    // Spotify omits the refresh token when it does not rotate it
    token_from_json(&json, Some(refresh_token))
}

async fn token_request(config: &Config, form: &[(&str, &str)]) -> Result<Value> {
    let client = Client::builder()
        .timeout(config.retry.timeout)
        .build()
        .map_err(|e| Error::AuthFlow(e.to_string()))?;

    let res = client
        .post(&config.token_url)
        .header(
            reqwest::header::AUTHORIZATION,
            utils::basic_auth_header(&config.client_id, &config.client_secret),
        )
        .form(form)
        .send()
        .await
        .map_err(|e| Error::AuthFlow(e.to_string()))?;

    let status = res.status();
    let json: Value = res
        .json()
        .await
        .map_err(|e| Error::AuthFlow(e.to_string()))?;

    if !status.is_success() {
        let reason = json["error_description"]
            .as_str()
            .or_else(|| json["error"].as_str())
            .unwrap_or("unknown error");
        return Err(Error::AuthFlow(format!(
            "token endpoint answered {}: {}",
            status, reason
        )));
    }

    Ok(json)
}

/// Builds a [`Token`] from a token endpoint response.
pub fn token_from_json(json: &Value, previous_refresh: Option<&str>) -> Result<Token> {
    let access_token = json["access_token"]
        .as_str()
        .ok_or_else(|| Error::AuthFlow("response holds no access token".to_string()))?;

    let refresh_token = json["refresh_token"]
        .as_str()
        .or(previous_refresh)
        .ok_or_else(|| Error::AuthFlow("response holds no refresh token".to_string()))?;

    Ok(Token {
        access_token: access_token.to_string(),
        refresh_token: refresh_token.to_string(),
        scope: json["scope"].as_str().unwrap_or_default().to_string(),
        expires_in: json["expires_in"].as_u64().unwrap_or(3600),
        obtained_at: Utc::now().timestamp() as u64,
    })
}
