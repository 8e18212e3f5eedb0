use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::Mutex;

use crate::{config::Config, spotify::auth::exchange_code, types::AuthState, warning};

pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<Arc<Mutex<Option<AuthState>>>>,
    Extension(config): Extension<Arc<Config>>,
) -> Html<&'static str> {
    if let Some(reason) = params.get("error") {
        warning!("Authorization was denied: {}", reason);
        return Html("<h4>Authorization denied.</h4>");
    }

    let Some(code) = params.get("code") else {
        return Html("<h4>Missing authorization code.</h4>");
    };

    let mut state = shared_state.lock().await;
    let Some(auth_state) = state.as_mut() else {
        return Html("<h4>No authorization in progress. Run plyzer auth.</h4>");
    };

    if params.get("state") != Some(&auth_state.state) {
        warning!("Callback state does not match, ignoring it");
        return Html("<h4>Invalid authorization state.</h4>");
    }

    match exchange_code(&config, code).await {
        Ok(token) => {
            auth_state.token = Some(token);
            Html("<h2>Authentication successful.</h2><p>Close browser window.</p>")
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            Html("<h4>Login failed.</h4>")
        }
    }
}
