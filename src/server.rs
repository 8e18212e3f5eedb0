use axum::{Extension, Router, routing::get};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::sync::Mutex;

use crate::{
    api,
    error::{Error, Result},
    spotify::AuthProvider,
    types::AuthState,
};

/// Routes of the local server. `auth` is shared by every request.
pub fn router(state: Arc<Mutex<Option<AuthState>>>, auth: AuthProvider) -> Router {
    let config = auth.shared_config();
    Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback))
        .route("/api/analyze", get(api::analyze))
        .route("/api/export", get(api::export))
        .layer(Extension(state))
        .layer(Extension(config))
        .layer(Extension(auth))
}

pub async fn start_api_server(
    state: Arc<Mutex<Option<AuthState>>>,
    auth: AuthProvider,
) -> Result<()> {
    let config = auth.shared_config();
    let addr = SocketAddr::from_str(&config.server_address).map_err(|e| Error::Config {
        key: "PLYZER_SERVER_ADDRESS".to_string(),
        value: format!("{} ({})", config.server_address, e),
    })?;

    let app = router(state, auth);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("Listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
