use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{cli::fail, config::Config, info, spotify::AuthProvider, success};

pub async fn auth(config: Arc<Config>) {
    info!("Opening Spotify authorization in your browser...");

    let provider = AuthProvider::new(config);
    match provider.authorize(Arc::new(Mutex::new(None))).await {
        Ok(token) => {
            success!("Authentication successful!");
            info!("Granted scopes: {}", token.scope);
        }
        Err(e) => fail(&e),
    }
}
