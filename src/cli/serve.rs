use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{cli::fail, config::Config, info, server::start_api_server, spotify::AuthProvider};

pub async fn serve(config: Arc<Config>) {
    info!("Dashboard API listening on http://{}", config.server_address);
    info!(
        "Try http://{}/api/analyze?playlist=<playlist link or ID>",
        config.server_address
    );

    let auth = AuthProvider::new(config);
    if let Err(e) = start_api_server(Arc::new(Mutex::new(None)), auth).await {
        fail(&e);
    }
}
