use std::{path::PathBuf, sync::Arc};

use crate::{
    analysis,
    cli::{fail, spinner},
    config::Config,
    error::Error,
    export,
    spotify::AuthProvider,
    success, utils,
};

pub async fn export(config: Arc<Config>, input: &str, output: PathBuf) {
    let playlist_id = match utils::parse_playlist_id(input) {
        Ok(id) => id,
        Err(e) => fail(&e),
    };

    let client = match AuthProvider::new(config).client().await {
        Ok(client) => client,
        Err(e) => fail(&e),
    };

    let pb = spinner("Fetching playlist tracks...");
    let raw_items = analysis::fetch_all_tracks(&client, &playlist_id).await;
    pb.finish_and_clear();

    let table = match raw_items {
        Ok(items) => analysis::normalize(&items),
        Err(e) => fail(&e),
    };

    if table.is_empty() {
        fail(&Error::EmptyResult(playlist_id.to_string()));
    }

    match export::save_csv(&table, &output).await {
        Ok(()) => success!("Exported {} tracks to {}", table.len(), output.display()),
        Err(e) => fail(&e),
    }
}
