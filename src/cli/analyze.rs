use std::{path::PathBuf, sync::Arc};

use crate::{
    analysis,
    cli::{fail, spinner},
    config::Config,
    export, info,
    render::{JsonRenderer, Render, TerminalRenderer},
    spotify::AuthProvider,
    success,
    types::Analysis,
    utils, warning,
};

pub async fn analyze(
    config: Arc<Config>,
    input: &str,
    top: usize,
    json: bool,
    hide_tracks: bool,
    csv: Option<PathBuf>,
) {
    let analysis = match run(config, input, top).await {
        Ok(analysis) => analysis,
        Err(e) => fail(&e),
    };

    if json {
        match serde_json::to_string_pretty(&JsonRenderer.render_analysis(&analysis)) {
            Ok(out) => println!("{}", out),
            Err(e) => warning!("Failed to render JSON: {}", e),
        }
    } else {
        let renderer = TerminalRenderer {
            show_tracks: !hide_tracks,
        };
        println!("{}", renderer.render_analysis(&analysis));
    }

    if analysis.table.len() < analysis.summary.total_tracks as usize {
        info!(
            "{} of {} tracks were skipped because they are unavailable or not songs.",
            analysis.summary.total_tracks as usize - analysis.table.len(),
            analysis.summary.total_tracks
        );
    }

    if let Some(path) = csv {
        match export::save_csv(&analysis.table, &path).await {
            Ok(()) => success!("Playlist data written to {}", path.display()),
            Err(e) => fail(&e),
        }
    }
}

async fn run(config: Arc<Config>, input: &str, top: usize) -> crate::Result<Analysis> {
    let playlist_id = utils::parse_playlist_id(input)?;
    let client = AuthProvider::new(config).client().await?;

    let pb = spinner("Fetching playlist details...");
    let result = analysis::analyze(&client, &playlist_id, top).await;
    pb.finish_and_clear();

    result
}
