//! # Analysis Pipeline
//!
//! Turns a playlist ID into an [`Analysis`]: the playlist header, the flat
//! track table and the aggregated metrics. The pipeline is independent of the
//! HTTP layer; it only needs something implementing [`PlaylistSource`].
//!
//! ```text
//! PlaylistSource ──► fetcher ──► normalize ──► metrics ──► Analysis
//! ```
//!
//! - [`fetcher`] walks the pagination cursor and collects raw entries
//! - [`normalize`] flattens entries into [`crate::types::TrackRecord`]s,
//!   dropping removed and malformed ones
//! - [`metrics`] computes popularity statistics, artist counts and the
//!   popularity histogram

pub mod fetcher;
pub mod metrics;
pub mod normalize;

pub use fetcher::{PlaylistSource, fetch_all_tracks};
pub use metrics::{
    aggregate, aggregate_with, distinct_artists, popularity_histogram, popularity_stats,
    top_artists,
};
pub use normalize::normalize;

use crate::{
    error::{Error, Result},
    types::{Analysis, PlaylistId},
};

/// Runs the whole pipeline for one playlist.
///
/// Fails with [`Error::EmptyResult`] when the playlist has no analyzable
/// track, so callers can tell an empty playlist from a failed fetch.
pub async fn analyze<C>(client: &C, playlist_id: &PlaylistId, top_n: usize) -> Result<Analysis>
where
    C: PlaylistSource + ?Sized,
{
    let summary = client.get_playlist(playlist_id).await?;
    let raw_items = fetch_all_tracks(client, playlist_id).await?;
    let table = normalize(&raw_items);

    log::debug!(
        "Playlist {} normalized to {} of {} entries",
        playlist_id,
        table.len(),
        raw_items.len()
    );

    if table.is_empty() {
        return Err(Error::EmptyResult(playlist_id.to_string()));
    }

    let metrics = aggregate_with(&table, top_n);
    Ok(Analysis {
        summary,
        table,
        metrics,
    })
}
