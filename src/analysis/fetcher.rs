use std::future::Future;

use crate::{
    error::Result,
    types::{PlaylistId, PlaylistSummary, RawTrackItem, TrackPage},
};

/// Read access to playlists, as provided by an authenticated API client.
pub trait PlaylistSource {
    /// Fetches one page of playlist entries starting at `offset`.
    fn get_tracks_page(
        &self,
        playlist_id: &PlaylistId,
        offset: u32,
    ) -> impl Future<Output = Result<TrackPage>> + Send;

    /// Fetches the playlist header: name, owner, track count and cover.
    fn get_playlist(
        &self,
        playlist_id: &PlaylistId,
    ) -> impl Future<Output = Result<PlaylistSummary>> + Send;
}

/// Retrieves every entry of a playlist, following the pagination cursor
/// until the source reports no further page. Items keep playlist order.
pub async fn fetch_all_tracks<C>(client: &C, playlist_id: &PlaylistId) -> Result<Vec<RawTrackItem>>
where
    C: PlaylistSource + ?Sized,
{
    let mut items: Vec<RawTrackItem> = Vec::new();
    let mut offset: u32 = 0;
    let mut pages: usize = 0;

    loop {
        let page = client.get_tracks_page(playlist_id, offset).await?;
        pages += 1;
        log::debug!(
            "Fetched page {} of playlist {} at offset {} with {} items",
            pages,
            playlist_id,
            offset,
            page.items.len()
        );

        items.extend(page.items);

        match page.next_offset {
            Some(next) => offset = next,
            None => break,
        }
    }

    Ok(items)
}
