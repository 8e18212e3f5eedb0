use serde::Deserialize;

use crate::types::{PlaylistEntry, RawTrackItem, TrackRecord, TrackTable};

/// Flattens raw playlist entries into track records.
///
/// Entries whose track is null (removed or unavailable in the region) and
/// entries that lack a required field (podcast episodes, truncated payloads)
/// produce no record. Local files are kept with an empty ID. Order and
/// duplicates are kept.
pub fn normalize(raw_items: &[RawTrackItem]) -> TrackTable {
    raw_items.iter().filter_map(normalize_item).collect()
}

/// Converts a single entry, or returns `None` when it cannot be analyzed.
pub fn normalize_item(item: &RawTrackItem) -> Option<TrackRecord> {
    let entry: PlaylistEntry = match PlaylistEntry::deserialize(&item.0) {
        Ok(entry) => entry,
        Err(e) => {
            log::debug!("Skipping malformed playlist entry: {}", e);
            return None;
        }
    };

    let track = entry.track?;
    // only the primary artist is attributed
    let artist = track.artists.into_iter().next()?;

    Some(TrackRecord {
        name: track.name,
        artist: artist.name,
        album: track.album.name,
        id: track.id.unwrap_or_default(),
        popularity: track.popularity.unwrap_or(0).min(100) as u8,
    })
}
