use serde::{Deserialize, Serialize};
use serde_json::Value;
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

/// State shared between `plyzer auth` and the callback endpoint.
#[derive(Debug, Clone)]
pub struct AuthState {
    pub state: String,
    pub token: Option<Token>,
}

/// Identifier of a Spotify playlist. Only built through
/// [`crate::utils::parse_playlist_id`], so it is always non-empty and
/// ASCII alphanumeric.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PlaylistId(pub(crate) String);

impl PlaylistId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlaylistId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One entry of a playlist as delivered by the API, kept untyped until
/// normalization decides whether it is usable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawTrackItem(pub Value);

#[derive(Debug, Clone, Default)]
pub struct TrackPage {
    pub items: Vec<RawTrackItem>,
    pub next_offset: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Tabled)]
pub struct TrackRecord {
    pub name: String,
    pub artist: String,
    pub album: String,
    pub id: String,
    pub popularity: u8,
}

pub type TrackTable = Vec<TrackRecord>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaylistSummary {
    pub name: String,
    pub owner: String,
    pub total_tracks: u32,
    pub description: String,
    pub image: Option<String>,
}

impl PlaylistSummary {
    /// Description shortened to 50 characters for display.
    pub fn display_description(&self) -> String {
        if self.description.chars().count() > 50 {
            let head: String = self.description.chars().take(50).collect();
            format!("{}...", head)
        } else {
            self.description.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PopularityStats {
    pub mean: f64,
    pub median: f64,
    pub min: u8,
    pub max: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistCount {
    pub artist: String,
    pub count: usize,
}

/// Tracks whose popularity falls in `lower..=upper`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistogramBucket {
    pub lower: u8,
    pub upper: u8,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    /// `None` when there is no track to compute statistics from.
    pub popularity: Option<PopularityStats>,
    pub distinct_artists: usize,
    pub top_artists: Vec<ArtistCount>,
    pub histogram: Vec<HistogramBucket>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub summary: PlaylistSummary,
    pub table: TrackTable,
    pub metrics: Metrics,
}

// Upstream payloads

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistResponse {
    pub name: String,
    pub description: Option<String>,
    pub owner: PlaylistOwner,
    pub tracks: PlaylistTracksRef,
    #[serde(default)]
    pub images: Option<Vec<Image>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistOwner {
    pub id: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistTracksRef {
    pub total: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Image {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistTracksResponse {
    pub items: Vec<RawTrackItem>,
    pub next: Option<String>,
    pub offset: u32,
    pub limit: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistEntry {
    pub track: Option<Track>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Track {
    /// `null` for local files.
    pub id: Option<String>,
    pub name: String,
    pub artists: Vec<TrackArtist>,
    pub album: TrackAlbum,
    pub popularity: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackArtist {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackAlbum {
    pub name: String,
}
