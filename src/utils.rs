use std::sync::LazyLock;

use base64::{Engine, engine::general_purpose::STANDARD};
use rand::{Rng, distr::Alphanumeric};
use regex::Regex;

use crate::{
    error::{Error, Result},
    types::PlaylistId,
};

/// Playlist used by `plyzer analyze --example`.
pub const EXAMPLE_PLAYLIST_ID: &str = "37i9dQZF1DXcBWIGoYBM5M";

static PLAYLIST_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"playlist[/:]([A-Za-z0-9]+)").expect("playlist pattern is valid")
});

/// Extracts a playlist ID from user input.
///
/// Accepts a bare ID, an `open.spotify.com/playlist/<id>` link (query string
/// and all) or a `spotify:playlist:<id>` URI.
pub fn parse_playlist_id(input: &str) -> Result<PlaylistId> {
    let input = input.trim();

    if let Some(caps) = PLAYLIST_SEGMENT.captures(input) {
        return Ok(PlaylistId(caps[1].to_string()));
    }

    if !input.is_empty() && input.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Ok(PlaylistId(input.to_string()));
    }

    Err(Error::InvalidInput(input.to_string()))
}

/// Random value for the OAuth `state` parameter.
pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Value of the `Authorization` header for client authentication at the
/// token endpoint.
pub fn basic_auth_header(client_id: &str, client_secret: &str) -> String {
    format!(
        "Basic {}",
        STANDARD.encode(format!("{}:{}", client_id, client_secret))
    )
}

/// Text bar scaled so that `max` fills `width` cells.
pub fn bar(value: usize, max: usize, width: usize) -> String {
    if max == 0 || value == 0 {
        return String::new();
    }
    let cells = ((value * width) as f64 / max as f64).ceil() as usize;
    "█".repeat(cells.clamp(1, width))
}
