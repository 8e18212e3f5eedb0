//! Error taxonomy for playlist analysis.
//!
//! Every failure that can reach a user is one variant of [`Error`]. Anomalies
//! inside single playlist entries (removed tracks, podcast episodes, half-empty
//! payloads) are absorbed by the normalizer and never show up here.

use thiserror::Error;

/// Errors surfaced by the analysis pipeline and its collaborators.
#[derive(Error, Debug)]
pub enum Error {
    /// Client credentials are missing or unusable.
    #[error("Spotify credentials are not configured: {0}")]
    AuthConfig(String),

    /// A configuration value exists but cannot be parsed.
    #[error("Invalid configuration value for {key}: {value}")]
    Config { key: String, value: String },

    /// The token exchange or refresh failed, or no token is cached.
    #[error("Spotify authorization failed: {0}")]
    AuthFlow(String),

    /// The playlist does not exist or is not visible to the current user.
    #[error("Playlist {0} was not found or is not accessible")]
    NotFound(String),

    /// Transient network or upstream failure.
    #[error("Failed to fetch data from Spotify: {0}")]
    Fetch(String),

    /// Upstream answered 429 and the retry budget is spent.
    #[error("Spotify rate limit reached, retry after {retry_after} seconds")]
    RateLimited { retry_after: u64 },

    /// The playlist holds no track that could be analyzed.
    #[error("Playlist {0} has no analyzable tracks")]
    EmptyResult(String),

    /// The user input does not name a playlist.
    #[error("Could not find a playlist ID in '{0}'")]
    InvalidInput(String),

    #[error("CSV export failed: {0}")]
    Export(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether running the same analysis again may succeed without user action.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Fetch(_) | Error::RateLimited { .. })
    }

    /// User-facing remediation hint for this error.
    pub fn remediation(&self) -> &'static str {
        match self {
            Error::AuthConfig(_) | Error::Config { .. } => {
                "Set SPOTIFY_CLIENT_ID, SPOTIFY_CLIENT_SECRET and SPOTIFY_REDIRECT_URI in the environment or in the .env file created by `plyzer setup`."
            }
            Error::AuthFlow(_) => {
                "Run `plyzer auth` to authorize again and verify your Spotify API credentials."
            }
            Error::NotFound(_) => "Check the playlist ID and ensure the playlist is public.",
            Error::Fetch(_) => "Check your network connection and try again.",
            Error::RateLimited { .. } => "Wait a moment before analyzing the next playlist.",
            Error::EmptyResult(_) => {
                "The playlist is empty or only holds unavailable tracks. Try another playlist."
            }
            Error::InvalidInput(_) => {
                "Paste a playlist ID or a link like https://open.spotify.com/playlist/<id>."
            }
            Error::Export(_) | Error::Io(_) => "Check that the output path is writable.",
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Fetch(err.to_string())
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
