//! # Spotify Integration Module
//!
//! This module is the only place that talks to the Spotify Web API and the
//! Spotify accounts service. Everything above it works with
//! [`crate::analysis::PlaylistSource`] and plain data types.
//!
//! ## Architecture
//!
//! ```text
//! CLI / Dashboard server
//!          ↓
//! Analysis pipeline (fetch → normalize → aggregate)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (authorization code flow, token refresh)
//!     └── Playlist reads (header, paginated tracks)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! ## Authentication
//!
//! [`auth`] implements the authorization code flow with a confidential client:
//! - **State Parameter**: a random `state` guards the callback against forgery
//! - **Local Callback Server**: a temporary axum server receives the code
//! - **Client Authentication**: code exchange and refresh use HTTP Basic auth
//!   with the client ID and secret
//! - **Token Cache**: tokens are stored in the local data directory and
//!   refreshed four minutes before they expire
//!
//! ## Playlist Reads
//!
//! [`playlist`] provides [`playlist::SpotifyClient`]:
//! - `GET /playlists/{id}` for the playlist header
//! - `GET /playlists/{id}/tracks` in pages of 100 entries
//!
//! ## Error Handling
//!
//! - **Rate Limiting**: 429 responses honour `Retry-After` up to 120 seconds,
//!   then surface as a retryable error
//! - **Transient Failures**: timeouts, connection errors and 502/503/504 are
//!   retried with exponential backoff
//! - **Access**: 404 and 403 mean the playlist is missing or private, 401 means
//!   the token was rejected
//!
//! ## Security Considerations
//!
//! - The client secret only travels to the token endpoint, over HTTPS
//! - Only read scopes are requested

pub mod auth;
pub mod playlist;

pub use auth::AuthProvider;
pub use playlist::SpotifyClient;
