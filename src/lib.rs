//! Spotify Playlist Analyzer Library
//!
//! This library fetches the tracks of a Spotify playlist, flattens them into a
//! table, computes popularity statistics and artist counts, and renders the
//! result for the terminal, as JSON or as CSV.
//!
//! # Modules
//!
//! - `analysis` - Fetch, normalize and aggregate pipeline
//! - `api` - HTTP endpoints of the local server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration sources and resolution
//! - `error` - Error taxonomy with remediation hints
//! - `export` - CSV export of track tables
//! - `management` - Token cache management
//! - `render` - Terminal and JSON renderers
//! - `server` - Local HTTP server for OAuth callbacks and the dashboard API
//! - `spotify` - Spotify Web API client and authorization
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use plyzer::{analysis, spotify::AuthProvider, utils, config::Config};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> plyzer::Result<()> {
//!     let config = Arc::new(Config::resolve()?);
//!     let client = AuthProvider::new(config).client().await?;
//!     let playlist_id = utils::parse_playlist_id("37i9dQZF1DXcBWIGoYBM5M")?;
//!     let analysis = analysis::analyze(&client, &playlist_id, 10).await?;
//!     println!("{:?}", analysis.metrics);
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod management;
pub mod render;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::{Error, Result};

/// Prints a status line with a blue bullet.
///
/// ```
/// info!("Fetched {} tracks", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a status line with a green checkmark for completed operations.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error line with a red exclamation mark and exits with code 1.
///
/// Only meant for the top level of a CLI command. Library code returns
/// [`Error`] instead so that a long-running server never exits.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning line with a yellow exclamation mark.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
