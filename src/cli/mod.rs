//! # CLI Module
//!
//! User-facing commands of `plyzer`. Each command resolves its inputs, calls
//! into the analysis pipeline or the auth provider, and reports progress and
//! failures with the crate's output macros.
//!
//! ## Commands
//!
//! - [`auth`] - authorizes plyzer with Spotify and caches the token
//! - [`analyze`] - prints statistics, charts and the track table of a playlist
//! - [`export`] - writes the track table of a playlist to a CSV file
//! - [`serve`] - runs the dashboard API
//! - [`setup`] - creates the `.env` template in the local data directory
//!
//! ## Error Handling
//!
//! Failures print the error together with a remediation hint and end the
//! command with exit code 1. Skipped playlist entries are reported as
//! information, never as errors.
//!
//! ## Usage Patterns
//!
//! ```bash
//! plyzer setup
//! plyzer auth
//! plyzer analyze https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M
//! plyzer analyze 37i9dQZF1DXcBWIGoYBM5M --top 5 --csv tracks.csv
//! plyzer export 37i9dQZF1DXcBWIGoYBM5M --output tracks.csv
//! plyzer serve
//! ```

mod analyze;
mod auth;
mod export;
mod serve;
mod setup;

pub use analyze::analyze;
pub use auth::auth;
pub use export::export;
pub use serve::serve;
pub use setup::setup;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{error, error::Error, info};

/// Prints `e` with its remediation hint and exits.
pub fn fail(e: &Error) -> ! {
    if e.is_retryable() {
        info!("This error is temporary, running the command again may succeed.");
    }
    error!("{}\n    {}", e, e.remediation());
}

pub(crate) fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
