use std::time::Duration;

use reqwest::{Client, Response, StatusCode, header::RETRY_AFTER};
use serde::de::DeserializeOwned;
use tokio::time::sleep;

use crate::{
    analysis::PlaylistSource,
    config::{Config, RetryPolicy},
    error::{Error, Result},
    types::{PlaylistId, PlaylistResponse, PlaylistSummary, PlaylistTracksResponse, TrackPage},
};

/// Page size requested from the playlist tracks endpoint (the API maximum).
pub const PAGE_LIMIT: u32 = 100;

/// Longest `Retry-After` the client is willing to sleep through.
const MAX_RETRY_AFTER_SECS: u64 = 120;

/// Authenticated read-only client for the playlist endpoints.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    access_token: String,
    retry: RetryPolicy,
}

impl SpotifyClient {
    pub fn new(config: &Config, access_token: String) -> Result<Self> {
        let http = Client::builder().timeout(config.retry.timeout).build()?;
        Ok(Self {
            http,
            api_url: config.api_url.clone(),
            access_token,
            retry: config.retry.clone(),
        })
    }

    /// GETs `url` and decodes the JSON body, retrying transient failures.
    ///
    /// Connection errors, timeouts and 502/503/504 responses are retried with
    /// exponential backoff. A 429 sleeps for `Retry-After` while retries
    /// remain; afterwards it surfaces as [`Error::RateLimited`].
    async fn get_json<T: DeserializeOwned>(&self, url: &str, playlist_id: &PlaylistId) -> Result<T> {
        let mut attempt: u32 = 0;

        loop {
            let response = self
                .http
                .get(url)
                .bearer_auth(&self.access_token)
                .send()
                .await;

            let response = match response {
                Ok(resp) => resp,
                Err(err) => {
                    if (err.is_timeout() || err.is_connect()) && attempt < self.retry.max_retries {
                        self.backoff(attempt, &err.to_string()).await;
                        attempt += 1;
                        continue;
                    }
                    return Err(Error::Fetch(err.to_string()));
                }
            };

            let status = response.status();
            if status.is_success() {
                return response
                    .json::<T>()
                    .await
                    .map_err(|e| Error::Fetch(format!("unexpected response body: {}", e)));
            }

            match status {
                StatusCode::TOO_MANY_REQUESTS => {
                    let retry_after = retry_after_secs(&response);
                    if attempt < self.retry.max_retries && retry_after <= MAX_RETRY_AFTER_SECS {
                        log::warn!(
                            "Rate limited by Spotify, retrying in {} seconds ({}/{})",
                            retry_after,
                            attempt + 1,
                            self.retry.max_retries
                        );
                        sleep(Duration::from_secs(retry_after)).await;
                        attempt += 1;
                        continue;
                    }
                    return Err(Error::RateLimited { retry_after });
                }
                StatusCode::BAD_GATEWAY
                | StatusCode::SERVICE_UNAVAILABLE
                | StatusCode::GATEWAY_TIMEOUT => {
                    if attempt < self.retry.max_retries {
                        self.backoff(attempt, status.as_str()).await;
                        attempt += 1;
                        continue;
                    }
                    return Err(Error::Fetch(format!("Spotify answered {}", status)));
                }
                // malformed base62 IDs are answered with 400
                StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND | StatusCode::FORBIDDEN => {
                    return Err(Error::NotFound(playlist_id.to_string()));
                }
                StatusCode::UNAUTHORIZED => {
                    return Err(Error::AuthFlow(
                        "the access token was rejected".to_string(),
                    ));
                }
                other => {
                    return Err(Error::Fetch(format!("Spotify answered {}", other)));
                }
            }
        }
    }

    async fn backoff(&self, attempt: u32, reason: &str) {
        let delay = self.retry.delay_for(attempt);
        log::warn!(
            "Transient failure ({}), retrying in {:?} ({}/{})",
            reason,
            delay,
            attempt + 1,
            self.retry.max_retries
        );
        sleep(delay).await;
    }
}

fn retry_after_secs(response: &Response) -> u64 {
    response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(1)
}

impl PlaylistSource for SpotifyClient {
    async fn get_tracks_page(&self, playlist_id: &PlaylistId, offset: u32) -> Result<TrackPage> {
        let api_url = format!(
            "{uri}/playlists/{id}/tracks?offset={offset}&limit={limit}",
            uri = self.api_url,
            id = playlist_id,
            offset = offset,
            limit = PAGE_LIMIT
        );

        let page: PlaylistTracksResponse = self.get_json(&api_url, playlist_id).await?;
        let next_offset = page.next.as_ref().map(|_| page.offset + page.limit);

        Ok(TrackPage {
            items: page.items,
            next_offset,
        })
    }

    async fn get_playlist(&self, playlist_id: &PlaylistId) -> Result<PlaylistSummary> {
        let api_url = format!(
            "{uri}/playlists/{id}?fields=name,description,owner(id,display_name),tracks(total),images",
            uri = self.api_url,
            id = playlist_id
        );

        let playlist: PlaylistResponse = self.get_json(&api_url, playlist_id).await?;

        Ok(PlaylistSummary {
            name: playlist.name,
            owner: playlist.owner.display_name.unwrap_or(playlist.owner.id),
            total_tracks: playlist.tracks.total,
            description: playlist
                .description
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| "No description".to_string()),
            image: playlist
                .images
                .and_then(|images| images.into_iter().next())
                .map(|image| image.url),
        })
    }
}
