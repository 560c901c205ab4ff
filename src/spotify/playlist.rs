use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::time::sleep;

use crate::{
    config,
    types::{PlaylistDetails, PlaylistTracksPage},
    utils, warning,
};

/// Number of tracks requested per page when walking a playlist.
const TRACKS_PAGE_LIMIT: u32 = 30;

/// Retrieves the details of a playlist from the Spotify Web API.
///
/// Fetches the playlist's metadata; only the fields the wallpaper generator
/// needs (id and display name) are deserialized. The function retries 502
/// Bad Gateway responses after a 10-second delay and honors the
/// `Retry-After` header on 429 Too Many Requests responses.
///
/// # Arguments
///
/// * `playlist_id` - Spotify ID of the playlist
/// * `token` - Valid access token for Spotify API authentication
///
/// # Errors
///
/// Returns a `reqwest::Error` on network failures, non-retryable HTTP errors
/// (such as 404 for an unknown or private playlist), or malformed responses.
pub async fn get_playlist(
    playlist_id: &str,
    token: &str,
) -> Result<PlaylistDetails, reqwest::Error> {
    let api_url = format!(
        "{uri}/playlists/{id}",
        uri = &config::spotify_apiurl(),
        id = playlist_id
    );

    loop {
        let client = Client::new();
        let response = client.get(&api_url).bearer_auth(token).send().await;

        let response = match response {
            Ok(resp) => {
                if resp.status() == StatusCode::TOO_MANY_REQUESTS {
                    sleep(retry_after_delay(&resp)).await;
                    continue; // retry
                }
                match resp.error_for_status() {
                    Ok(valid_response) => valid_response,
                    Err(err) => {
                        if let Some(status) = err.status() {
                            if status == StatusCode::BAD_GATEWAY {
                                sleep(Duration::from_secs(10)).await;
                                continue; // retry
                            }
                        }
                        return Err(err); // propagate other errors
                    }
                }
            }
            Err(err) => {
                return Err(err);
            } // network or reqwest error
        };

        let details = response.json::<PlaylistDetails>().await?;
        return Ok(details);
    }
}

/// Collects the album-cover URLs of every track in a playlist.
///
/// Walks the paginated `/playlists/{id}/tracks` endpoint, following the
/// `next` link until the last page. For each track with album images, the
/// 300 px or 640 px rendition is preferred and the first image is used as a
/// fallback. Tracks without images are skipped; the returned list preserves
/// playlist order and may contain duplicate URLs when several tracks share
/// an album.
///
/// Rate limiting is handled the same way as [`get_playlist`]: 429 responses
/// wait for the advertised `Retry-After` delay, 502 responses retry after
/// 10 seconds.
///
/// # Errors
///
/// Returns a `reqwest::Error` on network failures, non-retryable HTTP
/// errors, or malformed page data. Pages fetched before the failure are
/// discarded; the caller sees all-or-nothing results.
pub async fn get_cover_urls(
    playlist_id: &str,
    token: &str,
) -> Result<Vec<String>, reqwest::Error> {
    let mut cover_urls: Vec<String> = Vec::new();
    let mut next_url = Some(format!(
        "{uri}/playlists/{id}/tracks?offset=0&limit={limit}",
        uri = &config::spotify_apiurl(),
        id = playlist_id,
        limit = TRACKS_PAGE_LIMIT
    ));

    while let Some(page_url) = next_url {
        let page = get_tracks_page(&page_url, token).await?;

        for item in page.items {
            let Some(track) = item.track else {
                continue; // local or removed track
            };
            if let Some(url) = utils::select_cover_url(&track.album.images) {
                cover_urls.push(url);
            }
        }

        next_url = page.next;
    }

    Ok(cover_urls)
}

async fn get_tracks_page(
    page_url: &str,
    token: &str,
) -> Result<PlaylistTracksPage, reqwest::Error> {
    loop {
        let client = Client::new();
        let response = client.get(page_url).bearer_auth(token).send().await;

        let response = match response {
            Ok(resp) => {
                if resp.status() == StatusCode::TOO_MANY_REQUESTS {
                    sleep(retry_after_delay(&resp)).await;
                    continue; // retry
                }
                match resp.error_for_status() {
                    Ok(valid_response) => valid_response,
                    Err(err) => {
                        if let Some(status) = err.status() {
                            if status == StatusCode::BAD_GATEWAY {
                                sleep(Duration::from_secs(10)).await;
                                continue; // retry
                            }
                        }
                        return Err(err); // propagate other errors
                    }
                }
            }
            Err(err) => {
                return Err(err);
            } // network or reqwest error
        };

        let page = response.json::<PlaylistTracksPage>().await?;
        return Ok(page);
    }
}

// Delay advertised by a 429 response, capped at 120 seconds.
fn retry_after_delay(response: &reqwest::Response) -> Duration {
    let retry_after = response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(0);
    if retry_after > 120 {
        warning!(
            "Retry after has reached an abnormal high of {} seconds.",
            retry_after
        );
    }
    Duration::from_secs(retry_after.min(120))
}
