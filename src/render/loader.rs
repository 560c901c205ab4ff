//! Parallel cover download and decode with a per-URL cache

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use image::RgbaImage;
use reqwest::Client;

use crate::warning;

/// A decoded cover image ready to be drawn.
///
/// Wraps an RGBA pixel buffer with known dimensions. Loaders own resources
/// behind an `Arc`; the compositor only ever borrows them.
#[derive(Debug, Clone)]
pub struct ImageResource {
    pixels: RgbaImage,
}

impl ImageResource {
    /// Decodes an image from raw encoded bytes (JPEG, PNG, ...).
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a decodable image.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, image::ImageError> {
        let pixels = image::load_from_memory(bytes)?.to_rgba8();
        Ok(Self { pixels })
    }

    pub fn from_pixels(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

/// URL-keyed store of decoded images, shared across renders in a session.
///
/// Append-only: a URL is decoded at most once and later lookups reuse the
/// cached resource. Racing identical inserts is harmless since the content
/// behind a URL is the same; the first writer wins.
#[derive(Default)]
pub struct DecodeCache {
    entries: Mutex<HashMap<String, Arc<ImageResource>>>,
}

impl DecodeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, url: &str) -> Option<Arc<ImageResource>> {
        self.entries.lock().ok()?.get(url).cloned()
    }

    pub fn insert(&self, url: String, resource: Arc<ImageResource>) -> Arc<ImageResource> {
        match self.entries.lock() {
            Ok(mut entries) => entries.entry(url).or_insert(resource).clone(),
            Err(_) => resource,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Fetches and decodes a set of cover URLs in parallel.
///
/// Every URL gets its own task; the function joins all of them before
/// returning, so rendering never starts on a partial set. Failed fetches and
/// undecodable payloads are logged and dropped, never surfaced as errors:
/// the result is the filtered list of usable images. An empty result for a
/// non-empty input is the caller's signal that no usable images exist.
///
/// Completed decodes land in `cache` keyed by URL, so repeated renders in
/// one session skip the network.
pub async fn load_images(
    client: &Client,
    cache: &Arc<DecodeCache>,
    urls: &[String],
) -> Vec<Arc<ImageResource>> {
    let mut handles = Vec::with_capacity(urls.len());

    for url in urls {
        let url = url.clone();
        let client = client.clone();
        let cache = Arc::clone(cache);
        handles.push(tokio::spawn(async move {
            fetch_and_decode(&client, &cache, url).await
        }));
    }

    // fan-out/join: outcomes are collected from the join results themselves,
    // not accumulated through side effects inside the tasks
    let mut images = Vec::new();
    for handle in handles {
        match handle.await {
            Ok(Ok(resource)) => images.push(resource),
            Ok(Err(e)) => {
                warning!("{}", e);
            }
            Err(e) => {
                warning!("Task join error: {}", e);
            }
        }
    }

    images
}

async fn fetch_and_decode(
    client: &Client,
    cache: &DecodeCache,
    url: String,
) -> Result<Arc<ImageResource>, String> {
    if let Some(hit) = cache.get(&url) {
        return Ok(hit);
    }

    let bytes = client
        .get(&url)
        .send()
        .await
        .and_then(|resp| resp.error_for_status())
        .map_err(|e| format!("Failed to fetch cover image {}: {}", url, e))?
        .bytes()
        .await
        .map_err(|e| format!("Failed to read cover image {}: {}", url, e))?;

    let resource = ImageResource::from_bytes(&bytes)
        .map_err(|e| format!("Failed to decode cover image {}: {}", url, e))?;
    if resource.width() == 0 || resource.height() == 0 {
        return Err(format!("Cover image {} decoded to zero pixels", url));
    }

    Ok(cache.insert(url, Arc::new(resource)))
}
