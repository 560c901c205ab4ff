use std::fmt;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::types::AlbumImage;

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// One of the two supported wallpaper output sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectPreset {
    /// 16:9 at 1920x1080
    Desktop,
    /// 1:2 at 1080x2160
    Mobile,
}

impl AspectPreset {
    pub const fn dimensions(self) -> (u32, u32) {
        match self {
            AspectPreset::Desktop => (1920, 1080),
            AspectPreset::Mobile => (1080, 2160),
        }
    }
}

impl fmt::Display for AspectPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AspectPreset::Desktop => write!(f, "desktop"),
            AspectPreset::Mobile => write!(f, "mobile"),
        }
    }
}

pub fn parse_aspect_preset(input: &str) -> Result<AspectPreset, String> {
    match input.trim().to_ascii_lowercase().as_str() {
        "desktop" => Ok(AspectPreset::Desktop),
        "mobile" => Ok(AspectPreset::Mobile),
        "" => Err("aspect preset cannot be empty".to_string()),
        other => Err(format!(
            "invalid value '{}' (expected 'desktop' or 'mobile')",
            other
        )),
    }
}

pub fn extract_playlist_id(url: &str) -> Option<String> {
    let marker = "spotify.com/playlist/";
    let start = url.find(marker)? + marker.len();
    let id: String = url[start..]
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();
    (!id.is_empty()).then_some(id)
}

pub fn wallpaper_filename(caption: &str, preset: AspectPreset) -> String {
    let stem: String = caption
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();
    format!("{}_wallpaper_{}.png", stem, preset)
}

pub fn select_cover_url(images: &[AlbumImage]) -> Option<String> {
    images
        .iter()
        .find(|img| img.width == Some(300) || img.width == Some(640))
        .or_else(|| images.first())
        .map(|img| img.url.clone())
}
