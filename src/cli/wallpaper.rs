use std::{path::PathBuf, sync::Arc, time::Duration};

use ab_glyph::FontVec;
use indicatif::{ProgressBar, ProgressStyle};
use rand::{SeedableRng, rngs::StdRng};
use reqwest::Client;

use crate::{
    config, error, info,
    management::TokenManager,
    render::{Compositor, DecodeCache, RenderOutcome, RenderSpec, export, loader},
    spotify, success,
    utils::{self, AspectPreset},
    warning,
};

pub async fn wallpaper(
    url: String,
    ratio: AspectPreset,
    output: Option<PathBuf>,
    seed: Option<u64>,
) {
    let Some(playlist_id) = utils::extract_playlist_id(&url) else {
        error!("Invalid Spotify URL. Make sure it is a playlist link.");
    };

    let mut token_mgr = match TokenManager::load().await {
        Ok(manager) => manager,
        Err(e) => {
            error!(
                "Failed to load token. Please run coverwall auth\n Error: {}",
                e
            );
        }
    };
    let token = token_mgr.get_valid_token().await;

    let details = match spotify::playlist::get_playlist(&playlist_id, &token).await {
        Ok(details) => details,
        Err(e) => error!("Failed to fetch playlist details: {}", e),
    };
    info!("Generating wallpaper for playlist {}", details.name);

    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching track covers...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let cover_urls = match spotify::playlist::get_cover_urls(&playlist_id, &token).await {
        Ok(urls) => urls,
        Err(e) => {
            pb.finish_and_clear();
            error!("Failed to fetch playlist tracks: {}", e);
        }
    };

    pb.set_message(format!("Loading {} cover images...", cover_urls.len()));
    let client = Client::new();
    let cache = Arc::new(DecodeCache::new());
    let images = loader::load_images(&client, &cache, &cover_urls).await;
    pb.finish_and_clear();

    if cover_urls.is_empty() {
        warning!("No covers found in this playlist. Is it public and non-empty?");
    } else if images.is_empty() {
        warning!("No usable cover images could be loaded.");
    } else {
        success!("Loaded {} of {} covers", images.len(), cover_urls.len());
    }

    let font = load_caption_font().await;

    let (width, height) = ratio.dimensions();
    let spec = RenderSpec {
        width,
        height,
        caption: &details.name,
        images: &images,
    };
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let compositor = Compositor::new(font);
    let (surface, outcome) = compositor.render(&spec, &mut rng);

    match &outcome {
        RenderOutcome::Populated { tiles } => {
            success!("Composited {} tiles from {} covers", tiles.len(), images.len());
        }
        RenderOutcome::EmptyState => {
            warning!("No usable images found; the wallpaper shows the placeholder message.");
        }
    }

    let path = output
        .unwrap_or_else(|| PathBuf::from(utils::wallpaper_filename(&details.name, ratio)));
    let bytes = match export::encode_png(&surface) {
        Ok(bytes) => bytes,
        Err(e) => error!("Failed to encode wallpaper: {}", e),
    };
    if let Err(e) = async_fs::write(&path, bytes).await {
        error!("Failed to write {}: {}", path.display(), e);
    }

    success!("Wallpaper saved to {}", path.display());
}

async fn load_caption_font() -> Option<FontVec> {
    let Some(path) = config::wallpaper_font() else {
        warning!("WALLPAPER_FONT is not set; rendering without a caption.");
        return None;
    };

    match async_fs::read(&path).await {
        Ok(bytes) => match FontVec::try_from_vec(bytes) {
            Ok(font) => Some(font),
            Err(e) => {
                warning!("Failed to parse font {}: {}", path, e);
                None
            }
        },
        Err(e) => {
            warning!("Failed to read font {}: {}", path, e);
            None
        }
    }
}
