use std::{path::PathBuf, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;

use crate::{error, info, spectrogram as spectro, success};

pub async fn spectrogram(file: PathBuf, output: Option<PathBuf>) {
    if !file.is_file() {
        error!("Audio file {} does not exist.", file.display());
    }

    info!("Rendering spectrogram for {}", file.display());

    let pb = ProgressBar::new_spinner();
    pb.set_message("Uploading audio...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let client = Client::new();
    let response = match spectro::upload_audio(&client, &file).await {
        Ok(response) => response,
        Err(e) => {
            pb.finish_and_clear();
            error!("Spectrogram service rejected the upload: {}", e);
        }
    };

    pb.set_message("Downloading spectrogram image...");
    let bytes = match spectro::fetch_image(&client, &response.spectrogram_url).await {
        Ok(bytes) => bytes,
        Err(e) => {
            pb.finish_and_clear();
            error!("Failed to download spectrogram image: {}", e);
        }
    };
    pb.finish_and_clear();

    let path = output.unwrap_or_else(|| file.with_extension("spectrogram.png"));
    if let Err(e) = async_fs::write(&path, bytes).await {
        error!("Failed to write {}: {}", path.display(), e);
    }

    success!("Spectrogram saved to {}", path.display());
}
