//! Client for the external spectrogram rendering service.
//!
//! All signal processing happens remotely: the service receives the raw
//! audio file as a multipart upload and answers with the URL of a rendered
//! spectrogram image. This module is pure transport glue around that
//! contract.

use std::path::Path;

use reqwest::Client;

use crate::{config, types::SpectrogramResponse};

/// Uploads an audio file and returns the service's response.
///
/// The file is sent under the `file` multipart field, which is what the
/// service expects. No retry on failure; the caller surfaces the error to
/// the user.
///
/// # Errors
///
/// Returns an error string when the file cannot be read, the upload fails,
/// or the response body is not the expected JSON shape.
pub async fn upload_audio(client: &Client, path: &Path) -> Result<SpectrogramResponse, String> {
    let bytes = async_fs::read(path).await.map_err(|e| e.to_string())?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "audio".to_string());

    let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
    let form = reqwest::multipart::Form::new().part("file", part);

    let response = client
        .post(&config::spectrogram_apiurl())
        .multipart(form)
        .send()
        .await
        .and_then(|resp| resp.error_for_status())
        .map_err(|e| e.to_string())?;

    response
        .json::<SpectrogramResponse>()
        .await
        .map_err(|e| e.to_string())
}

/// Downloads the rendered spectrogram image.
///
/// # Errors
///
/// Returns an error string on network failures or HTTP error statuses.
pub async fn fetch_image(client: &Client, url: &str) -> Result<Vec<u8>, String> {
    let response = client
        .get(url)
        .send()
        .await
        .and_then(|resp| resp.error_for_status())
        .map_err(|e| e.to_string())?;

    let bytes = response.bytes().await.map_err(|e| e.to_string())?;
    Ok(bytes.to_vec())
}
