//! PNG serialization of a finished wallpaper surface

use std::io::Cursor;

use image::ImageFormat;

use crate::render::canvas::CanvasSurface;

/// Encodes the surface as lossless PNG bytes.
///
/// Purely local: no server round-trip is involved. Writing the bytes to disk
/// (or wherever the host wants them) is the caller's side effect; the
/// filename convention lives in [`crate::utils::wallpaper_filename`].
///
/// # Errors
///
/// Returns an error if PNG encoding fails.
pub fn encode_png(surface: &CanvasSurface) -> Result<Vec<u8>, image::ImageError> {
    let mut bytes = Vec::new();
    surface
        .image()
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}
