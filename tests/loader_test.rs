use std::io::Cursor;
use std::sync::Arc;

use image::{ImageFormat, Rgba, RgbaImage};
use reqwest::Client;

use coverwall::render::loader::{self, DecodeCache, ImageResource};

// Helper function to encode a solid-color image as PNG bytes
fn png_bytes(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let pixels = RgbaImage::from_pixel(width, height, Rgba(rgba));
    let mut bytes = Vec::new();
    pixels
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("png encoding failed");
    bytes
}

#[test]
fn test_image_resource_from_bytes() {
    let bytes = png_bytes(24, 16, [120, 40, 200, 255]);
    let resource = ImageResource::from_bytes(&bytes).expect("decode failed");

    assert_eq!(resource.width(), 24);
    assert_eq!(resource.height(), 16);
    assert_eq!(resource.pixels().get_pixel(0, 0), &Rgba([120, 40, 200, 255]));
}

#[test]
fn test_image_resource_rejects_garbage() {
    let result = ImageResource::from_bytes(b"definitely not an image");
    assert!(result.is_err());
}

#[test]
fn test_decode_cache_is_append_only() {
    let cache = DecodeCache::new();
    assert!(cache.is_empty());
    assert!(cache.get("https://img/a").is_none());

    let first = Arc::new(ImageResource::from_pixels(RgbaImage::from_pixel(
        8,
        8,
        Rgba([1, 2, 3, 255]),
    )));
    let second = Arc::new(ImageResource::from_pixels(RgbaImage::from_pixel(
        8,
        8,
        Rgba([9, 9, 9, 255]),
    )));

    let stored = cache.insert("https://img/a".to_string(), Arc::clone(&first));
    assert!(Arc::ptr_eq(&stored, &first));
    assert_eq!(cache.len(), 1);

    // Racing a second insert for the same URL keeps the first resource
    let stored = cache.insert("https://img/a".to_string(), second);
    assert!(Arc::ptr_eq(&stored, &first));
    assert_eq!(cache.len(), 1);

    let hit = cache.get("https://img/a").expect("expected a cache hit");
    assert!(Arc::ptr_eq(&hit, &first));
}

#[tokio::test]
async fn test_load_images_with_no_urls() {
    let client = Client::new();
    let cache = Arc::new(DecodeCache::new());

    let images = loader::load_images(&client, &cache, &[]).await;
    assert!(images.is_empty());
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_load_images_tolerates_unreachable_urls() {
    let client = Client::new();
    let cache = Arc::new(DecodeCache::new());

    // Nothing listens on this port; the failure is logged and filtered out
    let urls = vec!["http://127.0.0.1:1/cover.jpg".to_string()];
    let images = loader::load_images(&client, &cache, &urls).await;
    assert!(images.is_empty());
    assert!(cache.is_empty());
}
