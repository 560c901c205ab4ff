use coverwall::types::AlbumImage;
use coverwall::utils::*;

// Helper function to create a test album image
fn create_test_image(url: &str, width: Option<u32>) -> AlbumImage {
    AlbumImage {
        url: url.to_string(),
        width,
        height: width,
    }
}

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let verifier = "test_verifier_123";
    let challenge = generate_code_challenge(verifier);

    // Should not be empty
    assert!(!challenge.is_empty());

    // Should be deterministic - same input produces same output
    let challenge2 = generate_code_challenge(verifier);
    assert_eq!(challenge, challenge2);

    // Different input should produce different output
    let challenge3 = generate_code_challenge("different_verifier");
    assert_ne!(challenge, challenge3);

    // Should be base64-encoded (URL-safe, no padding)
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
}

#[test]
fn test_extract_playlist_id() {
    // Plain playlist URL
    let id = extract_playlist_id("https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M");
    assert_eq!(id.as_deref(), Some("37i9dQZF1DXcBWIGoYBM5M"));

    // Query parameters are cut off at the first non-alphanumeric character
    let id = extract_playlist_id("https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M?si=abc123");
    assert_eq!(id.as_deref(), Some("37i9dQZF1DXcBWIGoYBM5M"));

    // Track links are not playlists
    assert_eq!(
        extract_playlist_id("https://open.spotify.com/track/11dFghVXANMlKmJXsNCbNl"),
        None
    );

    // Arbitrary text
    assert_eq!(extract_playlist_id("not a url at all"), None);

    // Marker with no id behind it
    assert_eq!(extract_playlist_id("https://open.spotify.com/playlist/"), None);
}

#[test]
fn test_wallpaper_filename() {
    assert_eq!(
        wallpaper_filename("My Mix", AspectPreset::Desktop),
        "My_Mix_wallpaper_desktop.png"
    );
    assert_eq!(
        wallpaper_filename("My Mix", AspectPreset::Mobile),
        "My_Mix_wallpaper_mobile.png"
    );

    // Every whitespace character is replaced individually
    assert_eq!(
        wallpaper_filename("Late  Night\tDrive", AspectPreset::Desktop),
        "Late__Night_Drive_wallpaper_desktop.png"
    );

    // Captions without whitespace pass through unchanged
    assert_eq!(
        wallpaper_filename("Focus", AspectPreset::Mobile),
        "Focus_wallpaper_mobile.png"
    );

    // An empty caption still yields a valid filename
    assert_eq!(
        wallpaper_filename("", AspectPreset::Desktop),
        "_wallpaper_desktop.png"
    );
}

#[test]
fn test_parse_aspect_preset_valid_inputs() {
    assert_eq!(parse_aspect_preset("desktop").unwrap(), AspectPreset::Desktop);
    assert_eq!(parse_aspect_preset("mobile").unwrap(), AspectPreset::Mobile);

    // Case insensitivity and surrounding whitespace
    assert_eq!(parse_aspect_preset("DESKTOP").unwrap(), AspectPreset::Desktop);
    assert_eq!(parse_aspect_preset(" mobile ").unwrap(), AspectPreset::Mobile);
}

#[test]
fn test_parse_aspect_preset_invalid_inputs() {
    // Empty string
    let result = parse_aspect_preset("");
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("cannot be empty"));

    // Unknown preset
    let result = parse_aspect_preset("tablet");
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("invalid value 'tablet'"));
}

#[test]
fn test_aspect_preset_dimensions() {
    assert_eq!(AspectPreset::Desktop.dimensions(), (1920, 1080));
    assert_eq!(AspectPreset::Mobile.dimensions(), (1080, 2160));
}

#[test]
fn test_aspect_preset_display() {
    assert_eq!(AspectPreset::Desktop.to_string(), "desktop");
    assert_eq!(AspectPreset::Mobile.to_string(), "mobile");
}

#[test]
fn test_select_cover_url_prefers_medium_renditions() {
    // The first 300 px or 640 px rendition wins
    let images = vec![
        create_test_image("https://img/large", Some(640)),
        create_test_image("https://img/medium", Some(300)),
        create_test_image("https://img/small", Some(64)),
    ];
    assert_eq!(
        select_cover_url(&images).as_deref(),
        Some("https://img/large")
    );

    // A 300 px image is accepted when no 640 px image precedes it
    let images = vec![
        create_test_image("https://img/tiny", Some(64)),
        create_test_image("https://img/medium", Some(300)),
    ];
    assert_eq!(
        select_cover_url(&images).as_deref(),
        Some("https://img/medium")
    );
}

#[test]
fn test_select_cover_url_fallback() {
    // No preferred width: first image is used
    let images = vec![
        create_test_image("https://img/a", Some(1000)),
        create_test_image("https://img/b", None),
    ];
    assert_eq!(select_cover_url(&images).as_deref(), Some("https://img/a"));

    // No images at all
    assert_eq!(select_cover_url(&[]), None);
}
