use std::sync::Arc;

use image::{Rgba, RgbaImage};
use rand::{SeedableRng, rngs::StdRng};

use coverwall::render::compositor::{
    self, BACKGROUND, Compositor, MAX_TILE_EDGE, MAX_TILE_TILT, MIN_TILE_EDGE, RenderOutcome,
    RenderSpec,
};
use coverwall::render::{ImageResource, export};

// Helper function to create a solid-color decoded image
fn solid_image(width: u32, height: u32, rgba: [u8; 4]) -> Arc<ImageResource> {
    let pixels = RgbaImage::from_pixel(width, height, Rgba(rgba));
    Arc::new(ImageResource::from_pixels(pixels))
}

fn render_spec<'a>(
    width: u32,
    height: u32,
    caption: &'a str,
    images: &'a [Arc<ImageResource>],
) -> RenderSpec<'a> {
    RenderSpec {
        width,
        height,
        caption,
        images,
    }
}

#[test]
fn test_surface_matches_requested_dimensions() {
    let compositor = Compositor::new(None);
    let images = vec![
        solid_image(64, 64, [200, 40, 40, 255]),
        solid_image(64, 64, [40, 200, 40, 255]),
        solid_image(64, 64, [40, 40, 200, 255]),
    ];

    for (count, width, height) in [(0, 640, 480), (3, 640, 480), (3, 1080, 2160)] {
        let mut rng = StdRng::seed_from_u64(1);
        let spec = render_spec(width, height, "Chill", &images[..count]);
        let (surface, _) = compositor.render(&spec, &mut rng);
        assert_eq!(surface.width(), width);
        assert_eq!(surface.height(), height);
    }
}

#[test]
fn test_empty_image_list_yields_empty_state() {
    let compositor = Compositor::new(None);
    let mut rng = StdRng::seed_from_u64(1);
    let spec = render_spec(640, 480, "Chill", &[]);
    let (surface, outcome) = compositor.render(&spec, &mut rng);

    assert_eq!(outcome, RenderOutcome::EmptyState);

    // Without a font the empty state is the untouched background
    assert!(
        surface
            .image()
            .pixels()
            .all(|p| *p == BACKGROUND)
    );

    // The caption value does not change the outcome
    let mut rng = StdRng::seed_from_u64(1);
    let spec = render_spec(640, 480, "", &[]);
    let (_, outcome) = compositor.render(&spec, &mut rng);
    assert_eq!(outcome, RenderOutcome::EmptyState);
}

#[test]
fn test_tile_count_follows_area_law() {
    // ceil(W * H / (80^2 * 0.5))
    assert_eq!(compositor::tile_count(1920, 1080), 648);
    assert_eq!(compositor::tile_count(1080, 2160), 729);
    assert_eq!(compositor::tile_count(640, 480), 96);

    let compositor = Compositor::new(None);

    // Tile count is independent of how many images are supplied
    for image_count in [1, 3, 7] {
        let images: Vec<_> = (0..image_count)
            .map(|i| solid_image(32, 32, [i as u8 * 30, 90, 120, 255]))
            .collect();
        let mut rng = StdRng::seed_from_u64(42);
        let spec = render_spec(640, 480, "", &images);
        let (_, outcome) = compositor.render(&spec, &mut rng);
        match outcome {
            RenderOutcome::Populated { tiles } => assert_eq!(tiles.len(), 96),
            RenderOutcome::EmptyState => panic!("expected a populated render"),
        }
    }
}

#[test]
fn test_tile_bounds_and_sampling_ranges() {
    let compositor = Compositor::new(None);
    let images = vec![
        solid_image(64, 64, [200, 40, 40, 255]),
        solid_image(48, 48, [40, 200, 40, 255]),
        solid_image(96, 96, [40, 40, 200, 255]),
    ];

    // Repeated sampling across several seeds
    for seed in 0..5 {
        let mut rng = StdRng::seed_from_u64(seed);
        let spec = render_spec(640, 480, "", &images);
        let (_, outcome) = compositor.render(&spec, &mut rng);
        let RenderOutcome::Populated { tiles } = outcome else {
            panic!("expected a populated render");
        };

        for tile in &tiles {
            assert!(tile.size >= MIN_TILE_EDGE && tile.size <= MAX_TILE_EDGE);
            assert!(tile.angle >= -MAX_TILE_TILT && tile.angle <= MAX_TILE_TILT);

            // Bounding box stays within the size-adjusted bound
            // (small tolerance for f32 rounding in x + size)
            assert!(tile.x >= 0.0 && tile.x + tile.size <= 640.0 + 1e-3);
            assert!(tile.y >= 0.0 && tile.y + tile.size <= 480.0 + 1e-3);

            assert!(tile.image < images.len());
        }
    }
}

#[test]
fn test_single_image_is_reused_cyclically() {
    let compositor = Compositor::new(None);
    let images = vec![solid_image(64, 64, [220, 120, 20, 255])];

    let mut rng = StdRng::seed_from_u64(3);
    let spec = render_spec(1920, 1080, "", &images);
    let (_, outcome) = compositor.render(&spec, &mut rng);

    let RenderOutcome::Populated { tiles } = outcome else {
        panic!("expected a populated render");
    };
    assert_eq!(tiles.len(), 648);
    assert!(tiles.iter().all(|tile| tile.image == 0));
}

#[test]
fn test_seeded_rendering_is_reproducible() {
    let compositor = Compositor::new(None);
    let images = vec![
        solid_image(64, 64, [200, 40, 40, 255]),
        solid_image(64, 64, [40, 200, 40, 255]),
    ];
    let spec = render_spec(640, 480, "", &images);

    let mut rng_a = StdRng::seed_from_u64(99);
    let mut rng_b = StdRng::seed_from_u64(99);
    let (surface_a, outcome_a) = compositor.render(&spec, &mut rng_a);
    let (surface_b, outcome_b) = compositor.render(&spec, &mut rng_b);

    assert_eq!(outcome_a, outcome_b);
    assert_eq!(surface_a.image(), surface_b.image());

    // A different seed produces a different layout
    let mut rng_c = StdRng::seed_from_u64(100);
    let (_, outcome_c) = compositor.render(&spec, &mut rng_c);
    assert_ne!(outcome_a, outcome_c);
}

#[test]
fn test_collage_scenario_produces_nonempty_png() {
    let compositor = Compositor::new(None);
    let images = vec![
        solid_image(64, 64, [200, 40, 40, 255]),
        solid_image(64, 64, [40, 200, 40, 255]),
        solid_image(64, 64, [40, 40, 200, 255]),
    ];

    let mut rng = StdRng::seed_from_u64(7);
    let spec = render_spec(1920, 1080, "Chill", &images);
    let (surface, outcome) = compositor.render(&spec, &mut rng);

    let RenderOutcome::Populated { tiles } = outcome else {
        panic!("expected a populated render");
    };
    assert_eq!(tiles.len(), 648);

    // The collage actually drew something over the background
    assert!(surface.image().pixels().any(|p| *p != BACKGROUND));

    let bytes = export::encode_png(&surface).expect("png encoding failed");
    assert!(!bytes.is_empty());

    // PNG signature
    assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
}
