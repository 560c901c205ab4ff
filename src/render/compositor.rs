//! Random collage layout, gradient overlay, and caption

use std::sync::Arc;

use ab_glyph::FontVec;
use image::Rgba;
use rand::{Rng, seq::SliceRandom};

use crate::render::canvas::{CanvasSurface, Shadow};
use crate::render::loader::ImageResource;

/// Fixed dark background every render starts from.
pub const BACKGROUND: Rgba<u8> = Rgba([15, 15, 15, 255]);

/// Smallest tile edge length in pixels.
pub const MIN_TILE_EDGE: f32 = 80.0;

/// Largest tile edge length in pixels.
pub const MAX_TILE_EDGE: f32 = 200.0;

/// Maximum tilt of a tile in either direction (15 degrees).
pub const MAX_TILE_TILT: f32 = std::f32::consts::PI / 12.0;

const TILE_SHADOW: Shadow = Shadow {
    dx: 3.0,
    dy: 3.0,
    blur: 8.0,
    alpha: 0.5,
};

const CAPTION_SIZE: f32 = 72.0;
const CAPTION_COLOR: Rgba<u8> = Rgba([255, 255, 255, 230]);
const CAPTION_SHADOW: Shadow = Shadow {
    dx: 5.0,
    dy: 5.0,
    blur: 15.0,
    alpha: 0.8,
};

const EMPTY_STATE_COLOR: Rgba<u8> = Rgba([255, 255, 255, 204]);

// Darkening overlay along the diagonal: lighter in the middle, darker at
// the corners, keeps the caption legible over busy tiles.
const GRADIENT_STOPS: [(f32, f32); 3] = [(0.0, 0.4), (0.5, 0.2), (1.0, 0.4)];

/// Immutable input to one render call.
pub struct RenderSpec<'a> {
    pub width: u32,
    pub height: u32,
    pub caption: &'a str,
    pub images: &'a [Arc<ImageResource>],
}

/// One placement decision: which cover lands where, how big, how tilted.
///
/// Tiles are regenerated fresh on every render and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    /// Index into the render spec's image list.
    pub image: usize,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub angle: f32,
}

/// What a render call produced.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome {
    /// No usable images: the surface carries the fixed placeholder message.
    EmptyState,
    /// A collage was drawn; tiles are listed in draw order, later tiles
    /// occlude earlier ones.
    Populated { tiles: Vec<Tile> },
}

/// Number of tiles for a canvas, tied to its area so larger canvases get
/// proportionally more tiles instead of larger gaps.
pub fn tile_count(width: u32, height: u32) -> usize {
    let area = width as f64 * height as f64;
    (area / (MIN_TILE_EDGE as f64 * MIN_TILE_EDGE as f64 * 0.5)).ceil() as usize
}

pub struct Compositor {
    font: Option<FontVec>,
}

impl Compositor {
    /// A compositor drawing captions with `font`; without one, text layers
    /// are skipped and only the collage is drawn.
    pub fn new(font: Option<FontVec>) -> Self {
        Self { font }
    }

    /// Renders `spec` onto a fresh surface.
    ///
    /// The surface always comes back at exactly `spec.width` x `spec.height`,
    /// reset to the fixed background first. With no images the empty-state
    /// message is drawn and [`RenderOutcome::EmptyState`] returned. Otherwise
    /// the image list is shuffled once (unbiased permutation) and cycled
    /// across the tile slots, each tile drawn at a random size, position, and
    /// tilt; the gradient overlay and the caption go on top.
    ///
    /// All randomness flows through `rng`: rendering twice with equally
    /// seeded generators reproduces the exact layout, while an OS-seeded
    /// generator gives intentional variation between renders.
    pub fn render<R: Rng>(
        &self,
        spec: &RenderSpec<'_>,
        rng: &mut R,
    ) -> (CanvasSurface, RenderOutcome) {
        let mut surface = CanvasSurface::new(spec.width, spec.height, BACKGROUND);

        if spec.images.is_empty() {
            self.draw_empty_state(&mut surface);
            return (surface, RenderOutcome::EmptyState);
        }

        let mut order: Vec<usize> = (0..spec.images.len()).collect();
        order.shuffle(rng);

        let w = spec.width as f32;
        let h = spec.height as f32;
        // keep tiles drawable on canvases smaller than the nominal edge range
        let max_edge = MAX_TILE_EDGE.min(w).min(h);
        let min_edge = MIN_TILE_EDGE.min(max_edge);

        let count = tile_count(spec.width, spec.height);
        let mut tiles = Vec::with_capacity(count);
        for slot in 0..count {
            let image = order[slot % order.len()];
            let size = rng.random_range(min_edge..=max_edge);
            let tile = Tile {
                image,
                x: rng.random_range(0.0..=(w - size)),
                y: rng.random_range(0.0..=(h - size)),
                size,
                angle: rng.random_range(-MAX_TILE_TILT..=MAX_TILE_TILT),
            };
            surface.draw_tile(&spec.images[image], &tile, &TILE_SHADOW);
            tiles.push(tile);
        }

        surface.apply_diagonal_gradient(&GRADIENT_STOPS);

        if !spec.caption.is_empty() {
            if let Some(font) = &self.font {
                surface.draw_centered_text(
                    font,
                    spec.caption,
                    CAPTION_SIZE,
                    CAPTION_COLOR,
                    0,
                    Some(&CAPTION_SHADOW),
                );
            }
        }

        (surface, RenderOutcome::Populated { tiles })
    }

    fn draw_empty_state(&self, surface: &mut CanvasSurface) {
        let Some(font) = &self.font else {
            return;
        };
        surface.draw_centered_text(font, "No covers found.", 30.0, EMPTY_STATE_COLOR, -20, None);
        surface.draw_centered_text(
            font,
            "Try another playlist.",
            20.0,
            EMPTY_STATE_COLOR,
            20,
            None,
        );
    }
}
