//! RGBA drawing surface and its raster primitives

use ab_glyph::{FontVec, PxScale};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};

use crate::render::compositor::Tile;
use crate::render::loader::ImageResource;

/// Soft drop-shadow parameters shared by tile and text drawing.
#[derive(Debug, Clone, Copy)]
pub struct Shadow {
    pub dx: f32,
    pub dy: f32,
    pub blur: f32,
    pub alpha: f32,
}

/// A mutable pixel buffer of fixed dimensions, exclusively owned by one
/// render call.
pub struct CanvasSurface {
    pixels: RgbaImage,
}

impl CanvasSurface {
    /// Creates a surface filled with `background`.
    pub fn new(width: u32, height: u32, background: Rgba<u8>) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(width, height, background),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn into_image(self) -> RgbaImage {
        self.pixels
    }

    /// Draws a rotated square tile of `source`, preceded by its soft shadow.
    ///
    /// The source image is scaled to the tile's square; sampling is
    /// nearest-neighbor. The shadow is a soft-edged copy of the square offset
    /// by the shadow's dx/dy, fading out over its blur radius.
    pub fn draw_tile(&mut self, source: &ImageResource, tile: &Tile, shadow: &Shadow) {
        let half = tile.size / 2.0;
        let cx = tile.x + half;
        let cy = tile.y + half;
        let (sin, cos) = tile.angle.sin_cos();

        // shadow pass
        let scx = cx + shadow.dx;
        let scy = cy + shadow.dy;
        let reach = half * (cos.abs() + sin.abs()) + shadow.blur;
        let (x0, x1, y0, y1) = self.clip_box(scx, scy, reach);
        for py in y0..y1 {
            for px in x0..x1 {
                let dx = px as f32 + 0.5 - scx;
                let dy = py as f32 + 0.5 - scy;
                let lx = dx * cos + dy * sin;
                let ly = -dx * sin + dy * cos;
                let edge = lx.abs().max(ly.abs()) - half;
                if edge >= shadow.blur {
                    continue;
                }
                let cover = if edge <= 0.0 {
                    1.0
                } else {
                    1.0 - edge / shadow.blur
                };
                let a = (shadow.alpha * cover * 255.0).round() as u8;
                self.blend_pixel(px, py, Rgba([0, 0, 0, a]));
            }
        }

        // image pass
        let src = source.pixels();
        let (sw, sh) = (src.width() as f32, src.height() as f32);
        let reach = half * (cos.abs() + sin.abs());
        let (x0, x1, y0, y1) = self.clip_box(cx, cy, reach);
        for py in y0..y1 {
            for px in x0..x1 {
                let dx = px as f32 + 0.5 - cx;
                let dy = py as f32 + 0.5 - cy;
                let lx = dx * cos + dy * sin;
                let ly = -dx * sin + dy * cos;
                if lx.abs() > half || ly.abs() > half {
                    continue;
                }
                let u = ((lx + half) / tile.size * sw).min(sw - 1.0) as u32;
                let v = ((ly + half) / tile.size * sh).min(sh - 1.0) as u32;
                self.blend_pixel(px, py, *src.get_pixel(u, v));
            }
        }
    }

    /// Composites a black linear gradient along the top-left to bottom-right
    /// diagonal. `stops` are (position, alpha) pairs with positions in [0, 1]
    /// in ascending order; alpha is interpolated linearly between stops.
    pub fn apply_diagonal_gradient(&mut self, stops: &[(f32, f32)]) {
        if stops.is_empty() {
            return;
        }
        let w = self.width() as f32;
        let h = self.height() as f32;
        let norm = w * w + h * h;
        for py in 0..self.height() {
            for px in 0..self.width() {
                let t = (px as f32 * w + py as f32 * h) / norm;
                let a = (gradient_alpha(stops, t) * 255.0).round() as u8;
                self.blend_pixel(px, py, Rgba([0, 0, 0, a]));
            }
        }
    }

    /// Draws one line of text centered horizontally, its vertical center
    /// offset by `dy` pixels from the middle of the surface.
    pub fn draw_centered_text(
        &mut self,
        font: &FontVec,
        text: &str,
        size_px: f32,
        color: Rgba<u8>,
        dy: i32,
        shadow: Option<&Shadow>,
    ) {
        if text.is_empty() {
            return;
        }
        let scale = PxScale::from(size_px);
        let (tw, th) = text_size(scale, font, text);
        let x = (self.width() as i32 - tw as i32) / 2;
        let y = (self.height() as i32 - th as i32) / 2 + dy;

        if let Some(shadow) = shadow {
            let mut layer = RgbaImage::new(self.width(), self.height());
            let a = (shadow.alpha * 255.0).round() as u8;
            draw_text_mut(
                &mut layer,
                Rgba([0, 0, 0, a]),
                x + shadow.dx.round() as i32,
                y + shadow.dy.round() as i32,
                scale,
                font,
                text,
            );
            let blurred = imageproc::filter::gaussian_blur_f32(&layer, shadow.blur / 2.0);
            self.composite_layer(&blurred);
        }

        let mut layer = RgbaImage::new(self.width(), self.height());
        draw_text_mut(&mut layer, color, x, y, scale, font, text);
        self.composite_layer(&layer);
    }

    // Text goes through a scratch layer so glyph coverage lands in the
    // layer's alpha channel and composites source-over in one pass.
    fn composite_layer(&mut self, layer: &RgbaImage) {
        for (x, y, p) in layer.enumerate_pixels() {
            if p.0[3] > 0 {
                self.blend_pixel(x, y, *p);
            }
        }
    }

    // Source-over blend with straight alpha.
    fn blend_pixel(&mut self, x: u32, y: u32, color: Rgba<u8>) {
        let Rgba([sr, sg, sb, sa]) = color;
        if sa == 0 {
            return;
        }
        let dst = self.pixels.get_pixel_mut(x, y);
        let a = sa as f32 / 255.0;
        for (d, s) in dst.0.iter_mut().take(3).zip([sr, sg, sb]) {
            *d = (s as f32 * a + *d as f32 * (1.0 - a)).round() as u8;
        }
        let da = dst.0[3] as f32 / 255.0;
        dst.0[3] = ((a + da * (1.0 - a)) * 255.0).round() as u8;
    }

    // Pixel bounds of a square area around (cx, cy), clipped to the surface.
    fn clip_box(&self, cx: f32, cy: f32, reach: f32) -> (u32, u32, u32, u32) {
        let x0 = (cx - reach).floor().max(0.0) as u32;
        let y0 = (cy - reach).floor().max(0.0) as u32;
        let x1 = ((cx + reach).ceil().max(0.0) as u32).min(self.width());
        let y1 = ((cy + reach).ceil().max(0.0) as u32).min(self.height());
        (x0, x1, y0, y1)
    }
}

fn gradient_alpha(stops: &[(f32, f32)], t: f32) -> f32 {
    let (first_t, first_a) = stops[0];
    if t <= first_t {
        return first_a;
    }
    for pair in stops.windows(2) {
        let (t0, a0) = pair[0];
        let (t1, a1) = pair[1];
        if t <= t1 {
            if t1 <= t0 {
                return a1;
            }
            return a0 + (a1 - a0) * (t - t0) / (t1 - t0);
        }
    }
    stops[stops.len() - 1].1
}
