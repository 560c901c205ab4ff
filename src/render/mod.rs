//! # Render Module
//!
//! The wallpaper rendering pipeline: cover images come in as URLs and leave
//! as PNG bytes.
//!
//! - [`loader`] - Fetches and decodes cover images in parallel, tolerating
//!   individual failures, with an explicit per-URL decode cache.
//! - [`canvas`] - The mutable RGBA drawing surface and its primitives
//!   (rotated shadowed tiles, gradient overlay, centered text).
//! - [`compositor`] - Places randomized cover tiles across the surface and
//!   applies the gradient and caption layers.
//! - [`export`] - Serializes a finished surface to PNG bytes and derives the
//!   download filename.
//!
//! Randomness is injected: the compositor samples every placement from a
//! caller-provided `rand::Rng`, so a seeded generator reproduces a layout
//! exactly while the CLI default is OS-seeded variation.

pub mod canvas;
pub mod compositor;
pub mod export;
pub mod loader;

pub use canvas::CanvasSurface;
pub use compositor::{Compositor, RenderOutcome, RenderSpec, Tile};
pub use loader::{DecodeCache, ImageResource};
