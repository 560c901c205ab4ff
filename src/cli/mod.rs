//! # CLI Module
//!
//! The command-line interface layer for coverwall. It implements the
//! user-facing commands and coordinates between the Spotify API layer, the
//! rendering pipeline, and user interaction.
//!
//! ## Commands
//!
//! - [`auth`] - Initiates the Spotify OAuth authentication flow with PKCE
//!   security
//! - [`wallpaper`] - Resolves a playlist URL into cover images and renders
//!   the collage wallpaper to a PNG file
//! - [`spectrogram`] - Forwards an audio file to the external spectrogram
//!   service and saves the returned image
//!
//! ## Error Handling Philosophy
//!
//! Commands never panic on expected failures: upstream API errors, missing
//! tokens, and unreadable files become colored messages via the
//! `info!`/`success!`/`warning!`/`error!` macros. Partial failures (a cover
//! that cannot be decoded) degrade gracefully and let the operation
//! continue; only unrecoverable conditions terminate the process.
//!
//! Long-running steps show `indicatif` spinners so the user can tell a slow
//! network from a hang.

mod auth;
mod spectrogram;
mod wallpaper;

pub use auth::auth;
pub use spectrogram::spectrogram;
pub use wallpaper::wallpaper;
