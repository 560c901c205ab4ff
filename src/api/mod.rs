//! # API Module
//!
//! HTTP endpoints for the local callback server used during authentication.
//!
//! - [`callback`] - Handles OAuth callback requests from Spotify's
//!   authorization server and completes the PKCE flow by exchanging the
//!   authorization code for an access token.
//! - [`health`] - Health check endpoint returning application status and
//!   version information.
//!
//! The endpoints are plain [Axum](https://docs.rs/axum) handlers wired into a
//! router by [`crate::server`]. Authentication state is shared with the CLI
//! flow through an `Arc<Mutex<Option<PkceToken>>>` extension.

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
