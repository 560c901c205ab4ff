//! # Spotify Integration Module
//!
//! Interface to the Spotify Web API covering the two concerns the wallpaper
//! generator needs: obtaining an access token and resolving a playlist into a
//! display name plus the album-cover URLs of its tracks.
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (OAuth 2.0 PKCE)
//!     └── Playlist Operations (details, paginated track covers)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! [`auth`] - Implements the OAuth 2.0 PKCE (Proof Key for Code Exchange)
//! flow: cryptographically random code verifier, local callback server,
//! browser launch, token exchange, and token refresh. No client secret is
//! stored or required.
//!
//! [`playlist`] - Fetches playlist metadata and walks the paginated tracks
//! endpoint to collect cover image URLs. Handles Spotify's rate limiting by
//! honoring `Retry-After` on 429 responses and retrying 502 responses after
//! a fixed delay.
//!
//! ## Error Handling
//!
//! Transport functions return `Result<_, reqwest::Error>`; callers in the CLI
//! layer translate failures into user-facing messages. No retries happen
//! beyond the rate-limit handling described above.

pub mod auth;
pub mod playlist;
