//! Playlist Wallpaper Generator Library
//!
//! This library provides functionality for turning the cover art of a Spotify
//! playlist into a desktop or mobile wallpaper. It includes modules for API
//! communication, CLI operations, configuration management, and the rendering
//! pipeline that composites cover images into the final collage.
//!
//! # Modules
//!
//! - `api` - HTTP API endpoints for the local callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `management` - Token caching and refresh
//! - `render` - Cover loading, collage compositing, and PNG export
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spectrogram` - Client for the external spectrogram rendering service
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use coverwall::{config, cli};
//!
//! #[tokio::main]
//! async fn main() -> coverwall::Res<()> {
//!     config::load_env().await?;
//!     // Use CLI functions...
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod management;
pub mod render;
pub mod server;
pub mod spectrogram;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern throughout the application
/// using a boxed dynamic error trait object, keeping Send + Sync bounds
/// for async contexts.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// Accepts the same arguments as `println!`. Used for general status updates
/// throughout the application.
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Accepts the same arguments as `println!`. Used to confirm that an
/// operation completed successfully.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Accepts the same arguments as `println!`. Only for unrecoverable errors:
/// the process terminates with exit code 1 immediately after printing.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Accepts the same arguments as `println!`. Used for recoverable issues the
/// user should notice, like a cover image that could not be loaded.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
