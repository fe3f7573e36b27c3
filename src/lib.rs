//! Spotify Playlist Mixer CLI Library
//!
//! This library implements a single-run playlist mixer for the Spotify Web
//! API: it authorizes the user via the OAuth 2.0 authorization-code grant,
//! lists their playlists, aggregates the tracks of a user-selected subset,
//! shuffles them and writes the result into a freshly created playlist.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints for the local OAuth callback server
//! - `cli` - The interactive `mix` run
//! - `config` - Configuration file loading
//! - `error` - Error types for the whole crate
//! - `mixer` - Paginated fetch and batched write orchestration
//! - `server` - Local HTTP server hosting the OAuth callback
//! - `spotify` - Spotify Web API client and authorization flow
//! - `types` - Data structures and wire types
//! - `utils` - Pure helpers (nonce, selection parsing, shuffle)

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod mixer;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// Prints an informational message with a blue bullet point.
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the
/// program with a non-zero code. Only meant for top-level fatal errors;
/// library code returns [`error::Error`] instead.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
