//! # Readstash
//!
//! A terminal-first read-it-later client.
//!
//! ## Architecture
//!
//! Readstash is a thin client over an article-analysis backend:
//!
//! ```text
//! CLI/TUI → Flow → Api → backend
//!              ↘ Poll ↗
//! ```
//!
//! - [`api`]: HTTP client for the items backend (create, fetch, list)
//! - [`poll`]: Cancellable status watch that re-fetches an item until the
//!   backend finishes analyzing it
//! - [`flow`]: Status-driven navigation decisions and item resolution
//! - [`tui`]: Terminal user interface built with ratatui
//!
//! ## Quick Start
//!
//! ```bash
//! # Save an article and watch it being analyzed
//! readstash save https://example.com/essay
//!
//! # Check on it later
//! readstash status
//!
//! # See the preview once it is ready
//! readstash show
//!
//! # Today's reads and the full library
//! readstash today
//! readstash library
//!
//! # Launch the TUI
//! readstash tui
//! ```
//!
//! ## Modules
//!
//! - [`app`]: Application context and error types
//! - [`cli`]: Command-line interface definitions
//! - [`domain`]: Core domain models (Item, ItemStatus, processing steps)
//! - [`session`]: Process-local active-item binding
//! - [`config`]: Configuration loading

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the API
/// client, the session and the polling settings.
pub mod app;

/// HTTP client for the items backend.
///
/// - [`ItemsApi`](api::ItemsApi): Async trait over the backend operations
/// - [`HttpItemsApi`](api::HttpItemsApi): reqwest-based implementation
/// - [`Envelope`](api::Envelope): The backend's success/error response shape
pub mod api;

/// Command-line interface using clap.
///
/// Defines the CLI structure and subcommands:
/// - `save <url> [--no-wait]` - Save an article
/// - `status [id]` - Check processing status
/// - `show [id]` - Show a processed item's preview
/// - `today` / `library` - List items
/// - `tui` - Launch the TUI
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/readstash/config.toml`: backend base URL,
/// auth token, polling intervals.
pub mod config;

/// Core domain models.
///
/// - [`Item`](domain::Item): A saved article and its analysis results
/// - [`ItemStatus`](domain::ItemStatus): The processing lifecycle
/// - [`processing_steps`](domain::processing_steps): The checklist shown
///   while an item is analyzed
pub mod domain;

/// Status-driven navigation.
///
/// - [`decide`](flow::decide): Maps an observed status to stay / preview /
///   halt
/// - [`resolve_item_id`](flow::resolve_item_id): Explicit id or session
///   fallback
pub mod flow;

/// Status polling.
///
/// - [`spawn_status_watch`](poll::spawn_status_watch): Spawns a cancellable
///   task that re-fetches one item until a terminal status
/// - [`StatusWatch`](poll::StatusWatch): Handle for consuming snapshots
pub mod poll;

/// Process-local session state.
///
/// Remembers the item the user is currently working with so commands can
/// omit the id, and whether the once-per-session user sync ran.
pub mod session;

/// Terminal user interface.
///
/// Screens follow the reading journey: save form, processing checklist,
/// preview card, reading view, reflection prompt, plus the today and
/// library lists.
///
/// Keybindings: j/k navigate, Enter select, r/s finish reading,
/// o opens in browser, q quits.
pub mod tui;
