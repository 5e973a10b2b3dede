//! Folio CLI Library
//!
//! Command implementations and the JSON API server for the Folio content
//! layer. The binary entry point lives in `main.rs`.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (list, show, check, new, serve)
//! - [`server`] - JSON API over a loaded content repository
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use folio::cmd;
//!
//! let config = cmd::load_config(Path::new("folio.toml"), None).unwrap();
//! cmd::check::run(&config, false).unwrap();
//! ```

pub mod cmd;
pub mod server;

// Re-export core types for convenience
pub use folio_core::{Config, ContentItem};
pub use folio_store::ContentRepository;

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
