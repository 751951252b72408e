//! Homepage CLI Library
//!
//! Command implementations for the `homepage` binary, exposed as a library so
//! they can be tested and reused.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (build, check, init)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use homepage::cmd;
//!
//! let settings = cmd::load_settings(Path::new("homepage.toml"), None).unwrap();
//! cmd::build::run(settings, None, None, None).unwrap();
//! ```

pub mod cmd;

// Re-export core types for convenience
pub use homepage_core::{PageContext, Settings};
pub use homepage_generator::{BuildStats, Builder};

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
