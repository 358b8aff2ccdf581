// --- File: crates/slotify_common/src/logging.rs ---
//! Logging utilities for the Slotify application.
//!
//! Provides a single place to initialize the tracing subscriber so every
//! binary and test harness logs the same way.

use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber with the default log level (INFO).
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific log level.
///
/// Honors `RUST_LOG` via `EnvFilter`; the given level is the floor for the
/// `slotify` crates. Safe to call more than once (later calls are no-ops).
pub fn init_with_level(level: Level) {
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("slotify={}", level).parse().unwrap());

    // try_init: a global subscriber may already be set (tests, embedding)
    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}
