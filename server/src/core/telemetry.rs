//! Process-wide logging setup
//!
//! The subscriber can only be installed once per process. Both the server and
//! the one-shot workflow commands call [`init_logging`], so the first call wins
//! and later calls are no-ops.

use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

use super::constants::{APP_NAME_LOWER, ENV_LOG};

static INITIALIZED: OnceLock<()> = OnceLock::new();

/// Install the global tracing subscriber (idempotent)
///
/// Filter comes from `AIPM_LOG`, then `RUST_LOG`, then `info,aipm=info`.
pub fn init_logging() {
    INITIALIZED.get_or_init(|| {
        let default_filter = format!("info,{}=info", APP_NAME_LOWER);

        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default_filter);

        let result = tracing_subscriber::fmt()
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(true)
            .compact()
            .with_env_filter(EnvFilter::new(filter))
            .try_init();

        // Another subscriber (e.g. a test harness) may already own the global slot
        if let Err(e) = result {
            eprintln!("Logging already initialized: {}", e);
        }
    });
}

/// Whether [`init_logging`] has run in this process
pub fn is_initialized() -> bool {
    INITIALIZED.get().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_is_idempotent() {
        init_logging();
        init_logging();
        assert!(is_initialized());
    }
}
