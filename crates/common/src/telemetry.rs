//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

/// Install a global fmt subscriber filtered by `directives`.
///
/// `RUST_LOG`, when set, takes precedence. Returns `false` if a global
/// subscriber was already installed (tests call this repeatedly).
pub fn init_tracing(directives: &str) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}
