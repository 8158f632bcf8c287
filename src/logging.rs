use std::io::IsTerminal as _;

use once_cell::sync::OnceCell;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;
use tracing_subscriber::EnvFilter;

static INIT: OnceCell<()> = OnceCell::new();

fn resolve_env_filter() -> EnvFilter {
    if let Ok(level) = std::env::var("SPENDLENS_LOG") {
        if let Ok(filter) = EnvFilter::try_new(level) {
            return filter;
        }
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Initialize logging once per process.
///
/// Environment variables:
/// - `SPENDLENS_LOG`: level/filter override (`info`, `spendlens=debug`, ...).
/// - `RUST_LOG`: fallback filter when `SPENDLENS_LOG` is unset or invalid.
///
/// Logs go to stderr so stdout only carries report output.
pub fn init() {
    INIT.get_or_init(|| {
        let console_layer = tracing_subscriber::fmt::layer()
            .compact()
            .with_target(false)
            .with_ansi(std::io::stderr().is_terminal())
            .with_writer(std::io::stderr);
        let _ = tracing_subscriber::registry()
            .with(resolve_env_filter())
            .with(console_layer)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
        assert!(INIT.get().is_some());
    }
}
