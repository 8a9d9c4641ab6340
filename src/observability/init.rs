//! Tracing initialization and subscriber setup.
//!
//! Installs a `tracing-subscriber` registry with an [`EnvFilter`] and a compact
//! `fmt` layer writing to stderr, so stdout stays free for command output.

use crate::Config;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when neither `RUST_LOG` nor `trace_level` is set.
const DEFAULT_LEVEL: &str = "info";

/// Resolves the filter directive to install.
///
/// # Resolution Order
///
/// 1. `rust_log` (the `RUST_LOG` environment variable) if set and non-blank
/// 2. `config.trace_level` if set
/// 3. `"info"`
fn resolve_directive(config: &Config, rust_log: Option<String>) -> String {
    rust_log
        .filter(|v| !v.trim().is_empty())
        .or_else(|| config.trace_level.clone())
        .unwrap_or_else(|| DEFAULT_LEVEL.to_string())
}

/// Initializes the global tracing subscriber.
///
/// Idempotent: only the first call installs a subscriber; later calls (and
/// calls made after a test harness installed its own) are ignored. An invalid
/// directive falls back to `"info"`.
///
/// # Example
///
/// ```rust
/// use tableview::observability::init_tracing;
/// use tableview::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let directive = resolve_directive(config, std::env::var("RUST_LOG").ok());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    let subscriber = tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact(),
    );

    let _ = subscriber.try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_overrides_config() {
        let config = Config {
            trace_level: Some("warn".to_string()),
            ..Config::default()
        };
        assert_eq!(resolve_directive(&config, Some("tableview=trace".into())), "tableview=trace");
        assert_eq!(resolve_directive(&config, Some("  ".into())), "warn");
        assert_eq!(resolve_directive(&config, None), "warn");
    }

    #[test]
    fn falls_back_to_info() {
        assert_eq!(resolve_directive(&Config::default(), None), "info");
    }

    #[test]
    fn repeated_init_is_harmless() {
        init_tracing(&Config::default());
        init_tracing(&Config::default());
    }
}
