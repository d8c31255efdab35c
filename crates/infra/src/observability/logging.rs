//! Tracing subscriber setup
//!
//! Filter precedence: `SUITEGATE_LOG`, then `RUST_LOG`, then the configured
//! filter, then `suitegate=info`. Installing twice is a no-op.

use suitegate_domain::LoggingConfig;
use tracing::warn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when neither config nor environment sets one
pub const DEFAULT_FILTER: &str = "suitegate=info";
/// Filter override, checked before `RUST_LOG`
pub const ENV_LOG: &str = "SUITEGATE_LOG";

/// Install the global subscriber.
///
/// Returns `false` when a subscriber was already installed.
pub fn init_logging(config: &LoggingConfig) -> bool {
    let directive = resolve_filter(config, |key| std::env::var(key).ok());
    let (filter, rejected) = match EnvFilter::try_new(&directive) {
        Ok(filter) => (filter, None),
        Err(e) => (EnvFilter::new(DEFAULT_FILTER), Some(e)),
    };

    let registry = tracing_subscriber::registry().with(filter);
    let installed = if config.json {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer()).try_init()
    }
    .is_ok();

    if let (true, Some(error)) = (installed, rejected) {
        warn!(%directive, %error, "Invalid log filter, using {}", DEFAULT_FILTER);
    }
    installed
}

/// Pick the filter directive from the environment and `config`
pub fn resolve_filter<E>(config: &LoggingConfig, env: E) -> String
where
    E: Fn(&str) -> Option<String>,
{
    [ENV_LOG, "RUST_LOG"]
        .iter()
        .find_map(|key| env(key).filter(|value| !value.trim().is_empty()))
        .or_else(|| config.filter.clone().filter(|value| !value.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(filter: Option<&str>) -> LoggingConfig {
        LoggingConfig { filter: filter.map(str::to_string), json: false }
    }

    #[test]
    fn test_filter_precedence() {
        let both = |key: &str| match key {
            ENV_LOG => Some("suitegate_core=trace".to_string()),
            "RUST_LOG" => Some("warn".to_string()),
            _ => None,
        };
        assert_eq!(resolve_filter(&config(Some("debug")), both), "suitegate_core=trace");

        let rust_log = |key: &str| (key == "RUST_LOG").then(|| "warn".to_string());
        assert_eq!(resolve_filter(&config(Some("debug")), rust_log), "warn");

        assert_eq!(resolve_filter(&config(Some("debug")), |_: &str| None), "debug");
        assert_eq!(resolve_filter(&config(None), |_: &str| None), DEFAULT_FILTER);
    }

    #[test]
    fn test_second_init_is_noop() {
        let _ = init_logging(&config(None));
        assert!(!init_logging(&config(None)));
    }
}
