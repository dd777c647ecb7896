use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vcapenv_core::VCAPENV_LOG_VAR;

// Re-export tracing macros for convenience
pub use tracing::{debug, error, info, trace, warn, Level};

/// Directive used when `VCAPENV_LOG` is unset or invalid
pub const DEFAULT_DIRECTIVE: &str = "warn";

/// Initialize the tracing system
///
/// Events go to stderr in a compact, colourless format so that stdout stays
/// free for command output. The filter comes from `VCAPENV_LOG`, falling back
/// to `default_directive`.
pub fn init(default_directive: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .compact()
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter(std::env::var(VCAPENV_LOG_VAR).ok().as_deref(), default_directive))
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Build the event filter from an optional directive string.
///
/// A missing, blank or unparseable directive falls back to `default_directive`,
/// and an invalid default falls back to [`DEFAULT_DIRECTIVE`].
pub fn filter(directive: Option<&str>, default_directive: &str) -> EnvFilter {
    directive
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .or_else(|| EnvFilter::try_new(default_directive).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_uses_directive() {
        assert_eq!(filter(Some("debug"), "warn").to_string(), "debug");
        assert!(filter(Some("vcapenv_catalog=trace"), "warn")
            .to_string()
            .contains("vcapenv_catalog"));
    }

    #[test]
    fn test_filter_falls_back_to_default() {
        assert_eq!(filter(None, "info").to_string(), "info");
        assert_eq!(filter(Some("  "), "info").to_string(), "info");
        assert_eq!(filter(Some("vcapenv=loud"), "info").to_string(), "info");
        assert_eq!(filter(None, "vcapenv=loud").to_string(), DEFAULT_DIRECTIVE);
    }
}
