/*!
 * Tracing Bootstrap
 * Structured logging for simulation runs using the tracing crate
 *
 * Output goes to stderr so JSON results on stdout stay machine readable.
 */

use tracing::info;
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Environment variable that switches the subscriber to JSON lines
pub const TRACE_JSON_ENV: &str = "SCHEDSIM_TRACE_JSON";

/// Output format of the global subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceFormat {
    Compact,
    Json,
}

impl TraceFormat {
    /// Read [`TRACE_JSON_ENV`]; `1` or `true` selects JSON
    pub fn from_env() -> Self {
        Self::from_flag(std::env::var(TRACE_JSON_ENV).ok().as_deref())
    }

    fn from_flag(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v == "1" || v.eq_ignore_ascii_case("true") => Self::Json,
            _ => Self::Compact,
        }
    }
}

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - SCHEDSIM_TRACE_JSON: Enable JSON output (default: false)
pub fn init_tracing() {
    init_tracing_with(TraceFormat::from_env(), None);
}

/// Initialize with an explicit format and an optional filter override
///
/// A second call is a no-op; the first subscriber stays installed.
pub fn init_tracing_with(format: TraceFormat, filter: Option<&str>) {
    let env_filter = match filter {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = match format {
        TraceFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init(),
        TraceFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init(),
    };

    if installed.is_ok() {
        info!(format = ?format, "Structured tracing initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_flag_parsing() {
        assert_eq!(TraceFormat::from_flag(Some("1")), TraceFormat::Json);
        assert_eq!(TraceFormat::from_flag(Some("TRUE")), TraceFormat::Json);
        assert_eq!(TraceFormat::from_flag(Some("0")), TraceFormat::Compact);
        assert_eq!(TraceFormat::from_flag(None), TraceFormat::Compact);
    }

    #[test]
    fn test_repeated_init_is_harmless() {
        init_tracing_with(TraceFormat::Compact, Some("debug"));
        init_tracing_with(TraceFormat::Json, Some("warn"));
    }
}
