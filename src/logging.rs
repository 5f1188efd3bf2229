//! Logging setup.
//!
//! Compact timestamped logs on stderr, so JSON output on stdout stays
//! machine-readable. Levels come from the `[logging]` settings table;
//! `RUST_LOG` overrides them.
//!
//! # Configuration
//!
//! ```toml
//! [logging]
//! default = "warn"  # quiet by default
//!
//! [logging.modules]
//! doxsearch = "debug"
//! ```
//!
//! # Environment Variable
//!
//! ```bash
//! RUST_LOG=debug doxsearch lookup value
//! RUST_LOG=doxsearch::index=trace doxsearch validate
//! ```

use std::sync::Once;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::LoggingConfig;

static INIT: Once = Once::new();

/// Compact time format: HH:MM:SS.mmm
struct CompactTime;

impl FormatTime for CompactTime {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%H:%M:%S%.3f"))
    }
}

/// Build the filter directive string from config.
///
/// Module names without a path are taken to be modules of this crate, so
/// `loader = "debug"` enables `doxsearch::index::loader`.
pub fn filter_directives(config: &LoggingConfig) -> String {
    let mut modules: Vec<_> = config.modules.iter().collect();
    modules.sort();

    let mut directives = config.default.clone();
    for (module, level) in modules {
        let target = match module.as_str() {
            "loader" | "sections" | "service" | "table" | "writer" => {
                format!("doxsearch::index::{module}")
            }
            other => other.to_string(),
        };
        directives.push_str(&format!(",{target}={level}"));
    }
    directives
}

/// Initialize logging with configuration.
///
/// Call once at startup. Safe to call multiple times (only first call takes effect).
pub fn init_with_config(config: &LoggingConfig) {
    INIT.call_once(|| {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(filter_directives(config))
        };

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_timer(CompactTime)
            .with_level(true)
            .with_filter(filter);

        tracing_subscriber::registry().with(fmt_layer).init();
    });
}

/// Initialize logging with default configuration (`warn`).
pub fn init() {
    init_with_config(&LoggingConfig::default());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_filter_directives_default() {
        assert_eq!(filter_directives(&LoggingConfig::default()), "warn");
    }

    #[test]
    fn test_filter_directives_modules() {
        let config = LoggingConfig {
            default: "info".to_string(),
            modules: HashMap::from([
                ("loader".to_string(), "trace".to_string()),
                ("doxsearch::cli".to_string(), "debug".to_string()),
            ]),
        };
        assert_eq!(
            filter_directives(&config),
            "info,doxsearch::cli=debug,doxsearch::index::loader=trace"
        );
    }
}
