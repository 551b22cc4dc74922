//! Console configuration from CLI flags and environment.

use std::time::Duration;

use clap::{Args, Parser};

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

#[derive(Debug, Parser)]
#[command(
    name = "catalog-console",
    about = "Product catalog administration console",
    long_about = None
)]
pub struct Config {
    /// Base URL of the products API
    #[arg(long, env = "CATALOG_API_URL", default_value = "http://localhost:3000")]
    pub api_url: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "CATALOG_API_TIMEOUT_SECONDS", default_value_t = 10)]
    pub timeout_seconds: u64,

    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "catalog-console",
            "--api-url",
            "http://example.test/",
            "--timeout-seconds",
            "3",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(config.api_url, "http://example.test/");
        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert_eq!(config.logging.log_format, LogFormat::Json);
    }

    #[test]
    fn clap_definition_is_consistent() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
