//! Logging Config

use clap::{Args, ValueEnum};

/// Targets that are only interesting at `warn` and above.
const QUIET_TARGETS: [&str; 5] = ["sqlx", "h2", "hyper", "tonic", "opentelemetry"];

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable single-line logs.
    Compact,

    /// One JSON object per event, with the span stack.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Base log level or filter directives
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

impl LoggingConfig {
    /// Filter directives: the configured level, with chatty dependencies
    /// held at `warn` unless the level names them itself.
    #[must_use]
    pub fn filter_directives(&self) -> String {
        QUIET_TARGETS
            .iter()
            .filter(|target| !self.log_level.contains(*target))
            .fold(self.log_level.clone(), |mut directives, target| {
                directives.push(',');
                directives.push_str(target);
                directives.push_str("=warn");
                directives
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logging(level: &str) -> LoggingConfig {
        LoggingConfig {
            log_level: level.to_string(),
            log_format: LogFormat::Compact,
        }
    }

    #[test]
    fn quiet_targets_are_appended() {
        assert_eq!(
            logging("debug").filter_directives(),
            "debug,sqlx=warn,h2=warn,hyper=warn,tonic=warn,opentelemetry=warn"
        );
    }

    #[test]
    fn explicit_directives_win() {
        let directives = logging("info,sqlx=debug").filter_directives();

        assert!(directives.starts_with("info,sqlx=debug,"));
        assert!(!directives.contains("sqlx=warn"));
    }
}
