//! Environment and command-line overrides.
//!
//! Every field is optional: an unset flag whose environment variable is also
//! unset leaves the underlying value (file or built-in default) untouched.

use std::path::PathBuf;

use clap::Args;

use crate::config::schema::{LogFormat, ServerConfig};

/// Values read from flags or their environment variables.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigOverrides {
    /// Optional TOML configuration file.
    #[arg(long = "config", env = "DIAG_CONFIG")]
    pub config_file: Option<PathBuf>,

    /// Port to listen on.
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Environment label.
    #[arg(long, env = "APP_ENV")]
    pub environment: Option<String>,

    /// Connection string exposed by `/info`.
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Number of runtime worker threads.
    #[arg(long, env = "WORKER_THREADS")]
    pub worker_threads: Option<usize>,

    /// Log output format (pretty or json).
    #[arg(long, env = "LOG_FORMAT")]
    pub log_format: Option<LogFormat>,
}

impl ConfigOverrides {
    /// Apply the set overrides on top of `config`.
    pub fn apply(self, mut config: ServerConfig) -> ServerConfig {
        if let Some(port) = self.port {
            config.listener.port = port;
        }
        if let Some(environment) = self.environment {
            config.environment = environment;
        }
        if let Some(url) = self.database_url {
            config.secrets.database_url = Some(url);
        }
        if let Some(threads) = self.worker_threads {
            config.runtime.worker_threads = threads;
        }
        if let Some(format) = self.log_format {
            config.observability.log_format = format;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Cli {
        #[command(flatten)]
        overrides: ConfigOverrides,
    }

    #[test]
    fn unset_overrides_change_nothing() {
        let config = ConfigOverrides::default().apply(ServerConfig::default());
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn flags_are_applied() {
        let cli = Cli::try_parse_from([
            "diag-server",
            "--port",
            "8081",
            "--environment",
            "production",
            "--database-url",
            "postgres://prod",
            "--worker-threads",
            "4",
            "--log-format",
            "json",
        ])
        .unwrap();

        let config = cli.overrides.apply(ServerConfig::default());
        assert_eq!(config.listener.port, 8081);
        assert_eq!(config.environment, "production");
        assert_eq!(config.database_url(), "postgres://prod");
        assert_eq!(config.runtime.worker_threads, 4);
        assert_eq!(config.observability.log_format, LogFormat::Json);
    }

    #[test]
    fn non_numeric_port_is_rejected() {
        assert!(Cli::try_parse_from(["diag-server", "--port", "http"]).is_err());
    }
}
