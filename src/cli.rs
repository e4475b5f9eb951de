//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "user-service")]
#[command(about = "HTTP API for user rows stored in Cassandra", long_about = None)]
pub struct Cli {
    /// TOML configuration file; built-in defaults are used when omitted.
    #[arg(short, long, env = "USER_SERVICE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Listen port (default 3000).
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_arguments() {
        let cli = Cli::try_parse_from([
            "user-service",
            "--config",
            "/etc/user-service.toml",
            "--port",
            "8080",
        ])
        .unwrap();
        assert_eq!(cli.port, Some(8080));
        assert_eq!(cli.config, Some(PathBuf::from("/etc/user-service.toml")));
    }

    #[test]
    fn test_rejects_non_numeric_port() {
        assert!(Cli::try_parse_from(["user-service", "--port", "http"]).is_err());
    }
}
