//! CLI command definitions and dispatch for the `bookme` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod status;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use bookme_types::config::AppConfig;

/// Listen address for `serve`: CLI flags take precedence over the
/// config.toml `host`/`port` values.
pub fn listen_addr(config: &AppConfig, host: Option<String>, port: Option<u16>) -> String {
    let host = host.unwrap_or_else(|| config.host.clone());
    let port = port.unwrap_or(config.port);
    format!("{host}:{port}")
}

/// Booking scheduler backend: provider profiles, weekly availability
/// templates, and slot bookings.
#[derive(Parser)]
#[command(name = "bookme", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Port to listen on (overrides config.toml).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (overrides config.toml).
        #[arg(long)]
        host: Option<String>,
    },

    /// System status dashboard.
    Status,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listen_addr_defaults_from_config() {
        let config = AppConfig::default();
        assert_eq!(listen_addr(&config, None, None), "127.0.0.1:8080");
    }

    #[test]
    fn test_listen_addr_uses_config_values() {
        let config = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 9000,
            ..Default::default()
        };
        assert_eq!(listen_addr(&config, None, None), "0.0.0.0:9000");
    }

    #[test]
    fn test_listen_addr_cli_flags_override_config() {
        let config = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 9000,
            ..Default::default()
        };
        assert_eq!(
            listen_addr(&config, Some("10.0.0.1".to_string()), Some(3000)),
            "10.0.0.1:3000"
        );
    }
}
