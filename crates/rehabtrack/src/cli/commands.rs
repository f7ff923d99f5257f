//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::config::Config;

/// Serve command arguments.
#[derive(Debug, Args)]
pub struct ServeCommand {
    /// Address to bind to (overrides `server.host`)
    #[arg(long)]
    pub host: Option<IpAddr>,

    /// Port to listen on (overrides `server.port`)
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl ServeCommand {
    /// Apply the command-line overrides to a loaded configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show configuration file path
    Path,

    /// Validate configuration file
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use super::*;

    #[test]
    fn test_apply_overrides() {
        let mut config = Config::default();
        ServeCommand {
            host: Some(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
            port: Some(9000),
        }
        .apply(&mut config);

        assert_eq!(config.server.host, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_apply_without_overrides() {
        let mut config = Config::default();
        ServeCommand {
            host: None,
            port: None,
        }
        .apply(&mut config);

        assert_eq!(config, Config::default());
    }
}
