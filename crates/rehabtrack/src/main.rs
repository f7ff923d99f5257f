//! `rehabtrack` - CLI for the rehabilitation tracker
//!
//! This binary serves the web application and inspects its configuration.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use rehabtrack::cli::{Cli, Command, ConfigCommand, ServeCommand};
use rehabtrack::{init_logging, server, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    match cli.command {
        Command::Serve(serve_cmd) => handle_serve(cli.config, &serve_cmd).await,
        Command::Config(config_cmd) => handle_config(cli.config, config_cmd),
    }
}

async fn handle_serve(config_path: Option<PathBuf>, cmd: &ServeCommand) -> anyhow::Result<()> {
    let mut config = Config::load_from(config_path).context("failed to load configuration")?;
    cmd.apply(&mut config);
    config.validate()?;

    server::serve(config).await?;
    Ok(())
}

fn handle_config(config_path: Option<PathBuf>, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config =
                Config::load_from(config_path).context("failed to load configuration")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                print_config(&config);
            }
        }
        ConfigCommand::Path => {
            let path = config_path.unwrap_or_else(Config::default_config_path);
            println!("{}", path.display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or(config_path)
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            if !path.exists() {
                println!("File not found; built-in defaults apply.");
            }
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => anyhow::bail!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}

fn print_config(config: &Config) {
    println!("Current Configuration");
    println!("=====================");
    println!();
    println!("[Server]");
    println!("  Address:            {}", config.bind_addr());
    println!();
    println!("[Session]");
    println!("  Cookie name:        {}", config.session.cookie_name);
    match config.idle_timeout() {
        Some(_) => println!(
            "  Idle timeout (min): {}",
            config.session.idle_timeout_minutes
        ),
        None => println!("  Idle timeout (min): never"),
    }
    println!(
        "  Prune interval (s): {}",
        config.session.prune_interval_seconds
    );
    println!();
    println!("[UI]");
    println!("  Title:              {}", config.ui.title);
    println!("  Footer:             {}", config.ui.footer);
}
