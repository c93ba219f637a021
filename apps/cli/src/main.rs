#![allow(clippy::print_stderr, clippy::print_stdout)]

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;

use crate::handlers::{key, seal, unseal};
use crate::models::args::{Cli, Commands};

use anyhow::Result;
use clap::Parser;
use ironseal_logger::Logger;
use std::path::Path;
use tracing::debug;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = config::load_config(cli.config.as_deref())?;
    if let Some(level) = cli.log_level {
        config.log.level = level;
    }
    let mut options = config.seal;
    if let Some(iterations) = cli.iterations {
        options = options.iterations(iterations);
    }

    let _logger = Logger::init(env!("CARGO_PKG_NAME"), &config.log)?;

    let config_path = cli.config.as_deref().unwrap_or(Path::new(config::DEFAULT_CONFIG_FILE));
    debug!(
        path = %config_path.display(),
        file = config_path.is_file(),
        encryption = %options.encryption.algorithm,
        iterations = options.encryption.iterations,
        "Configuration loaded"
    );

    let credentials = services::input::read_credentials(cli.password_file.as_deref())?;

    match cli.command {
        Commands::Seal { ttl, algorithm, json } => {
            if let Some(ttl) = ttl {
                options = options.ttl(ttl);
            }
            if let Some(algorithm) = algorithm {
                options = options.encryption_algorithm(algorithm);
            }
            seal::seal_json(json, &credentials, &options)?;
        },
        Commands::Unseal { token } => unseal::unseal_token(token, &credentials, &options)?,
        Commands::Key { algorithm, salt, iv } => {
            key::generate(algorithm, salt, iv, &credentials, &options)?;
        },
    }

    Ok(())
}
