//! # CLI Argument Definitions
//!
//! Command-line structure of the `ironseal` binary, built with `clap` derive.

use clap::{Parser, Subcommand};
use ironseal::Algorithm;
use std::path::PathBuf;

/// The main CLI structure parsing command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "ironseal")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Seal and unseal Fe26.2 tokens")]
#[command(after_help = "The password is read from IRONSEAL_PASSWORD unless --password-file is given.")]
pub struct Cli {
    /// TOML configuration file (defaults to ./ironseal.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Read the password from this file (a trailing newline is ignored)
    #[arg(long, global = true)]
    pub password_file: Option<PathBuf>,

    /// PBKDF2 iterations for both keys
    #[arg(long, global = true)]
    pub iterations: Option<u32>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Seal a JSON document into a token
    Seal {
        /// Token lifetime in milliseconds (0 never expires)
        #[arg(long)]
        ttl: Option<u64>,

        /// Encryption algorithm (aes-256-cbc, aes-128-ctr)
        #[arg(short, long, value_parser = parse_algorithm)]
        algorithm: Option<Algorithm>,

        /// JSON payload. Read from stdin when omitted.
        json: Option<String>,
    },
    /// Verify a token and print its JSON payload
    Unseal {
        /// Sealed token. Read from stdin when omitted.
        token: Option<String>,
    },
    /// Derive a key the way seal does and print it with its salt and IV
    Key {
        /// Algorithm to derive for (aes-256-cbc, aes-128-ctr, sha256)
        #[arg(short, long, value_parser = parse_algorithm)]
        algorithm: Algorithm,

        /// Hex salt. A random one is generated when omitted.
        #[arg(long)]
        salt: Option<String>,

        /// IV as hex. A random one is generated when omitted.
        #[arg(long)]
        iv: Option<String>,
    },
}

fn parse_algorithm(value: &str) -> Result<Algorithm, ironseal::SealError> {
    Algorithm::try_from(value)
}
