//! Command line entry point

pub mod serve;

use clap::{Parser, Subcommand};

/// Scoped JWT issuer with role policies and rotating signing keys
#[derive(Parser)]
#[command(name = "jwt-issuer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve(serve::ServeArgs),
}
