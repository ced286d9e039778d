//! CLI module for the project directory
//!
//! - `serve`: run the HTTP API
//! - `check-seed`: validate a seed file without starting the server

pub mod check_seed;
pub mod serve;

use clap::{Parser, Subcommand};

/// Project Directory - ranked project listings and kudos over HTTP
#[derive(Parser)]
#[command(name = "project-directory")]
#[command(version, author, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server
    Serve(serve::ServeArgs),

    /// Validate a seed file and print a summary
    CheckSeed(check_seed::CheckSeedArgs),
}
