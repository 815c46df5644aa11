//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands;

/// Administration CLI for a gangway-backed admin project.
#[derive(Parser, Debug)]
#[command(name = "gangway")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Provision the demo database, collections and sample documents
    Seed(commands::seed::SeedArgs),

    /// Create a session and store the identity snapshot
    Login(commands::login::LoginArgs),

    /// Clear the stored identity snapshot
    Logout(commands::logout::LogoutArgs),

    /// Display the stored identity
    Whoami(commands::whoami::WhoamiArgs),

    /// List documents in a collection
    List(commands::list::ListArgs),
}
