//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use gangway_appwrite::{AppwriteAuthProvider, FileIdentityStore};
use gangway_core::{AuthProvider, Credentials};

use crate::commands::ConnectionArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Email address to authenticate with
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long)]
    pub password: String,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

pub async fn run(args: LoginArgs) -> Result<()> {
    let client = args.connection.client()?;
    let store = FileIdentityStore::at_default_location()?;
    let auth = AppwriteAuthProvider::new(client, store);

    eprintln!("{}", "Logging in...".dimmed());

    let credentials = Credentials::new(&args.email, &args.password);
    auth.login(credentials).await.context("Failed to login")?;

    let identity = auth.get_identity().await?;

    output::success("Logged in successfully");
    println!();
    output::field("User", &identity.id);
    if let Some(name) = &identity.full_name {
        output::field("Name", name);
    }

    Ok(())
}
