//! Subcommand implementations.

pub mod list;
pub mod login;
pub mod logout;
pub mod seed;
pub mod whoami;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use gangway_appwrite::AppwriteClient;
use gangway_core::Endpoint;

/// Connection parameters shared by every subcommand.
#[derive(Args, Debug)]
pub struct ConnectionArgs {
    /// Backend endpoint URL
    #[arg(
        long,
        env = "APPWRITE_ENDPOINT",
        default_value = "https://cloud.appwrite.io/v1"
    )]
    pub endpoint: String,

    /// Project id
    #[arg(long, env = "APPWRITE_PROJECT_ID")]
    pub project: String,

    /// API key for server-side operations
    #[arg(long, env = "APPWRITE_API_KEY")]
    pub key: Option<String>,
}

impl ConnectionArgs {
    /// Build a client from these arguments.
    pub fn client(&self) -> Result<Arc<AppwriteClient>> {
        let endpoint = Endpoint::new(&self.endpoint).context("Invalid endpoint URL")?;
        let client = AppwriteClient::new(endpoint, &self.project);
        let client = match &self.key {
            Some(key) => client.with_key(key),
            None => client,
        };
        Ok(Arc::new(client))
    }

    /// Build a client, requiring an API key.
    pub fn admin_client(&self) -> Result<Arc<AppwriteClient>> {
        if self.key.is_none() {
            anyhow::bail!("This command needs an API key (--key or APPWRITE_API_KEY)");
        }
        self.client()
    }
}
