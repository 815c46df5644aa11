//! Logout command implementation.

use anyhow::Result;
use clap::Args;

use gangway_appwrite::FileIdentityStore;
use gangway_core::IdentityStore;

use crate::output;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(_args: LogoutArgs) -> Result<()> {
    // The session handle lives only in the process that logged in; across
    // invocations all we hold is the snapshot.
    let store = FileIdentityStore::at_default_location()?;
    store.clear()?;

    output::success("Logged out");
    Ok(())
}
