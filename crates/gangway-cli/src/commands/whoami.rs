//! Whoami command implementation.

use anyhow::Result;
use clap::Args;

use gangway_appwrite::FileIdentityStore;
use gangway_core::IdentityStore;

use crate::output;

#[derive(Args, Debug)]
pub struct WhoamiArgs {
    /// Print the full snapshot as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: WhoamiArgs) -> Result<()> {
    let store = FileIdentityStore::at_default_location()?;

    let Some(identity) = store.load()? else {
        anyhow::bail!("Not logged in");
    };

    if args.json {
        output::json_pretty(&identity)?;
        return Ok(());
    }

    output::field("User", &identity.id);
    if let Some(name) = &identity.full_name {
        output::field("Name", name);
    }

    Ok(())
}
