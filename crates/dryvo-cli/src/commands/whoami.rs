//! Whoami command implementation.

use anyhow::{Result, bail};
use clap::Args;

use crate::context::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct WhoamiArgs {
    /// Print the full user record as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(ctx: &Context, args: WhoamiArgs) -> Result<()> {
    let Some(user) = ctx.manager.fetch_session().await else {
        bail!("No active session. Run 'dryvo login' first.");
    };

    if args.json {
        output::json_pretty(&user.into_value())
    } else {
        output::show_user(&user);
        Ok(())
    }
}
