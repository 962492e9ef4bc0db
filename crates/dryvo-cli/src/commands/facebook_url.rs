//! Facebook login link command implementation.

use anyhow::Result;
use clap::Args;

use crate::context::Context;

#[derive(Args, Debug)]
pub struct FacebookUrlArgs {
    /// Link token tying the Facebook account to an existing user
    #[arg(long)]
    pub token: Option<String>,
}

pub fn run(ctx: &Context, args: FacebookUrlArgs) -> Result<()> {
    ctx.manager.open_external_auth_provider(args.token.as_deref());
    Ok(())
}
