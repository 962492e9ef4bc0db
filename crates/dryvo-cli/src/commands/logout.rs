//! Logout command implementation.

use anyhow::Result;
use clap::Args;

use crate::context::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(ctx: &Context, _args: LogoutArgs) -> Result<()> {
    ctx.manager.logout().await;
    output::success("Logged out");
    Ok(())
}
