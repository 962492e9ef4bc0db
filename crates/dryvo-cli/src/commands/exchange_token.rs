//! Exchange-token command implementation.

use anyhow::{Result, bail};
use clap::Args;

use super::Reported;
use crate::context::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct ExchangeTokenArgs {
    /// One-time token received from the login redirect
    pub token: String,
}

pub async fn run(ctx: &Context, args: ExchangeTokenArgs) -> Result<()> {
    match ctx.manager.exchange_token(&args.token).await {
        Ok(Some(user)) => {
            output::success("Logged in successfully");
            println!();
            output::show_user(&user);
            Ok(())
        }
        Ok(None) => bail!("Token exchanged, but the new session could not be verified"),
        Err(_) => Err(Reported.into()),
    }
}
