//! Login command implementation.

use anyhow::Result;
use clap::Args;

use super::Reported;
use crate::context::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long)]
    pub password: String,
}

pub async fn run(ctx: &Context, args: LoginArgs) -> Result<()> {
    let Ok(user) = ctx.manager.direct_login(&args.email, &args.password).await else {
        return Err(Reported.into());
    };

    output::success("Logged in successfully");
    println!();
    output::show_user(&user);

    Ok(())
}
