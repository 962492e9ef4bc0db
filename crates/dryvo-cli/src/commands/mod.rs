//! Subcommand implementations.

mod exchange_token;
mod facebook_url;
mod login;
mod logout;
mod register;
mod schedule;
mod whoami;

use std::fmt;

use anyhow::Result;
use clap::Subcommand;

use crate::cli::GlobalArgs;
use crate::context::Context;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in with email and password
    Login(login::LoginArgs),

    /// Create an account and log in
    Register(register::RegisterArgs),

    /// Trade a one-time exchange token for a session
    ExchangeToken(exchange_token::ExchangeTokenArgs),

    /// Display the user of the stored session
    Whoami(whoami::WhoamiArgs),

    /// Remove the stored session
    Logout(logout::LogoutArgs),

    /// Print the Facebook login link
    FacebookUrl(facebook_url::FacebookUrlArgs),

    /// List approved lessons for a day
    Schedule(schedule::ScheduleArgs),
}

/// A failure whose message the error channel has already printed.
///
/// `main` exits non-zero on it without printing anything further.
#[derive(Debug)]
pub struct Reported;

impl fmt::Display for Reported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("request failed")
    }
}

impl std::error::Error for Reported {}

pub async fn handle(global: GlobalArgs, command: Command) -> Result<()> {
    let ctx = Context::new(&global)?;
    match command {
        Command::Login(args) => login::run(&ctx, args).await,
        Command::Register(args) => register::run(&ctx, args).await,
        Command::ExchangeToken(args) => exchange_token::run(&ctx, args).await,
        Command::Whoami(args) => whoami::run(&ctx, args).await,
        Command::Logout(args) => logout::run(&ctx, args).await,
        Command::FacebookUrl(args) => facebook_url::run(&ctx, args),
        Command::Schedule(args) => schedule::run(&ctx, args).await,
    }
}
