//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use dryvo_core::SessionUser;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print the well-known fields of a user record.
pub fn show_user(user: &SessionUser) {
    if let Some(id) = user.id() {
        field("ID", &id.to_string());
    }
    field("Name", user.name().unwrap_or("-"));
    if let Some(email) = user.email() {
        field("Email", email);
    }
}
