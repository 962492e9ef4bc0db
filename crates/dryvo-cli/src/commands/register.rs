//! Register command implementation.

use anyhow::{Context as _, Result};
use clap::Args;
use serde_json::{Map, Value};

use super::Reported;
use crate::context::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long)]
    pub password: String,

    /// Display name
    #[arg(long)]
    pub name: String,

    /// Area the student or teacher works in
    #[arg(long)]
    pub area: String,

    /// Extra registration field as key=value (repeatable)
    #[arg(long = "field", value_name = "KEY=VALUE")]
    pub fields: Vec<String>,
}

pub async fn run(ctx: &Context, args: RegisterArgs) -> Result<()> {
    let fields = registration_fields(&args)?;

    let Ok(user) = ctx.manager.register(&fields).await else {
        return Err(Reported.into());
    };

    output::success("Registered successfully");
    println!();
    output::show_user(&user);

    Ok(())
}

fn registration_fields(args: &RegisterArgs) -> Result<Value> {
    let mut fields = Map::new();
    fields.insert("email".into(), args.email.clone().into());
    fields.insert("password".into(), args.password.clone().into());
    fields.insert("name".into(), args.name.clone().into());
    fields.insert("area".into(), args.area.clone().into());

    for field in &args.fields {
        let (key, value) = field
            .split_once('=')
            .with_context(|| format!("Field '{}' is not KEY=VALUE", field))?;
        fields.insert(key.to_string(), value.to_string().into());
    }

    Ok(Value::Object(fields))
}
