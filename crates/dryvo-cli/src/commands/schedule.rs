//! Schedule command implementation.

use anyhow::{Context as _, Result};
use chrono::{Local, NaiveDate, TimeZone, Utc};
use clap::Args;
use colored::Colorize;
use serde_json::Value;

use dryvo_auth::Agenda;

use crate::context::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct ScheduleArgs {
    /// Day to list, as YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Treat days as UTC days instead of local days
    #[arg(long)]
    pub utc: bool,

    /// Print lessons as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(ctx: &Context, args: ScheduleArgs) -> Result<()> {
    let lessons = if args.utc {
        let date = args.date.unwrap_or_else(|| Utc::now().date_naive());
        load_lessons(ctx, Agenda::in_timezone(Utc), date).await?
    } else {
        let date = args.date.unwrap_or_else(|| Local::now().date_naive());
        load_lessons(ctx, Agenda::new(), date).await?
    };

    if args.json {
        return output::json_pretty(&lessons);
    }

    if lessons.is_empty() {
        println!("{}", "No lessons".dimmed());
        return Ok(());
    }

    for lesson in &lessons {
        output::field(&lesson_time(lesson), &lesson_summary(lesson));
    }

    Ok(())
}

async fn load_lessons<Tz: TimeZone>(
    ctx: &Context,
    mut agenda: Agenda<Tz>,
    date: NaiveDate,
) -> Result<Vec<Value>> {
    let lessons = agenda
        .load_day(ctx.client.as_ref(), date)
        .await
        .context("Failed to fetch lessons")?;
    Ok(lessons.map(<[Value]>::to_vec).unwrap_or_default())
}

fn lesson_time(lesson: &Value) -> String {
    lesson["date"]
        .as_str()
        .and_then(|d| d.get(11..16))
        .unwrap_or("--:--")
        .to_string()
}

fn lesson_summary(lesson: &Value) -> String {
    let student = lesson["student"]["user"]["name"]
        .as_str()
        .or_else(|| lesson["student"]["name"].as_str())
        .unwrap_or("unknown student");
    let meetup = lesson["meetup_place"]["name"].as_str().unwrap_or("not set");
    let dropoff = lesson["dropoff_place"]["name"].as_str().unwrap_or("not set");
    format!("{} (meetup: {}, dropoff: {})", student, meetup, dropoff)
}
