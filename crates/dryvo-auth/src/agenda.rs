//! Per-day cache of approved lessons.
//!
//! Lessons are fetched one day at a time, as the calendar selects days, and
//! merged into a map keyed by date. A day means the calendar day in the
//! agenda's time zone (local time unless chosen otherwise); the query sent to
//! the server carries its bounds in UTC.

use std::collections::BTreeMap;

use chrono::{DateTime, Local, NaiveDate, NaiveTime, SecondsFormat, TimeDelta, TimeZone, Utc};
use serde_json::Value;
use tracing::{debug, instrument};

use dryvo_core::{Result, Transport};

/// Returns the lessons query covering `date` in `tz`, from its first to its
/// last millisecond.
pub fn lessons_path<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> String {
    let start = start_of_day(date, tz);
    let next = match date.succ_opt() {
        Some(next) => start_of_day(next, tz),
        None => start + TimeDelta::days(1),
    };
    let end = next - TimeDelta::milliseconds(1);

    format!(
        "/lessons/?is_approved=true&date=ge:{}&date=le:{}",
        start.to_rfc3339_opts(SecondsFormat::Millis, true),
        end.to_rfc3339_opts(SecondsFormat::Millis, true),
    )
}

fn start_of_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    // Midnight may fall in a DST gap; take the first hour that exists.
    (0..3)
        .find_map(|hour| {
            tz.from_local_datetime(&(midnight + TimeDelta::hours(hour)))
                .earliest()
        })
        .map(|start| start.with_timezone(&Utc))
        .unwrap_or_else(|| midnight.and_utc())
}

/// Approved lessons grouped by day.
#[derive(Debug, Clone)]
pub struct Agenda<Tz: TimeZone = Local> {
    tz: Tz,
    items: BTreeMap<NaiveDate, Vec<Value>>,
}

impl Agenda {
    /// An empty agenda whose days follow the local time zone.
    pub fn new() -> Self {
        Self::in_timezone(Local)
    }
}

impl Default for Agenda {
    fn default() -> Self {
        Self::new()
    }
}

impl<Tz: TimeZone> Agenda<Tz> {
    /// An empty agenda whose days follow `tz`.
    pub fn in_timezone(tz: Tz) -> Self {
        Self {
            tz,
            items: BTreeMap::new(),
        }
    }

    /// Fetch the lessons of `date` and cache them.
    ///
    /// Returns `None` and leaves the agenda unchanged when the response has
    /// no `data` list.
    ///
    /// # Errors
    ///
    /// Returns the transport error when the request fails.
    #[instrument(skip(self, transport))]
    pub async fn load_day(
        &mut self,
        transport: &dyn Transport,
        date: NaiveDate,
    ) -> Result<Option<&[Value]>> {
        let mut body = transport.get(&lessons_path(date, &self.tz)).await?;
        let Some(Value::Array(lessons)) = body.get_mut("data").map(Value::take) else {
            debug!("Response carried no lesson data");
            return Ok(None);
        };

        debug!(count = lessons.len(), "Lessons loaded");
        self.items.insert(date, lessons);
        Ok(self.items.get(&date).map(Vec::as_slice))
    }

    /// Returns the cached lessons of `date`.
    pub fn items(&self, date: NaiveDate) -> Option<&[Value]> {
        self.items.get(&date).map(Vec::as_slice)
    }

    /// Returns every cached day with its lessons, keyed `YYYY-MM-DD`.
    pub fn days(&self) -> impl Iterator<Item = (String, &[Value])> {
        self.items
            .iter()
            .map(|(date, lessons)| (date.format("%Y-%m-%d").to_string(), lessons.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn pi_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2019, 3, 14).unwrap()
    }

    #[test]
    fn lessons_path_spans_the_whole_day() {
        assert_eq!(
            lessons_path(pi_day(), &Utc),
            "/lessons/?is_approved=true&date=ge:2019-03-14T00:00:00.000Z&date=le:2019-03-14T23:59:59.999Z"
        );
    }

    #[test]
    fn lessons_path_uses_the_zone_day() {
        let jerusalem = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(
            lessons_path(pi_day(), &jerusalem),
            "/lessons/?is_approved=true&date=ge:2019-03-13T22:00:00.000Z&date=le:2019-03-14T21:59:59.999Z"
        );
    }

    #[test]
    fn empty_agenda_has_no_items() {
        let agenda = Agenda::in_timezone(Utc);
        assert!(agenda.items(pi_day()).is_none());
        assert_eq!(agenda.days().count(), 0);
    }
}
