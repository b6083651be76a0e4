//! When the posting pipeline runs.

use chrono::{DateTime, Days, Duration, Local, NaiveDateTime, NaiveTime, TimeZone};
use herald_error::ScheduleError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Run times for the posting pipeline.
///
/// Configured as a tagged table:
///
/// ```toml
/// [schedule.trigger]
/// type = "daily"
/// at = "14:00"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, derive_more::Display)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ScheduleType {
    /// Fixed interval in seconds, measured from the end of the previous run
    #[display("every {}s", seconds)]
    Interval {
        /// Interval duration in seconds
        seconds: u64,
    },

    /// Once a day at a local wall-clock time
    #[display("daily at {}", at)]
    Daily {
        /// Local time as "HH:MM"
        at: String,
    },

    /// Cron expression (7 fields: sec min hour day month weekday year)
    ///
    /// Example: "0 0 14 * * * *" = 2 PM daily
    #[display("cron '{}'", expression)]
    Cron {
        /// Cron expression string
        expression: String,
    },
}

impl Default for ScheduleType {
    fn default() -> Self {
        Self::Interval { seconds: 60 }
    }
}

impl ScheduleType {
    /// Check that the schedule can produce run times.
    ///
    /// # Errors
    ///
    /// Returns error for an unparseable daily time or cron expression.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        match self {
            Self::Interval { .. } => Ok(()),
            Self::Daily { at } => parse_time(at).map(|_| ()),
            Self::Cron { expression } => cron::Schedule::from_str(expression)
                .map(|_| ())
                .map_err(|e| ScheduleError::new(format!("invalid cron expression '{}': {}", expression, e))),
        }
    }

    /// Next run time strictly after `reference`.
    ///
    /// An interval of zero seconds returns `reference` itself. Returns
    /// `None` when the schedule does not parse or is exhausted.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{Local, TimeZone};
    /// use herald_bot::ScheduleType;
    ///
    /// let start = Local.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
    /// let next = ScheduleType::Interval { seconds: 60 }.next_after(start).unwrap();
    /// assert_eq!((next - start).num_seconds(), 60);
    /// ```
    pub fn next_after(&self, reference: DateTime<Local>) -> Option<DateTime<Local>> {
        match self {
            Self::Interval { seconds } => {
                let seconds = i64::try_from(*seconds).ok()?;
                reference.checked_add_signed(Duration::try_seconds(seconds)?)
            }
            Self::Daily { at } => {
                let time = parse_time(at).ok()?;
                let today = reference.date_naive().and_time(time);
                let candidate = resolve_local(today)?;
                if candidate > reference {
                    Some(candidate)
                } else {
                    let tomorrow = reference
                        .date_naive()
                        .checked_add_days(Days::new(1))?
                        .and_time(time);
                    resolve_local(tomorrow)
                }
            }
            Self::Cron { expression } => cron::Schedule::from_str(expression)
                .ok()?
                .after(&reference)
                .next(),
        }
    }
}

fn parse_time(at: &str) -> Result<NaiveTime, ScheduleError> {
    NaiveTime::parse_from_str(at.trim(), "%H:%M")
        .map_err(|e| ScheduleError::new(format!("invalid daily time '{}': {}", at, e)))
}

/// Local instant for a wall-clock time, stepping past a DST gap.
fn resolve_local(naive: NaiveDateTime) -> Option<DateTime<Local>> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .or_else(|| Local.from_local_datetime(&(naive + Duration::hours(1))).earliest())
}
