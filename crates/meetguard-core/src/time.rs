//! Time types for calendar events.
//!
//! This module provides [`EventTime`] for representing event start/end times
//! (which may be either a specific datetime or an all-day date), and
//! [`TimeWindow`] for defining the query range of a check.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Literal format accepted for command-line dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format used for a meeting boundary in the digest.
const SHORT_DATETIME_FORMAT: &str = "%m-%d %H:%M";

/// Format used for the window bounds in log lines.
const LOG_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Errors produced while building dates and windows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeError {
    /// The input is not a `YYYY-MM-DD` date.
    #[error("not a valid date: {input:?} (expected YYYY-MM-DD)")]
    InvalidDate { input: String },

    /// Local midnight does not exist on this date (DST gap).
    #[error("local midnight does not exist on {date}")]
    NonexistentLocalTime { date: NaiveDate },

    /// The window end is not after its start.
    #[error("time window is empty: {start} is not before {end}")]
    EmptyWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

/// Parses a literal `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> Result<NaiveDate, TimeError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|_| TimeError::InvalidDate {
        input: input.to_string(),
    })
}

/// Represents the time of a calendar event.
///
/// Datetimes keep the offset the provider returned them in, so formatting
/// shows the event's own wall-clock time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum EventTime {
    /// A specific, timezone-aware datetime.
    DateTime(DateTime<FixedOffset>),
    /// An all-day event date (no specific time).
    AllDay(NaiveDate),
}

impl EventTime {
    /// Creates a new `EventTime::DateTime` from a datetime in any timezone.
    pub fn from_datetime<Tz: TimeZone>(dt: DateTime<Tz>) -> Self {
        Self::DateTime(dt.fixed_offset())
    }

    /// Creates a new `EventTime::AllDay` from a date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self::AllDay(date)
    }

    /// Formats as `MM-DD HH:MM` (or `MM-DD` for all-day events).
    pub fn format_short(&self) -> String {
        match self {
            Self::DateTime(dt) => dt.format(SHORT_DATETIME_FORMAT).to_string(),
            Self::AllDay(date) => date.format("%m-%d").to_string(),
        }
    }
}

/// A time window for querying calendar events.
///
/// Represents a half-open interval `[start, end)` in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Start of the window (inclusive).
    pub start: DateTime<Utc>,
    /// End of the window (exclusive).
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Creates a new time window, rejecting empty or inverted ranges.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, TimeError> {
        if start >= end {
            return Err(TimeError::EmptyWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// Builds the window for a check run in the given timezone.
    ///
    /// A missing `begin` defaults to 00:00 of `today`, a missing `end` to
    /// 23:59 of `today`. An explicit date means 00:00 of that date.
    pub fn for_dates<Tz: TimeZone>(
        begin: Option<NaiveDate>,
        end: Option<NaiveDate>,
        today: NaiveDate,
        tz: &Tz,
    ) -> Result<Self, TimeError> {
        let start = local_to_utc(begin.unwrap_or(today), NaiveTime::MIN, tz)?;
        let end = match end {
            Some(date) => local_to_utc(date, NaiveTime::MIN, tz)?,
            None => local_to_utc(today, end_of_day(), tz)?,
        };
        Self::new(start, end)
    }

    /// Returns the window rendered in the given timezone for log lines.
    pub fn display_in<Tz>(&self, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        format!(
            "{} - {}",
            self.start.with_timezone(tz).format(LOG_DATETIME_FORMAT),
            self.end.with_timezone(tz).format(LOG_DATETIME_FORMAT)
        )
    }
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 0).unwrap_or(NaiveTime::MIN)
}

fn local_to_utc<Tz: TimeZone>(
    date: NaiveDate,
    time: NaiveTime,
    tz: &Tz,
) -> Result<DateTime<Utc>, TimeError> {
    tz.from_local_datetime(&date.and_time(time))
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or(TimeError::NonexistentLocalTime { date })
}
