//! Command-line interface definition.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use chrono::{NaiveDate, TimeZone};
use clap::Parser;
use meetguard_core::{TimeError, TimeWindow, parse_date};
use meetguard_notify::{Mailboxes, parse_recipients};

/// meetguard - flag meetings no one from the company is signed up for
///
/// Lists the events of a calendar within a time window and mails a reminder
/// when some of them have no attendee from the company domain.
#[derive(Debug, Parser)]
#[command(name = "meetguard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Calendar identifier (e.g. "primary" or an address)
    #[arg(short = 'c', long, alias = "calendarId")]
    pub calendar_id: String,

    /// Start of the window, YYYY-MM-DD (default: today 00:00)
    #[arg(short = 'b', long, alias = "beginDate", value_parser = parse_date_arg)]
    pub begin_date: Option<NaiveDate>,

    /// End of the window, YYYY-MM-DD, exclusive (default: today 23:59)
    #[arg(short = 'e', long, alias = "endDate", value_parser = parse_date_arg)]
    pub end_date: Option<NaiveDate>,

    /// Maximum number of events to check (at least 1)
    #[arg(short = 'm', long, alias = "maxResults", default_value = "10")]
    pub max_results: NonZeroUsize,

    /// Reminder recipients, comma-separated
    #[arg(short = 'M', long, alias = "mailRecipient", value_parser = parse_recipient_arg)]
    pub mail_recipient: Mailboxes,

    /// Path to configuration file
    #[arg(long, env = "MEETGUARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Mirror the log to stderr
    #[arg(long, short = 'v')]
    pub debug: bool,
}

fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_date(value).map_err(|e| e.to_string())
}

fn parse_recipient_arg(value: &str) -> Result<Mailboxes, String> {
    parse_recipients(value).map_err(|e| e.to_string())
}

impl Cli {
    /// Resolves the check window in `tz`, `today` being the local date.
    pub fn window<Tz: TimeZone>(
        &self,
        today: NaiveDate,
        tz: &Tz,
    ) -> Result<TimeWindow, TimeError> {
        TimeWindow::for_dates(self.begin_date, self.end_date, today, tz)
    }
}
