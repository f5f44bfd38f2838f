//! Plain-text digest of flagged meetings.
//!
//! A [`Digest`] is built once per run from the flagged events and rendered
//! into the subject and body of the reminder mail.

use chrono::NaiveDate;

use crate::event::Event;
use crate::time::DATE_FORMAT;

/// One formatted meeting in a digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestEntry {
    pub title: String,
    /// `MM-DD HH:MM - MM-DD HH:MM`
    pub time_range: String,
    pub link: Option<String>,
}

impl DigestEntry {
    /// Formats an event for the digest.
    pub fn from_event(event: &Event) -> Self {
        Self {
            title: event.title.clone(),
            time_range: event.time_range(),
            link: event.html_link.clone(),
        }
    }
}

/// The summary of all flagged events for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest {
    /// Display name of the checked calendar.
    pub calendar_name: String,
    /// Company label used in the body header.
    pub company: String,
    /// Date the digest was produced.
    pub date: NaiveDate,
    pub entries: Vec<DigestEntry>,
}

impl Digest {
    /// Builds a digest from the flagged events, in order.
    pub fn new<'a>(
        calendar_name: impl Into<String>,
        company: impl Into<String>,
        date: NaiveDate,
        events: impl IntoIterator<Item = &'a Event>,
    ) -> Self {
        Self {
            calendar_name: calendar_name.into(),
            company: company.into(),
            date,
            entries: events.into_iter().map(DigestEntry::from_event).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `"{calendar} meetings information {YYYY-MM-DD}"`
    pub fn subject(&self) -> String {
        format!(
            "{} meetings information {}",
            self.calendar_name,
            self.date.format(DATE_FORMAT)
        )
    }

    /// Renders the plain-text mail body.
    pub fn body(&self) -> String {
        let mut body = format!(
            "List of meetings that no one from {} is signed up:\n",
            self.company
        );
        for entry in &self.entries {
            let link = entry.link.as_deref().unwrap_or("(no link)");
            body.push_str(&format!(
                "\t{}\n\t\t{}\n\t\t{}\n",
                entry.title, entry.time_range, link
            ));
        }
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::EventTime;
    use chrono::{FixedOffset, TimeZone};

    fn planning() -> Event {
        let tz = FixedOffset::east_opt(0).unwrap();
        Event::new(
            "evt1",
            "Planning",
            EventTime::from_datetime(tz.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap()),
            EventTime::from_datetime(tz.with_ymd_and_hms(2024, 1, 10, 9, 30, 0).unwrap()),
        )
        .with_html_link("https://www.google.com/calendar/event?eid=abc")
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    }

    #[test]
    fn subject_embeds_calendar_and_date() {
        let digest = Digest::new("Eng Sync", "acme.com", today(), [&planning()]);
        assert_eq!(digest.subject(), "Eng Sync meetings information 2024-01-10");
    }

    #[test]
    fn body_lists_each_event() {
        let event = planning();
        let digest = Digest::new("Eng Sync", "Acme", today(), [&event]);
        let body = digest.body();
        assert_eq!(
            body,
            "List of meetings that no one from Acme is signed up:\n\
             \tPlanning\n\
             \t\t01-10 09:00 - 01-10 09:30\n\
             \t\thttps://www.google.com/calendar/event?eid=abc\n"
        );
    }

    #[test]
    fn entries_follow_each_other() {
        let first = planning();
        let mut second = planning();
        second.title = "Retro".to_string();
        second.html_link = None;
        let body = Digest::new("Eng Sync", "Acme", today(), [&first, &second]).body();
        assert!(body.ends_with(
            "\t\thttps://www.google.com/calendar/event?eid=abc\n\
             \tRetro\n\
             \t\t01-10 09:00 - 01-10 09:30\n\
             \t\t(no link)\n"
        ));
        assert_eq!(body.lines().count(), 7);
    }

    #[test]
    fn missing_link_is_marked() {
        let mut event = planning();
        event.html_link = None;
        let digest = Digest::new("Eng Sync", "Acme", today(), [&event]);
        assert!(digest.body().contains("(no link)"));
    }

    #[test]
    fn empty_digest() {
        let digest = Digest::new("Eng Sync", "Acme", today(), std::iter::empty());
        assert!(digest.is_empty());
        assert_eq!(digest.len(), 0);
    }
}
