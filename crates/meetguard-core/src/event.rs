//! Event types for calendar events.
//!
//! - [`Event`]: a read-only meeting as returned by the calendar provider
//! - [`Attendee`]: one participant on an event

use serde::{Deserialize, Serialize};

use crate::time::EventTime;

/// The response status for an event attendee.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    /// The attendee has accepted the invitation.
    Accepted,
    /// The attendee has declined the invitation.
    Declined,
    /// The attendee has tentatively accepted.
    Tentative,
    /// The attendee has not responded.
    NeedsAction,
    /// Unknown response status.
    #[default]
    Unknown,
}

impl ResponseStatus {
    /// Maps the Google Calendar `responseStatus` string.
    pub fn from_api(value: Option<&str>) -> Self {
        match value {
            Some("accepted") => Self::Accepted,
            Some("declined") => Self::Declined,
            Some("tentative") => Self::Tentative,
            Some("needsAction") => Self::NeedsAction,
            _ => Self::Unknown,
        }
    }
}

/// An attendee of a calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendee {
    /// The attendee's email address.
    pub email: String,
    /// The attendee's display name, if available.
    pub display_name: Option<String>,
    /// Whether this attendee is the organizer.
    pub organizer: bool,
    /// Whether this attendee entry represents the authenticated user.
    pub is_self: bool,
    /// The attendee's response status.
    pub response_status: ResponseStatus,
}

impl Attendee {
    /// Creates a new invited attendee with the given email.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            display_name: None,
            organizer: false,
            is_self: false,
            response_status: ResponseStatus::Unknown,
        }
    }

    /// Returns the part of the email after the last `@`, if any.
    pub fn domain(&self) -> Option<&str> {
        self.email.rsplit_once('@').map(|(_, domain)| domain)
    }
}

/// A calendar event.
///
/// Events are sourced read-only from the provider and live for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Provider-assigned identifier.
    pub id: String,
    /// Event title; empty when the provider omits it.
    pub title: String,
    pub start: EventTime,
    pub end: EventTime,
    /// Browsable link to the event in the provider's web UI.
    pub html_link: Option<String>,
    /// Attendees in provider order.
    pub attendees: Vec<Attendee>,
}

impl Event {
    /// Creates an event with no link and no attendees.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start: EventTime,
        end: EventTime,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start,
            end,
            html_link: None,
            attendees: Vec::new(),
        }
    }

    /// Builder method to set the browsable link.
    pub fn with_html_link(mut self, link: impl Into<String>) -> Self {
        self.html_link = Some(link.into());
        self
    }

    /// Builder method to add an attendee.
    pub fn with_attendee(mut self, attendee: Attendee) -> Self {
        self.attendees.push(attendee);
        self
    }

    /// Builder method to replace the attendee list.
    pub fn with_attendees(mut self, attendees: Vec<Attendee>) -> Self {
        self.attendees = attendees;
        self
    }

    /// Returns the `start - end` range as shown in the digest.
    pub fn time_range(&self) -> String {
        format!("{} - {}", self.start.format_short(), self.end.format_short())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    #[test]
    fn attendee_domain() {
        assert_eq!(Attendee::new("bob@acme.com").domain(), Some("acme.com"));
        assert_eq!(Attendee::new("weird\"@\"@acme.com").domain(), Some("acme.com"));
        assert_eq!(Attendee::new("no-at-sign").domain(), None);
    }

    #[test]
    fn response_status_mapping() {
        assert_eq!(ResponseStatus::from_api(Some("accepted")), ResponseStatus::Accepted);
        assert_eq!(ResponseStatus::from_api(Some("needsAction")), ResponseStatus::NeedsAction);
        assert_eq!(ResponseStatus::from_api(Some("bogus")), ResponseStatus::Unknown);
        assert_eq!(ResponseStatus::from_api(None), ResponseStatus::Unknown);
    }

    #[test]
    fn time_range_uses_short_format() {
        let tz = FixedOffset::east_opt(3600).unwrap();
        let event = Event::new(
            "evt1",
            "Planning",
            EventTime::from_datetime(tz.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap()),
            EventTime::from_datetime(tz.with_ymd_and_hms(2024, 1, 10, 9, 30, 0).unwrap()),
        );
        assert_eq!(event.time_range(), "01-10 09:00 - 01-10 09:30");
    }
}
