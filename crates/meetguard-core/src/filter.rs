//! Attendance filtering.
//!
//! An event is *flagged* when none of its attendees belongs to the company
//! domain, i.e. nobody from the company is signed up for it.

use crate::event::Event;

/// Returns `true` unless at least one attendee's email ends with
/// `@{company_domain}`.
///
/// Events without attendees (organizer-only, bot-only invites) always
/// return `true`. The domain match ignores ASCII case and a leading `@`
/// in `company_domain` is tolerated.
pub fn lacks_company_attendee(event: &Event, company_domain: &str) -> bool {
    let domain = company_domain.trim().trim_start_matches('@');
    !event.attendees.iter().any(|attendee| {
        attendee
            .domain()
            .is_some_and(|d| d.eq_ignore_ascii_case(domain))
    })
}

/// Returns the events that lack a company attendee, preserving order.
pub fn flagged_events<'a>(events: &'a [Event], company_domain: &str) -> Vec<&'a Event> {
    events
        .iter()
        .filter(|event| lacks_company_attendee(event, company_domain))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Attendee;
    use crate::time::EventTime;
    use chrono::{TimeZone, Utc};

    fn event(title: &str, emails: &[&str]) -> Event {
        let start = Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap();
        Event::new(
            format!("id-{title}"),
            title,
            EventTime::from_datetime(start),
            EventTime::from_datetime(start + chrono::Duration::minutes(30)),
        )
        .with_attendees(emails.iter().map(|e| Attendee::new(*e)).collect())
    }

    #[test]
    fn empty_attendee_list_is_flagged() {
        assert!(lacks_company_attendee(&event("Solo", &[]), "acme.com"));
    }

    #[test]
    fn company_attendee_clears_flag() {
        let e = event("Planning", &["carol@partner.com", "bob@acme.com"]);
        assert!(!lacks_company_attendee(&e, "acme.com"));
    }

    #[test]
    fn external_only_is_flagged() {
        let e = event("Planning", &["carol@partner.com", "dave@other.org"]);
        assert!(lacks_company_attendee(&e, "acme.com"));
    }

    #[test]
    fn lookalike_domains_do_not_match() {
        let e = event("Lookalike", &["eve@notacme.com", "mallory@acme.com.evil.io"]);
        assert!(lacks_company_attendee(&e, "acme.com"));
    }

    #[test]
    fn subdomain_does_not_match() {
        let e = event("Sub", &["ops@eu.acme.com"]);
        assert!(lacks_company_attendee(&e, "acme.com"));
    }

    #[test]
    fn domain_match_ignores_case_and_leading_at() {
        let e = event("Case", &["Bob@ACME.com"]);
        assert!(!lacks_company_attendee(&e, "acme.com"));
        assert!(!lacks_company_attendee(&e, "@acme.com"));
    }

    #[test]
    fn filter_is_idempotent() {
        let e = event("Planning", &["carol@partner.com"]);
        let first = lacks_company_attendee(&e, "acme.com");
        let second = lacks_company_attendee(&e, "acme.com");
        assert_eq!(first, second);
        assert_eq!(e, event("Planning", &["carol@partner.com"]));
    }

    #[test]
    fn flagged_events_preserves_order() {
        let events = vec![
            event("A", &[]),
            event("B", &["bob@acme.com"]),
            event("C", &["carol@partner.com"]),
        ];
        let titles: Vec<_> = flagged_events(&events, "acme.com")
            .into_iter()
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(titles, vec!["A", "C"]);
    }

    #[test]
    fn all_attended_yields_nothing() {
        let events = vec![event("A", &["a@acme.com"]), event("B", &["b@acme.com"])];
        assert!(flagged_events(&events, "acme.com").is_empty());
    }
}
