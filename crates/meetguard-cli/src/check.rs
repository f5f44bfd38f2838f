//! The check pipeline: fetch, filter, and maybe notify.

use chrono::{Local, NaiveDate};
use meetguard_core::{Digest, TimeWindow, flagged_events};
use meetguard_notify::{Mailboxes, Mailer, Notifier};
use meetguard_providers::{CalendarProvider, EventQuery};
use tracing::{debug, info};

use crate::error::CliResult;

/// Inputs of one check run.
#[derive(Debug, Clone)]
pub struct CheckRequest {
    pub calendar_id: String,
    pub window: TimeWindow,
    pub max_results: usize,
    pub recipient: Mailboxes,
    pub company_domain: String,
    /// Company name shown in the reminder body.
    pub company_label: String,
    /// Date stamped on the reminder subject.
    pub today: NaiveDate,
}

/// How a check run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The window holds no events.
    NoEvents,
    /// Every event has a company attendee.
    AllAttended,
    /// A reminder listing `flagged` meetings was sent.
    ReminderSent { flagged: usize },
}

/// Runs one check against `provider`, mailing through `notifier`.
pub async fn run_check<M: Mailer>(
    provider: &dyn CalendarProvider,
    notifier: &Notifier<M>,
    request: &CheckRequest,
) -> CliResult<CheckOutcome> {
    debug!(
        "checking \"{}\" through the {} provider",
        request.calendar_id,
        provider.name()
    );
    let calendar = provider.calendar_metadata(&request.calendar_id).await?;
    let calendar_name = if calendar.display_name.is_empty() {
        calendar.id.as_str()
    } else {
        calendar.display_name.as_str()
    };

    let query = EventQuery::new(&request.calendar_id, request.window)
        .with_max_results(request.max_results);
    let events = provider.list_events(query).await?;
    let window = request.window.display_in(&Local);

    if events.is_empty() {
        info!(
            "not found upcoming events in \"{}\" for {}",
            calendar_name, window
        );
        return Ok(CheckOutcome::NoEvents);
    }

    let flagged = flagged_events(&events, &request.company_domain);
    for event in &flagged {
        debug!("\"{}\" meeting append to list", event.title);
    }

    if flagged.is_empty() {
        info!(
            "found {} upcoming event/s in \"{}\" for {}, attendees list is correct, reminder not sent",
            events.len(),
            calendar_name,
            window
        );
        return Ok(CheckOutcome::AllAttended);
    }

    let digest = Digest::new(
        calendar_name,
        &request.company_label,
        request.today,
        flagged.iter().copied(),
    );
    notifier.notify(&digest, &request.recipient).await?;
    info!(
        "reminder sent to {}, found {} meeting/s without attendees in \"{}\" for {}",
        request.recipient,
        digest.len(),
        calendar_name,
        window
    );

    Ok(CheckOutcome::ReminderSent {
        flagged: digest.len(),
    })
}
