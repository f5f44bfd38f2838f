//! Google Calendar API client.
//!
//! A thin HTTP client over the two read-only Calendar API v3 calls the check
//! needs: calendar lookup and event listing.

use std::time::Duration;

use chrono::{DateTime, NaiveDate};
use meetguard_core::{Attendee, Event, EventTime, ResponseStatus};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{ProviderError, ProviderResult};
use crate::provider::{CalendarInfo, EventQuery};

/// Base URL for Google Calendar API v3.
const CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

/// Google Calendar API client.
#[derive(Debug)]
pub struct GoogleCalendarClient {
    http_client: reqwest::Client,
    access_token: String,
}

impl GoogleCalendarClient {
    /// Creates a new Google Calendar client with the given access token.
    pub fn new(access_token: impl Into<String>, timeout: Duration) -> ProviderResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("meetguard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                ProviderError::internal(format!("failed to create HTTP client: {}", e))
                    .with_source(e)
            })?;

        Ok(Self {
            http_client,
            access_token: access_token.into(),
        })
    }

    /// Fetches calendar metadata (`GET /calendars/{id}`).
    pub async fn get_calendar(&self, calendar_id: &str) -> ProviderResult<CalendarInfo> {
        let url = format!(
            "{}/calendars/{}",
            CALENDAR_API_BASE,
            urlencoding::encode(calendar_id)
        );

        let request = self.http_client.get(&url).bearer_auth(&self.access_token);
        let body = send(request).await?;

        let calendar: ApiCalendar = serde_json::from_str(&body).map_err(|e| {
            ProviderError::invalid_response(format!("failed to parse calendar: {}", e))
        })?;

        let mut info = CalendarInfo::new(calendar.id, calendar.summary);
        if let Some(tz) = calendar.time_zone {
            info = info.with_timezone(tz);
        }
        Ok(info)
    }

    /// Lists single event occurrences ordered by start time.
    ///
    /// Follows `nextPageToken` until the result cap is reached.
    pub async fn list_events(&self, query: &EventQuery) -> ProviderResult<Vec<Event>> {
        let mut collector = EventCollector::new(query.max_results);
        let mut page_token: Option<String> = None;

        while !collector.is_full() {
            let request = self.events_request(query, collector.remaining(), page_token.as_deref());
            let body = send(request).await?;
            let page: EventListResponse = serde_json::from_str(&body).map_err(|e| {
                ProviderError::invalid_response(format!("failed to parse response: {}", e))
            })?;

            match collector.push_page(page) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        let events = collector.finish();
        debug!(
            "fetched {} events from calendar {}",
            events.len(),
            query.calendar_id
        );
        Ok(events)
    }

    /// Builds one `events.list` page request.
    fn events_request(
        &self,
        query: &EventQuery,
        max_results: usize,
        page_token: Option<&str>,
    ) -> reqwest::RequestBuilder {
        let url = format!(
            "{}/calendars/{}/events",
            CALENDAR_API_BASE,
            urlencoding::encode(&query.calendar_id)
        );

        let mut request = self
            .http_client
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(&[
                ("timeMin", query.window.start.to_rfc3339()),
                ("timeMax", query.window.end.to_rfc3339()),
                ("maxResults", max_results.to_string()),
                ("singleEvents", "true".to_string()),
                ("orderBy", "startTime".to_string()),
            ]);

        if let Some(token) = page_token {
            request = request.query(&[("pageToken", token)]);
        }
        request
    }
}

/// Accumulates converted events across `events.list` pages up to a cap.
#[derive(Debug)]
struct EventCollector {
    events: Vec<Event>,
    cap: usize,
}

impl EventCollector {
    fn new(cap: usize) -> Self {
        Self {
            events: Vec::new(),
            cap,
        }
    }

    fn remaining(&self) -> usize {
        self.cap.saturating_sub(self.events.len())
    }

    fn is_full(&self) -> bool {
        self.remaining() == 0
    }

    /// Adds a page and returns the token of the next page to fetch, if any.
    fn push_page(&mut self, page: EventListResponse) -> Option<String> {
        self.events
            .extend(page.items.into_iter().filter_map(convert_event));
        if self.events.len() >= self.cap {
            self.events.truncate(self.cap);
            return None;
        }
        page.next_page_token
    }

    fn finish(self) -> Vec<Event> {
        self.events
    }
}

/// Sends a request and returns the body of a successful response.
async fn send(request: reqwest::RequestBuilder) -> ProviderResult<String> {
    let response = request.send().await.map_err(|e| {
        if e.is_timeout() {
            ProviderError::network("request timeout")
        } else if e.is_connect() {
            ProviderError::network(format!("connection failed: {}", e))
        } else {
            ProviderError::network(format!("request failed: {}", e))
        }
    })?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ProviderError::network(format!("failed to read response: {}", e)))?;

    if status.is_success() {
        Ok(body)
    } else {
        Err(ProviderError::from_http_status(status.as_u16(), &body))
    }
}

fn parse_time(time: ApiEventTime, event_id: &str, which: &str) -> Option<EventTime> {
    match (time.date_time, time.date) {
        (Some(dt), _) => DateTime::parse_from_rfc3339(&dt)
            .map_err(|e| warn!("failed to parse {} time of {}: {}", which, event_id, e))
            .ok()
            .map(EventTime::DateTime),
        (None, Some(date)) => NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .map_err(|e| warn!("failed to parse {} date of {}: {}", which, event_id, e))
            .ok()
            .map(EventTime::AllDay),
        (None, None) => {
            warn!("event {} has no {} time", event_id, which);
            None
        }
    }
}

/// Converts an API event, skipping cancelled or malformed ones.
fn convert_event(event: ApiEvent) -> Option<Event> {
    if event.status.as_deref() == Some("cancelled") {
        return None;
    }

    let id = event.id?;
    let start = parse_time(event.start, &id, "start")?;
    let end = parse_time(event.end, &id, "end")?;

    let attendees = event
        .attendees
        .unwrap_or_default()
        .into_iter()
        .filter_map(|a| {
            Some(Attendee {
                email: a.email?,
                display_name: a.display_name,
                organizer: a.organizer.unwrap_or(false),
                is_self: a.is_self.unwrap_or(false),
                response_status: ResponseStatus::from_api(a.response_status.as_deref()),
            })
        })
        .collect();

    let mut converted =
        Event::new(id, event.summary.unwrap_or_default(), start, end).with_attendees(attendees);
    converted.html_link = event.html_link;
    Some(converted)
}

/// Response from the calendars.get endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiCalendar {
    id: String,
    #[serde(default)]
    summary: String,
    time_zone: Option<String>,
}

/// Response from the events.list endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventListResponse {
    #[serde(default)]
    items: Vec<ApiEvent>,
    next_page_token: Option<String>,
}

/// A single event from the Google Calendar API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiEvent {
    id: Option<String>,
    summary: Option<String>,
    start: ApiEventTime,
    end: ApiEventTime,
    html_link: Option<String>,
    status: Option<String>,
    attendees: Option<Vec<ApiAttendee>>,
}

/// Event time from the API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiEventTime {
    date: Option<String>,
    date_time: Option<String>,
}

/// Attendee from the API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiAttendee {
    email: Option<String>,
    display_name: Option<String>,
    #[serde(rename = "self")]
    is_self: Option<bool>,
    organizer: Option<bool>,
    response_status: Option<String>,
}
