//! CalendarProvider trait definition.
//!
//! This module defines the [`CalendarProvider`] trait, the read-only view of a
//! calendar backend used by the check pipeline: look up a calendar's metadata
//! and list the events of a time window.

use std::future::Future;
use std::pin::Pin;

use meetguard_core::{Event, TimeWindow};

use crate::error::ProviderResult;

/// Information about a calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarInfo {
    /// Unique identifier for the calendar.
    pub id: String,
    /// Human-readable name of the calendar.
    pub display_name: String,
    /// The timezone of the calendar (IANA identifier).
    pub timezone: Option<String>,
}

impl CalendarInfo {
    /// Creates a new CalendarInfo with the given ID and name.
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            timezone: None,
        }
    }

    /// Builder method to set timezone.
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }
}

/// Parameters of an event listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventQuery {
    pub calendar_id: String,
    /// Half-open `[start, end)` window, in UTC.
    pub window: TimeWindow,
    /// Upper bound on the number of returned events.
    pub max_results: usize,
}

impl EventQuery {
    /// Default result cap.
    pub const DEFAULT_MAX_RESULTS: usize = 10;

    pub fn new(calendar_id: impl Into<String>, window: TimeWindow) -> Self {
        Self {
            calendar_id: calendar_id.into(),
            window,
            max_results: Self::DEFAULT_MAX_RESULTS,
        }
    }

    /// Builder method to set max results.
    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }
}

/// A boxed future for async trait methods.
///
/// Boxed futures keep the trait object-safe so the pipeline can hold a
/// `&dyn CalendarProvider`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Read-only access to a calendar backend.
///
/// # Example Implementation
///
/// ```ignore
/// impl CalendarProvider for GoogleProvider {
///     fn name(&self) -> &str { "google" }
///
///     fn list_events(&self, query: EventQuery) -> BoxFuture<'_, ProviderResult<Vec<Event>>> {
///         Box::pin(async move { self.client.list_events(&query).await })
///     }
///     // ...
/// }
/// ```
pub trait CalendarProvider: Send + Sync {
    /// Returns the name/type of this provider (e.g., "google").
    fn name(&self) -> &str;

    /// Looks up a calendar by identifier.
    fn calendar_metadata<'a>(
        &'a self,
        calendar_id: &'a str,
    ) -> BoxFuture<'a, ProviderResult<CalendarInfo>>;

    /// Lists single (expanded) occurrences in the query window, ordered by
    /// start time ascending and capped at `query.max_results`.
    fn list_events(&self, query: EventQuery) -> BoxFuture<'_, ProviderResult<Vec<Event>>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn window() -> TimeWindow {
        TimeWindow::new(
            Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 11, 0, 0, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn event_query_defaults() {
        let query = EventQuery::new("primary", window());
        assert_eq!(query.max_results, 10);
        assert_eq!(query.with_max_results(3).max_results, 3);
    }

    #[test]
    fn calendar_info_builder() {
        let info = CalendarInfo::new("eng@group.calendar.google.com", "Eng Sync")
            .with_timezone("Europe/Warsaw");
        assert_eq!(info.display_name, "Eng Sync");
        assert_eq!(info.timezone.as_deref(), Some("Europe/Warsaw"));
    }
}
