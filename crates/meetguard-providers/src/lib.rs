//! Calendar access for meetguard.
//!
//! - [`CalendarProvider`] - read-only view of a calendar backend
//! - [`google`] - the Google Calendar implementation, including the OAuth
//!   credential lifecycle
//! - [`ProviderError`] - error types for provider operations
//!
//! # Example
//!
//! ```ignore
//! use meetguard_providers::{CalendarProvider, EventQuery};
//!
//! async fn events(provider: &dyn CalendarProvider, window: TimeWindow) -> ProviderResult<Vec<Event>> {
//!     provider.list_events(EventQuery::new("primary", window)).await
//! }
//! ```

pub mod error;
#[cfg(feature = "google")]
pub mod google;
pub mod provider;

pub use error::{ProviderError, ProviderErrorCode, ProviderResult};
pub use provider::{BoxFuture, CalendarInfo, CalendarProvider, EventQuery};
