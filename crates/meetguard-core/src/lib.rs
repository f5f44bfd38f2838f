//! Core types: events, time windows, attendance filter, digest, logging

pub mod digest;
pub mod event;
pub mod filter;
pub mod time;
pub mod tracing;

pub use digest::{Digest, DigestEntry};
pub use event::{Attendee, Event, ResponseStatus};
pub use filter::{flagged_events, lacks_company_attendee};
pub use time::{EventTime, TimeError, TimeWindow, parse_date};
pub use tracing::{LogConfig, PipeFormat, TracingError, init_tracing};
