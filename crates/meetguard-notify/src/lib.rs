//! Reminder delivery for meetguard.
//!
//! - [`Notifier`] turns a [`meetguard_core::Digest`] into a plain-text mail
//!   and hands it to a [`Mailer`]
//! - [`SmtpMailer`] delivers over an authenticated STARTTLS session
//! - [`NotifyError`] covers address, composition and delivery failures

pub mod error;
pub mod mailer;
pub mod notifier;

pub use error::{NotifyError, NotifyResult};
pub use lettre::Message;
pub use lettre::message::Mailboxes;
pub use mailer::{BoxFuture, Mailer, SmtpMailer, SmtpSettings};
pub use notifier::{NotifyOutcome, Notifier, parse_recipients};
