//! Reminder composition.

use lettre::Message;
use lettre::message::header::{ContentType, To};
use lettre::message::{Mailbox, Mailboxes};
use meetguard_core::Digest;
use tracing::{debug, info};

use crate::error::{NotifyError, NotifyResult};
use crate::mailer::Mailer;

/// What [`Notifier::notify`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyOutcome {
    /// The digest was empty; nothing was sent.
    Skipped,
    /// One message was handed to the mailer.
    Sent,
}

/// Sends digests from a fixed sender address.
pub struct Notifier<M> {
    mailer: M,
    from: Mailbox,
}

fn parse_mailbox(address: &str) -> NotifyResult<Mailbox> {
    address.parse().map_err(|source| NotifyError::Address {
        address: address.to_string(),
        source,
    })
}

/// Parses a comma-separated recipient list such as
/// `alice@acme.com, Bob <bob@acme.com>`.
pub fn parse_recipients(value: &str) -> NotifyResult<Mailboxes> {
    let recipients: Mailboxes = value.parse().map_err(|source| NotifyError::Address {
        address: value.to_string(),
        source,
    })?;
    if recipients.iter().next().is_none() {
        return Err(NotifyError::NoRecipient);
    }
    Ok(recipients)
}

impl<M: Mailer> Notifier<M> {
    pub fn new(mailer: M, from: &str) -> NotifyResult<Self> {
        Ok(Self {
            mailer,
            from: parse_mailbox(from)?,
        })
    }

    pub fn mailer(&self) -> &M {
        &self.mailer
    }

    /// Composes the plain-text reminder for `digest`.
    pub fn compose(&self, digest: &Digest, recipients: &Mailboxes) -> NotifyResult<Message> {
        let message = Message::builder()
            .from(self.from.clone())
            .mailbox(To::from(recipients.clone()))
            .subject(digest.subject())
            .header(ContentType::TEXT_PLAIN)
            .body(digest.body())?;
        Ok(message)
    }

    /// Mails `digest` to `recipients` unless it is empty.
    pub async fn notify(
        &self,
        digest: &Digest,
        recipients: &Mailboxes,
    ) -> NotifyResult<NotifyOutcome> {
        if digest.is_empty() {
            debug!("no flagged meetings, nothing to send");
            return Ok(NotifyOutcome::Skipped);
        }

        let message = self.compose(digest, recipients)?;
        self.mailer.send(message).await?;
        info!("mailed {} meeting/s to {}", digest.len(), recipients);
        Ok(NotifyOutcome::Sent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use chrono::{FixedOffset, NaiveDate, TimeZone};
    use meetguard_core::{Attendee, Event, EventTime};

    use crate::mailer::BoxFuture;

    #[derive(Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<Message>>,
        fail: bool,
    }

    impl Mailer for RecordingMailer {
        fn send(&self, message: Message) -> BoxFuture<'_, NotifyResult<()>> {
            Box::pin(async move {
                if self.fail {
                    return Err(NotifyError::delivery("authentication rejected"));
                }
                self.sent.lock().unwrap().push(message);
                Ok(())
            })
        }
    }

    fn planning() -> Event {
        let tz = FixedOffset::east_opt(0).unwrap();
        Event::new(
            "e1",
            "Planning",
            EventTime::from_datetime(tz.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap()),
            EventTime::from_datetime(tz.with_ymd_and_hms(2024, 1, 10, 9, 30, 0).unwrap()),
        )
        .with_html_link("https://calendar.google.com/event?eid=e1")
        .with_attendee(Attendee::new("carol@partner.com"))
    }

    fn digest(events: &[Event]) -> Digest {
        Digest::new(
            "Eng Sync",
            "Acme",
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            events,
        )
    }

    fn formatted(message: &Message) -> String {
        String::from_utf8(message.formatted()).unwrap()
    }

    fn team() -> Mailboxes {
        parse_recipients("team@acme.com").unwrap()
    }

    fn envelope_to(message: &Message) -> Vec<String> {
        message
            .envelope()
            .to()
            .iter()
            .map(|a| a.to_string())
            .collect()
    }

    #[tokio::test]
    async fn empty_digest_sends_nothing() {
        let notifier = Notifier::new(RecordingMailer::default(), "bot@acme.com").unwrap();
        let outcome = notifier.notify(&digest(&[]), &team()).await.unwrap();
        assert_eq!(outcome, NotifyOutcome::Skipped);
        assert!(notifier.mailer().sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn flagged_meeting_is_mailed() {
        let notifier = Notifier::new(RecordingMailer::default(), "bot@acme.com").unwrap();
        let outcome = notifier
            .notify(&digest(&[planning()]), &team())
            .await
            .unwrap();
        assert_eq!(outcome, NotifyOutcome::Sent);

        let sent = notifier.mailer().sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        let text = formatted(&sent[0]);
        assert!(text.contains("Subject: Eng Sync meetings information 2024-01-10"));
        assert!(text.contains("List of meetings that no one from Acme is signed up:"));
        assert!(text.contains("Planning"));
        assert!(text.contains("01-10 09:00 - 01-10 09:30"));
        assert!(text.contains("text/plain"));

        assert_eq!(envelope_to(&sent[0]), vec!["team@acme.com".to_string()]);
    }

    #[tokio::test]
    async fn delivery_failure_is_reported() {
        let mailer = RecordingMailer {
            fail: true,
            ..Default::default()
        };
        let notifier = Notifier::new(mailer, "bot@acme.com").unwrap();
        let err = notifier
            .notify(&digest(&[planning()]), &team())
            .await
            .unwrap_err();
        assert!(matches!(err, NotifyError::Delivery { .. }));
    }

    #[test]
    fn recipient_list_is_comma_separated() {
        let recipients = parse_recipients("alice@acme.com, Bob <bob@acme.com>").unwrap();
        assert_eq!(recipients.iter().count(), 2);
    }

    #[test]
    fn bad_or_empty_recipient_is_rejected() {
        assert!(matches!(
            parse_recipients("not-an-address"),
            Err(NotifyError::Address { .. })
        ));
        assert!(parse_recipients("").is_err());
        assert!(parse_recipients(" , ").is_err());
    }

    #[tokio::test]
    async fn every_recipient_gets_the_reminder() {
        let notifier = Notifier::new(RecordingMailer::default(), "bot@acme.com").unwrap();
        let recipients = parse_recipients("alice@acme.com, bob@acme.com").unwrap();

        let message = notifier.compose(&digest(&[planning()]), &recipients).unwrap();
        assert_eq!(
            envelope_to(&message),
            vec!["alice@acme.com".to_string(), "bob@acme.com".to_string()]
        );
        let text = formatted(&message);
        assert!(text.contains("alice@acme.com") && text.contains("bob@acme.com"));

        notifier
            .notify(&digest(&[planning()]), &recipients)
            .await
            .unwrap();
        assert_eq!(notifier.mailer().sent.lock().unwrap().len(), 1);
    }

    #[test]
    fn bad_sender_is_rejected() {
        assert!(Notifier::new(RecordingMailer::default(), "@@").is_err());
    }
}
