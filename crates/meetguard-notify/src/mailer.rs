//! Mail transport.
//!
//! [`Mailer`] is the seam between composing a reminder and putting it on the
//! wire. [`SmtpMailer`] is the production transport: one STARTTLS session per
//! message with password authentication.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::debug;

use crate::error::{NotifyError, NotifyResult};

/// A boxed future for async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Delivers a composed message.
pub trait Mailer: Send + Sync {
    fn send(&self, message: Message) -> BoxFuture<'_, NotifyResult<()>>;
}

/// Connection settings for an authenticated SMTP relay.
#[derive(Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub timeout: Duration,
}

impl SmtpSettings {
    /// Submission port.
    pub const DEFAULT_PORT: u16 = 587;

    /// Default timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port: Self::DEFAULT_PORT,
            username: username.into(),
            password: password.into(),
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl std::fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// SMTP transport upgrading the connection with STARTTLS.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    relay: String,
}

impl SmtpMailer {
    /// Prepares the transport. No connection is made until [`Mailer::send`].
    pub fn new(settings: &SmtpSettings) -> NotifyResult<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
            .map_err(NotifyError::smtp)?
            .port(settings.port)
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ))
            .timeout(Some(settings.timeout))
            .build();

        Ok(Self {
            transport,
            relay: format!("{}:{}", settings.host, settings.port),
        })
    }
}

impl Mailer for SmtpMailer {
    fn send(&self, message: Message) -> BoxFuture<'_, NotifyResult<()>> {
        Box::pin(async move {
            debug!("sending mail through {}", self.relay);
            let response = self
                .transport
                .send(message)
                .await
                .map_err(NotifyError::smtp)?;
            debug!("relay answered {}", response.code());
            Ok(())
        })
    }
}
