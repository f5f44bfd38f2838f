//! Error types for reminder delivery.

use thiserror::Error;

/// Errors raised while composing or delivering a reminder.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// A sender or recipient address could not be parsed.
    #[error("invalid mail address {address:?}: {source}")]
    Address {
        address: String,
        #[source]
        source: lettre::address::AddressError,
    },

    /// A recipient list holds no address.
    #[error("no mail recipient given")]
    NoRecipient,

    /// The message could not be assembled.
    #[error("failed to build message: {0}")]
    Build(#[from] lettre::error::Error),

    /// Connecting, authenticating or sending failed.
    #[error("mail delivery failed: {message}")]
    Delivery {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl NotifyError {
    pub fn delivery(message: impl Into<String>) -> Self {
        Self::Delivery {
            message: message.into(),
            source: None,
        }
    }

    pub(crate) fn smtp(error: lettre::transport::smtp::Error) -> Self {
        Self::Delivery {
            message: error.to_string(),
            source: Some(Box::new(error)),
        }
    }
}

/// A specialized Result type for notification operations.
pub type NotifyResult<T> = Result<T, NotifyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_error_names_the_address() {
        let source = "not an address"
            .parse::<lettre::Address>()
            .unwrap_err();
        let err = NotifyError::Address {
            address: "not an address".to_string(),
            source,
        };
        assert!(err.to_string().contains("\"not an address\""));
    }

    #[test]
    fn delivery_display() {
        let err = NotifyError::delivery("connection refused");
        assert_eq!(err.to_string(), "mail delivery failed: connection refused");
    }
}
