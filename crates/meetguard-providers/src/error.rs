//! Error types for calendar provider operations.
//!
//! A [`ProviderError`] whose code is [`ProviderErrorCode::AuthenticationFailed`]
//! is an authentication failure; every other code is a calendar access
//! failure.

use std::fmt;
use thiserror::Error;

/// What went wrong, as far as the check run cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderErrorCode {
    /// No usable credential (HTTP 401, token file, consent flow).
    AuthenticationFailed,
    /// HTTP 403.
    AuthorizationFailed,
    NetworkError,
    /// HTTP 429.
    RateLimited,
    /// Any other non-success status.
    ServerError,
    /// A body that does not parse.
    InvalidResponse,
    /// HTTP 404, usually an unknown calendar id.
    NotFound,
    /// HTTP 400.
    BadRequest,
    ConfigurationError,
    InternalError,
}

impl ProviderErrorCode {
    /// Classifies a non-success Calendar API status.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            400 => Self::BadRequest,
            401 => Self::AuthenticationFailed,
            403 => Self::AuthorizationFailed,
            404 => Self::NotFound,
            429 => Self::RateLimited,
            _ => Self::ServerError,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AuthenticationFailed => "authentication_failed",
            Self::AuthorizationFailed => "authorization_failed",
            Self::NetworkError => "network_error",
            Self::RateLimited => "rate_limited",
            Self::ServerError => "server_error",
            Self::InvalidResponse => "invalid_response",
            Self::NotFound => "not_found",
            Self::BadRequest => "bad_request",
            Self::ConfigurationError => "configuration_error",
            Self::InternalError => "internal_error",
        }
    }
}

impl fmt::Display for ProviderErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed calendar or credential operation.
///
/// Displays as `[provider] message (code)`.
#[derive(Debug, Error)]
pub struct ProviderError {
    code: ProviderErrorCode,
    message: String,
    provider: Option<String>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ProviderError {
    pub fn new(code: ProviderErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider: None,
            source: None,
        }
    }

    /// Builds the error for a non-success Calendar API response.
    ///
    /// The body is kept only where it explains the failure.
    pub fn from_http_status(status: u16, body: &str) -> Self {
        let code = ProviderErrorCode::from_http_status(status);
        let message = match code {
            ProviderErrorCode::AuthenticationFailed => {
                "access token expired or invalid".to_string()
            }
            ProviderErrorCode::AuthorizationFailed => "access denied to calendar".to_string(),
            ProviderErrorCode::NotFound => "calendar not found".to_string(),
            ProviderErrorCode::RateLimited => "rate limit exceeded".to_string(),
            ProviderErrorCode::BadRequest => format!("bad request: {}", body),
            _ => format!("API error ({}): {}", status, body),
        };
        Self::new(code, message)
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::AuthenticationFailed, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::NetworkError, message)
    }

    pub fn server(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::ServerError, message)
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::InvalidResponse, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::NotFound, message)
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::ConfigurationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::InternalError, message)
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Re-tags a failure met while obtaining a credential (token file,
    /// token endpoint) as an authentication failure.
    pub fn into_authentication(mut self) -> Self {
        self.code = ProviderErrorCode::AuthenticationFailed;
        self
    }

    pub fn code(&self) -> ProviderErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn provider(&self) -> Option<&str> {
        self.provider.as_deref()
    }

    pub fn is_authentication(&self) -> bool {
        self.code == ProviderErrorCode::AuthenticationFailed
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref provider) = self.provider {
            write!(f, "[{}] ", provider)?;
        }
        write!(f, "{} ({})", self.message, self.code)
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;
