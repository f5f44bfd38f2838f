//! Google Calendar provider configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{ProviderError, ProviderResult};

/// OAuth 2.0 client credentials for Google API access.
///
/// Operators download these from the Google Cloud Console; they are never
/// written by this program.
#[derive(Debug, Clone)]
pub struct OAuthCredentials {
    /// The OAuth 2.0 client ID from Google Cloud Console.
    pub client_id: String,
    /// The OAuth 2.0 client secret from Google Cloud Console.
    pub client_secret: String,
}

/// Structure of Google's OAuth credentials JSON file.
///
/// Supports the Cloud Console layout (`installed` or `web` section) and a
/// flat layout with `client_id`/`client_secret` at the root.
#[derive(Debug, Deserialize)]
struct GoogleCredentialsFile {
    installed: Option<NestedCredentials>,
    web: Option<NestedCredentials>,
    client_id: Option<String>,
    client_secret: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NestedCredentials {
    client_id: String,
    client_secret: String,
}

impl OAuthCredentials {
    /// Creates new OAuth credentials.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Loads OAuth credentials from a Google Cloud Console JSON file.
    ///
    /// A missing or malformed file is an authentication error: without it
    /// neither the consent flow nor a token refresh can run.
    pub fn from_file(path: impl AsRef<Path>) -> ProviderResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ProviderError::authentication(format!(
                "failed to read client secret file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&content)
    }

    /// Parses OAuth credentials from a Google credentials JSON string.
    pub fn from_json(json: &str) -> ProviderResult<Self> {
        let file: GoogleCredentialsFile = serde_json::from_str(json).map_err(|e| {
            ProviderError::authentication(format!("failed to parse client secret JSON: {}", e))
        })?;

        if let Some(creds) = file.installed.or(file.web) {
            return Ok(Self::new(creds.client_id, creds.client_secret));
        }

        if let (Some(client_id), Some(client_secret)) = (file.client_id, file.client_secret) {
            return Ok(Self::new(client_id, client_secret));
        }

        Err(ProviderError::authentication(
            "client secret file must contain an 'installed'/'web' section or 'client_id'/'client_secret' at root level",
        ))
    }

    /// Validates that the credentials appear to be correctly formatted.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.client_id.is_empty() {
            return Err("client_id is required");
        }
        if !self.client_id.ends_with(".apps.googleusercontent.com") {
            return Err("client_id should end with .apps.googleusercontent.com");
        }
        if self.client_secret.is_empty() {
            return Err("client_secret is required");
        }
        Ok(())
    }
}

/// Configuration for the Google Calendar provider.
#[derive(Debug, Clone)]
pub struct GoogleConfig {
    /// Path to the client secret JSON file.
    pub credentials_file: PathBuf,

    /// Path of the persisted token.
    pub token_path: PathBuf,

    /// OAuth scopes to request. Changing them invalidates the stored token.
    pub scopes: Vec<String>,

    /// Port range for the loopback OAuth server.
    pub loopback_port_range: (u16, u16),

    /// HTTP request timeout.
    pub timeout: Duration,
}

impl GoogleConfig {
    /// Default timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Default OAuth scope for read-only calendar access.
    pub const DEFAULT_SCOPE: &'static str = "https://www.googleapis.com/auth/calendar.readonly";

    /// Default loopback port range.
    pub const DEFAULT_PORT_RANGE: (u16, u16) = (8080, 8090);

    /// Creates a configuration with both files inside `config_dir`.
    pub fn in_dir(config_dir: impl AsRef<Path>) -> Self {
        let dir = config_dir.as_ref();
        Self {
            credentials_file: dir.join("credentials.json"),
            token_path: dir.join("token.json"),
            scopes: vec![Self::DEFAULT_SCOPE.to_string()],
            loopback_port_range: Self::DEFAULT_PORT_RANGE,
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_credentials_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_file = path.into();
        self
    }

    pub fn with_token_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_path = path.into();
        self
    }

    pub fn with_scopes(mut self, scopes: Vec<String>) -> Self {
        self.scopes = scopes;
        self
    }

    pub fn with_loopback_port_range(mut self, start: u16, end: u16) -> Self {
        self.loopback_port_range = (start, end);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.scopes.is_empty() {
            return Err("at least one OAuth scope is required".to_string());
        }
        let (start, end) = self.loopback_port_range;
        if start > end {
            return Err(format!("invalid loopback port range {}-{}", start, end));
        }
        if self.timeout.is_zero() {
            return Err("timeout must be greater than zero".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_installed_format() {
        let json = r#"{"installed":{"client_id":"id.apps.googleusercontent.com","client_secret":"s","project_id":"p","redirect_uris":["http://localhost"]}}"#;
        let creds = OAuthCredentials::from_json(json).unwrap();
        assert_eq!(creds.client_id, "id.apps.googleusercontent.com");
        assert_eq!(creds.client_secret, "s");
    }

    #[test]
    fn credentials_web_format() {
        let json = r#"{"web":{"client_id":"w.apps.googleusercontent.com","client_secret":"ws"}}"#;
        let creds = OAuthCredentials::from_json(json).unwrap();
        assert_eq!(creds.client_secret, "ws");
    }

    #[test]
    fn credentials_flat_format() {
        let json = r#"{"client_id":"f.apps.googleusercontent.com","client_secret":"fs"}"#;
        let creds = OAuthCredentials::from_json(json).unwrap();
        assert_eq!(creds.client_id, "f.apps.googleusercontent.com");
    }

    #[test]
    fn credentials_without_client_are_rejected() {
        let err = OAuthCredentials::from_json(r#"{"other":1}"#).unwrap_err();
        assert!(err.is_authentication());
    }

    #[test]
    fn missing_credentials_file_is_authentication_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = OAuthCredentials::from_file(dir.path().join("credentials.json")).unwrap_err();
        assert!(err.is_authentication());
        assert!(err.message().contains("credentials.json"));
    }

    #[test]
    fn credentials_validation() {
        assert!(OAuthCredentials::new("x.apps.googleusercontent.com", "s").validate().is_ok());
        assert!(OAuthCredentials::new("", "s").validate().is_err());
        assert!(OAuthCredentials::new("x.example.com", "s").validate().is_err());
        assert!(OAuthCredentials::new("x.apps.googleusercontent.com", "").validate().is_err());
    }

    #[test]
    fn config_defaults_live_in_dir() {
        let config = GoogleConfig::in_dir("/opt/meetguard/config");
        assert_eq!(
            config.credentials_file,
            PathBuf::from("/opt/meetguard/config/credentials.json")
        );
        assert_eq!(config.token_path, PathBuf::from("/opt/meetguard/config/token.json"));
        assert_eq!(config.scopes, vec![GoogleConfig::DEFAULT_SCOPE.to_string()]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_validation() {
        let base = GoogleConfig::in_dir(".");
        assert!(base.clone().with_scopes(vec![]).validate().is_err());
        assert!(base.clone().with_loopback_port_range(9000, 8000).validate().is_err());
        assert!(base.with_timeout(Duration::ZERO).validate().is_err());
    }
}
