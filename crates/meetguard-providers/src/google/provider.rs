//! Google Calendar provider implementation.
//!
//! This module implements the [`CalendarProvider`] trait for Google Calendar.

use meetguard_core::Event;
use tracing::{debug, info};

use crate::error::{ProviderError, ProviderResult};
use crate::provider::{BoxFuture, CalendarInfo, CalendarProvider, EventQuery};

use super::client::GoogleCalendarClient;
use super::config::{GoogleConfig, OAuthCredentials};
use super::credential::CredentialProvider;
use super::oauth::OAuthClient;
use super::tokens::TokenStorage;

const PROVIDER_NAME: &str = "google";

/// Google Calendar provider.
///
/// Holds an API client built from a credential that was valid when
/// [`GoogleProvider::connect`] returned. A run is short enough that the
/// token is not refreshed again afterwards.
#[derive(Debug)]
pub struct GoogleProvider {
    client: GoogleCalendarClient,
}

impl GoogleProvider {
    /// Obtains a credential (stored, refreshed or interactive) and builds an
    /// authenticated API client.
    ///
    /// Every failure here is an authentication error.
    pub async fn connect(config: &GoogleConfig) -> ProviderResult<Self> {
        config.validate().map_err(|e| {
            ProviderError::authentication(format!("invalid google configuration: {}", e))
        })?;

        let credentials = OAuthCredentials::from_file(&config.credentials_file)
            .map_err(|e| e.with_provider(PROVIDER_NAME))?;
        if let Err(reason) = credentials.validate() {
            debug!("client secret looks unusual: {}", reason);
        }

        let oauth = OAuthClient::new(credentials, config.timeout, config.loopback_port_range)
            .map_err(ProviderError::into_authentication)?;
        let credential_provider =
            CredentialProvider::new(TokenStorage::new(&config.token_path), oauth);

        let token = credential_provider
            .obtain_credential(&config.scopes)
            .await
            .map_err(|e| e.with_provider(PROVIDER_NAME))?;
        info!("authenticated against google calendar");

        let client = GoogleCalendarClient::new(token.access_token, config.timeout)
            .map_err(ProviderError::into_authentication)?;
        Ok(Self { client })
    }
}

impl CalendarProvider for GoogleProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn calendar_metadata<'a>(
        &'a self,
        calendar_id: &'a str,
    ) -> BoxFuture<'a, ProviderResult<CalendarInfo>> {
        Box::pin(async move {
            self.client
                .get_calendar(calendar_id)
                .await
                .map_err(|e| e.with_provider(PROVIDER_NAME))
        })
    }

    fn list_events(&self, query: EventQuery) -> BoxFuture<'_, ProviderResult<Vec<Event>>> {
        Box::pin(async move {
            self.client
                .list_events(&query)
                .await
                .map_err(|e| e.with_provider(PROVIDER_NAME))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn connect_without_client_secret_is_authentication_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = GoogleConfig::in_dir(dir.path());

        let err = GoogleProvider::connect(&config).await.unwrap_err();
        assert!(err.is_authentication());
        assert_eq!(err.provider(), Some("google"));
    }

    #[tokio::test]
    async fn connect_with_invalid_config_is_authentication_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = GoogleConfig::in_dir(dir.path()).with_timeout(Duration::ZERO);

        let err = GoogleProvider::connect(&config).await.unwrap_err();
        assert!(err.is_authentication());
    }

    #[tokio::test]
    async fn corrupt_token_file_fails_before_any_network_call() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("credentials.json"),
            r#"{"installed":{"client_id":"id.apps.googleusercontent.com","client_secret":"s"}}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("token.json"), "not json").unwrap();

        let err = GoogleProvider::connect(&GoogleConfig::in_dir(dir.path()))
            .await
            .unwrap_err();
        assert!(err.is_authentication());
        assert!(err.message().contains("token file"));
    }

    #[test]
    fn provider_name() {
        let client = GoogleCalendarClient::new("token", Duration::from_secs(5)).unwrap();
        assert_eq!(GoogleProvider { client }.name(), "google");
    }
}
