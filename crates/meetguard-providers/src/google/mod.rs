//! Google Calendar provider implementation.
//!
//! [`GoogleProvider::connect`] obtains a credential and returns a provider
//! ready to query the Calendar API v3.
//!
//! # Authentication Flow
//!
//! 1. The operator downloads an OAuth client secret file from Google Cloud
//! 2. A persisted token is reused while it is valid, refreshed when expired
//! 3. Otherwise a local HTTP listener is bound and the browser opened on the
//!    consent page with a PKCE challenge
//! 4. The authorization code from the redirect is exchanged for tokens
//! 5. Tokens are persisted for the next run
//!
//! # Example
//!
//! ```ignore
//! use meetguard_providers::google::{GoogleConfig, GoogleProvider};
//!
//! let config = GoogleConfig::in_dir("/opt/meetguard/config");
//! let provider = GoogleProvider::connect(&config).await?;
//! let calendar = provider.calendar_metadata("primary").await?;
//! ```

mod client;
mod config;
mod credential;
mod oauth;
mod provider;
mod tokens;

pub use client::GoogleCalendarClient;
pub use config::{GoogleConfig, OAuthCredentials};
pub use credential::{Authorizer, CredentialProvider, RefreshedToken};
pub use oauth::{OAuthClient, PkceFlow};
pub use provider::GoogleProvider;
pub use tokens::{TokenInfo, TokenStorage};
