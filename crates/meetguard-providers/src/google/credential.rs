//! Obtaining a usable access credential.
//!
//! [`CredentialProvider::obtain_credential`] decides between the three ways
//! of getting a token:
//!
//! - the persisted token is unexpired and covers the requested scopes:
//!   returned unchanged
//! - it is expired but carries a refresh token: refreshed silently, saved,
//!   returned
//! - anything else: the interactive consent flow runs and its result is saved
//!
//! Every failure comes back as an authentication error.

use tracing::{debug, info, warn};

use crate::error::{ProviderError, ProviderResult};
use crate::provider::BoxFuture;

use super::tokens::{TokenInfo, TokenStorage};

/// Result of a refresh-token grant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshedToken {
    pub access_token: String,
    pub expires_in: Option<i64>,
    /// Set when the authorization server rotated the refresh token.
    pub refresh_token: Option<String>,
}

/// The OAuth endpoint operations a credential provider needs.
pub trait Authorizer: Send + Sync {
    /// Runs the interactive consent flow.
    fn authorize<'a>(&'a self, scopes: &'a [String]) -> BoxFuture<'a, ProviderResult<TokenInfo>>;

    /// Exchanges a refresh token for a new access token.
    fn refresh<'a>(&'a self, refresh_token: &'a str)
    -> BoxFuture<'a, ProviderResult<RefreshedToken>>;
}

/// Loads, refreshes or (re)creates the persisted credential.
#[derive(Debug)]
pub struct CredentialProvider<A> {
    storage: TokenStorage,
    authorizer: A,
}

impl<A: Authorizer> CredentialProvider<A> {
    pub fn new(storage: TokenStorage, authorizer: A) -> Self {
        Self {
            storage,
            authorizer,
        }
    }

    pub fn storage(&self) -> &TokenStorage {
        &self.storage
    }

    /// Returns a credential valid for `scopes`.
    pub async fn obtain_credential(&self, scopes: &[String]) -> ProviderResult<TokenInfo> {
        self.obtain(scopes)
            .await
            .map_err(ProviderError::into_authentication)
    }

    async fn obtain(&self, scopes: &[String]) -> ProviderResult<TokenInfo> {
        let stored = self.storage.load()?;

        let stored = match stored {
            Some(token) if !token.has_scopes(scopes) => {
                warn!("stored token does not cover the requested scopes, re-authorizing");
                self.storage.clear()?;
                None
            }
            other => other,
        };

        match stored {
            Some(token) if !token.is_expired() => {
                debug!("using stored token from {:?}", self.storage.path());
                Ok(token)
            }
            Some(mut token) if token.refresh_token.is_some() => {
                debug!("refreshing expired access token");
                let refresh_token = token.refresh_token.clone().unwrap_or_default();
                let refreshed = self.authorizer.refresh(&refresh_token).await?;
                token.apply_refresh(
                    refreshed.access_token,
                    refreshed.expires_in,
                    refreshed.refresh_token,
                );
                self.storage.save(&token)?;
                Ok(token)
            }
            _ => {
                info!("no usable token, starting interactive authorization");
                let token = self.authorizer.authorize(scopes).await?;
                self.storage.save(&token)?;
                Ok(token)
            }
        }
    }
}
