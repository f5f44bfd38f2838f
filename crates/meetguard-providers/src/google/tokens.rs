//! OAuth token persistence.
//!
//! The token is kept as pretty-printed JSON next to the rest of the
//! configuration and rewritten atomically whenever it changes.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ProviderError, ProviderResult};

/// Tokens are treated as expired this long before their real expiry.
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Information about an OAuth token set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    /// The access token for API requests.
    pub access_token: String,

    /// The refresh token for obtaining new access tokens.
    pub refresh_token: Option<String>,

    /// When the access token expires.
    pub expires_at: Option<DateTime<Utc>>,

    /// The OAuth scopes that were granted.
    pub scopes: Vec<String>,

    /// When the tokens were last refreshed.
    pub last_refresh: DateTime<Utc>,
}

fn expiry_from(expires_in_secs: Option<i64>) -> Option<DateTime<Utc>> {
    expires_in_secs
        .map(|secs| Utc::now() + Duration::seconds(secs) - Duration::seconds(EXPIRY_MARGIN_SECS))
}

impl TokenInfo {
    /// Creates a new token info from OAuth response data.
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: Option<String>,
        expires_in_secs: Option<i64>,
        scopes: Vec<String>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token,
            expires_at: expiry_from(expires_in_secs),
            scopes,
            last_refresh: Utc::now(),
        }
    }

    /// Returns true if the access token is expired or about to expire.
    ///
    /// Tokens without an expiry never expire.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|expires_at| Utc::now() >= expires_at)
    }

    /// Returns true if the token has the required scopes.
    pub fn has_scopes(&self, required: &[String]) -> bool {
        required.iter().all(|scope| self.scopes.contains(scope))
    }

    /// Updates the access token after a refresh.
    ///
    /// Google may rotate the refresh token; a new one replaces the old.
    pub fn apply_refresh(
        &mut self,
        access_token: impl Into<String>,
        expires_in_secs: Option<i64>,
        refresh_token: Option<String>,
    ) {
        self.access_token = access_token.into();
        self.expires_at = expiry_from(expires_in_secs);
        if refresh_token.is_some() {
            self.refresh_token = refresh_token;
        }
        self.last_refresh = Utc::now();
    }
}

/// File-backed token storage.
#[derive(Debug, Clone)]
pub struct TokenStorage {
    path: PathBuf,
}

impl TokenStorage {
    /// Creates a new token storage at the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Reads the persisted token.
    ///
    /// Returns `Ok(None)` if no token file exists. A file that cannot be read
    /// or parsed is an authentication error.
    pub fn load(&self) -> ProviderResult<Option<TokenInfo>> {
        if !self.path.exists() {
            debug!("no token file at {:?}", self.path);
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).map_err(|e| {
            ProviderError::authentication(format!("failed to read token file: {}", e))
                .with_source(e)
        })?;

        let tokens: TokenInfo = serde_json::from_str(&content).map_err(|e| {
            ProviderError::authentication(format!("failed to parse token file: {}", e))
                .with_source(e)
        })?;

        debug!("loaded token from {:?}", self.path);
        Ok(Some(tokens))
    }

    /// Writes the token to disk (temp file + rename).
    pub fn save(&self, tokens: &TokenInfo) -> ProviderResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                ProviderError::configuration(format!("failed to create token directory: {}", e))
            })?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        let content = serde_json::to_string_pretty(tokens)
            .map_err(|e| ProviderError::internal(format!("failed to serialize token: {}", e)))?;

        let write_err = |e: std::io::Error| {
            ProviderError::configuration(format!("failed to write token file: {}", e))
        };
        let mut file = create_private(&temp_path).map_err(write_err)?;
        file.write_all(content.as_bytes())
            .and_then(|()| file.sync_all())
            .map_err(write_err)?;
        drop(file);

        fs::rename(&temp_path, &self.path).map_err(|e| {
            ProviderError::configuration(format!("failed to rename token file: {}", e))
        })?;

        debug!("saved token to {:?}", self.path);
        Ok(())
    }

    /// Deletes the token file if it exists.
    pub fn clear(&self) -> ProviderResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| {
                ProviderError::configuration(format!("failed to remove token file: {}", e))
            })?;
            info!("cleared token at {:?}", self.path);
        }
        Ok(())
    }

    /// Returns the token storage path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Opens `path` for writing, readable by the owner only.
///
/// A leftover file keeps its old mode on open, so the mode is also set on
/// the handle before anything is written.
fn create_private(path: &Path) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let file = options.open(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scopes(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn token_info_creation() {
        let token = TokenInfo::new(
            "access-token",
            Some("refresh-token".to_string()),
            Some(3600),
            scopes(&["scope1"]),
        );

        assert_eq!(token.access_token, "access-token");
        assert_eq!(token.refresh_token.as_deref(), Some("refresh-token"));
        assert!(token.expires_at.is_some());
        assert!(!token.is_expired());
    }

    #[test]
    fn token_info_expired() {
        let mut token = TokenInfo::new("access", None, Some(3600), vec![]);
        token.expires_at = Some(Utc::now() - Duration::hours(1));
        assert!(token.is_expired());
    }

    #[test]
    fn short_lived_token_counts_as_expired() {
        // Inside the safety margin.
        let token = TokenInfo::new("access", None, Some(30), vec![]);
        assert!(token.is_expired());
    }

    #[test]
    fn token_without_expiry_never_expires() {
        let token = TokenInfo::new("access", None, None, vec![]);
        assert!(!token.is_expired());
    }

    #[test]
    fn token_info_scope_check() {
        let token = TokenInfo::new("access", None, None, scopes(&["scope1", "scope2"]));

        assert!(token.has_scopes(&scopes(&["scope1"])));
        assert!(token.has_scopes(&scopes(&["scope1", "scope2"])));
        assert!(!token.has_scopes(&scopes(&["scope3"])));
    }

    #[test]
    fn apply_refresh_keeps_refresh_token_unless_rotated() {
        let mut token = TokenInfo::new("old", Some("r1".to_string()), Some(-10), vec![]);
        assert!(token.is_expired());

        token.apply_refresh("new", Some(3600), None);
        assert_eq!(token.access_token, "new");
        assert_eq!(token.refresh_token.as_deref(), Some("r1"));
        assert!(!token.is_expired());

        token.apply_refresh("newer", Some(3600), Some("r2".to_string()));
        assert_eq!(token.refresh_token.as_deref(), Some("r2"));
    }

    #[test]
    fn token_storage_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config").join("token.json");
        let storage = TokenStorage::new(&path);

        let token = TokenInfo::new(
            "access-token",
            Some("refresh-token".to_string()),
            Some(3600),
            scopes(&["scope1"]),
        );

        storage.save(&token).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());

        let loaded = TokenStorage::new(&path).load().unwrap().unwrap();
        assert_eq!(loaded, token);
    }

    #[cfg(unix)]
    #[test]
    fn token_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let storage = TokenStorage::new(dir.path().join("token.json"));
        storage
            .save(&TokenInfo::new("access", None, None, vec![]))
            .unwrap();
        let mode = fs::metadata(storage.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn leftover_temp_file_does_not_widen_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let storage = TokenStorage::new(dir.path().join("token.json"));
        let temp_path = storage.path().with_extension("json.tmp");
        fs::write(&temp_path, "stale").unwrap();
        fs::set_permissions(&temp_path, fs::Permissions::from_mode(0o644)).unwrap();

        storage
            .save(&TokenInfo::new("access", None, None, vec![]))
            .unwrap();
        let mode = fs::metadata(storage.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert!(!temp_path.exists());
        assert_eq!(storage.load().unwrap().unwrap().access_token, "access");
    }

    #[test]
    fn token_storage_clear() {
        let dir = tempfile::tempdir().unwrap();
        let storage = TokenStorage::new(dir.path().join("token.json"));

        storage
            .save(&TokenInfo::new("access", None, None, vec![]))
            .unwrap();
        assert!(storage.path().exists());

        storage.clear().unwrap();
        assert!(!storage.path().exists());
        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn token_storage_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = TokenStorage::new(dir.path().join("missing.json"));
        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn corrupt_token_file_is_authentication_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.json");
        fs::write(&path, "{ not json").unwrap();

        let err = TokenStorage::new(&path).load().unwrap_err();
        assert!(err.is_authentication());
        assert!(err.message().contains("failed to parse token file"));
    }
}
