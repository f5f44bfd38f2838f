//! Application configuration.
//!
//! Settings live in `config.toml` inside the configuration directory, which
//! defaults to `config/` next to the executable. Relative paths in the
//! `[google]` section are resolved against the directory holding the config
//! file; the log file path is resolved against the executable's directory.
//!
//! The SMTP password supports secret references (see [`crate::secret`]).

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use meetguard_core::LogConfig;
use meetguard_notify::SmtpSettings;
use meetguard_providers::google::GoogleConfig;
use serde::Deserialize;
use tracing::Level;

use crate::error::{CliError, CliResult};

/// Configuration for a check run.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Domain whose members count as company attendees.
    pub company_domain: String,

    /// Company label for the reminder body. Defaults to the domain.
    pub company_name: Option<String>,

    #[serde(default)]
    pub google: GoogleSettings,

    pub smtp: SmtpSection,

    #[serde(default)]
    pub log: LogSettings,
}

/// `[google]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GoogleSettings {
    pub credentials_file: Option<PathBuf>,
    pub token_file: Option<PathBuf>,
    /// Changing the scopes discards the stored token.
    pub scopes: Option<Vec<String>>,
    pub loopback_port_range: Option<(u16, u16)>,
    pub timeout_secs: Option<u64>,
}

/// `[smtp]` section.
#[derive(Clone, Deserialize)]
pub struct SmtpSection {
    pub host: String,
    pub port: Option<u16>,
    pub username: String,
    /// Plain text, `env::VAR` or `pass::path`.
    pub password: String,
    /// Sender address. Defaults to `username`.
    pub from: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl std::fmt::Debug for SmtpSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpSection")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("from", &self.from)
            .finish_non_exhaustive()
    }
}

/// `[log]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub file: Option<PathBuf>,
    pub level: Option<String>,
}

/// Default log file, relative to the executable's directory.
const DEFAULT_LOG_FILE: &str = "logs/meetguard.log";

/// Joins `path` onto `base` unless it is already absolute.
fn resolve_path(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

impl AppConfig {
    /// Loads and validates the configuration file.
    pub fn load_from(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::parse(&content)
            .map_err(|e| CliError::Config(format!("{}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// Parses and validates a configuration document.
    pub fn parse(content: &str) -> Result<Self, String> {
        let config: Self =
            toml::from_str(content).map_err(|e| format!("failed to parse config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), String> {
        if self.company_domain.trim().trim_start_matches('@').is_empty() {
            return Err("company_domain must not be empty".to_string());
        }
        if self.smtp.host.trim().is_empty() {
            return Err("smtp.host must not be empty".to_string());
        }
        Ok(())
    }

    /// Label used in "no one from {company} is signed up".
    pub fn company_label(&self) -> &str {
        self.company_name.as_deref().unwrap_or(&self.company_domain)
    }

    /// Sender address of reminders.
    pub fn sender(&self) -> &str {
        self.smtp.from.as_deref().unwrap_or(&self.smtp.username)
    }

    /// Builds the Google provider configuration, resolving relative paths
    /// against `config_dir`.
    pub fn google_config(&self, config_dir: &Path) -> GoogleConfig {
        let settings = &self.google;
        let mut config = GoogleConfig::in_dir(config_dir);

        if let Some(ref path) = settings.credentials_file {
            config = config.with_credentials_file(resolve_path(config_dir, path));
        }
        if let Some(ref path) = settings.token_file {
            config = config.with_token_path(resolve_path(config_dir, path));
        }
        if let Some(ref scopes) = settings.scopes {
            config = config.with_scopes(scopes.clone());
        }
        if let Some((start, end)) = settings.loopback_port_range {
            config = config.with_loopback_port_range(start, end);
        }
        if let Some(secs) = settings.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config
    }

    /// Builds SMTP settings, resolving the password reference.
    pub fn smtp_settings(&self) -> CliResult<SmtpSettings> {
        let smtp = &self.smtp;
        let password = crate::secret::resolve(&smtp.password)
            .map_err(|e| CliError::Config(format!("failed to resolve smtp.password: {}", e)))?;

        let mut settings = SmtpSettings::new(&smtp.host, &smtp.username, password);
        if let Some(port) = smtp.port {
            settings = settings.with_port(port);
        }
        if let Some(secs) = smtp.timeout_secs {
            settings = settings.with_timeout(Duration::from_secs(secs));
        }
        Ok(settings)
    }

    /// Builds the log configuration; relative files land under `base_dir`.
    pub fn log_config(&self, base_dir: &Path) -> CliResult<LogConfig> {
        let file = self
            .log
            .file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));
        let mut config = LogConfig::new(resolve_path(base_dir, &file));

        if let Some(ref level) = self.log.level {
            let level = Level::from_str(level)
                .map_err(|_| CliError::Config(format!("unknown log level {:?}", level)))?;
            config = config.with_level(level);
        }
        Ok(config)
    }

    /// Directory of the running executable, or `.` when it is unknown.
    pub fn exe_dir() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        Self::exe_dir().join("config")
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }
}
