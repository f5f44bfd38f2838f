//! Secret references in `config.toml`.
//!
//! The SMTP password may point outside the file:
//!
//! - `pass::path/in/store` runs `pass show path/in/store` and keeps the first line
//! - `env::VAR_NAME` reads `$VAR_NAME`
//! - anything else is the secret itself

use std::process::Command;

use thiserror::Error;

/// Why a secret reference could not be resolved.
#[derive(Debug, Error)]
pub enum SecretError {
    #[error("failed to run `pass show {path}`: {source}")]
    PassSpawn {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`pass show {path}` failed ({status}): {stderr}")]
    PassFailed {
        path: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("`pass show {path}` produced no output")]
    PassEmpty { path: String },

    #[error("environment variable `{0}` is not set")]
    EnvMissing(String),
}

/// Resolves a value that may be a secret reference.
pub fn resolve(value: &str) -> Result<String, SecretError> {
    if let Some(path) = value.strip_prefix("pass::") {
        resolve_pass(path)
    } else if let Some(var) = value.strip_prefix("env::") {
        std::env::var(var).map_err(|_| SecretError::EnvMissing(var.to_string()))
    } else {
        Ok(value.to_string())
    }
}

fn resolve_pass(path: &str) -> Result<String, SecretError> {
    let output = Command::new("pass")
        .arg("show")
        .arg(path)
        .output()
        .map_err(|source| SecretError::PassSpawn {
            path: path.to_string(),
            source,
        })?;

    if !output.status.success() {
        return Err(SecretError::PassFailed {
            path: path.to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()
        .map(str::to_string)
        .ok_or_else(|| SecretError::PassEmpty {
            path: path.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_value_is_the_secret() {
        assert_eq!(resolve("s3cret").unwrap(), "s3cret");
        assert_eq!(resolve("").unwrap(), "");
    }

    #[test]
    fn env_reference() {
        unsafe {
            std::env::set_var("_MEETGUARD_TEST_SMTP_PASSWORD", "from-env");
        }
        assert_eq!(
            resolve("env::_MEETGUARD_TEST_SMTP_PASSWORD").unwrap(),
            "from-env"
        );
        unsafe {
            std::env::remove_var("_MEETGUARD_TEST_SMTP_PASSWORD");
        }
    }

    #[test]
    fn missing_env_var() {
        let err = resolve("env::_MEETGUARD_SURELY_UNSET_12345").unwrap_err();
        assert!(matches!(err, SecretError::EnvMissing(_)));
        assert!(err.to_string().contains("not set"));
    }

    #[test]
    fn unknown_pass_entry_fails() {
        // Fails whether or not `pass` is installed.
        assert!(resolve("pass::meetguard/does/not/exist/12345").is_err());
    }
}
