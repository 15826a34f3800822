// src/config/app.rs
use super::defaults::*;
use crate::consts::{DEFAULT_CONFIG_PATH, MIN_PASSWORD_ITERATIONS, MIN_SALT_LEN, MAX_SALT_LEN};
use crate::error::{CredError, Result};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub keys: Keys,
    pub password: PasswordSettings,
    pub tokens: TokenSettings,
}

/// Key material settings. Values are secrets and never appear in `Debug`.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct Keys {
    /// Raw 32-byte key, hex or base64 encoded
    pub encryption_key: Option<String>,
    /// Human-entered passphrase, stretched with PBKDF2
    pub key_passphrase: Option<String>,
    pub key_salt: Option<String>,
    pub kdf_iterations: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PasswordSettings {
    pub iterations: u32,
    pub salt_len: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TokenSettings {
    pub ttl_secs: u64,
    pub cleanup_every: u64,
    /// Background sweep period; `None` relies on incidental cleanup only
    pub sweep_interval_secs: Option<u64>,
}

impl Default for Keys {
    fn default() -> Self {
        Self {
            encryption_key: None,
            key_passphrase: None,
            key_salt: None,
            kdf_iterations: default_key_kdf_iterations(),
        }
    }
}

impl Default for PasswordSettings {
    fn default() -> Self {
        Self {
            iterations: default_password_iterations(),
            salt_len: default_salt_len(),
        }
    }
}

impl Default for TokenSettings {
    fn default() -> Self {
        Self {
            ttl_secs: default_token_ttl_secs(),
            cleanup_every: default_cleanup_every(),
            sweep_interval_secs: None,
        }
    }
}

impl fmt::Debug for Keys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn state(v: &Option<String>) -> &'static str {
            if v.is_some() {
                "[REDACTED]"
            } else {
                "<unset>"
            }
        }
        f.debug_struct("Keys")
            .field("encryption_key", &state(&self.encryption_key))
            .field("key_passphrase", &state(&self.key_passphrase))
            .field("key_salt", &state(&self.key_salt))
            .field("kdf_iterations", &self.kdf_iterations)
            .finish()
    }
}

impl TokenSettings {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn sweep_interval(&self) -> Option<Duration> {
        self.sweep_interval_secs.map(Duration::from_secs)
    }
}

impl Config {
    /// Load from the file named by `CREDGUARD_CONFIG`, then apply env overrides
    pub fn load() -> Result<Self> {
        Self::load_with(|name| std::env::var(name).ok())
    }

    /// Same as [`Config::load`] with an injectable environment lookup
    pub fn load_with<F>(env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // an explicitly named file must exist; only the default path may be absent
        let mut conf = match env(ENV_CONFIG) {
            Some(path) if Path::new(&path).exists() => Self::from_path(&path)?,
            Some(_) => {
                return Err(CredError::config(format!(
                    "config file named by {ENV_CONFIG} not found"
                )))
            }
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_path(DEFAULT_CONFIG_PATH)?
            }
            None => {
                debug!(path = DEFAULT_CONFIG_PATH, "config file not found, using defaults");
                Self::default()
            }
        };

        conf.apply_env(env)?;
        conf.validate()?;
        Ok(conf)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Parse TOML. Errors report only a byte offset since the input may hold secrets.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            let at = e
                .span()
                .map(|span| format!(" at byte {}", span.start))
                .unwrap_or_default();
            CredError::config(format!("invalid TOML{at}"))
        })
    }

    /// Overlay `CREDGUARD_*` variables on top of file values
    pub fn apply_env<F>(&mut self, env: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = env(ENV_ENCRYPTION_KEY) {
            self.keys.encryption_key = Some(v);
        }
        if let Some(v) = env(ENV_KEY_PASSPHRASE) {
            self.keys.key_passphrase = Some(v);
        }
        if let Some(v) = env(ENV_KEY_SALT) {
            self.keys.key_salt = Some(v);
        }
        if let Some(v) = env(ENV_KEY_KDF_ITERATIONS) {
            self.keys.kdf_iterations = parse_env(ENV_KEY_KDF_ITERATIONS, &v)?;
        }
        if let Some(v) = env(ENV_PASSWORD_ITERATIONS) {
            self.password.iterations = parse_env(ENV_PASSWORD_ITERATIONS, &v)?;
        }
        if let Some(v) = env(ENV_TOKEN_TTL_SECS) {
            self.tokens.ttl_secs = parse_env(ENV_TOKEN_TTL_SECS, &v)?;
        }
        Ok(())
    }

    /// Check non-secret settings. Key material is checked when it is resolved.
    pub fn validate(&self) -> Result<()> {
        if self.password.iterations < MIN_PASSWORD_ITERATIONS {
            return Err(CredError::config(format!(
                "password.iterations must be at least {MIN_PASSWORD_ITERATIONS}"
            )));
        }
        if !(MIN_SALT_LEN..=MAX_SALT_LEN).contains(&self.password.salt_len) {
            return Err(CredError::config(format!(
                "password.salt_len must be between {MIN_SALT_LEN} and {MAX_SALT_LEN}"
            )));
        }
        if self.keys.kdf_iterations < MIN_PASSWORD_ITERATIONS {
            return Err(CredError::config(format!(
                "keys.kdf_iterations must be at least {MIN_PASSWORD_ITERATIONS}"
            )));
        }
        if self.tokens.ttl_secs == 0 {
            return Err(CredError::config("tokens.ttl_secs must be greater than zero"));
        }
        if self.tokens.cleanup_every == 0 {
            return Err(CredError::config(
                "tokens.cleanup_every must be greater than zero",
            ));
        }
        if self.tokens.sweep_interval_secs == Some(0) {
            return Err(CredError::config(
                "tokens.sweep_interval_secs must be greater than zero",
            ));
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| CredError::config(format!("{name} must be an unsigned integer")))
}
