//! Credential and run settings.
//!
//! Settings come from a key=value credentials file (the shape of a Java
//! properties file) with `REHYDRATE_*` environment variables layered on
//! top. Keys are accepted in camelCase, lower-case and snake_case:
//!
//! ```text
//! consumerKey=...
//! consumerSecret=...
//! compatibilityMode=true
//! ```

use crate::api::API_BASE;
use crate::error::{RehydrateError, Result};
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::time::Duration;

pub const ENV_PREFIX: &str = "REHYDRATE";

#[derive(Clone, PartialEq)]
pub struct Settings {
    pub consumer_key: String,
    pub consumer_secret: String,

    /// Request the legacy response shape instead of extended posts
    pub compatibility_mode: bool,

    pub api_base: String,

    /// Per-request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"..")
            .field("compatibility_mode", &self.compatibility_mode)
            .field("api_base", &self.api_base)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Settings {
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Settings {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            compatibility_mode: false,
            api_base: API_BASE.to_string(),
            timeout: None,
        }
    }

    /// Load settings from a credentials file plus environment overrides.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(RehydrateError::Config(format!(
                "credentials file {} does not exist",
                path.display()
            )));
        }

        let config = Config::builder()
            .add_source(File::from(path).format(FileFormat::Ini))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?;

        Self::from_config(&config)
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let consumer_key = lookup::<String>(config, &["consumer_key", "consumerKey", "consumerkey"])?
            .filter(|s| !s.is_empty())
            .ok_or_else(|| RehydrateError::Config("consumerKey is not set".to_string()))?;
        let consumer_secret =
            lookup::<String>(config, &["consumer_secret", "consumerSecret", "consumersecret"])?
                .filter(|s| !s.is_empty())
                .ok_or_else(|| RehydrateError::Config("consumerSecret is not set".to_string()))?;

        let mut settings = Settings::new(consumer_key, consumer_secret);

        // only a case-insensitive "true" turns it on; any other value means off
        if let Some(compat) = lookup::<String>(
            config,
            &["compatibility_mode", "compatibilityMode", "compatibilitymode"],
        )? {
            settings.compatibility_mode = compat.trim().eq_ignore_ascii_case("true");
        }
        if let Some(base) = lookup::<String>(config, &["api_base", "apiBase", "apibase"])? {
            settings.api_base = base;
        }
        if let Some(secs) = lookup::<u64>(config, &["timeout_secs", "timeoutSecs", "timeoutsecs"])? {
            settings.timeout = Some(Duration::from_secs(secs));
        }

        Ok(settings)
    }
}

/// First of `names` present in `config`
fn lookup<T>(config: &Config, names: &[&str]) -> Result<Option<T>>
where
    T: for<'de> Deserialize<'de>,
{
    for name in names {
        match config.get::<T>(name) {
            Ok(value) => return Ok(Some(value)),
            Err(ConfigError::NotFound(_)) => continue,
            Err(err) => return Err(err.into()),
        }
    }
    Ok(None)
}
