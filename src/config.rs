use std::fmt;
use thiserror::Error;
use log::debug;

pub const API_KEY_VAR: &str = "BREVO_API_KEY";
pub const API_URL_VAR: &str = "BREVO_API_URL";
pub const SUPABASE_URL_VAR: &str = "SUPABASE_URL";
pub const SUPABASE_KEY_VAR: &str = "SUPABASE_SERVICE_ROLE_KEY";

pub const DEFAULT_API_URL: &str = "https://api.brevo.com/v3";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("BREVO_API_KEY environment variable is not set")]
    MissingApiKey,
    #[error("SUPABASE_URL and SUPABASE_SERVICE_ROLE_KEY environment variables are not set")]
    MissingSupabase
}

type Result<T> = std::result::Result<T, ConfigError>;

/// wrapper that keeps secrets out of debug output
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Process configuration, read once at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<Secret>,
    pub api_url: String,
    pub supabase_url: Option<String>,
    pub supabase_key: Option<Secret>
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// build the config from any variable source. empty values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let config = Self {
            api_key: get(API_KEY_VAR).map(Secret::new),
            api_url: get(API_URL_VAR).unwrap_or_else(|| DEFAULT_API_URL.into()),
            supabase_url: get(SUPABASE_URL_VAR),
            supabase_key: get(SUPABASE_KEY_VAR).map(Secret::new)
        };
        debug!("Loaded config: {:?}", config);
        config
    }

    pub fn require_api_key(&self) -> Result<&Secret> {
        self.api_key.as_ref().ok_or(ConfigError::MissingApiKey)
    }

    /// both datastore values must be present. they are never used beyond this check
    pub fn require_supabase(&self) -> Result<&str> {
        match (&self.supabase_url, &self.supabase_key) {
            (Some(url), Some(_)) => Ok(url),
            _ => Err(ConfigError::MissingSupabase)
        }
    }
}
