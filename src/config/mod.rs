//! Configuration system (layered: code > env > config file).

use std::collections::HashMap;
#[cfg(feature = "config-file")]
use std::path::{Path, PathBuf};

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VoiceRoomError};
use crate::service::RoomKitOptions;

/// Live type used by voice rooms on the room service.
pub const DEFAULT_LIVE_TYPE: i32 = 2;

pub const ENV_APP_KEY: &str = "VOICEROOM_APP_KEY";
pub const ENV_SERVER_URL: &str = "VOICEROOM_SERVER_URL";
pub const ENV_LIVE_TYPE: &str = "VOICEROOM_LIVE_TYPE";

/// Kit configuration.
///
/// Resolution order:
/// 1. Values set in code (builder or field assignment after loading)
/// 2. Environment variables (`VOICEROOM_*`, `.env` honoured)
/// 3. `~/.voiceroom/config.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[serde(default)]
pub struct VoiceRoomConfig {
    #[builder(into)]
    pub app_key: String,
    #[builder(into)]
    pub server_url: Option<String>,
    #[builder(default = DEFAULT_LIVE_TYPE)]
    pub live_type: i32,
    #[builder(default)]
    pub extras: HashMap<String, String>,
}

impl Default for VoiceRoomConfig {
    fn default() -> Self {
        Self {
            app_key: String::new(),
            server_url: None,
            live_type: DEFAULT_LIVE_TYPE,
            extras: HashMap::new(),
        }
    }
}

impl VoiceRoomConfig {
    /// Load from environment variables only.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        let mut config = Self::default();
        config.apply_env();
        config
    }

    fn apply_env(&mut self) {
        if let Ok(key) = std::env::var(ENV_APP_KEY) {
            self.app_key = key;
        }
        if let Ok(url) = std::env::var(ENV_SERVER_URL) {
            self.server_url = Some(url);
        }
        if let Ok(raw) = std::env::var(ENV_LIVE_TYPE) {
            match raw.trim().parse() {
                Ok(live_type) => self.live_type = live_type,
                Err(e) => tracing::warn!(value = %raw, error = %e, "Ignoring invalid VOICEROOM_LIVE_TYPE"),
            }
        }
    }

    #[cfg(feature = "config-file")]
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    #[cfg(feature = "config-file")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// `~/.voiceroom/config.toml`, when a home directory is known.
    #[cfg(feature = "config-file")]
    pub fn default_path() -> Option<PathBuf> {
        directories::UserDirs::new()
            .map(|dirs| dirs.home_dir().join(".voiceroom").join("config.toml"))
    }

    /// Load the default config file (if any), then apply env overrides.
    #[cfg(feature = "config-file")]
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(path),
            None => Ok(Self::from_env()),
        }
    }

    /// Like [`load`](Self::load) but with an explicit file path. A missing
    /// file is not an error.
    #[cfg(feature = "config-file")]
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let _ = dotenvy::dotenv();
        let path = path.as_ref();
        let mut config = if path.exists() {
            tracing::debug!(path = %path.display(), "Loading voice room config file");
            Self::from_toml_file(path)?
        } else {
            Self::default()
        };
        config.apply_env();
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.app_key.trim().is_empty() {
            return Err(VoiceRoomError::Configuration(
                "app_key must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Options handed to the toolkit on initialization.
    pub fn to_options(&self) -> RoomKitOptions {
        RoomKitOptions::builder()
            .app_key(self.app_key.as_str())
            .maybe_server_url(self.server_url.as_deref())
            .extras(self.extras.clone())
            .build()
    }
}
