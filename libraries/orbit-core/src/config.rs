//! Client configuration

use crate::error::{CoreError, Result};
use crate::types::TrackSort;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix (`ORBIT_PLAYER__SKIP_INTERVAL_SECS=15`)
pub const ENV_PREFIX: &str = "ORBIT";

/// Client configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Player settings
    #[serde(default)]
    pub player: PlayerSettings,

    /// Client-side storage settings
    #[serde(default)]
    pub storage: StorageSettings,

    /// Feed settings
    #[serde(default)]
    pub feed: FeedSettings,
}

/// Player settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlayerSettings {
    /// Seconds moved by skip-forward / skip-back when no amount is given
    #[serde(default = "default_skip_interval_secs")]
    pub skip_interval_secs: f64,
}

/// Client-side storage settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StorageSettings {
    /// Directory for the file-backed key/value store
    #[serde(default = "default_liked_dir")]
    pub liked_dir: PathBuf,

    /// Key prefix for per-user liked track lists
    #[serde(default = "default_liked_key_prefix")]
    pub liked_key_prefix: String,
}

/// Feed settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct FeedSettings {
    /// Sort order used when the UI has not picked one
    #[serde(default)]
    pub default_sort: TrackSort,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            skip_interval_secs: default_skip_interval_secs(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            liked_dir: default_liked_dir(),
            liked_key_prefix: default_liked_key_prefix(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from `orbit.toml` (if present) and environment
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("orbit.toml"))
    }

    /// Load configuration from `path` (if present) and environment
    ///
    /// Environment variables override file values, e.g.
    /// `ORBIT_STORAGE__LIKED_KEY_PREFIX=liked`.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut settings = config::Config::builder();

        if path.exists() {
            settings = settings.add_source(config::File::from(path));
        }

        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let skip = self.player.skip_interval_secs;
        if !skip.is_finite() || skip <= 0.0 {
            return Err(CoreError::Config(format!(
                "player.skip_interval_secs must be a positive number of seconds, got {}",
                skip
            )));
        }

        if self.storage.liked_key_prefix.trim().is_empty() {
            return Err(CoreError::Config(
                "storage.liked_key_prefix must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_skip_interval_secs() -> f64 {
    10.0
}

fn default_liked_dir() -> PathBuf {
    PathBuf::from("./data/liked")
}

fn default_liked_key_prefix() -> String {
    "likedAudios".to_string()
}
