//! TOML-backed desktop configuration.
//!
//! Every field is optional; omitted values fall back to the stock window policy, a 40px
//! taskbar and the built-in app registry.
//!
//! ```toml
//! [window]
//! default_position = { x = 80, y = 60 }
//! min_size = { width = 320, height = 240 }
//!
//! [taskbar]
//! height = 48
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::apps::{AppDescriptor, AppRegistry};
use crate::window_manager::WindowPolicy;

/// Height of the chrome strip a maximized window leaves uncovered.
pub const DEFAULT_TASKBAR_HEIGHT: i32 = 40;

#[derive(Debug, Error)]
/// Failures loading or validating a [`DesktopConfig`].
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid desktop config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskbarConfig {
    pub height: i32,
}

impl Default for TaskbarConfig {
    fn default() -> Self {
        Self {
            height: DEFAULT_TASKBAR_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DesktopConfig {
    pub window: WindowPolicy,
    pub taskbar: TaskbarConfig,
    /// Replaces the built-in registry when present.
    pub apps: Option<Vec<AppDescriptor>>,
}

impl DesktopConfig {
    /// Parses and validates configuration text.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Self::parse(raw, "inline config")
    }

    /// Reads, parses and validates a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        info!("loading desktop config from {}", path.display());
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw, &path.display().to_string())
    }

    fn parse(raw: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw).map_err(|source| ConfigError::Parse {
            origin: origin.to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let min = self.window.min_size;
        if min.width <= 0 || min.height <= 0 {
            return Err(ConfigError::Invalid(format!(
                "window.min_size must be positive, got {}x{}",
                min.width, min.height
            )));
        }
        let origin = self.window.default_position;
        if origin.x < 0 || origin.y < 0 {
            return Err(ConfigError::Invalid(format!(
                "window.default_position must not be negative, got ({}, {})",
                origin.x, origin.y
            )));
        }
        if self.taskbar.height < 0 {
            return Err(ConfigError::Invalid(format!(
                "taskbar.height must not be negative, got {}",
                self.taskbar.height
            )));
        }

        if let Some(apps) = &self.apps {
            let mut seen = HashSet::new();
            for app in apps {
                if app.id.as_str().is_empty() {
                    return Err(ConfigError::Invalid("app id must not be empty".to_string()));
                }
                if !seen.insert(app.id.as_str()) {
                    return Err(ConfigError::Invalid(format!("duplicate app id `{}`", app.id)));
                }
                if app.default_size.width <= 0 || app.default_size.height <= 0 {
                    return Err(ConfigError::Invalid(format!(
                        "app `{}` has a non-positive default size",
                        app.id
                    )));
                }
            }
        }
        Ok(())
    }

    /// Registry the runtime should use.
    pub fn registry(&self) -> AppRegistry {
        match &self.apps {
            Some(apps) => AppRegistry::from_descriptors(apps.clone()),
            None => AppRegistry::builtin(),
        }
    }
}
