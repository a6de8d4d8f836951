//! Player configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Length of one step transition, in milliseconds
    pub animation_ms: u64,
    /// Frame rate of the playback loop
    pub fps: u64,
    /// Show slide titles in the header bar
    pub show_title: bool,
    /// Wrap code slides at the viewport width instead of clipping
    pub wrap_code: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            animation_ms: 1500,
            fps: 60,
            show_title: true,
            wrap_code: false,
        }
    }
}

impl Config {
    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_ms.max(1))
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_millis(1000 / self.fps.clamp(1, 240))
    }
}

pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("glide").join("config.toml"))
}

/// Load from the given path, or the default location. A missing file just
/// means defaults.
pub fn load(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match default_path() {
            Some(p) => p,
            None => return Ok(Config::default()),
        },
    };
    if !path.exists() {
        return Ok(Config::default());
    }
    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("reading config {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
}
