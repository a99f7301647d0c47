use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rdev::Key;
use serde::{Deserialize, Serialize};

use crate::driver::Timings;
use crate::error::{Error, Result};

pub const HOTKEY_CHOICES: [(&str, Key); 12] = [
    ("F1", Key::F1),
    ("F2", Key::F2),
    ("F3", Key::F3),
    ("F4", Key::F4),
    ("F5", Key::F5),
    ("F6", Key::F6),
    ("F7", Key::F7),
    ("F8", Key::F8),
    ("F9", Key::F9),
    ("F10", Key::F10),
    ("F11", Key::F11),
    ("F12", Key::F12),
];

const DEFAULT_HOTKEY: Key = Key::F6;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub start_delay_ms: u64,
    pub type_delay_ms: u64,
    pub clear_delay_ms: u64,
    pub keystroke_spacing_ms: u64,
    pub hotkey: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            start_delay_ms: 500,
            type_delay_ms: 1000,
            clear_delay_ms: 500,
            keystroke_spacing_ms: 25,
            hotkey: "F6".to_string(),
        }
    }
}

impl AppConfig {
    pub fn timings(&self) -> Timings {
        Timings {
            start_delay: Duration::from_millis(self.start_delay_ms),
            type_delay: Duration::from_millis(self.type_delay_ms),
            clear_delay: Duration::from_millis(self.clear_delay_ms),
            keystroke_spacing: Duration::from_millis(self.keystroke_spacing_ms.max(1)),
        }
    }

    /// Unknown names fall back to F6.
    pub fn hotkey_key(&self) -> Key {
        string_to_key(&self.hotkey).unwrap_or(DEFAULT_HOTKEY)
    }
}

pub fn string_to_key(s: &str) -> Option<Key> {
    HOTKEY_CHOICES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(s))
        .map(|(_, key)| *key)
}

pub fn get_config_path() -> PathBuf {
    let mut path = dirs::config_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    path.push("code-guesser");
    path.push("config.json");
    path
}

/// A missing file is not an error; it yields the defaults.
pub fn load_from(path: &Path) -> Result<AppConfig> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(AppConfig::default()),
        Err(source) => {
            return Err(Error::ConfigIo {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    serde_json::from_str(&data).map_err(|source| Error::ConfigFormat {
        path: path.to_path_buf(),
        source,
    })
}

pub fn save_to(path: &Path, config: &AppConfig) -> Result<()> {
    let io_err = |source| Error::ConfigIo {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let json = serde_json::to_string_pretty(config).map_err(|source| Error::ConfigFormat {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(io_err)
}

pub fn load_config() -> AppConfig {
    let path = get_config_path();
    match load_from(&path) {
        Ok(config) => {
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        Err(error) => {
            tracing::warn!(%error, "using default config");
            AppConfig::default()
        }
    }
}

pub fn save_config(config: &AppConfig) {
    let path = get_config_path();
    if let Err(error) = save_to(&path, config) {
        tracing::warn!(%error, "failed to save config");
    }
}
