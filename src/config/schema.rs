use std::path::PathBuf;

use serde::Deserialize;

use crate::access::Role;
use crate::query::{GroupKey, SortDirection, SortKey};

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/trackshelf/config.toml` or `~/.config/trackshelf/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `TRACKSHELF__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub access: AccessSettings,
    pub storage: StorageSettings,
    pub query: QuerySettings,
    pub ui: UiSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AccessSettings {
    /// `admin` may add, delete and reset; `user` only browses.
    pub role: Role,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Catalog file. Defaults to `$XDG_DATA_HOME/trackshelf/catalog.json`.
    pub path: Option<PathBuf>,
}

/// Initial query state. Filters always start empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct QuerySettings {
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
    pub group_by: GroupKey,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Whether the track list shows a duration column.
    pub show_duration: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ trackshelf ~ ".to_string(),
            show_duration: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl LogSettings {
    pub fn level_filter(&self) -> Option<log::LevelFilter> {
        self.level.trim().parse().ok()
    }
}
