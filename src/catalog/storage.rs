//! Key/value persistence boundary for the catalog payload.

use std::cell::{Cell, RefCell};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use log::{debug, warn};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("storage is unavailable")]
    Unavailable,
}

/// A single slot holding the serialized catalog.
pub trait Storage {
    /// Return the last written payload, or `None` when nothing was written
    /// or the slot cannot be read.
    fn read(&self) -> Option<String>;

    /// Replace the slot contents with `payload`.
    fn write(&mut self, payload: &str) -> Result<(), StorageError>;
}

/// Catalog payload kept in one JSON file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn io_err(&self, source: io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl Storage for FileStorage {
    fn read(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(s) => Some(s),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!("failed to read catalog from {}: {e}", self.path.display());
                None
            }
        }
    }

    fn write(&mut self, payload: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
        }

        // Write next to the target, then rename over it: readers see either
        // the old payload or the new one.
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, payload).map_err(|e| self.io_err(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            self.io_err(e)
        })?;

        debug!("wrote {} bytes to {}", payload.len(), self.path.display());
        Ok(())
    }
}

/// In-process slot. Clones share the same slot, so a test can keep a handle
/// and inspect what a store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Rc<RefCell<Option<String>>>,
    fail_writes: Rc<Cell<bool>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot pre-filled with `payload`.
    #[cfg(test)]
    pub fn with_payload(payload: impl Into<String>) -> Self {
        let s = Self::default();
        *s.slot.borrow_mut() = Some(payload.into());
        s
    }

    /// Make every following write fail with [`StorageError::Unavailable`].
    #[cfg(test)]
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Current slot contents.
    pub fn payload(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl Storage for MemoryStorage {
    fn read(&self) -> Option<String> {
        self.payload()
    }

    fn write(&mut self, payload: &str) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(StorageError::Unavailable);
        }
        *self.slot.borrow_mut() = Some(payload.to_string());
        Ok(())
    }
}

/// Resolve the catalog file from an explicit setting or XDG defaults:
/// `$XDG_DATA_HOME/trackshelf/catalog.json`, else
/// `~/.local/share/trackshelf/catalog.json`.
pub fn resolve_catalog_path(configured: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = configured {
        return Some(p.to_path_buf());
    }
    default_catalog_path()
}

pub fn default_catalog_path() -> Option<PathBuf> {
    let data_home = if let Some(xdg) = std::env::var_os("XDG_DATA_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".local").join("share"))
    };

    data_home.map(|d| d.join("trackshelf").join("catalog.json"))
}
