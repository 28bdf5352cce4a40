use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use crate::catalog::resolve_catalog_path;
use crate::config;

/// Load settings, falling back to defaults on any problem. The second value
/// describes the problem so it can be logged once logging is up.
pub fn load_settings() -> (config::Settings, Option<String>) {
    match config::Settings::load() {
        Ok(s) => match s.validate() {
            Ok(()) => (s, None),
            Err(msg) => (
                config::Settings::default(),
                Some(format!("invalid config, using defaults: {msg}")),
            ),
        },
        // Config is optional; failures should not prevent the app from starting.
        Err(e) => (
            config::Settings::default(),
            Some(format!("failed to load config, using defaults: {e}")),
        ),
    }
}

/// Log file kept beside the catalog file.
pub fn log_file_path(storage: &config::StorageSettings) -> Option<PathBuf> {
    resolve_catalog_path(storage.path.as_deref()).map(|p| p.with_file_name("trackshelf.log"))
}

/// Open `path` for appending, creating it and its directory as needed.
pub fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the `colog` logger at the configured level.
///
/// The terminal belongs to the interface while it runs, so records go to
/// `log_path`. Stderr is used only when that file cannot be opened.
pub fn init_logging(settings: &config::LogSettings, log_path: Option<&Path>) {
    let mut clog = colog::default_builder();
    clog.filter(
        None,
        settings.level_filter().unwrap_or(log::LevelFilter::Warn),
    );

    let mut fallback = None;
    match log_path.map(|p| (p, open_log_file(p))) {
        Some((_, Ok(file))) => {
            clog.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Some((p, Err(e))) => {
            fallback = Some(format!(
                "cannot open log file {}: {e}; logging to stderr",
                p.display()
            ));
        }
        None => {}
    }

    if let Err(e) = clog.try_init() {
        eprintln!("trackshelf: logger already initialised: {e}");
        return;
    }
    if let Some(msg) = fallback {
        log::warn!("{msg}");
    }
}
