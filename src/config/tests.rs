use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use crate::access::Role;
use crate::query::{GroupKey, SortDirection, SortKey};
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_trackshelf_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("TRACKSHELF_CONFIG_PATH", "/tmp/trackshelf-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/trackshelf-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    assert_eq!(
        default_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("trackshelf")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("trackshelf")
            .join("config.toml")
    );
}

#[test]
fn defaults_are_admin_title_ascending_ungrouped() {
    let s = Settings::default();
    assert_eq!(s.access.role, Role::Admin);
    assert_eq!(s.query.sort_key, SortKey::Title);
    assert_eq!(s.query.sort_direction, SortDirection::Ascending);
    assert_eq!(s.query.group_by, GroupKey::None);
    assert!(s.storage.path.is_none());
    assert_eq!(s.log.level_filter(), Some(log::LevelFilter::Warn));
    assert!(s.validate().is_ok());
}

#[test]
fn settings_load_from_config_file_and_parse_aliases() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[access]
role = "viewer"

[storage]
path = "/tmp/trackshelf-catalog.json"

[query]
sort_key = "year"
sort_direction = "desc"
group_by = "artist"

[ui]
header_text = "hello"
show_duration = true

[log]
level = "debug"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("TRACKSHELF_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("TRACKSHELF__ACCESS__ROLE");

    let s = Settings::load().unwrap();
    assert_eq!(s.access.role, Role::User);
    assert_eq!(
        s.storage.path.as_deref(),
        Some(std::path::Path::new("/tmp/trackshelf-catalog.json"))
    );
    assert_eq!(s.query.sort_key, SortKey::Year);
    assert_eq!(s.query.sort_direction, SortDirection::Descending);
    assert_eq!(s.query.group_by, GroupKey::Artist);
    assert_eq!(s.ui.header_text, "hello");
    assert!(s.ui.show_duration);
    assert_eq!(s.log.level_filter(), Some(log::LevelFilter::Debug));
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[access]
role = "admin"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("TRACKSHELF_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("TRACKSHELF__ACCESS__ROLE", "user");

    let s = Settings::load().unwrap();
    assert_eq!(s.access.role, Role::User);
}

#[test]
fn validate_rejects_unknown_log_level() {
    let mut s = Settings::default();
    s.log.level = "loud".into();
    assert!(s.validate().is_err());
}
