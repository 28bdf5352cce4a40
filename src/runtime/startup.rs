use log::{info, warn};

use crate::app::App;
use crate::catalog::{CatalogStore, FileStorage, MemoryStorage, Storage, resolve_catalog_path};
use crate::config;
use crate::query::QueryParams;

/// Pick the catalog storage: the configured or XDG file, or a session-only
/// slot when no location can be resolved.
pub fn open_storage(settings: &config::StorageSettings) -> Box<dyn Storage> {
    match resolve_catalog_path(settings.path.as_deref()) {
        Some(path) => {
            info!("catalog file: {}", path.display());
            Box::new(FileStorage::new(path))
        }
        None => {
            warn!("no catalog location (set storage.path or HOME); changes will not be saved");
            Box::new(MemoryStorage::new())
        }
    }
}

/// Initial query parameters from the `[query]` section. Filters start empty.
pub fn initial_params(settings: &config::QuerySettings) -> QueryParams {
    QueryParams {
        sort_key: settings.sort_key,
        direction: settings.sort_direction,
        group_by: settings.group_by,
        ..QueryParams::default()
    }
}

/// Build the `App` for a session from `settings`.
pub fn build_app(settings: &config::Settings, storage: Box<dyn Storage>) -> App {
    let store = CatalogStore::load(storage);
    if store.is_empty() {
        info!("catalog is empty; press o to add a track or R to restore the defaults");
    }
    let capabilities = settings.access.role.capabilities();
    info!(
        "starting with {} tracks as {:?}",
        store.len(),
        settings.access.role
    );
    App::new(store, capabilities, initial_params(&settings.query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::Role;
    use crate::query::{GroupKey, SortKey};

    #[test]
    fn build_app_applies_role_and_query_defaults() {
        let mut settings = config::Settings::default();
        settings.access.role = Role::User;
        settings.query.sort_key = SortKey::Year;
        settings.query.group_by = GroupKey::Album;

        let app = build_app(&settings, Box::new(MemoryStorage::new()));
        assert!(!app.can_mutate());
        assert_eq!(app.params.sort_key, SortKey::Year);
        assert_eq!(app.params.group_by, GroupKey::Album);
        assert!(!app.params.has_filters());
        assert_eq!(app.tracks().len(), 10);
    }

    #[test]
    fn open_storage_uses_configured_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        let settings = config::StorageSettings {
            path: Some(path.clone()),
        };

        let storage = open_storage(&settings);
        let store = CatalogStore::load(storage);
        assert_eq!(store.len(), 10);
        assert!(path.exists());
    }
}
