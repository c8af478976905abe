use std::time::Duration;

use crate::error::ExecuteError;
use crate::executor::QueryExecutor;
use crate::router::Router;
use crate::settings::Settings;
use crate::storage::KvStorage;
use crate::store::SavedQueryStore;

/// The long-lived components of the panel, wired once at startup and
/// shared with the presentation layer.
pub struct AppState {
    pub store: SavedQueryStore,
    pub executor: QueryExecutor,
    pub router: Router,
}

impl AppState {
    pub fn new(settings: &Settings, storage: Box<dyn KvStorage>) -> Result<Self, ExecuteError> {
        let executor = QueryExecutor::new(
            &settings.execute_url,
            Duration::from_secs(settings.request_timeout_seconds),
        )?;

        Ok(AppState {
            store: SavedQueryStore::new(storage),
            executor,
            router: Router::with_default_routes(&settings.app_name),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreateSavedQuery, View};
    use crate::storage::MemoryStorage;

    #[test]
    fn wires_all_components_from_settings() {
        let settings = Settings::default();
        let state = AppState::new(&settings, Box::new(MemoryStorage::new())).unwrap();

        let created = state.store.create(CreateSavedQuery {
            name: "q1".to_string(),
            query: "select 1".to_string(),
        });
        assert_eq!(state.store.list(), vec![created]);

        let nav = state.router.navigate("/", "/queries").unwrap();
        assert_eq!(nav.view, View::Queries);
        assert_eq!(nav.title, "Запросы | PgPanel");
    }
}
