//! Core front-end library for the PgPanel PostgreSQL admin panel:
//! saved-query persistence with delegated execution, and the panel's
//! navigation service. The presentation layer (views/components) lives
//! elsewhere and consumes this crate.

pub mod error;
pub mod executor;
pub mod models;
pub mod router;
pub mod settings;
pub mod state;
pub mod storage;
pub mod store;

pub use error::{ExecuteError, NavigationError, StorageError, StoreError};
pub use executor::QueryExecutor;
pub use models::{CreateSavedQuery, Route, RouteMeta, SavedQuery, UpdateSavedQuery, View};
pub use router::{default_routes, Navigation, NavigationEvent, Router};
pub use settings::Settings;
pub use state::AppState;
pub use storage::{FileStorage, KvStorage, MemoryStorage};
pub use store::SavedQueryStore;
