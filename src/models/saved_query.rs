use serde::{Deserialize, Serialize};

/// A named query persisted by the panel. Field names match the
/// persisted JSON layout exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedQuery {
    pub id: i64,
    pub name: String,
    pub query: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSavedQuery {
    pub name: String,
    pub query: String,
}

/// Full replacement of `name` and `query`; `updated_at` is refreshed by
/// the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSavedQuery {
    pub name: String,
    pub query: String,
}
