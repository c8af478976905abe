use serde::Deserialize;

use crate::error::StoreError;
use crate::models::{CreateSavedQuery, SavedQuery, UpdateSavedQuery};
use crate::storage::KvStorage;

/// Storage key of the saved-query list.
const QUERIES_KEY: &str = "queries";

/// Persisted payload shapes. The canonical shape is the flat array; the
/// wrapped shape is legacy input that older panel builds wrote, accepted
/// on read and rewritten canonically on the next write.
#[derive(Deserialize)]
#[serde(untagged)]
enum PersistedQueries {
    Flat(Vec<SavedQuery>),
    Wrapped { queries: Vec<SavedQuery> },
}

impl PersistedQueries {
    fn into_queries(self) -> Vec<SavedQuery> {
        match self {
            PersistedQueries::Flat(queries) => queries,
            PersistedQueries::Wrapped { queries } => queries,
        }
    }
}

/// CRUD over the persisted saved-query list, plus best-effort
/// persistence semantics: unknown-id failures propagate, storage
/// failures are logged and absorbed (reads degrade to an empty list,
/// writes to no-ops). Every operation reads the full list, mutates a
/// local copy and writes the full list back.
pub struct SavedQueryStore {
    storage: Box<dyn KvStorage>,
}

impl SavedQueryStore {
    pub fn new(storage: Box<dyn KvStorage>) -> Self {
        SavedQueryStore { storage }
    }

    /// All saved queries in storage order. Never fails the caller.
    pub fn list(&self) -> Vec<SavedQuery> {
        self.read_all()
    }

    /// Look up a single saved query by id.
    pub fn get(&self, id: i64) -> Option<SavedQuery> {
        self.read_all().into_iter().find(|q| q.id == id)
    }

    /// Create a saved query with a fresh id and current timestamps,
    /// append it to the persisted list and return it.
    pub fn create(&self, input: CreateSavedQuery) -> SavedQuery {
        let mut queries = self.read_all();
        let now = chrono::Utc::now().to_rfc3339();

        let record = SavedQuery {
            id: next_id(&queries),
            name: input.name,
            query: input.query,
            created_at: now.clone(),
            updated_at: now,
        };

        queries.push(record.clone());
        self.write_all(&queries);
        record
    }

    /// Replace `name` and `query` of the record with the given id and
    /// refresh its `updated_at`. The list is left untouched when the id
    /// is unknown.
    pub fn update(&self, id: i64, input: UpdateSavedQuery) -> Result<SavedQuery, StoreError> {
        let mut queries = self.read_all();

        let record = queries
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or(StoreError::NotFound(id))?;

        record.name = input.name;
        record.query = input.query;
        record.updated_at = chrono::Utc::now().to_rfc3339();
        let updated = record.clone();

        self.write_all(&queries);
        Ok(updated)
    }

    /// Remove exactly the record with the given id.
    pub fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut queries = self.read_all();

        let index = queries
            .iter()
            .position(|q| q.id == id)
            .ok_or(StoreError::NotFound(id))?;

        queries.remove(index);
        self.write_all(&queries);
        Ok(())
    }

    fn read_all(&self) -> Vec<SavedQuery> {
        match self.storage.get(QUERIES_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<PersistedQueries>(&raw) {
                Ok(persisted) => persisted.into_queries(),
                Err(e) => {
                    log::error!("Failed to parse saved queries: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                log::error!("Failed to read saved queries: {}", e);
                Vec::new()
            }
        }
    }

    fn write_all(&self, queries: &[SavedQuery]) {
        match serde_json::to_string(queries) {
            Ok(json) => {
                if let Err(e) = self.storage.set(QUERIES_KEY, &json) {
                    log::error!("Failed to write saved queries: {}", e);
                }
            }
            Err(e) => log::error!("Failed to serialize saved queries: {}", e),
        }
    }
}

/// Monotonic id: one past the largest id currently in the list. Fresh
/// ids can never collide with a live record, unlike the clock-derived
/// ids older panel builds used.
fn next_id(queries: &[SavedQuery]) -> i64 {
    queries.iter().map(|q| q.id).max().unwrap_or(0) + 1
}
