use thiserror::Error;

/// Failures of the underlying key-value persistence.
///
/// These never cross the store boundary: the saved-query store absorbs
/// them (logged, degraded to empty reads or no-op writes) because the
/// persisted data is convenience data the panel can live without.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage payload is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Caller-facing store failures. These must be surfaced to the user.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("saved query {0} not found")]
    NotFound(i64),
}

/// Delegated execution failed. The backend owns the semantics of the
/// failure, so it passes through untouched for the presentation layer
/// to interpret.
#[derive(Debug, Error)]
pub enum ExecuteError {
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Internal router failures. Logged, the navigation attempt is
/// abandoned, the application keeps running.
#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("malformed navigation target: {0}")]
    MalformedTarget(String),

    #[error("redirect loop while resolving {0}")]
    RedirectLoop(String),

    #[error("navigation to {0} not permitted")]
    NotPermitted(String),

    #[error("no route matches {0}")]
    NoMatch(String),
}
