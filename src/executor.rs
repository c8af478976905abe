use std::time::Duration;

use serde::Serialize;

use crate::error::ExecuteError;

#[derive(Debug, Serialize)]
struct ExecuteRequest<'a> {
    query: &'a str,
}

/// Forwards query text to the remote execution endpoint. The backend
/// owns execution semantics entirely; this side only ships the literal
/// text and hands the response body back verbatim.
pub struct QueryExecutor {
    client: reqwest::Client,
    execute_url: String,
}

impl QueryExecutor {
    pub fn new(execute_url: &str, timeout: Duration) -> Result<Self, ExecuteError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(QueryExecutor {
            client,
            execute_url: execute_url.to_string(),
        })
    }

    /// Execute a query remotely and return the raw response body.
    /// Transport failures and non-success statuses propagate untouched.
    pub async fn execute(&self, query: &str) -> Result<String, ExecuteError> {
        let response = self
            .client
            .post(&self.execute_url)
            .json(&ExecuteRequest { query })
            .send()
            .await?
            .error_for_status()?;

        Ok(response.text().await?)
    }
}
