//! The query gateway: the one component making correctness- and
//! security-sensitive decisions. It owns the shared store handle, selects
//! the filtered or raw path for each request, and maps store outcomes onto
//! the client-facing error taxonomy.
//!
//! The parameterized paths (`list`, `lookup_one`, `filtered_fetch`) and the
//! raw passthrough (`raw_query`) deliberately do not share a code path, so
//! the injection-prevention boundary stays auditable: only `raw_query`
//! submits caller-authored statement text, and only after the statement
//! validator clears it.

use std::time::Duration;

use serde_json::{Map, Value};

use crate::error::{GatewayError, GatewayResult};
use crate::filter::RecordFilter;
use crate::storage::{Record, SurveyStore};
use crate::validator::{classify, ValidationMode, Verdict};

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_LIMIT: i64 = 20;

#[derive(Clone)]
pub struct QueryGateway {
    store: SurveyStore,
    mode: ValidationMode,
    /// Optional execution-time bound for the raw path. Off by default; an
    /// unbounded query then occupies the shared connection for its full
    /// duration.
    query_timeout: Option<Duration>,
}

impl QueryGateway {
    pub fn new(store: SurveyStore, mode: ValidationMode) -> Self {
        QueryGateway {
            store,
            mode,
            query_timeout: None,
        }
    }

    pub fn with_query_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.query_timeout = timeout;
        self
    }

    /// Offset-paginated listing in the store's natural order. Absent or
    /// non-numeric `page`/`limit` fall back to 1/20.
    pub async fn list(&self, page: Option<&str>, limit: Option<&str>) -> GatewayResult<Vec<Record>> {
        let page = parse_or(page, DEFAULT_PAGE);
        let limit = parse_or(limit, DEFAULT_LIMIT);
        let offset = (page - 1).saturating_mul(limit);

        let store = self.store.clone();
        run_blocking(move || store.fetch_page(limit, offset))
            .await?
            .map_err(internal)
    }

    /// Exact-match lookup by `user_id`. Duplicate ids return the first
    /// matching row; a miss (or a non-numeric id, which can match no row)
    /// is a not-found.
    pub async fn lookup_one(&self, id: &str) -> GatewayResult<Record> {
        let user_id: i64 = id.parse().map_err(|_| GatewayError::UserNotFound)?;

        let store = self.store.clone();
        run_blocking(move || store.fetch_by_id(user_id))
            .await?
            .map_err(internal)?
            .ok_or(GatewayError::UserNotFound)
    }

    /// All rows matching the supplied filters. Unbounded result size by
    /// design; adding pagination here would change observable row counts.
    pub async fn filtered_fetch(&self, filter: RecordFilter) -> GatewayResult<Vec<Record>> {
        let store = self.store.clone();
        run_blocking(move || store.fetch_filtered(&filter))
            .await?
            .map_err(internal)
    }

    /// Validate and execute a caller-authored read statement verbatim.
    /// Execution failures surface the engine's message unmodified; clients
    /// rely on seeing the exact SQLite error text.
    pub async fn raw_query(&self, text: &str) -> GatewayResult<Vec<Map<String, Value>>> {
        if text.is_empty() {
            return Err(GatewayError::Validation(
                "Query parameter is required".to_string(),
            ));
        }

        if let Verdict::Rejected(reason) = classify(text, self.mode) {
            return Err(GatewayError::Forbidden(reason));
        }

        tracing::info!("Executing query: {}", text);

        let store = self.store.clone();
        let sql = text.to_string();
        let execution = run_blocking(move || store.execute_raw(&sql));

        let result = match self.query_timeout {
            Some(timeout) => tokio::time::timeout(timeout, execution)
                .await
                .map_err(|_| GatewayError::Timeout(timeout.as_secs()))??,
            None => execution.await?,
        };

        result.map_err(|e| {
            tracing::error!("Query error: {}", e);
            GatewayError::Execution(e.to_string())
        })
    }
}

/// Hand a store call to the blocking pool so statement execution never
/// stalls the request-handling threads. The outer error is a failed join,
/// never a store outcome.
async fn run_blocking<T>(
    f: impl FnOnce() -> rusqlite::Result<T> + Send + 'static,
) -> GatewayResult<rusqlite::Result<T>>
where
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| GatewayError::Internal(e.to_string()))
}

fn internal(e: rusqlite::Error) -> GatewayError {
    GatewayError::Internal(e.to_string())
}

fn parse_or(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|s| s.parse::<i64>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(default)
}
