use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rusqlite::types::{Value as SqlValue, ValueRef};
use rusqlite::{params, params_from_iter, Connection};
use serde_json::{Map, Number, Value};

use crate::filter::RecordFilter;
use crate::storage::Record;

/// Busy timeout applied to the shared connection (ms).
const BUSY_TIMEOUT_MS: u64 = 5_000;

/// The shared SQLite handle over the `users` table.
///
/// One store is opened at startup and cloned into every request path; the
/// inner mutex serializes statement execution across concurrent requests.
/// All methods here are strictly read-only from the gateway's point of view:
/// the parameterized paths always bind caller values, and only
/// [`SurveyStore::execute_raw`] accepts caller-authored statement text, after
/// the statement validator has cleared it.
#[derive(Clone)]
pub struct SurveyStore {
    conn: Arc<Mutex<Connection>>,
}

impl SurveyStore {
    /// Open the database file and hold the handle for the process lifetime.
    pub fn open(path: impl AsRef<Path>) -> rusqlite::Result<Self> {
        let conn = Connection::open(path)?;
        conn.busy_timeout(Duration::from_millis(BUSY_TIMEOUT_MS))?;
        Ok(SurveyStore {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// One page of rows in the store's natural (insertion) order.
    pub fn fetch_page(&self, limit: i64, offset: i64) -> rusqlite::Result<Vec<Record>> {
        let conn = self.lock();
        let mut stmt = conn.prepare("SELECT * FROM users LIMIT ? OFFSET ?")?;
        let rows = stmt.query_map(params![limit, offset], |row| Record::from_row(row))?;
        rows.collect()
    }

    /// First row matching `user_id`, if any. Duplicate ids are allowed by the
    /// schema; callers get the earliest inserted match.
    pub fn fetch_by_id(&self, user_id: i64) -> rusqlite::Result<Option<Record>> {
        let conn = self.lock();
        let mut stmt = conn.prepare("SELECT * FROM users WHERE user_id = ? LIMIT 1")?;
        let mut rows = stmt.query_map(params![user_id], |row| Record::from_row(row))?;
        rows.next().transpose()
    }

    /// All rows matching the filter's predicate. An empty filter scans the
    /// whole table; no pagination is applied on this path.
    pub fn fetch_filtered(&self, filter: &RecordFilter) -> rusqlite::Result<Vec<Record>> {
        let (clause, bindings) = filter.predicate();
        let sql = match clause {
            Some(clause) => format!("SELECT * FROM users WHERE {clause}"),
            None => "SELECT * FROM users".to_string(),
        };

        let conn = self.lock();
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(bindings), |row| Record::from_row(row))?;
        rows.collect()
    }

    /// Execute caller-authored statement text verbatim and return its rows as
    /// JSON objects keyed by the statement's own column names. Sole entry
    /// point for non-parameterized SQL; callers must run the statement
    /// validator first.
    pub fn execute_raw(&self, sql: &str) -> rusqlite::Result<Vec<Map<String, Value>>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(sql)?;
        let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();

        let mut out = Vec::new();
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let mut object = Map::with_capacity(columns.len());
            for (idx, name) in columns.iter().enumerate() {
                object.insert(name.clone(), sql_to_json(row.get_ref(idx)?));
            }
            out.push(object);
        }
        Ok(out)
    }

    /// Total row count, used by the loader's summary and by tests.
    pub fn count(&self) -> rusqlite::Result<i64> {
        let conn = self.lock();
        conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Connection> {
        // A poisoned mutex means a panic mid-statement; the connection
        // itself is still usable for subsequent statements.
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Run a closure against the raw connection. Loader-only escape hatch
    /// for the one component allowed to write.
    pub fn with_connection<T>(
        &self,
        f: impl FnOnce(&Connection) -> rusqlite::Result<T>,
    ) -> rusqlite::Result<T> {
        let conn = self.lock();
        f(&conn)
    }
}

/// Parameter list bound to a predicate; owned SQLite values so the builder
/// can hand integers and text through the same list.
pub type Bindings = Vec<SqlValue>;

fn sql_to_json(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(n) => Value::Number(n.into()),
        ValueRef::Real(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
        ValueRef::Text(t) => Value::String(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => Value::String(String::from_utf8_lossy(b).into_owned()),
    }
}
