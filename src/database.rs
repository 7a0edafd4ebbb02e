//! Database initialization and table definitions
//!
//! This module handles the setup and configuration of the embedded redb database.
//! It defines the database tables and provides initialization functions.

use chrono::{DateTime, Utc};
use redb::{Database, TableDefinition};
use std::sync::Arc;

/// Registered users, keyed by username
///
/// Key: username as string
/// Value: JSON-serialized User as string
///
/// Example:
/// - Key: "alice"
/// - Value: '{"username":"alice","tier":1,"requestCount":3}'
pub const TABLE_USERS: TableDefinition<&str, &str> = TableDefinition::new("users_v1");

/// Main table for storing URL records
///
/// Key: short identifier as string
/// Value: JSON-serialized UrlRecord as string
///
/// Example:
/// - Key: "b1"
/// - Value: '{"shortId":"b1","longUrl":"https://example.com",...}'
pub const TABLE_URLS: TableDefinition<&str, &str> = TableDefinition::new("urls_v1");

/// Index table for efficient per-user history queries
///
/// This secondary index enables fast chronological lookups of the URLs
/// belonging to a specific user without scanning the main table.
///
/// Key: Composite key in format "{username}:{timestamp_micros}:{short_id}"
/// Value: JSON-serialized UrlRecord as string
///
/// Example:
/// - Key: "alice:1705501234567890:b1"
/// - Value: '{"shortId":"b1","username":"alice",...}'
///
/// The timestamp keeps the index in chronological order; the trailing
/// short id keeps keys unique when two records for the same user land in
/// the same microsecond.
pub const TABLE_USER_INDEX: TableDefinition<&str, &str> = TableDefinition::new("user_index_v1");

/// Allocation counters, keyed by counter name
///
/// Holds the monotonic sequence that seeds generated short identifiers,
/// under the fixed key "url_count". The value only ever increases;
/// collisions during allocation consume extra increments without
/// consuming a URL record.
pub const TABLE_COUNTERS: TableDefinition<&str, u64> = TableDefinition::new("counters_v1");

/// Fixed key of the short-identifier allocation counter
pub const URL_COUNT_KEY: &str = "url_count";

/// Builds the composite key for the per-user history index
///
/// The short id suffix makes the key unique even when two records for the
/// same user carry the same microsecond timestamp; without it the second
/// insert would silently replace the first index entry.
pub fn history_index_key(username: &str, created_at: &DateTime<Utc>, short_id: &str) -> String {
    format!(
        "{}:{}:{}",
        username,
        created_at.timestamp_micros(),
        short_id
    )
}

/// Application state shared across all request handlers
///
/// This struct wraps the database instance in an Arc for thread-safe sharing
/// across async handlers in the Axum web framework.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe reference to the embedded database
    pub db: Arc<Database>,
}

/// Initializes the embedded database and creates required tables
///
/// This function:
/// 1. Creates or opens the database file at the specified path
/// 2. Opens the users, URLs, history-index and counter tables
/// 3. Commits the transaction to ensure tables are persisted
///
/// # Arguments
///
/// * `db_path` - File path where the database should be stored (e.g., "data.db")
///
/// # Returns
///
/// * `Ok(Database)` - Successfully initialized database instance
/// * `Err(redb::Error)` - Database initialization error
///
/// # Example
///
/// ```no_run
/// # use shortlink::database::init_db;
/// let db = init_db("data.db").expect("Failed to initialize database");
/// ```
pub fn init_db(db_path: &str) -> Result<Database, redb::Error> {
    // Create or open the database file
    let db = Database::create(db_path)?;

    // Begin a write transaction to create tables
    let write_txn = db.begin_write()?;
    {
        write_txn.open_table(TABLE_USERS)?;
        write_txn.open_table(TABLE_URLS)?;
        write_txn.open_table(TABLE_USER_INDEX)?;
        write_txn.open_table(TABLE_COUNTERS)?;
    }

    // Commit the transaction to persist the table structures
    write_txn.commit()?;

    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;
    use redb::{ReadableDatabase, ReadableTable};
    use tempfile::NamedTempFile;

    #[test]
    fn history_index_keys_distinct_within_same_microsecond() {
        let now = Utc::now();
        assert_ne!(
            history_index_key("alice", &now, "1"),
            history_index_key("alice", &now, "2")
        );
    }

    #[test]
    fn same_microsecond_records_both_survive_in_index() {
        let temp = NamedTempFile::new().expect("Failed to create temp file");
        let db = init_db(temp.path().to_str().unwrap()).expect("Failed to init test db");

        let now = Utc::now();
        let write_txn = db.begin_write().unwrap();
        {
            let mut index = write_txn.open_table(TABLE_USER_INDEX).unwrap();
            index
                .insert(history_index_key("alice", &now, "1").as_str(), "{}")
                .unwrap();
            index
                .insert(history_index_key("alice", &now, "2").as_str(), "{}")
                .unwrap();
        }
        write_txn.commit().unwrap();

        let read_txn = db.begin_read().unwrap();
        let index = read_txn.open_table(TABLE_USER_INDEX).unwrap();
        let count = index.range("alice:".."alice:{").unwrap().count();
        assert_eq!(count, 2);
    }
}
