//! Backing store: opening the SQLite handle and creating the relations.
//!
//! The connection is always owned by the caller and passed explicitly to
//! every operation in this crate. Dropping it closes the store.

use crate::error::{DataLoadError, Result};
use rusqlite::Connection;
use std::path::Path;
use tracing::debug;

/// Relations, in creation order. Foreign keys are declared for documentation
/// only; enforcement is switched off when the store is opened.
pub const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS movies (
        id INTEGER PRIMARY KEY,
        title TEXT NOT NULL,
        year INTEGER,
        rating REAL NULL
    );

    CREATE TABLE IF NOT EXISTS genres (
        movie_id INTEGER,
        genre TEXT,
        FOREIGN KEY (movie_id) REFERENCES movies(id)
    );

    CREATE TABLE IF NOT EXISTS actors (
        id INTEGER PRIMARY KEY,
        first_name TEXT,
        last_name TEXT,
        gender TEXT
    );

    CREATE TABLE IF NOT EXISTS roles (
        actor_id INTEGER,
        movie_id INTEGER,
        role TEXT,
        FOREIGN KEY (actor_id) REFERENCES actors(id),
        FOREIGN KEY (movie_id) REFERENCES movies(id)
    );

    CREATE TABLE IF NOT EXISTS directors (
        id INTEGER PRIMARY KEY,
        first_name TEXT,
        last_name TEXT
    );

    CREATE TABLE IF NOT EXISTS director_genres (
        director_id INTEGER,
        genre TEXT,
        FOREIGN KEY (director_id) REFERENCES directors(id)
    );

    CREATE TABLE IF NOT EXISTS my_collection (
        movie_id INTEGER PRIMARY KEY,
        location TEXT,
        my_rating REAL,
        note TEXT,
        FOREIGN KEY (movie_id) REFERENCES movies(id)
    );
"#;

/// Name of the collection relation
pub const COLLECTION_TABLE: &str = "my_collection";

/// Open (or create) a store file.
pub fn open_store(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path).map_err(|source| DataLoadError::StoreOpen {
        path: path.to_path_buf(),
        source,
    })?;
    disable_foreign_keys(&conn).map_err(|source| DataLoadError::StoreOpen {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Opened store at {}", path.display());
    Ok(conn)
}

/// Open a private in-memory store, mostly for tests.
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory().map_err(|source| DataLoadError::StoreOpen {
        path: ":memory:".into(),
        source,
    })?;
    disable_foreign_keys(&conn).map_err(|source| DataLoadError::StoreOpen {
        path: ":memory:".into(),
        source,
    })?;
    Ok(conn)
}

fn disable_foreign_keys(conn: &Connection) -> rusqlite::Result<()> {
    conn.pragma_update(None, "foreign_keys", false)
}

/// Create every relation that does not exist yet.
pub fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA).map_err(DataLoadError::Schema)?;
    debug!("Schema ready");
    Ok(())
}

/// Number of rows currently in `table`.
///
/// `table` must be one of the fixed relation names; it is spliced into the
/// statement text.
pub(crate) fn count_rows(conn: &Connection, table: &str) -> Result<i64> {
    let count = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
        row.get(0)
    })?;
    Ok(count)
}
