//! Collection manager: the user's personal annotations, one per movie.

use crate::error::{DataLoadError, Result, RowRejection};
use crate::parser::{parse_int, parse_rating};
use crate::types::{CollectionEntry, MovieId};
use rusqlite::{Connection, OptionalExtension, params};
use tracing::{info, warn};

/// Last write for a movie id wins.
const UPSERT_SQL: &str =
    "INSERT OR REPLACE INTO my_collection (movie_id, location, my_rating, note) VALUES (?1, ?2, ?3, ?4)";

impl CollectionEntry {
    pub fn new(
        movie_id: MovieId,
        location: impl Into<String>,
        personal_rating: f64,
        note: impl Into<String>,
    ) -> Self {
        Self {
            movie_id,
            location: location.into(),
            personal_rating,
            note: note.into(),
        }
    }
}

// Per-answer checks, so a prompt can stop at the first bad answer.

pub fn validate_movie_id(raw: &str) -> std::result::Result<MovieId, RowRejection> {
    parse_int("movie_id", raw)
}

pub fn validate_location(raw: &str) -> std::result::Result<String, RowRejection> {
    let location = raw.trim();
    if location.is_empty() {
        return Err(RowRejection::EmptyField { field: "location" });
    }
    Ok(location.to_string())
}

pub fn validate_personal_rating(raw: &str) -> std::result::Result<f64, RowRejection> {
    parse_rating("personal_rating", raw)
}

/// Insert or replace the collection entry for `entry.movie_id`.
///
/// No range or existence checks happen here. Returns `Ok(false)` when the
/// store refused the write (logged, not fatal); only a statement that cannot
/// be prepared is an error.
pub fn add_to_collection(conn: &Connection, entry: &CollectionEntry) -> Result<bool> {
    let mut stmt = conn
        .prepare(UPSERT_SQL)
        .map_err(|source| DataLoadError::Prepare {
            table: "my_collection",
            source,
        })?;

    match stmt.execute(params![
        entry.movie_id,
        entry.location,
        entry.personal_rating,
        entry.note
    ]) {
        Ok(_) => {
            info!("Movie {} added to collection", entry.movie_id);
            Ok(true)
        }
        Err(e) => {
            warn!("Collection insert failed for movie id={}: {}", entry.movie_id, e);
            Ok(false)
        }
    }
}

/// Look up the entry for one movie, if any.
pub fn get_entry(conn: &Connection, movie_id: MovieId) -> Result<Option<CollectionEntry>> {
    let entry = conn
        .query_row(
            "SELECT movie_id, location, my_rating, note FROM my_collection WHERE movie_id = ?1",
            params![movie_id],
            |row| {
                Ok(CollectionEntry {
                    movie_id: row.get(0)?,
                    location: row.get(1)?,
                    personal_rating: row.get(2)?,
                    note: row.get(3)?,
                })
            },
        )
        .optional()?;
    Ok(entry)
}
