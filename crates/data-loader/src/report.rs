//! Read-only aggregate queries over a populated store.
//!
//! These are straight SQL aggregations; the only work done here is mapping
//! rows into typed structs for the caller to render.

use crate::error::Result;
use crate::store::{COLLECTION_TABLE, count_rows};
use crate::types::{EntityKind, MovieId};
use rusqlite::{Connection, params};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreRating {
    pub genre: String,
    /// `None` when no movie tagged with the genre has a rating
    pub avg_rating: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActorRoleCount {
    pub actor: String,
    pub roles: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectorGenreCount {
    pub director: String,
    pub genre: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatedTitle {
    pub title: String,
    pub rating: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableCount {
    pub table: &'static str,
    pub rows: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovieMatch {
    pub id: MovieId,
    pub title: String,
    pub year: Option<i32>,
}

/// A collection entry joined with its movie title.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionItem {
    pub title: String,
    pub location: String,
    pub personal_rating: f64,
    pub note: String,
}

/// Genres ordered by the average rating of their movies.
pub fn top_genres(conn: &Connection, limit: usize) -> Result<Vec<GenreRating>> {
    let mut stmt = conn.prepare(
        "SELECT g.genre, AVG(m.rating) AS avg_rating
         FROM genres g
         JOIN movies m ON g.movie_id = m.id
         GROUP BY g.genre
         ORDER BY avg_rating DESC
         LIMIT ?1",
    )?;
    let rows = stmt
        .query_map(params![limit as i64], |row| {
            Ok(GenreRating {
                genre: row.get(0)?,
                avg_rating: row.get(1)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

/// Actors ordered by how many roles they have.
pub fn top_actors(conn: &Connection, limit: usize) -> Result<Vec<ActorRoleCount>> {
    let mut stmt = conn.prepare(
        "SELECT a.first_name || ' ' || a.last_name AS actor, COUNT(*) AS roles
         FROM roles r
         JOIN actors a ON r.actor_id = a.id
         GROUP BY actor
         ORDER BY roles DESC
         LIMIT ?1",
    )?;
    let rows = stmt
        .query_map(params![limit as i64], |row| {
            Ok(ActorRoleCount {
                actor: row.get(0)?,
                roles: row.get(1)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

/// (director, genre) pairs ordered by how often they occur.
pub fn director_genre_preferences(
    conn: &Connection,
    limit: usize,
) -> Result<Vec<DirectorGenreCount>> {
    let mut stmt = conn.prepare(
        "SELECT d.first_name || ' ' || d.last_name AS director, dg.genre, COUNT(*) AS count
         FROM director_genres dg
         JOIN directors d ON dg.director_id = d.id
         GROUP BY director, dg.genre
         ORDER BY count DESC
         LIMIT ?1",
    )?;
    let rows = stmt
        .query_map(params![limit as i64], |row| {
            Ok(DirectorGenreCount {
                director: row.get(0)?,
                genre: row.get(1)?,
                count: row.get(2)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

/// Highest-rated movies tagged with `genre` (exact match).
pub fn top_movies_by_genre(conn: &Connection, genre: &str, limit: usize) -> Result<Vec<RatedTitle>> {
    let mut stmt = conn.prepare(
        "SELECT m.title, m.rating
         FROM movies m
         JOIN genres g ON m.id = g.movie_id
         WHERE g.genre = ?1
         ORDER BY m.rating DESC
         LIMIT ?2",
    )?;
    let rows = stmt
        .query_map(params![genre, limit as i64], |row| {
            Ok(RatedTitle {
                title: row.get(0)?,
                rating: row.get(1)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

/// Row counts for every relation, collection last.
pub fn table_counts(conn: &Connection) -> Result<Vec<TableCount>> {
    let tables = EntityKind::ALL
        .iter()
        .map(|kind| kind.table())
        .chain(std::iter::once(COLLECTION_TABLE));

    let mut counts = Vec::new();
    for table in tables {
        counts.push(TableCount {
            table,
            rows: count_rows(conn, table)?,
        });
    }
    Ok(counts)
}

/// Movies whose title contains `fragment` (SQL `LIKE`, so ASCII
/// case-insensitive).
pub fn find_movies(conn: &Connection, fragment: &str) -> Result<Vec<MovieMatch>> {
    let mut stmt = conn.prepare("SELECT id, title, year FROM movies WHERE title LIKE ?1")?;
    let pattern = format!("%{fragment}%");
    let rows = stmt
        .query_map(params![pattern], |row| {
            Ok(MovieMatch {
                id: row.get(0)?,
                title: row.get(1)?,
                year: row.get(2)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

/// Collection entries whose movie exists, with titles.
pub fn list_collection(conn: &Connection) -> Result<Vec<CollectionItem>> {
    let mut stmt = conn.prepare(
        "SELECT m.title, c.location, c.my_rating, c.note
         FROM my_collection c
         JOIN movies m ON c.movie_id = m.id",
    )?;
    let rows = stmt
        .query_map([], |row| {
            Ok(CollectionItem {
                title: row.get(0)?,
                location: row.get(1)?,
                personal_rating: row.get(2)?,
                note: row.get(3)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}
