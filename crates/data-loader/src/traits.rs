//! The seam between row validation and persistence.
//!
//! Every entity the ingestion engine loads implements [`Record`]; the engine
//! itself is generic over it and knows nothing about individual files.

use crate::error::RowRejection;
use crate::parser;
use crate::types::*;
use csv::StringRecord;
use rusqlite::{Statement, params};

/// A typed row that can be validated from raw fields and bound to the
/// insert statement of its relation.
pub trait Record: Sized {
    /// Which file / relation this record belongs to
    const KIND: EntityKind;

    /// Validate one raw row.
    fn from_row(row: &StringRecord) -> Result<Self, RowRejection>;

    /// Execute the prepared insert for this record.
    fn insert(&self, stmt: &mut Statement<'_>) -> rusqlite::Result<usize>;

    /// Short identification for log lines
    fn describe(&self) -> String;
}

impl Record for Movie {
    const KIND: EntityKind = EntityKind::Movie;

    fn from_row(row: &StringRecord) -> Result<Self, RowRejection> {
        parser::parse_movie_row(row)
    }

    fn insert(&self, stmt: &mut Statement<'_>) -> rusqlite::Result<usize> {
        stmt.execute(params![self.id, self.title, self.year, self.rating])
    }

    fn describe(&self) -> String {
        format!("movie id={}", self.id)
    }
}

impl Record for GenreTag {
    const KIND: EntityKind = EntityKind::Genre;

    fn from_row(row: &StringRecord) -> Result<Self, RowRejection> {
        parser::parse_genre_row(row)
    }

    fn insert(&self, stmt: &mut Statement<'_>) -> rusqlite::Result<usize> {
        stmt.execute(params![self.movie_id, self.genre])
    }

    fn describe(&self) -> String {
        format!("genre {:?} for movie id={}", self.genre, self.movie_id)
    }
}

impl Record for Actor {
    const KIND: EntityKind = EntityKind::Actor;

    fn from_row(row: &StringRecord) -> Result<Self, RowRejection> {
        parser::parse_actor_row(row)
    }

    fn insert(&self, stmt: &mut Statement<'_>) -> rusqlite::Result<usize> {
        stmt.execute(params![
            self.id,
            self.first_name,
            self.last_name,
            self.gender.as_str()
        ])
    }

    fn describe(&self) -> String {
        format!("actor id={}", self.id)
    }
}

impl Record for Role {
    const KIND: EntityKind = EntityKind::Role;

    fn from_row(row: &StringRecord) -> Result<Self, RowRejection> {
        parser::parse_role_row(row)
    }

    fn insert(&self, stmt: &mut Statement<'_>) -> rusqlite::Result<usize> {
        stmt.execute(params![self.actor_id, self.movie_id, self.role])
    }

    fn describe(&self) -> String {
        format!("role actor id={} movie id={}", self.actor_id, self.movie_id)
    }
}

impl Record for Director {
    const KIND: EntityKind = EntityKind::Director;

    fn from_row(row: &StringRecord) -> Result<Self, RowRejection> {
        parser::parse_director_row(row)
    }

    fn insert(&self, stmt: &mut Statement<'_>) -> rusqlite::Result<usize> {
        stmt.execute(params![self.id, self.first_name, self.last_name])
    }

    fn describe(&self) -> String {
        format!("director id={}", self.id)
    }
}

impl Record for DirectorGenre {
    const KIND: EntityKind = EntityKind::DirectorGenre;

    fn from_row(row: &StringRecord) -> Result<Self, RowRejection> {
        parser::parse_director_genre_row(row)
    }

    fn insert(&self, stmt: &mut Statement<'_>) -> rusqlite::Result<usize> {
        stmt.execute(params![self.director_id, self.genre])
    }

    fn describe(&self) -> String {
        format!("director genre {:?} for director id={}", self.genre, self.director_id)
    }
}
