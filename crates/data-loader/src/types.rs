//! Core domain types for the IMDB-style movie dataset.
//!
//! One struct per source file, plus the user-curated collection entry and
//! the bookkeeping types the ingestion engine reports with.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Type Aliases
// =============================================================================
// Identifiers come from the source data; nothing here generates them.

/// Movie identifier as assigned by the movies file
pub type MovieId = i64;

/// Actor identifier as assigned by the actors file
pub type ActorId = i64;

/// Director identifier as assigned by the directors file
pub type DirectorId = i64;

/// Literal used by the source files for "no value"
pub const ABSENT_MARKER: &str = "NULL";

/// Plausible release years
pub const MIN_YEAR: i32 = 1800;
pub const MAX_YEAR: i32 = 2100;

/// Bounds shared by the source rating and the personal rating
pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 10.0;

// =============================================================================
// Movie-related Types
// =============================================================================

/// A row of the movies file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    /// Always within [`MIN_YEAR`, `MAX_YEAR`]
    pub year: i32,
    /// `None` when the source recorded no rating
    pub rating: Option<f64>,
}

/// One genre tag for a movie. A movie may carry the same tag twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreTag {
    pub movie_id: MovieId,
    pub genre: String,
}

// =============================================================================
// People
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
}

/// Closed set of values accepted in the actors file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// The single-letter code used both in the source file and in the store.
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An actor appearing in a movie. `role` is free text and never validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub actor_id: ActorId,
    pub movie_id: MovieId,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Director {
    pub id: DirectorId,
    pub first_name: String,
    pub last_name: String,
}

/// A genre a director has worked in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectorGenre {
    pub director_id: DirectorId,
    pub genre: String,
}

// =============================================================================
// Collection
// =============================================================================

/// A personal annotation for a movie. At most one exists per movie id;
/// writing another replaces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionEntry {
    pub movie_id: MovieId,
    pub location: String,
    pub personal_rating: f64,
    pub note: String,
}

// =============================================================================
// Ingestion bookkeeping
// =============================================================================

/// Which source file / relation an ingestion pass targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Movie,
    Genre,
    Actor,
    Role,
    Director,
    DirectorGenre,
}

impl EntityKind {
    /// All kinds in the order a full load runs them.
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Movie,
        EntityKind::Genre,
        EntityKind::Actor,
        EntityKind::Role,
        EntityKind::Director,
        EntityKind::DirectorGenre,
    ];

    /// Backing relation name
    pub fn table(self) -> &'static str {
        match self {
            EntityKind::Movie => "movies",
            EntityKind::Genre => "genres",
            EntityKind::Actor => "actors",
            EntityKind::Role => "roles",
            EntityKind::Director => "directors",
            EntityKind::DirectorGenre => "director_genres",
        }
    }

    /// Parameterized insert reused for a whole pass
    pub fn insert_sql(self) -> &'static str {
        match self {
            EntityKind::Movie => {
                "INSERT INTO movies (id, title, year, rating) VALUES (?1, ?2, ?3, ?4)"
            }
            EntityKind::Genre => "INSERT INTO genres (movie_id, genre) VALUES (?1, ?2)",
            EntityKind::Actor => {
                "INSERT INTO actors (id, first_name, last_name, gender) VALUES (?1, ?2, ?3, ?4)"
            }
            EntityKind::Role => "INSERT INTO roles (actor_id, movie_id, role) VALUES (?1, ?2, ?3)",
            EntityKind::Director => {
                "INSERT INTO directors (id, first_name, last_name) VALUES (?1, ?2, ?3)"
            }
            EntityKind::DirectorGenre => {
                "INSERT INTO director_genres (director_id, genre) VALUES (?1, ?2)"
            }
        }
    }

    /// File name inside the data directory
    pub fn default_file_name(self) -> &'static str {
        match self {
            EntityKind::Movie => "IMDB-movies.csv",
            EntityKind::Genre => "IMDB-movies_genres.csv",
            EntityKind::Actor => "IMDB-actors.csv",
            EntityKind::Role => "IMDB-roles.csv",
            EntityKind::Director => "IMDB-directors.csv",
            EntityKind::DirectorGenre => "IMDB-directors_genres.csv",
        }
    }

    /// Only actors are a full-replace load.
    pub fn clears_before_load(self) -> bool {
        matches!(self, EntityKind::Actor)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

/// Outcome of one ingestion pass.
///
/// `accepted + rejected + write_failed` is the number of data rows read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestSummary {
    pub kind: EntityKind,
    /// Rows validated and persisted
    pub accepted: usize,
    /// Rows that failed validation
    pub rejected: usize,
    /// Valid rows the store refused
    pub write_failed: usize,
}

impl IngestSummary {
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            accepted: 0,
            rejected: 0,
            write_failed: 0,
        }
    }

    pub fn rows_read(&self) -> usize {
        self.accepted + self.rejected + self.write_failed
    }
}
