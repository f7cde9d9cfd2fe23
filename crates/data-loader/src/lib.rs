//! # Data Loader Crate
//!
//! This crate loads the IMDB CSV dataset into a SQLite store and answers a
//! fixed set of questions about it.
//!
//! ## Main Components
//!
//! - **types**: Domain records (Movie, Actor, Role, ...) and bookkeeping
//! - **parser**: Row validators, one per source file
//! - **traits**: The `Record` seam between validation and persistence
//! - **ingest**: One tolerant ingestion pass per file
//! - **store**: Opening the store and creating the relations
//! - **collection**: The user's personal collection (upsert by movie id)
//! - **report**: Read-only aggregate queries
//! - **error**: Setup failures vs. per-row rejections
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{create_schema, ingest_all, open_store, report};
//! use std::path::Path;
//!
//! let conn = open_store(Path::new("movies.db"))?;
//! create_schema(&conn)?;
//! for summary in ingest_all(&conn, Path::new("data"))? {
//!     println!("{}: {} accepted", summary.kind, summary.accepted);
//! }
//!
//! for m in report::find_movies(&conn, "Matrix")? {
//!     println!("{} {}", m.id, m.title);
//! }
//! ```
//!
//! Every operation takes the connection explicitly; nothing here holds
//! global state.

// Public modules
pub mod collection;
pub mod error;
pub mod ingest;
pub mod parser;
pub mod report;
pub mod store;
pub mod traits;
pub mod types;

// Re-export commonly used types for convenience
pub use collection::{
    add_to_collection, get_entry, validate_location, validate_movie_id, validate_personal_rating,
};
pub use error::{DataLoadError, Result, RowRejection};
pub use ingest::{ingest, ingest_all, ingest_file};
pub use store::{create_schema, open_in_memory, open_store};
pub use traits::Record;

// Callers own the store handle; re-exported so they need no rusqlite import.
pub use rusqlite::Connection;
pub use types::{
    // Type aliases
    ActorId,
    DirectorId,
    MovieId,
    // Core types
    Actor,
    CollectionEntry,
    Director,
    DirectorGenre,
    GenreTag,
    IngestSummary,
    Movie,
    Role,
    // Enums
    EntityKind,
    Gender,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_kinds_cover_every_table() {
        let tables: Vec<&str> = EntityKind::ALL.iter().map(|k| k.table()).collect();
        assert_eq!(
            tables,
            vec!["movies", "genres", "actors", "roles", "directors", "director_genres"]
        );
    }

    #[test]
    fn test_only_actors_clear_before_load() {
        for kind in EntityKind::ALL {
            assert_eq!(kind.clears_before_load(), kind == EntityKind::Actor);
        }
    }

    #[test]
    fn test_insert_sql_targets_own_table() {
        for kind in EntityKind::ALL {
            let prefix = format!("INSERT INTO {} ", kind.table());
            assert!(kind.insert_sql().starts_with(&prefix), "{kind}");
        }
    }

    #[test]
    fn test_empty_summary() {
        let summary = IngestSummary::new(EntityKind::Movie);
        assert_eq!(summary.rows_read(), 0);
    }

    #[test]
    fn test_gender_codes() {
        assert_eq!(Gender::Male.as_str(), "M");
        assert_eq!(Gender::Female.to_string(), "F");
    }
}
