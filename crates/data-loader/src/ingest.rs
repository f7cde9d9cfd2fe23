//! Ingestion engine: one pass per source file.
//!
//! A pass opens the file, prepares the insert statement for the target
//! relation once, and streams every data row through the validator. Rows
//! that fail validation or that the store refuses are logged and counted;
//! they never stop the pass. Only setup failures (file open, clear, prepare)
//! end it early, and rows already written stay written: there is no
//! enclosing transaction.

use crate::error::{DataLoadError, Result, RowRejection};
use crate::parser::decode_record;
use crate::traits::Record;
use crate::types::*;
use rusqlite::Connection;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info, warn};

/// Run one ingestion pass for `R` over the file at `path`.
///
/// The file must have exactly one header row. For actors the relation is
/// emptied first, once the file is known to be readable.
pub fn ingest<R: Record>(conn: &Connection, path: &Path) -> Result<IngestSummary> {
    let kind = R::KIND;
    let file = File::open(path).map_err(|source| DataLoadError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;

    // Field counts are checked per row by the validator, so the reader
    // must not fail rows for having a different width than the header.
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    if kind.clears_before_load() {
        let removed = conn
            .execute(&format!("DELETE FROM {}", kind.table()), [])
            .map_err(|source| DataLoadError::Clear {
                table: kind.table(),
                source,
            })?;
        debug!("Cleared {} existing rows from {}", removed, kind.table());
    }

    let mut stmt = conn
        .prepare(kind.insert_sql())
        .map_err(|source| DataLoadError::Prepare {
            table: kind.table(),
            source,
        })?;

    let file_name = path.display();
    let mut summary = IngestSummary::new(kind);

    // Byte records, so a stray Latin-1 byte never costs a row; only reader
    // errors count as malformed.
    for (idx, result) in reader.byte_records().enumerate() {
        // 1-based, counting the header as row 1
        let row_no = idx + 2;

        let parsed = result
            .map_err(|e| RowRejection::Malformed(e.to_string()))
            .and_then(|raw| R::from_row(&decode_record(&raw)));

        let record = match parsed {
            Ok(record) => record,
            Err(rejection) => {
                warn!("Skipping {} row {} in {}: {}", kind, row_no, file_name, rejection);
                summary.rejected += 1;
                continue;
            }
        };

        match record.insert(&mut stmt) {
            Ok(_) => summary.accepted += 1,
            Err(e) => {
                warn!("Insert failed for {} (row {}): {}", record.describe(), row_no, e);
                summary.write_failed += 1;
            }
        }
    }

    info!(
        "Imported {} valid {} from {} ({} rejected, {} failed to insert)",
        summary.accepted, kind, file_name, summary.rejected, summary.write_failed
    );
    Ok(summary)
}

/// Run one pass for a kind chosen at runtime.
pub fn ingest_file(conn: &Connection, path: &Path, kind: EntityKind) -> Result<IngestSummary> {
    match kind {
        EntityKind::Movie => ingest::<Movie>(conn, path),
        EntityKind::Genre => ingest::<GenreTag>(conn, path),
        EntityKind::Actor => ingest::<Actor>(conn, path),
        EntityKind::Role => ingest::<Role>(conn, path),
        EntityKind::Director => ingest::<Director>(conn, path),
        EntityKind::DirectorGenre => ingest::<DirectorGenre>(conn, path),
    }
}

/// Load every source file from `data_dir`, one after another, in the order
/// of [`EntityKind::ALL`]. Stops at the first setup failure.
pub fn ingest_all(conn: &Connection, data_dir: &Path) -> Result<Vec<IngestSummary>> {
    info!("Loading dataset from {}", data_dir.display());

    let mut summaries = Vec::with_capacity(EntityKind::ALL.len());
    for kind in EntityKind::ALL {
        let path = data_dir.join(kind.default_file_name());
        summaries.push(ingest_file(conn, &path, kind)?);
    }
    Ok(summaries)
}
