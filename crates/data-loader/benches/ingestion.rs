//! Benchmarks for ingestion passes
//!
//! Run with: cargo bench --package data-loader
//!
//! Generates a movies file once and loads it into a fresh in-memory store
//! on every iteration.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use data_loader::{create_schema, ingest, open_in_memory, Movie};
use std::fmt::Write;
use std::fs;
use tempfile::TempDir;

const ROWS: usize = 10_000;

fn generate_movies(dir: &TempDir) -> std::path::PathBuf {
    let mut contents = String::from("id,name,year,rank\n");
    for id in 0..ROWS {
        // Every hundredth row is corrupt so the rejection path is measured too
        if id % 100 == 99 {
            writeln!(contents, "{id},,1999,NULL").unwrap();
        } else {
            writeln!(contents, "{id},Movie {id},{},{}", 1900 + id % 200, (id % 100) as f64 / 10.0)
                .unwrap();
        }
    }
    let path = dir.path().join("movies.csv");
    fs::write(&path, contents).expect("Failed to write benchmark data");
    path
}

fn bench_ingest_movies(c: &mut Criterion) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = generate_movies(&dir);

    c.bench_function("ingest_movies_10k", |b| {
        b.iter(|| {
            let conn = open_in_memory().unwrap();
            create_schema(&conn).unwrap();
            let summary = ingest::<Movie>(&conn, black_box(path.as_path())).unwrap();
            black_box(summary)
        })
    });
}

criterion_group!(benches, bench_ingest_movies);
criterion_main!(benches);
