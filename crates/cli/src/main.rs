mod prompt;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use data_loader::report::{
    self, ActorRoleCount, CollectionItem, DirectorGenreCount, GenreRating, MovieMatch, RatedTitle,
    TableCount,
};
use data_loader::{add_to_collection, create_schema, ingest_all, open_store, CollectionEntry};
use std::io;
use std::path::PathBuf;
use std::time::Instant;

/// movie-db - load the IMDB CSV dataset into SQLite and report on it
///
/// With no arguments this creates the schema, loads every file from
/// `data/`, prints the reports, records a sample favorite, asks for one
/// more, and lists the collection.
#[derive(Parser)]
#[command(name = "movie-db")]
#[command(about = "Tolerant IMDB CSV loader with a personal movie collection", long_about = None)]
struct Cli {
    /// SQLite store to create or reuse
    #[arg(long, default_value = "movies.db")]
    db: PathBuf,

    /// Directory holding the IMDB-*.csv files
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    /// Reuse an already-populated store instead of loading the CSV files
    #[arg(long)]
    skip_import: bool,

    /// Genre for the top-movies report
    #[arg(long, default_value = "Family")]
    genre: String,

    /// Title fragment for the sample lookup
    #[arg(long, default_value = "Matrix")]
    search: String,

    /// Skip the interactive add-favorite prompt
    #[arg(long)]
    no_prompt: bool,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let conn = open_store(&cli.db)
        .with_context(|| format!("Failed to open store {}", cli.db.display()))?;
    create_schema(&conn).context("Failed to create schema")?;

    if !cli.skip_import {
        let start = Instant::now();
        let summaries = ingest_all(&conn, &cli.data_dir)
            .with_context(|| format!("Failed to load dataset from {}", cli.data_dir.display()))?;
        let accepted: usize = summaries.iter().map(|s| s.accepted).sum();
        let skipped: usize = summaries.iter().map(|s| s.rejected + s.write_failed).sum();
        println!(
            "{} Loaded {} rows ({} skipped) in {:?}",
            "✓".green(),
            accepted,
            skipped,
            start.elapsed()
        );
    }

    print_top_genres(&report::top_genres(&conn, 10)?);
    print_top_actors(&report::top_actors(&conn, 10)?);
    print_director_preferences(&report::director_genre_preferences(&conn, 10)?);
    print_top_movies(&cli.genre, &report::top_movies_by_genre(&conn, &cli.genre, 5)?);
    print_table_counts(&report::table_counts(&conn)?);

    print_search_results(&cli.search, &report::find_movies(&conn, &cli.search)?);

    let sample = CollectionEntry::new(41, "somewhere", 9.5, "one of the best sci-fi movies ever");
    if add_to_collection(&conn, &sample)? {
        println!("Movie added to collection.");
    }

    if !cli.no_prompt {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        prompt::prompt_add_favorite(&conn, &mut input, &mut io::stdout())?;
    }

    print_collection(&report::list_collection(&conn)?);

    Ok(())
}

fn format_rating(rating: Option<f64>) -> String {
    rating
        .map(|r| format!("{:.2}", r))
        .unwrap_or_else(|| "n/a".to_string())
}

fn print_top_genres(genres: &[GenreRating]) {
    println!("{}", "Top Genres by Average Rating:".bold().blue());
    for g in genres {
        println!("Genre: {:<15}  Avg Rating: {}", g.genre, format_rating(g.avg_rating));
    }
}

fn print_top_actors(actors: &[ActorRoleCount]) {
    println!("\n{}", "Top 10 Actors by Role Count:".bold().blue());
    for a in actors {
        println!("Actor: {:<30} Roles: {}", a.actor, a.roles);
    }
}

fn print_director_preferences(prefs: &[DirectorGenreCount]) {
    println!("\n{}", "Director Genre Preferences:".bold().blue());
    for p in prefs {
        println!("Director: {:<25} Genre: {:<12} Count: {}", p.director, p.genre, p.count);
    }
}

fn print_top_movies(genre: &str, movies: &[RatedTitle]) {
    println!("\n{}", format!("Top 5 '{}' Movies by Rating:", genre).bold().blue());
    for m in movies {
        println!("Title: {:<40} Rating: {}", m.title, format_rating(m.rating));
    }
}

fn print_table_counts(counts: &[TableCount]) {
    println!();
    for c in counts {
        println!("{}Total {}: {}", "• ".cyan(), c.table, c.rows);
    }
}

fn print_search_results(query: &str, matches: &[MovieMatch]) {
    println!("{}", format!("Search results for '{}':", query).bold().blue());
    for m in matches {
        let year = m.year.map(|y| y.to_string()).unwrap_or_else(|| "????".to_string());
        println!("ID: {} | Title: {} ({})", m.id, m.title, year);
    }
}

fn print_collection(items: &[CollectionItem]) {
    println!("{}", "My Movie Collection:".bold().blue());
    for item in items {
        println!(
            "Title: {:<40} Rating: {:.1} | Location: {:<12} Note: {}",
            item.title, item.personal_rating, item.location, item.note
        );
    }
}
