//! Interactive "add a favorite" prompt.
//!
//! Asks for a movie id, a location, a rating and a note, checking each
//! answer before asking the next one. The first invalid answer prints a
//! message and ends the prompt without writing anything.

use anyhow::Result;
use data_loader::{
    add_to_collection, validate_location, validate_movie_id, validate_personal_rating,
    CollectionEntry, Connection, RowRejection,
};
use std::io::{BufRead, Write};

const INVALID_ID: &str = "Invalid ID. Please enter a numeric movie ID.";
const EMPTY_LOCATION: &str = "Location cannot be empty.";
const INVALID_RATING: &str = "Invalid rating. Please enter a number between 0 and 10.";

fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> Result<String> {
    write!(output, "{question}")?;
    output.flush()?;

    // End of input reads as an empty answer
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Print `message` if `answer` was rejected, otherwise hand back the value.
fn check<T, W: Write>(
    output: &mut W,
    answer: std::result::Result<T, RowRejection>,
    message: &str,
) -> Result<Option<T>> {
    match answer {
        Ok(value) => Ok(Some(value)),
        Err(rejection) => {
            tracing::debug!("Prompt answer rejected: {}", rejection);
            writeln!(output, "{message}")?;
            Ok(None)
        }
    }
}

/// Run the prompt once. Returns whether an entry was written.
pub fn prompt_add_favorite<R: BufRead, W: Write>(
    conn: &Connection,
    input: &mut R,
    output: &mut W,
) -> Result<bool> {
    let answer = ask(input, output, "Enter movie ID to add to collection: ")?;
    let Some(movie_id) = check(output, validate_movie_id(&answer), INVALID_ID)? else {
        return Ok(false);
    };

    let answer = ask(input, output, "Enter location: ")?;
    let Some(location) = check(output, validate_location(&answer), EMPTY_LOCATION)? else {
        return Ok(false);
    };

    let answer = ask(input, output, "Enter your personal rating (0.0 - 10.0): ")?;
    let Some(rating) = check(output, validate_personal_rating(&answer), INVALID_RATING)? else {
        return Ok(false);
    };

    let note = ask(input, output, "Enter your personal note about the movie: ")?;

    let entry = CollectionEntry::new(movie_id, location, rating, note);
    let written = add_to_collection(conn, &entry)?;
    if written {
        writeln!(output, "Movie added to collection.")?;
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{create_schema, get_entry, open_in_memory};
    use std::io::Cursor;

    fn run(answers: &str) -> (Connection, bool, String) {
        let conn = open_in_memory().unwrap();
        create_schema(&conn).unwrap();

        let mut input = Cursor::new(answers.as_bytes().to_vec());
        let mut output = Vec::new();
        let written = prompt_add_favorite(&conn, &mut input, &mut output).unwrap();
        (conn, written, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_valid_answers_write_entry() {
        let (conn, written, output) = run("41\n  shelf  \n9.5\nclassic\n");

        assert!(written);
        assert!(output.ends_with("Movie added to collection.\n"));
        assert_eq!(
            get_entry(&conn, 41).unwrap(),
            Some(CollectionEntry::new(41, "shelf", 9.5, "classic"))
        );
    }

    #[test]
    fn test_non_numeric_id_stops_early() {
        let (conn, written, output) = run("forty-one\nshelf\n9.5\nclassic\n");

        assert!(!written);
        assert!(output.contains(INVALID_ID));
        // Never got as far as asking for a location
        assert!(!output.contains("Enter location"));
        assert!(get_entry(&conn, 41).unwrap().is_none());
    }

    #[test]
    fn test_empty_location_rejected() {
        let (_, written, output) = run("41\n   \n9.5\nclassic\n");
        assert!(!written);
        assert!(output.contains(EMPTY_LOCATION));
    }

    #[test]
    fn test_rating_out_of_range_rejected() {
        let (_, written, output) = run("41\nshelf\n10.5\nclassic\n");
        assert!(!written);
        assert!(output.contains(INVALID_RATING));

        let (_, written, _) = run("41\nshelf\nten\nclassic\n");
        assert!(!written);
    }

    #[test]
    fn test_note_is_optional() {
        let (conn, written, _) = run("41\nshelf\n0\n");
        assert!(written);
        assert_eq!(get_entry(&conn, 41).unwrap().unwrap().note, "");
    }

    #[test]
    fn test_end_of_input() {
        let (_, written, output) = run("");
        assert!(!written);
        assert!(output.contains(INVALID_ID));
    }
}
