//! Row validators for the IMDB CSV files.
//!
//! Each `parse_*_row` function takes one raw record (fields in file order,
//! header already skipped) and returns either a typed record or the reason
//! it was rejected. None of them touch the store, and none of them panic on
//! bad input: a malformed row is an ordinary outcome.
//!
//! Field layouts:
//! - movies: id, title, year, rating (or `NULL` / empty)
//! - genres: movie_id, genre
//! - actors: id, first_name, last_name, gender (`M` / `F`)
//! - roles: actor_id, movie_id, role
//! - directors: id, first_name, last_name
//! - director_genres: director_id, genre, ...

use crate::error::RowRejection;
use crate::types::*;
use csv::{ByteRecord, StringRecord};

/// Result of validating one row
pub type RowResult<T> = std::result::Result<T, RowRejection>;

/// Turn a raw byte record into text fields.
///
/// Fields that are valid UTF-8 are kept as is. Anything else is read as
/// ISO-8859-1 (Latin-1), where every byte maps directly to a code point, so
/// encoding never decides whether a row is accepted.
pub fn decode_record(raw: &ByteRecord) -> StringRecord {
    raw.iter()
        .map(|bytes| match std::str::from_utf8(bytes) {
            Ok(text) => text.to_string(),
            Err(_) => bytes.iter().map(|&b| b as char).collect(),
        })
        .collect()
}

fn require_fields(row: &StringRecord, expected: usize) -> RowResult<()> {
    if row.len() < expected {
        return Err(RowRejection::FieldCount {
            expected,
            found: row.len(),
        });
    }
    Ok(())
}

/// Field access after `require_fields` has checked the length.
fn field(row: &StringRecord, idx: usize) -> &str {
    row.get(idx).unwrap_or("")
}

/// Integers tolerate surrounding whitespace.
pub(crate) fn parse_int<T: std::str::FromStr>(name: &'static str, raw: &str) -> RowResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| RowRejection::InvalidInteger {
            field: name,
            value: raw.to_string(),
        })
}

/// Parse a rating-like value and check it lies in [`MIN_RATING`, `MAX_RATING`].
///
/// NaN never satisfies the range check, so it is rejected as out of range.
pub(crate) fn parse_rating(name: &'static str, raw: &str) -> RowResult<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| RowRejection::InvalidReal {
            field: name,
            value: raw.to_string(),
        })?;
    if !(MIN_RATING..=MAX_RATING).contains(&value) {
        return Err(RowRejection::OutOfRange {
            field: name,
            value: raw.to_string(),
        });
    }
    Ok(value)
}

fn parse_gender(raw: &str) -> RowResult<Gender> {
    match raw.trim() {
        "M" => Ok(Gender::Male),
        "F" => Ok(Gender::Female),
        other => Err(RowRejection::InvalidGender {
            value: other.to_string(),
        }),
    }
}

/// Names in the actors file sometimes carry stray quote characters.
fn strip_quotes(raw: &str) -> String {
    raw.trim_matches(|c: char| c == '"' || c == '\'').to_string()
}

pub fn parse_movie_row(row: &StringRecord) -> RowResult<Movie> {
    require_fields(row, 4)?;

    let id = parse_int("id", field(row, 0))?;

    let title = field(row, 1);
    if title.is_empty() {
        return Err(RowRejection::EmptyField { field: "title" });
    }

    let raw_year = field(row, 2);
    let year: i32 = parse_int("year", raw_year)?;
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(RowRejection::OutOfRange {
            field: "year",
            value: raw_year.to_string(),
        });
    }

    let raw_rating = field(row, 3);
    let rating = match raw_rating.trim() {
        "" | ABSENT_MARKER => None,
        _ => Some(parse_rating("rating", raw_rating)?),
    };

    Ok(Movie {
        id,
        title: title.to_string(),
        year,
        rating,
    })
}

pub fn parse_genre_row(row: &StringRecord) -> RowResult<GenreTag> {
    require_fields(row, 2)?;

    let movie_id = parse_int("movie_id", field(row, 0))?;
    let genre = field(row, 1);
    if genre.is_empty() || genre == ABSENT_MARKER {
        return Err(RowRejection::EmptyField { field: "genre" });
    }

    Ok(GenreTag {
        movie_id,
        genre: genre.to_string(),
    })
}

pub fn parse_actor_row(row: &StringRecord) -> RowResult<Actor> {
    require_fields(row, 4)?;

    Ok(Actor {
        id: parse_int("id", field(row, 0))?,
        first_name: strip_quotes(field(row, 1)),
        last_name: strip_quotes(field(row, 2)),
        gender: parse_gender(field(row, 3))?,
    })
}

pub fn parse_role_row(row: &StringRecord) -> RowResult<Role> {
    require_fields(row, 3)?;

    Ok(Role {
        actor_id: parse_int("actor_id", field(row, 0))?,
        movie_id: parse_int("movie_id", field(row, 1))?,
        role: field(row, 2).to_string(),
    })
}

pub fn parse_director_row(row: &StringRecord) -> RowResult<Director> {
    require_fields(row, 3)?;

    Ok(Director {
        id: parse_int("id", field(row, 0))?,
        first_name: field(row, 1).to_string(),
        last_name: field(row, 2).to_string(),
    })
}

/// The director genres file carries a trailing probability column, so three
/// fields are required even though only two are kept.
pub fn parse_director_genre_row(row: &StringRecord) -> RowResult<DirectorGenre> {
    require_fields(row, 3)?;

    Ok(DirectorGenre {
        director_id: parse_int("director_id", field(row, 0))?,
        genre: field(row, 1).to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> StringRecord {
        StringRecord::from(fields.to_vec())
    }

    #[test]
    fn test_decode_record_mixed_encodings() {
        let raw = ByteRecord::from(vec![&b"2"[..], &b"Ren\xE9e"[..], "Zoë".as_bytes()]);
        let decoded = decode_record(&raw);
        assert_eq!(decoded.len(), 3);
        assert_eq!(&decoded[1], "Renée");
        assert_eq!(&decoded[2], "Zoë");
    }

    #[test]
    fn test_parse_movie() {
        let movie = parse_movie_row(&row(&["41", "Matrix", "1999", "8.7"])).unwrap();
        assert_eq!(
            movie,
            Movie {
                id: 41,
                title: "Matrix".to_string(),
                year: 1999,
                rating: Some(8.7),
            }
        );
    }

    #[test]
    fn test_movie_rating_absent() {
        let movie = parse_movie_row(&row(&["1", "Heat", "1995", "NULL"])).unwrap();
        assert_eq!(movie.rating, None);

        let movie = parse_movie_row(&row(&["1", "Heat", "1995", ""])).unwrap();
        assert_eq!(movie.rating, None);
    }

    #[test]
    fn test_movie_numeric_whitespace_tolerated() {
        let movie = parse_movie_row(&row(&[" 12 ", "Alien", " 1979", "8.5 "])).unwrap();
        assert_eq!(movie.id, 12);
        assert_eq!(movie.year, 1979);
        assert_eq!(movie.rating, Some(8.5));
    }

    #[test]
    fn test_movie_empty_title_rejected() {
        let err = parse_movie_row(&row(&["7", "", "2000", "5.0"])).unwrap_err();
        assert_eq!(err, RowRejection::EmptyField { field: "title" });
    }

    #[test]
    fn test_movie_bounds() {
        assert!(parse_movie_row(&row(&["1", "a", "1800", "0"])).is_ok());
        assert!(parse_movie_row(&row(&["1", "a", "2100", "10"])).is_ok());

        let err = parse_movie_row(&row(&["1", "a", "1799", "5"])).unwrap_err();
        assert!(matches!(err, RowRejection::OutOfRange { field: "year", .. }));

        let err = parse_movie_row(&row(&["1", "a", "2101", "5"])).unwrap_err();
        assert!(matches!(err, RowRejection::OutOfRange { field: "year", .. }));

        let err = parse_movie_row(&row(&["1", "a", "2000", "10.1"])).unwrap_err();
        assert!(matches!(err, RowRejection::OutOfRange { field: "rating", .. }));

        let err = parse_movie_row(&row(&["1", "a", "2000", "-0.5"])).unwrap_err();
        assert!(matches!(err, RowRejection::OutOfRange { field: "rating", .. }));

        let err = parse_movie_row(&row(&["1", "a", "2000", "NaN"])).unwrap_err();
        assert!(matches!(err, RowRejection::OutOfRange { field: "rating", .. }));
    }

    #[test]
    fn test_movie_bad_fields() {
        let err = parse_movie_row(&row(&["1", "Short"])).unwrap_err();
        assert_eq!(
            err,
            RowRejection::FieldCount {
                expected: 4,
                found: 2
            }
        );

        let err = parse_movie_row(&row(&["abc", "a", "2000", "5"])).unwrap_err();
        assert_eq!(
            err,
            RowRejection::InvalidInteger {
                field: "id",
                value: "abc".to_string()
            }
        );

        let err = parse_movie_row(&row(&["1", "a", "2000", "great"])).unwrap_err();
        assert!(matches!(err, RowRejection::InvalidReal { field: "rating", .. }));
    }

    #[test]
    fn test_parse_genre() {
        let tag = parse_genre_row(&row(&["41", "Sci-Fi"])).unwrap();
        assert_eq!(tag.movie_id, 41);
        assert_eq!(tag.genre, "Sci-Fi");

        assert!(parse_genre_row(&row(&["41", ""])).is_err());
        assert!(parse_genre_row(&row(&["41", "NULL"])).is_err());
        assert!(parse_genre_row(&row(&["x", "Drama"])).is_err());
        assert!(parse_genre_row(&row(&["41"])).is_err());
    }

    #[test]
    fn test_parse_actor() {
        let actor = parse_actor_row(&row(&["3", "\"Keanu", "Reeves'", " M "])).unwrap();
        assert_eq!(actor.first_name, "Keanu");
        assert_eq!(actor.last_name, "Reeves");
        assert_eq!(actor.gender, Gender::Male);

        let actor = parse_actor_row(&row(&["4", "Carrie-Anne", "Moss", "F"])).unwrap();
        assert_eq!(actor.gender, Gender::Female);
    }

    #[test]
    fn test_actor_gender_closed_set() {
        for bad in ["X", "m", "Male", ""] {
            let err = parse_actor_row(&row(&["3", "a", "b", bad])).unwrap_err();
            assert!(matches!(err, RowRejection::InvalidGender { .. }), "{bad}");
        }
    }

    #[test]
    fn test_parse_role_keeps_text_as_is() {
        let role = parse_role_row(&row(&["3", "41", "  Neo (The One) "])).unwrap();
        assert_eq!(role.actor_id, 3);
        assert_eq!(role.movie_id, 41);
        assert_eq!(role.role, "  Neo (The One) ");

        // Empty role text is still a role
        assert!(parse_role_row(&row(&["3", "41", ""])).is_ok());
        assert!(parse_role_row(&row(&["3", "forty", "Neo"])).is_err());
    }

    #[test]
    fn test_parse_director() {
        let director = parse_director_row(&row(&["9", "Lana", "Wachowski"])).unwrap();
        assert_eq!(director.id, 9);
        assert_eq!(director.last_name, "Wachowski");

        assert!(parse_director_row(&row(&["9", "Lana"])).is_err());
    }

    #[test]
    fn test_parse_director_genre() {
        let pref = parse_director_genre_row(&row(&["9", "Action", "0.5"])).unwrap();
        assert_eq!(pref.director_id, 9);
        assert_eq!(pref.genre, "Action");

        let err = parse_director_genre_row(&row(&["9", "Action"])).unwrap_err();
        assert!(matches!(err, RowRejection::FieldCount { expected: 3, found: 2 }));
    }
}
