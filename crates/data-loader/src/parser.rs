//! Parser for MovieLens `ml-latest-small` CSV files.
//!
//! - movies.csv: movieId,title,genres
//! - ratings.csv: userId,movieId,rating,timestamp
//! - tags.csv: userId,movieId,tag,timestamp
//! - links.csv: movieId,imdbId,tmdbId
//!
//! Every file must start with a header row; columns are matched by name.
//! Titles containing commas are quoted in the files, which the `csv` reader
//! handles for us. Field values are stored exactly as written, so title
//! lookups and tag de-duplication see the same strings as the file.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::path::Path;

/// Genre field value for movies without any genre
const NO_GENRES: &str = "(no genres listed)";

/// Raw row of movies.csv before genre splitting and year extraction
#[derive(Debug, Deserialize)]
struct MovieRecord {
    #[serde(rename = "movieId")]
    movie_id: MovieId,
    title: String,
    genres: String,
}

/// Deserialize every record of a CSV file into `T`.
///
/// `file` is only used for error messages.
fn read_records<T: DeserializeOwned>(path: &Path, file: &str) -> Result<Vec<T>> {
    let handle = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(handle);

    let mut records = Vec::new();
    for result in reader.deserialize::<T>() {
        let record = result.map_err(|e| csv_error(file, e))?;
        records.push(record);
    }
    Ok(records)
}

fn csv_error(file: &str, err: csv::Error) -> DataLoadError {
    let line = err.position().map(|p| p.line()).unwrap_or(0);
    let reason = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(io) => DataLoadError::IoError(io),
        _ => DataLoadError::ParseError {
            file: file.to_string(),
            line,
            reason,
        },
    }
}

/// Parse the movies.csv file
///
/// The title often includes year in parentheses: "Toy Story (1995)"
/// Genres are pipe-separated: "Adventure|Animation|Children|Comedy|Fantasy"
pub fn parse_movies(path: &Path) -> Result<Vec<Movie>> {
    let records: Vec<MovieRecord> = read_records(path, "movies.csv")?;

    Ok(records
        .into_iter()
        .map(|record| Movie {
            id: record.movie_id,
            year: extract_year_from_title(&record.title),
            genres: parse_genres(&record.genres),
            title: record.title,
        })
        .collect())
}

/// Parse the ratings.csv file
pub fn parse_ratings(path: &Path) -> Result<Vec<Rating>> {
    read_records(path, "ratings.csv")
}

/// Parse the tags.csv file
pub fn parse_tags(path: &Path) -> Result<Vec<Tag>> {
    read_records(path, "tags.csv")
}

/// Parse the links.csv file
pub fn parse_links(path: &Path) -> Result<Vec<Link>> {
    read_records(path, "links.csv")
}

/// Extract year from movie title
///
/// Example: "Toy Story (1995)" -> Some(1995)
///          "Movie Title" -> None
fn extract_year_from_title(title: &str) -> Option<u16> {
    let title = title.trim_end();
    let start = title.rfind('(')?;
    let end = title.rfind(')')?;
    if start < end && end == title.len() - 1 {
        return title[start + 1..end].parse::<u16>().ok();
    }
    None
}

/// Split pipe-separated genres
///
/// Example: "Action|Adventure|Sci-Fi" -> ["Action", "Adventure", "Sci-Fi"]
fn parse_genres(s: &str) -> Vec<String> {
    if s == NO_GENRES {
        return Vec::new();
    }
    s.split('|')
        .map(str::trim)
        .filter(|genre| !genre.is_empty())
        .map(str::to_string)
        .collect()
}
