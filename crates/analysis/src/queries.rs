//! Fixed lookups answered against the loaded and derived tables.
//!
//! Every query returns a `Result` with a [`QueryError`] instead of panicking
//! on an empty table or a missing title. Argmax-style queries break ties by
//! first occurrence in table order.

use data_loader::{DataIndex, MovieId};

use crate::error::QueryError;
use crate::records::{EnrichedMovie, MovieSummary};

/// Exact, case-sensitive title lookup returning the movie id.
pub fn find_movie_id(index: &DataIndex, title: &str) -> Result<MovieId, QueryError> {
    index
        .find_movie_by_title(title)
        .map(|movie| movie.id)
        .ok_or_else(|| QueryError::TitleNotFound(title.to_string()))
}

/// Distinct tags of a movie, in order of first appearance.
pub fn unique_tags(index: &DataIndex, movie_id: MovieId) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    index
        .get_movie_tags(movie_id)
        .iter()
        .filter(|tag| seen.insert(tag.tag.as_str()))
        .map(|tag| tag.tag.clone())
        .collect()
}

/// Raw rating values of a movie, in file order.
pub fn rating_values(index: &DataIndex, movie_id: MovieId) -> Vec<f32> {
    index
        .get_movie_ratings(movie_id)
        .iter()
        .map(|r| r.rating)
        .collect()
}

/// Mean over every rating the movie received.
pub fn mean_rating(index: &DataIndex, movie_id: MovieId) -> Result<f64, QueryError> {
    let ratings = index.get_movie_ratings(movie_id);
    if ratings.is_empty() {
        return Err(QueryError::NoData(format!("ratings for movie {}", movie_id)));
    }
    let total: f64 = ratings.iter().map(|r| r.rating as f64).sum();
    Ok(total / ratings.len() as f64)
}

/// Row with the largest `rating_count`.
pub fn most_rated<R: AsRef<MovieSummary>>(rows: &[R]) -> Result<&R, QueryError> {
    argmax_by(rows, |row| Some(row.as_ref().rating_count as f64))
        .ok_or_else(|| QueryError::NoData("no movies to rank by rating count".to_string()))
}

/// Row with the largest `rating_mean`.
pub fn highest_mean<R: AsRef<MovieSummary>>(rows: &[R]) -> Result<&R, QueryError> {
    argmax_by(rows, |row| Some(row.as_ref().rating_mean))
        .ok_or_else(|| QueryError::NoData("no movies to rank by mean rating".to_string()))
}

/// Row with the largest fetched IMDb rating. Rows without one are ignored.
pub fn highest_external(rows: &[EnrichedMovie]) -> Result<&EnrichedMovie, QueryError> {
    argmax_by(rows, |row| row.imdb_rating)
        .ok_or_else(|| QueryError::NoData("no movies with an IMDb rating".to_string()))
}

/// The `n` rows with the most ratings, most rated first.
///
/// The sort is stable, so rows with equal counts keep their table order.
pub fn top_by_count<R: AsRef<MovieSummary>>(rows: &[R], n: usize) -> Vec<&R> {
    let mut ranked: Vec<&R> = rows.iter().collect();
    ranked.sort_by(|a, b| b.as_ref().rating_count.cmp(&a.as_ref().rating_count));
    ranked.truncate(n);
    ranked
}

/// The row at 0-based position `rank` when ranked by rating count.
pub fn nth_by_count<R: AsRef<MovieSummary>>(rows: &[R], rank: usize) -> Result<&R, QueryError> {
    top_by_count(rows, rank + 1)
        .get(rank)
        .copied()
        .ok_or(QueryError::InsufficientData {
            needed: rank + 1,
            available: rows.len(),
        })
}

/// First row attaining the maximum key. `None` and NaN keys never win.
fn argmax_by<R>(rows: &[R], key: impl Fn(&R) -> Option<f64>) -> Option<&R> {
    let mut best: Option<(&R, f64)> = None;
    for row in rows {
        let Some(value) = key(row).filter(|v| !v.is_nan()) else {
            continue;
        };
        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((row, value)),
        }
    }
    best.map(|(row, _)| row)
}
