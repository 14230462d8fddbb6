//! Filter keeping only movies of one genre.

use crate::records::MovieSummary;
use crate::traits::Filter;

/// Keeps rows whose genre list contains `genre` as a substring.
///
/// Matching is case-sensitive: `"Sci-Fi"` matches, `"sci-fi"` does not.
pub struct GenreFilter {
    genre: String,
}

impl GenreFilter {
    pub fn new(genre: impl Into<String>) -> Self {
        Self {
            genre: genre.into(),
        }
    }
}

impl<R: AsRef<MovieSummary>> Filter<R> for GenreFilter {
    fn name(&self) -> &str {
        "GenreFilter"
    }

    fn keep(&self, row: &R) -> bool {
        row.as_ref().has_genre(&self.genre)
    }
}
