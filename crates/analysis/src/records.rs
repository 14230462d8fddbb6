//! Row types of the derived tables.

use data_loader::{MovieId, Rating};

/// Count and mean of all ratings a movie received
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingStats {
    pub rating_count: u32,
    pub rating_mean: f64,
}

impl RatingStats {
    /// Summarise one movie's ratings.
    ///
    /// The sum runs sequentially in slice order so repeated runs over the same
    /// input produce bit-identical means.
    pub fn from_ratings(ratings: &[Rating]) -> Self {
        let rating_count = ratings.len() as u32;
        let rating_mean = if ratings.is_empty() {
            0.0
        } else {
            let total: f64 = ratings.iter().map(|r| r.rating as f64).sum();
            total / ratings.len() as f64
        };
        Self {
            rating_count,
            rating_mean,
        }
    }
}

/// Aggregate row joined with the movie it describes
#[derive(Debug, Clone, PartialEq)]
pub struct MovieSummary {
    pub movie_id: MovieId,
    pub title: String,
    pub genres: Vec<String>,
    pub rating_count: u32,
    pub rating_mean: f64,
}

impl MovieSummary {
    /// Substring match against the genre list, e.g. `has_genre("Sci-Fi")`
    pub fn has_genre(&self, needle: &str) -> bool {
        self.genres.iter().any(|genre| genre.contains(needle))
    }
}

impl AsRef<MovieSummary> for MovieSummary {
    fn as_ref(&self) -> &MovieSummary {
        self
    }
}

/// A summary joined with its IMDb id and the externally fetched rating
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedMovie {
    pub movie: MovieSummary,
    pub imdb_id: String,
    /// `None` until fetched, and for every fetch that failed
    pub imdb_rating: Option<f64>,
}

impl AsRef<MovieSummary> for EnrichedMovie {
    fn as_ref(&self) -> &MovieSummary {
        &self.movie
    }
}
