//! Core domain types for the MovieLens `ml-latest-small` dataset.
//!
//! Rows of `ratings.csv`, `tags.csv` and `links.csv` deserialize straight into
//! these types (the serde renames match the CSV headers). `movies.csv` needs a
//! little post-processing (genre splitting, year extraction) and goes through
//! a raw record in the parser first.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a user
pub type UserId = u32;

/// Unique identifier for a movie (sparse, not contiguous)
pub type MovieId = u32;

// =============================================================================
// Row Types
// =============================================================================

/// A movie from `movies.csv`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    /// Title as stored in the dataset, e.g. "Matrix, The (1999)"
    pub title: String,
    /// Year extracted from the trailing "(YYYY)" of the title, if any
    pub year: Option<u16>,
    /// Genres split from the pipe-delimited field, in file order
    pub genres: Vec<String>,
}

/// A single rating from a user for a movie
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    #[serde(rename = "userId")]
    pub user_id: UserId,
    #[serde(rename = "movieId")]
    pub movie_id: MovieId,
    /// Rating value, 0.5 to 5.0 in half-star steps
    pub rating: f32,
    /// Unix timestamp when rating was made
    pub timestamp: i64,
}

/// A free-text tag a user attached to a movie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(rename = "userId")]
    pub user_id: UserId,
    #[serde(rename = "movieId")]
    pub movie_id: MovieId,
    pub tag: String,
    pub timestamp: i64,
}

/// Mapping from a movie to its external identifiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    #[serde(rename = "movieId")]
    pub movie_id: MovieId,
    /// IMDb id as digits, kept as text so leading zeros survive
    #[serde(rename = "imdbId")]
    pub imdb_id: String,
    /// TMDb id; blank for a handful of rows in the dataset
    #[serde(rename = "tmdbId")]
    pub tmdb_id: Option<u32>,
}

/// Row counts of a loaded dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DatasetCounts {
    pub movies: usize,
    pub ratings: usize,
    pub tags: usize,
    pub links: usize,
}

// =============================================================================
// DataIndex - The In-Memory Dataset
// =============================================================================

/// Holds all four tables plus the lookups the analysis needs.
///
/// Movies keep their file order because "first match" lookups and argmax tie
/// breaking depend on it. Everything else is indexed by movie id.
#[derive(Debug, Default)]
pub struct DataIndex {
    /// Movies in file order
    pub(crate) movies: Vec<Movie>,
    /// Position of each movie in `movies`
    pub(crate) movie_positions: HashMap<MovieId, usize>,
    /// First movie carrying each exact title
    pub(crate) title_index: HashMap<String, MovieId>,

    /// All ratings received by each movie, in file order
    pub(crate) movie_ratings: HashMap<MovieId, Vec<Rating>>,
    /// All tags attached to each movie, in file order
    pub(crate) movie_tags: HashMap<MovieId, Vec<Tag>>,
    pub(crate) links: HashMap<MovieId, Link>,

    pub(crate) rating_total: usize,
    pub(crate) tag_total: usize,
}

impl DataIndex {
    /// Creates a new, empty DataIndex
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a movie by ID
    pub fn get_movie(&self, id: MovieId) -> Option<&Movie> {
        self.movie_positions.get(&id).map(|&pos| &self.movies[pos])
    }

    /// All movies in file order
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// Find a movie by exact, case-sensitive title.
    ///
    /// When several movies share a title the first one in file order wins.
    pub fn find_movie_by_title(&self, title: &str) -> Option<&Movie> {
        self.title_index
            .get(title)
            .and_then(|&id| self.get_movie(id))
    }

    /// Get all ratings for a movie
    ///
    /// Returns an empty slice if the movie has no ratings
    pub fn get_movie_ratings(&self, movie_id: MovieId) -> &[Rating] {
        self.movie_ratings
            .get(&movie_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Ratings grouped by movie
    pub fn ratings_by_movie(&self) -> &HashMap<MovieId, Vec<Rating>> {
        &self.movie_ratings
    }

    /// Get all tags for a movie
    pub fn get_movie_tags(&self, movie_id: MovieId) -> &[Tag] {
        self.movie_tags
            .get(&movie_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Get the external identifiers for a movie
    pub fn get_link(&self, movie_id: MovieId) -> Option<&Link> {
        self.links.get(&movie_id)
    }

    /// Insert a movie, replacing any earlier movie with the same id in place
    pub fn insert_movie(&mut self, movie: Movie) {
        self.title_index
            .entry(movie.title.clone())
            .or_insert(movie.id);

        match self.movie_positions.get(&movie.id) {
            Some(&pos) => self.movies[pos] = movie,
            None => {
                self.movie_positions.insert(movie.id, self.movies.len());
                self.movies.push(movie);
            }
        }
    }

    /// Insert a rating
    pub fn insert_rating(&mut self, rating: Rating) {
        self.movie_ratings
            .entry(rating.movie_id)
            .or_default()
            .push(rating);
        self.rating_total += 1;
    }

    /// Insert a tag
    pub fn insert_tag(&mut self, tag: Tag) {
        self.movie_tags.entry(tag.movie_id).or_default().push(tag);
        self.tag_total += 1;
    }

    /// Insert a link
    pub fn insert_link(&mut self, link: Link) {
        self.links.insert(link.movie_id, link);
    }

    /// Get counts for debugging/validation
    pub fn counts(&self) -> DatasetCounts {
        DatasetCounts {
            movies: self.movies.len(),
            ratings: self.rating_total,
            tags: self.tag_total,
            links: self.links.len(),
        }
    }
}
