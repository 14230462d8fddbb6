//! Aggregation, filtering and queries over the MovieLens tables.
//!
//! This crate provides:
//! - Per-movie rating aggregation and the joins that build derived tables
//! - Filter trait and implementations, composed with FilterPipeline
//! - The fixed queries (most rated, top N, nth in a genre, argmax by rating)
//! - Histogram and density of one movie's ratings
//!
//! ## Architecture
//! The derived tables are plain `Vec`s of typed rows threaded through
//! stages:
//! 1. `aggregate_ratings` + `join_movies` produce one `MovieSummary` per rated movie
//! 2. `MinimumCountFilter` keeps the popular ones (more than 50 ratings)
//! 3. `attach_links` turns them into `EnrichedMovie` rows carrying an IMDb id
//! 4. `merge_external_ratings` + `RatedFilter` keep the rows whose rating was fetched
//!
//! ## Example Usage
//! ```ignore
//! use analysis::{popular_movies, queries, FilterPipeline};
//! use analysis::filters::GenreFilter;
//!
//! let popular = popular_movies(&index, 50);
//! let sci_fi = FilterPipeline::new()
//!     .add_filter(GenreFilter::new("Sci-Fi"))
//!     .apply(popular.clone());
//!
//! match queries::nth_by_count(&sci_fi, 2) {
//!     Ok(movie) => println!("{}", movie.title),
//!     Err(e) => println!("{}", e),
//! }
//! ```

pub mod aggregate;
pub mod distribution;
pub mod error;
pub mod filter_pipeline;
pub mod filters;
pub mod queries;
pub mod records;
pub mod traits;

// Re-export main types
pub use aggregate::{
    aggregate_ratings, attach_links, join_movies, merge_external_ratings, popular_movies,
};
pub use distribution::{DEFAULT_BIN_WIDTH, HistogramBin, RatingDistribution, rating_distribution};
pub use error::QueryError;
pub use filter_pipeline::FilterPipeline;
pub use records::{EnrichedMovie, MovieSummary, RatingStats};
pub use traits::Filter;
