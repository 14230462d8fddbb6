//! Group-by and join stages that turn the raw tables into derived tables.
//!
//! Every derived table is ordered by ascending movie id (the group-by
//! order), and each join keeps the order of its left table. Rows without a
//! partner on the right side are dropped.

use std::collections::BTreeMap;

use data_loader::{DataIndex, MovieId};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::filter_pipeline::FilterPipeline;
use crate::filters::MinimumCountFilter;
use crate::records::{EnrichedMovie, MovieSummary, RatingStats};

/// Compute rating count and mean for every movie that has ratings.
///
/// Movies are processed in parallel, but each mean is summed sequentially,
/// so the output is identical from run to run.
pub fn aggregate_ratings(index: &DataIndex) -> BTreeMap<MovieId, RatingStats> {
    index
        .ratings_by_movie()
        .par_iter()
        .filter(|(_, ratings)| !ratings.is_empty())
        .map(|(&movie_id, ratings)| (movie_id, RatingStats::from_ratings(ratings)))
        .collect()
}

/// Inner join of the aggregate rows with movie metadata.
pub fn join_movies(
    index: &DataIndex,
    stats: &BTreeMap<MovieId, RatingStats>,
) -> Vec<MovieSummary> {
    let summaries: Vec<MovieSummary> = stats
        .iter()
        .filter_map(|(&movie_id, stats)| {
            let Some(movie) = index.get_movie(movie_id) else {
                debug!("Dropping ratings for unknown movie {}", movie_id);
                return None;
            };
            Some(MovieSummary {
                movie_id,
                title: movie.title.clone(),
                genres: movie.genres.clone(),
                rating_count: stats.rating_count,
                rating_mean: stats.rating_mean,
            })
        })
        .collect();

    if summaries.len() < stats.len() {
        warn!(
            "{} aggregate rows had no matching movie",
            stats.len() - summaries.len()
        );
    }
    summaries
}

/// Movies with strictly more than `min_count` ratings, joined with their
/// metadata.
pub fn popular_movies(index: &DataIndex, min_count: u32) -> Vec<MovieSummary> {
    let stats = aggregate_ratings(index);
    let summaries = join_movies(index, &stats);
    let total = summaries.len();

    let popular = FilterPipeline::new()
        .add_filter(MinimumCountFilter::new(min_count))
        .apply(summaries);

    info!(
        "{} of {} rated movies have more than {} ratings",
        popular.len(),
        total,
        min_count
    );
    popular
}

/// Inner join with `links.csv`, attaching each movie's IMDb id.
///
/// The external rating starts out absent.
pub fn attach_links(rows: Vec<MovieSummary>, index: &DataIndex) -> Vec<EnrichedMovie> {
    let total = rows.len();
    let linked: Vec<EnrichedMovie> = rows
        .into_iter()
        .filter_map(|movie| {
            let link = index.get_link(movie.movie_id)?;
            Some(EnrichedMovie {
                imdb_id: link.imdb_id.clone(),
                movie,
                imdb_rating: None,
            })
        })
        .collect();

    if linked.len() < total {
        warn!("{} movies had no IMDb link", total - linked.len());
    }
    linked
}

/// Attach fetched ratings to rows by position.
///
/// `ratings[i]` belongs to `rows[i]`. Rows past the end of `ratings` keep an
/// absent rating.
pub fn merge_external_ratings(
    rows: Vec<EnrichedMovie>,
    ratings: Vec<Option<f64>>,
) -> Vec<EnrichedMovie> {
    if rows.len() != ratings.len() {
        warn!(
            "Got {} external ratings for {} movies",
            ratings.len(),
            rows.len()
        );
    }

    rows.into_iter()
        .zip(ratings.into_iter().chain(std::iter::repeat(None)))
        .map(|(mut row, imdb_rating)| {
            row.imdb_rating = imdb_rating;
            row
        })
        .collect()
}
