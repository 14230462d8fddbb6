//! Building a DataIndex from the four CSV files.

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

/// Valid range of a rating value
const RATING_RANGE: std::ops::RangeInclusive<f32> = 0.0..=5.0;

impl DataIndex {
    /// Load the MovieLens dataset from a directory
    ///
    /// Steps:
    /// 1. Parse movies.csv, ratings.csv, tags.csv and links.csv in parallel
    /// 2. Insert everything into a fresh index (file order preserved)
    /// 3. Validate data integrity
    pub fn load_from_files(data_dir: &Path) -> Result<Self> {
        info!("Loading MovieLens dataset from {:?}", data_dir);

        let movies_path = data_dir.join("movies.csv");
        let ratings_path = data_dir.join("ratings.csv");
        let tags_path = data_dir.join("tags.csv");
        let links_path = data_dir.join("links.csv");

        // Four-way parallelism from two nested joins; ratings.csv dominates
        let ((movies, links), (ratings, tags)) = rayon::join(
            || {
                rayon::join(
                    || parser::parse_movies(&movies_path),
                    || parser::parse_links(&links_path),
                )
            },
            || {
                rayon::join(
                    || parser::parse_ratings(&ratings_path),
                    || parser::parse_tags(&tags_path),
                )
            },
        );

        let movies = movies?;
        let links = links?;
        let ratings = ratings?;
        let tags = tags?;

        let mut index = DataIndex::new();
        for movie in movies {
            index.insert_movie(movie);
        }
        for rating in ratings {
            index.insert_rating(rating);
        }
        for tag in tags {
            index.insert_tag(tag);
        }
        for link in links {
            index.insert_link(link);
        }

        index.validate()?;

        let counts = index.counts();
        info!(
            "Loaded {} movies, {} ratings, {} tags, {} links",
            counts.movies, counts.ratings, counts.tags, counts.links
        );
        Ok(index)
    }

    /// Validate data integrity
    ///
    /// Out-of-range rating values are fatal. Ratings, tags and links that
    /// point at unknown movies are only reported: the joins downstream drop
    /// them anyway.
    pub fn validate(&self) -> Result<()> {
        for ratings in self.movie_ratings.values() {
            for rating in ratings {
                if !RATING_RANGE.contains(&rating.rating) {
                    return Err(DataLoadError::InvalidValue {
                        field: "rating".to_string(),
                        value: rating.rating.to_string(),
                    });
                }
            }
        }

        let known: HashSet<MovieId> = self.movies.iter().map(|m| m.id).collect();
        let dangling_ratings = self
            .movie_ratings
            .keys()
            .filter(|id| !known.contains(id))
            .count();
        let dangling_tags = self
            .movie_tags
            .keys()
            .filter(|id| !known.contains(id))
            .count();
        let dangling_links = self.links.keys().filter(|id| !known.contains(id)).count();

        if dangling_ratings + dangling_tags + dangling_links > 0 {
            warn!(
                "Unknown movie ids referenced: {} in ratings, {} in tags, {} in links",
                dangling_ratings, dangling_tags, dangling_links
            );
        }
        Ok(())
    }
}
