//! # Exploration Orchestrator
//!
//! Runs the whole exploration over a loaded `DataIndex`:
//! 1. Aggregate ratings and keep the popular movies
//! 2. Answer the fixed lookups (most rated, tags, mean, distribution,
//!    highest mean, top N, nth in genre)
//! 3. Join popular movies with their IMDb links
//! 4. Fetch IMDb ratings through the bounded pool
//! 5. Drop failed fetches and rank by IMDb rating, overall and in genre
//!
//! Lookup failures are part of the report, not errors. Only chart I/O can
//! fail the run.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, warn};

use analysis::filters::{GenreFilter, RatedFilter};
use analysis::{
    EnrichedMovie, FilterPipeline, MovieSummary, QueryError, RatingDistribution, attach_links,
    merge_external_ratings, popular_movies, queries, rating_distribution,
};
use data_loader::{DataIndex, DatasetCounts, MovieId};
use rating_client::{RatingFetcher, RatingSource};

use crate::chart::render_distribution_chart;
use crate::config::ExplorerConfig;

/// Distinct tags of a movie looked up by title
#[derive(Debug, Clone, PartialEq)]
pub struct TitleTags {
    pub movie_id: MovieId,
    pub tags: Vec<String>,
}

/// Mean of all ratings of a movie looked up by title
#[derive(Debug, Clone, PartialEq)]
pub struct TitleMean {
    pub movie_id: MovieId,
    pub mean: f64,
}

/// Rating distribution of a movie looked up by title
#[derive(Debug, Clone, PartialEq)]
pub struct TitleDistribution {
    pub movie_id: MovieId,
    pub distribution: RatingDistribution,
    /// Set when a chart was written
    pub chart_path: Option<PathBuf>,
}

/// Outcome of the IMDb enrichment stage
#[derive(Debug, Clone, PartialEq)]
pub enum ExternalOutcome {
    /// No fetcher was configured
    Skipped,
    Fetched(ExternalSummary),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExternalSummary {
    /// Popular movies with a link, i.e. ids sent to the pool
    pub requested: usize,
    /// Rows left after dropping failed fetches
    pub rated: Vec<EnrichedMovie>,
    pub highest: Result<EnrichedMovie, QueryError>,
    pub highest_in_genre: Result<EnrichedMovie, QueryError>,
}

/// Everything one run found, in the order it is reported
#[derive(Debug, Clone, PartialEq)]
pub struct ExplorationReport {
    pub counts: DatasetCounts,
    pub popular_count: usize,
    pub most_rated: Result<MovieSummary, QueryError>,
    pub tags: Result<TitleTags, QueryError>,
    pub mean: Result<TitleMean, QueryError>,
    pub distribution: Result<TitleDistribution, QueryError>,
    pub highest_mean: Result<MovieSummary, QueryError>,
    pub top_by_count: Vec<MovieSummary>,
    pub nth_in_genre: Result<MovieSummary, QueryError>,
    pub external: ExternalOutcome,
}

/// Coordinates the analysis stages and the optional IMDb fetch.
pub struct MovieExplorer<S> {
    data_index: Arc<DataIndex>,
    config: ExplorerConfig,
    fetcher: Option<RatingFetcher<S>>,
}

impl<S: RatingSource> MovieExplorer<S> {
    /// `fetcher` of `None` skips the enrichment stage.
    pub fn new(
        data_index: Arc<DataIndex>,
        config: ExplorerConfig,
        fetcher: Option<RatingFetcher<S>>,
    ) -> Self {
        Self {
            data_index,
            config,
            fetcher,
        }
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    /// Run every stage and collect the results.
    pub async fn run(&self) -> Result<ExplorationReport> {
        let start_time = Instant::now();
        let index = self.data_index.as_ref();

        let popular = popular_movies(index, self.config.min_ratings);
        info!("Selected {} popular movies", popular.len());

        let most_rated = queries::most_rated(&popular).cloned();
        let tags = self.tags();
        let mean = self.mean();
        let distribution = self.distribution()?;
        let highest_mean = queries::highest_mean(&popular).cloned();
        let top_by_count = queries::top_by_count(&popular, self.config.top_n)
            .into_iter()
            .cloned()
            .collect();
        let nth_in_genre = self.nth_in_genre(&popular);

        let external = match &self.fetcher {
            Some(fetcher) => ExternalOutcome::Fetched(self.enrich(fetcher, &popular).await),
            None => {
                info!("Skipping IMDb enrichment");
                ExternalOutcome::Skipped
            }
        };

        info!("Exploration finished in {:?}", start_time.elapsed());
        Ok(ExplorationReport {
            counts: index.counts(),
            popular_count: popular.len(),
            most_rated,
            tags,
            mean,
            distribution,
            highest_mean,
            top_by_count,
            nth_in_genre,
            external,
        })
    }

    fn tags(&self) -> Result<TitleTags, QueryError> {
        let movie_id = queries::find_movie_id(&self.data_index, &self.config.tags_title)?;
        Ok(TitleTags {
            movie_id,
            tags: queries::unique_tags(&self.data_index, movie_id),
        })
    }

    fn mean(&self) -> Result<TitleMean, QueryError> {
        let movie_id = queries::find_movie_id(&self.data_index, &self.config.mean_title)?;
        Ok(TitleMean {
            movie_id,
            mean: queries::mean_rating(&self.data_index, movie_id)?,
        })
    }

    /// Lookup misses are reported; a chart that cannot be written is fatal.
    fn distribution(&self) -> Result<Result<TitleDistribution, QueryError>> {
        let title = &self.config.distribution_title;
        let movie_id = match queries::find_movie_id(&self.data_index, title) {
            Ok(id) => id,
            Err(e) => {
                warn!("Skipping rating distribution: {}", e);
                return Ok(Err(e));
            }
        };

        let values = queries::rating_values(&self.data_index, movie_id);
        let distribution = rating_distribution(&values, self.config.bin_width);

        if let Some(path) = &self.config.chart_path {
            render_distribution_chart(&distribution, title, path)
                .with_context(|| format!("Rendering rating distribution of {}", title))?;
        }

        Ok(Ok(TitleDistribution {
            movie_id,
            distribution,
            chart_path: self.config.chart_path.clone(),
        }))
    }

    fn nth_in_genre(&self, popular: &[MovieSummary]) -> Result<MovieSummary, QueryError> {
        let in_genre = FilterPipeline::new()
            .add_filter(GenreFilter::new(self.config.genre.as_str()))
            .apply(popular.to_vec());
        queries::nth_by_count(&in_genre, self.config.genre_rank).cloned()
    }

    async fn enrich(
        &self,
        fetcher: &RatingFetcher<S>,
        popular: &[MovieSummary],
    ) -> ExternalSummary {
        let linked = attach_links(popular.to_vec(), &self.data_index);
        let imdb_ids: Vec<String> = linked.iter().map(|m| m.imdb_id.clone()).collect();

        let fetched = fetcher.fetch_all(&imdb_ids).await;
        let rated = FilterPipeline::new()
            .add_filter(RatedFilter)
            .apply(merge_external_ratings(linked, fetched));

        let highest = queries::highest_external(&rated).cloned();
        let in_genre = FilterPipeline::new()
            .add_filter(GenreFilter::new(self.config.genre.as_str()))
            .apply(rated.clone());
        let highest_in_genre = queries::highest_external(&in_genre).cloned();

        ExternalSummary {
            requested: imdb_ids.len(),
            rated,
            highest,
            highest_in_genre,
        }
    }
}
