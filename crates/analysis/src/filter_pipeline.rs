//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! multiple filters together using the builder pattern.

use crate::traits::Filter;
use tracing::debug;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(MinimumCountFilter::new(50))
///     .add_filter(GenreFilter::new("Sci-Fi"));
///
/// let sci_fi = pipeline.apply(summaries);
/// ```
pub struct FilterPipeline<R> {
    filters: Vec<Box<dyn Filter<R>>>,
}

impl<R> FilterPipeline<R> {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter<R> + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Number of filters in the pipeline
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Apply all filters in sequence, logging row counts around each one.
    pub fn apply(&self, rows: Vec<R>) -> Vec<R> {
        let mut current = rows;
        for filter in &self.filters {
            let before = current.len();
            current = filter.apply(current);
            debug!(
                "Filter {} kept {} of {} rows",
                filter.name(),
                current.len(),
                before
            );
        }
        current
    }
}

impl<R> Default for FilterPipeline<R> {
    fn default() -> Self {
        Self::new()
    }
}
