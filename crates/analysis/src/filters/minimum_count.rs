//! Filter keeping only movies with enough ratings to count as popular.

use crate::records::MovieSummary;
use crate::traits::Filter;

/// Keeps rows whose `rating_count` is strictly greater than `min_count`.
///
/// With the default threshold of 50, a movie with exactly 50 ratings is
/// dropped and one with 51 survives.
pub struct MinimumCountFilter {
    min_count: u32,
}

impl MinimumCountFilter {
    /// Create a new MinimumCountFilter.
    ///
    /// # Arguments
    /// * `min_count` - Rows need more ratings than this to survive
    pub fn new(min_count: u32) -> Self {
        Self { min_count }
    }
}

impl<R: AsRef<MovieSummary>> Filter<R> for MinimumCountFilter {
    fn name(&self) -> &str {
        "MinimumCountFilter"
    }

    fn keep(&self, row: &R) -> bool {
        row.as_ref().rating_count > self.min_count
    }
}
