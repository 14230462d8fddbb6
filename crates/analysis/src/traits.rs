//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to derived tables.

/// Core trait for filtering table rows.
///
/// All filters must implement this trait to be used in the FilterPipeline.
/// A filter is generic over the row type so the same genre or popularity
/// filter works before and after the external ratings are merged in.
///
/// ## Design Note
/// - `Send + Sync` allows filters to be shared with worker threads
/// - Filters take ownership of the rows and return the survivors in their
///   original order
pub trait Filter<R>: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Whether a single row survives this filter
    fn keep(&self, row: &R) -> bool;

    /// Apply this filter to a table.
    ///
    /// # Arguments
    /// * `rows` - The rows to filter (takes ownership)
    ///
    /// # Returns
    /// The surviving rows, order preserved
    fn apply(&self, rows: Vec<R>) -> Vec<R> {
        rows.into_iter().filter(|row| self.keep(row)).collect()
    }
}
