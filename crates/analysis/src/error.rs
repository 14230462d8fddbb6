//! Outcomes of queries that found nothing to answer with.

use thiserror::Error;

/// Why a query produced no answer.
///
/// None of these are fatal: the explorer records them in its report and
/// prints a "not found" style line instead of aborting the run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    /// No movie carries this exact title
    #[error("no movie titled {0:?}")]
    TitleNotFound(String),

    /// A ranked query asked for more rows than the table has
    #[error("not enough data: needed {needed} rows, found {available}")]
    InsufficientData { needed: usize, available: usize },

    /// The table (or value set) the query runs over is empty
    #[error("no data: {0}")]
    NoData(String),
}
