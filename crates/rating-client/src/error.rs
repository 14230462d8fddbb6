use std::time::Duration;

use thiserror::Error;

/// Ways a single rating fetch can fail.
///
/// None of these abort a batch: the fetcher logs them and records `None`.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("no response within {0:?}")]
    Timeout(Duration),

    #[error("page has no rating value")]
    MissingRating,

    #[error("rating value {0:?} is not a number")]
    InvalidRating(String),
}
