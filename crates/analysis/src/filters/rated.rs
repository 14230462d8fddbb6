//! Filter dropping movies whose external rating could not be fetched.

use crate::records::EnrichedMovie;
use crate::traits::Filter;

/// Removes rows whose `imdb_rating` is absent.
///
/// A fetched rating of `0.0` is a value like any other and is kept.
pub struct RatedFilter;

impl Filter<EnrichedMovie> for RatedFilter {
    fn name(&self) -> &str {
        "RatedFilter"
    }

    fn keep(&self, row: &EnrichedMovie) -> bool {
        row.imdb_rating.is_some()
    }
}
