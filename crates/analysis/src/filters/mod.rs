//! Filter implementations for the derived movie tables.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FilterPipeline.

pub mod genre;
pub mod minimum_count;
pub mod rated;

// Re-export for convenience
pub use genre::GenreFilter;
pub use minimum_count::MinimumCountFilter;
pub use rated::RatedFilter;
