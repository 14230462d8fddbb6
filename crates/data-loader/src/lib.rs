//! # Data Loader Crate
//!
//! Loads the MovieLens `ml-latest-small` CSV files into an in-memory
//! [`DataIndex`].
//!
//! ## Main Components
//!
//! - **types**: Row types (Movie, Rating, Tag, Link) and the DataIndex
//! - **parser**: Deserialize the CSV files into row types
//! - **index**: Load a dataset directory and validate it
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::DataIndex;
//! use std::path::Path;
//!
//! let index = DataIndex::load_from_files(Path::new("data/ml-latest-small"))?;
//!
//! let matrix = index.find_movie_by_title("Matrix, The (1999)").unwrap();
//! let ratings = index.get_movie_ratings(matrix.id);
//! println!("{} has {} ratings", matrix.title, ratings.len());
//! ```

pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use types::{
    // Type aliases
    UserId,
    MovieId,
    // Core types
    Movie,
    Rating,
    Tag,
    Link,
    DataIndex,
    DatasetCounts,
};
