//! External rating client for IMDb title pages.
//!
//! This crate provides:
//! - `RatingSource`, one async rating lookup, and its HTTP implementation `ImdbClient`
//! - `RatingFetcher`, a bounded pool that maps a source over many ids
//! - HTML extraction of the rating from a title page
//!
//! Failures are per item: a batch always returns one `Option<f64>` per id.
//!
//! ## Example Usage
//! ```ignore
//! use rating_client::{FetchConfig, ImdbClient, RatingFetcher};
//!
//! let config = FetchConfig::default();
//! let fetcher = RatingFetcher::new(ImdbClient::new(&config)?, &config);
//! let ratings = fetcher.fetch_all(&["137523".to_string()]).await;
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod html;

pub use client::{ImdbClient, RatingSource, title_url};
pub use config::FetchConfig;
pub use error::FetchError;
pub use fetcher::RatingFetcher;
pub use html::extract_rating;
