//! Bounded concurrent fetch of many ratings.
//!
//! `RatingFetcher` maps one [`RatingSource`] lookup over a list of ids with
//! at most `workers` lookups in flight. A worker picks up the next id as soon
//! as its lookup finishes, whatever the state of earlier ids. Results are
//! put back in input order, and a failed lookup becomes `None` without
//! touching the rest of the batch.

use std::time::{Duration, Instant};

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::client::RatingSource;
use crate::config::FetchConfig;
use crate::error::FetchError;

/// Fixed-width pool running rating lookups.
pub struct RatingFetcher<S> {
    source: S,
    workers: usize,
    timeout: Duration,
}

impl<S: RatingSource> RatingFetcher<S> {
    /// Create a fetcher using the pool width and timeout from `config`.
    ///
    /// A width of 0 is treated as 1.
    pub fn new(source: S, config: &FetchConfig) -> Self {
        Self {
            source,
            workers: config.workers.max(1),
            timeout: config.timeout,
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch the rating of every id.
    ///
    /// `result[i]` belongs to `imdb_ids[i]`. Every failure (network, status,
    /// timeout, missing or unparseable rating) is logged and recorded as
    /// `None`.
    pub async fn fetch_all(&self, imdb_ids: &[String]) -> Vec<Option<f64>> {
        let start = Instant::now();
        info!(
            "Fetching {} ratings with {} workers",
            imdb_ids.len(),
            self.workers
        );

        let completed: Vec<(usize, Option<f64>)> = stream::iter(imdb_ids.iter().enumerate())
            .map(|(position, imdb_id)| async move { (position, self.fetch_one(imdb_id).await) })
            .buffer_unordered(self.workers)
            .collect()
            .await;

        let mut results = vec![None; imdb_ids.len()];
        for (position, rating) in completed {
            results[position] = rating;
        }

        let fetched = results.iter().filter(|r| r.is_some()).count();
        info!(
            "Fetched {} of {} ratings in {:?} ({} failed)",
            fetched,
            results.len(),
            start.elapsed(),
            results.len() - fetched
        );
        results
    }

    async fn fetch_one(&self, imdb_id: &str) -> Option<f64> {
        let outcome = tokio::time::timeout(self.timeout, self.source.fetch_rating(imdb_id))
            .await
            .unwrap_or(Err(FetchError::Timeout(self.timeout)));

        match outcome {
            Ok(rating) => {
                debug!("tt{:0>7}: {}", imdb_id, rating);
                Some(rating)
            }
            Err(e) => {
                warn!("Failed to fetch rating for tt{:0>7}: {}", imdb_id, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory source: known ids answer after a delay, others fail.
    #[derive(Default)]
    struct MockSource {
        ratings: HashMap<String, (f64, u64)>,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
        calls: AtomicUsize,
    }

    impl MockSource {
        fn with(entries: &[(&str, f64, u64)]) -> Self {
            Self {
                ratings: entries
                    .iter()
                    .map(|&(id, rating, delay_ms)| (id.to_string(), (rating, delay_ms)))
                    .collect(),
                ..Self::default()
            }
        }
    }

    impl RatingSource for MockSource {
        async fn fetch_rating(&self, imdb_id: &str) -> Result<f64, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);

            let outcome = match self.ratings.get(imdb_id) {
                Some(&(rating, delay_ms)) => {
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                    Ok(rating)
                }
                None => Err(FetchError::MissingRating),
            };

            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            outcome
        }
    }

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn fetcher(source: MockSource, workers: usize, timeout: Duration) -> RatingFetcher<MockSource> {
        let config = FetchConfig {
            workers,
            timeout,
            ..FetchConfig::default()
        };
        RatingFetcher::new(source, &config)
    }

    #[tokio::test]
    async fn test_results_follow_input_order() {
        // Later ids finish first
        let source = MockSource::with(&[
            ("111161", 9.3, 60),
            ("068646", 9.2, 30),
            ("468569", 9.0, 1),
        ]);
        let fetcher = fetcher(source, 3, Duration::from_secs(5));

        let results = fetcher.fetch_all(&ids(&["111161", "068646", "468569"])).await;
        assert_eq!(results, vec![Some(9.3), Some(9.2), Some(9.0)]);
    }

    #[tokio::test]
    async fn test_failure_yields_none_in_place() {
        let source = MockSource::with(&[("133093", 8.7, 5), ("137523", 8.8, 1)]);
        let fetcher = fetcher(source, 10, Duration::from_secs(5));

        let results = fetcher
            .fetch_all(&ids(&["133093", "unknown", "137523"]))
            .await;
        assert_eq!(results, vec![Some(8.7), None, Some(8.8)]);
    }

    #[tokio::test]
    async fn test_timeout_yields_none() {
        let source = MockSource::with(&[("1", 7.0, 1), ("2", 8.0, 500)]);
        let fetcher = fetcher(source, 2, Duration::from_millis(50));

        let results = fetcher.fetch_all(&ids(&["1", "2"])).await;
        assert_eq!(results, vec![Some(7.0), None]);
    }

    #[tokio::test]
    async fn test_in_flight_never_exceeds_workers() {
        let entries: Vec<(String, f64, u64)> = (0..40)
            .map(|i| (i.to_string(), 5.0 + (i % 5) as f64, 5 + (i % 3) as u64))
            .collect();
        let borrowed: Vec<(&str, f64, u64)> = entries
            .iter()
            .map(|(id, r, d)| (id.as_str(), *r, *d))
            .collect();
        let source = MockSource::with(&borrowed);
        let fetcher = fetcher(source, 4, Duration::from_secs(5));

        let all_ids: Vec<String> = entries.iter().map(|(id, _, _)| id.clone()).collect();
        let results = fetcher.fetch_all(&all_ids).await;

        assert_eq!(results.len(), 40);
        assert!(results.iter().all(|r| r.is_some()));
        assert_eq!(fetcher.source().calls.load(Ordering::SeqCst), 40);

        let max = fetcher.source().max_in_flight.load(Ordering::SeqCst);
        assert!(max <= 4, "saw {} requests in flight with 4 workers", max);
        assert!(max > 1, "requests never overlapped");
    }

    #[tokio::test]
    async fn test_slow_first_id_does_not_hold_back_free_workers() {
        // One slow lookup plus 40 quick ones on 5 workers: the other 4
        // workers clear the quick ones (10 rounds of 100ms) while the slow
        // one runs, so the batch takes about 1s. Waiting on the slow one
        // before starting more work would take about 1.8s.
        let mut entries: Vec<(String, f64, u64)> = vec![("0".to_string(), 9.0, 1000)];
        entries.extend((1..=40).map(|i| (i.to_string(), 7.0, 100)));
        let borrowed: Vec<(&str, f64, u64)> = entries
            .iter()
            .map(|(id, r, d)| (id.as_str(), *r, *d))
            .collect();
        let fetcher = fetcher(MockSource::with(&borrowed), 5, Duration::from_secs(5));

        let all_ids: Vec<String> = entries.iter().map(|(id, _, _)| id.clone()).collect();
        let start = Instant::now();
        let results = fetcher.fetch_all(&all_ids).await;
        let elapsed = start.elapsed();

        assert_eq!(results[0], Some(9.0));
        assert!(results[1..].iter().all(|r| *r == Some(7.0)));
        assert!(
            elapsed < Duration::from_millis(1400),
            "batch took {:?}; free workers waited on the slow lookup",
            elapsed
        );
        assert!(fetcher.source().max_in_flight.load(Ordering::SeqCst) <= 5);
    }

    #[tokio::test]
    async fn test_zero_workers_still_runs() {
        let source = MockSource::with(&[("1", 6.5, 1)]);
        let fetcher = fetcher(source, 0, Duration::from_secs(5));

        assert_eq!(fetcher.workers(), 1);
        assert_eq!(fetcher.fetch_all(&ids(&["1"])).await, vec![Some(6.5)]);
    }

    #[tokio::test]
    async fn test_empty_input() {
        let fetcher = fetcher(MockSource::default(), 10, Duration::from_secs(5));
        assert!(fetcher.fetch_all(&[]).await.is_empty());
    }
}
