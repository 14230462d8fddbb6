//! Integration tests for the analysis stages.
//!
//! These tests run the stages the way the explorer chains them: aggregate,
//! filter, query, link, merge fetched ratings, filter again, query again.

use analysis::filters::{GenreFilter, RatedFilter};
use analysis::queries;
use analysis::{
    FilterPipeline, QueryError, attach_links, merge_external_ratings, popular_movies,
};
use data_loader::{DataIndex, Link, Movie, Rating};

fn add_movie(index: &mut DataIndex, id: u32, title: &str, genres: &[&str], ratings: &[f32]) {
    index.insert_movie(Movie {
        id,
        title: title.to_string(),
        year: None,
        genres: genres.iter().map(|g| g.to_string()).collect(),
    });
    for (user_id, &rating) in ratings.iter().enumerate() {
        index.insert_rating(Rating {
            user_id: user_id as u32 + 1,
            movie_id: id,
            rating,
            timestamp: 964982703,
        });
    }
    index.insert_link(Link {
        movie_id: id,
        imdb_id: format!("{:07}", id * 100),
        tmdb_id: None,
    });
}

fn create_test_index() -> DataIndex {
    let mut index = DataIndex::new();

    add_movie(&mut index, 1, "Toy Story (1995)", &["Animation", "Comedy"], &[4.0; 215]);
    add_movie(&mut index, 32, "Twelve Monkeys (a.k.a. 12 Monkeys) (1995)", &["Mystery", "Sci-Fi"], &[4.0; 177]);
    add_movie(&mut index, 260, "Star Wars: Episode IV - A New Hope (1977)", &["Action", "Sci-Fi"], &[4.5; 251]);
    add_movie(&mut index, 318, "Shawshank Redemption, The (1994)", &["Crime", "Drama"], &[4.5; 317]);
    add_movie(&mut index, 2571, "Matrix, The (1999)", &["Action", "Sci-Fi", "Thriller"], &[4.0; 278]);
    // Exactly at the threshold: not popular
    add_movie(&mut index, 1200, "Aliens (1986)", &["Action", "Sci-Fi"], &[4.0; 50]);
    add_movie(&mut index, 5, "Father of the Bride Part II (1995)", &["Comedy"], &[3.0; 2]);

    index
}

#[test]
fn test_popular_movies_exclude_sparse_ratings() {
    let index = create_test_index();
    let popular = popular_movies(&index, 50);

    assert_eq!(popular.len(), 5);
    assert!(popular.iter().all(|m| m.rating_count > 50));
    assert!(!popular.iter().any(|m| m.movie_id == 1200 || m.movie_id == 5));
}

#[test]
fn test_fixed_query_sequence() {
    let index = create_test_index();
    let popular = popular_movies(&index, 50);

    let most_rated = queries::most_rated(&popular).unwrap();
    assert_eq!(most_rated.title, "Shawshank Redemption, The (1994)");

    // 260 and 318 tie on 4.5; 260 comes first in table order
    let best = queries::highest_mean(&popular).unwrap();
    assert_eq!(best.movie_id, 260);

    let top: Vec<u32> = queries::top_by_count(&popular, 5)
        .iter()
        .map(|m| m.movie_id)
        .collect();
    assert_eq!(top, vec![318, 2571, 260, 1, 32]);

    let sci_fi = FilterPipeline::new()
        .add_filter(GenreFilter::new("Sci-Fi"))
        .apply(popular.clone());
    assert_eq!(queries::nth_by_count(&sci_fi, 2).unwrap().movie_id, 32);
}

#[test]
fn test_third_sci_fi_with_only_two_candidates() {
    let index = create_test_index();
    let popular: Vec<_> = popular_movies(&index, 50)
        .into_iter()
        .filter(|m| m.movie_id != 32)
        .collect();

    let sci_fi = FilterPipeline::new()
        .add_filter(GenreFilter::new("Sci-Fi"))
        .apply(popular);

    assert_eq!(sci_fi.len(), 2);
    assert_eq!(
        queries::nth_by_count(&sci_fi, 2).unwrap_err(),
        QueryError::InsufficientData {
            needed: 3,
            available: 2
        }
    );
}

#[test]
fn test_fetch_merge_drops_failures_in_order() {
    let index = create_test_index();
    let linked = attach_links(popular_movies(&index, 50), &index);
    let ids: Vec<u32> = linked.iter().map(|m| m.movie.movie_id).collect();
    assert_eq!(ids, vec![1, 32, 260, 318, 2571]);

    let fetched = vec![Some(8.3), None, Some(8.6), Some(9.3), None];
    let merged = merge_external_ratings(linked, fetched);
    let rated = FilterPipeline::new().add_filter(RatedFilter).apply(merged);

    let ids: Vec<u32> = rated.iter().map(|m| m.movie.movie_id).collect();
    assert_eq!(ids, vec![1, 260, 318]);

    assert_eq!(queries::highest_external(&rated).unwrap().movie.movie_id, 318);

    let sci_fi = FilterPipeline::new()
        .add_filter(GenreFilter::new("Sci-Fi"))
        .apply(rated);
    assert_eq!(queries::highest_external(&sci_fi).unwrap().movie.movie_id, 260);
}

#[test]
fn test_all_fetches_failed() {
    let index = create_test_index();
    let linked = attach_links(popular_movies(&index, 50), &index);
    let failures = vec![None; linked.len()];

    let rated = FilterPipeline::new()
        .add_filter(RatedFilter)
        .apply(merge_external_ratings(linked, failures));
    assert!(rated.is_empty());

    assert!(matches!(
        queries::highest_external(&rated),
        Err(QueryError::NoData(_))
    ));
    let sci_fi = FilterPipeline::new()
        .add_filter(GenreFilter::new("Sci-Fi"))
        .apply(rated);
    assert!(matches!(
        queries::highest_external(&sci_fi),
        Err(QueryError::NoData(_))
    ));
}
