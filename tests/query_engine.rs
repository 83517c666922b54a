mod common;

use cinedex::{
    error::AppError,
    models::{Genre, SortField},
    query::{ListQuery, QueryEngine},
};
use common::{ids, titles};

async fn seeded_engine() -> QueryEngine {
    QueryEngine::new(common::seeded_store().await)
}

fn list_query(genre: Option<&str>, sort_by: SortField, page: u64, page_size: u64) -> ListQuery {
    ListQuery::new(genre.map(str::to_string), sort_by, page, page_size).unwrap()
}

#[tokio::test]
async fn drama_sorted_by_title_first_page() {
    let engine = seeded_engine().await;

    let page = engine.list(&list_query(Some("Drama"), SortField::Title, 1, 2)).await.unwrap();

    assert_eq!(titles(&page.movies), ["Forrest Gump", "Goodfellas"]);
    assert_eq!(page.total, 6);
    assert_eq!(page.total_pages(), 3);
}

#[tokio::test]
async fn drama_pages_walk_the_whole_set() {
    let engine = seeded_engine().await;

    let page = engine.list(&list_query(Some("Drama"), SortField::Title, 3, 2)).await.unwrap();
    assert_eq!(titles(&page.movies), ["The Godfather", "The Shawshank Redemption"]);

    let beyond = engine.list(&list_query(Some("Drama"), SortField::Title, 4, 2)).await.unwrap();
    assert!(beyond.movies.is_empty());
    assert_eq!(beyond.total, 6);
}

#[tokio::test]
async fn page_lengths_never_exceed_page_size() {
    let engine = seeded_engine().await;

    let mut lengths = Vec::new();
    for page in 1..=5 {
        let result = engine.list(&list_query(None, SortField::Rating, page, 3)).await.unwrap();
        assert_eq!(result.total, 8);
        lengths.push(result.movies.len());
    }

    assert_eq!(lengths, [3, 3, 2, 0, 0]);
}

#[tokio::test]
async fn title_sorts_ascending() {
    let engine = seeded_engine().await;

    let page = engine.list(&list_query(None, SortField::Title, 1, 20)).await.unwrap();

    assert_eq!(
        titles(&page.movies),
        [
            "Forrest Gump",
            "Goodfellas",
            "Inception",
            "Pulp Fiction",
            "The Dark Knight",
            "The Godfather",
            "The Matrix",
            "The Shawshank Redemption",
        ]
    );
}

#[tokio::test]
async fn numeric_fields_sort_descending_with_id_tie_break() {
    let engine = seeded_engine().await;

    let by_rating = engine.list(&list_query(None, SortField::Rating, 1, 20)).await.unwrap();
    assert_eq!(ids(&by_rating.movies), ["1", "2", "3", "4", "5", "6", "7", "8"]);
    assert!(by_rating.movies.windows(2).all(|w| w[0].rating >= w[1].rating));

    let by_year = engine.list(&list_query(None, SortField::Year, 1, 20)).await.unwrap();
    assert_eq!(ids(&by_year.movies), ["6", "3", "7", "1", "4", "5", "8", "2"]);

    let by_featured = engine.list(&list_query(None, SortField::Featured, 1, 20)).await.unwrap();
    assert_eq!(ids(&by_featured.movies), ["1", "2", "3", "4", "5", "6", "7", "8"]);
    assert!(by_featured.movies[..3].iter().all(|m| m.featured));
    assert!(by_featured.movies[3..].iter().all(|m| !m.featured));
}

#[tokio::test]
async fn all_sentinel_matches_absent_filter() {
    let engine = seeded_engine().await;

    for sort in [SortField::Rating, SortField::Year, SortField::Title, SortField::Featured] {
        let all = engine.list(&list_query(Some("all"), sort, 1, 5)).await.unwrap();
        let none = engine.list(&list_query(None, sort, 1, 5)).await.unwrap();
        assert_eq!(all.movies, none.movies);
        assert_eq!(all.total, none.total);
    }
}

#[tokio::test]
async fn unknown_genre_is_empty_not_an_error() {
    let engine = seeded_engine().await;

    let page = engine.list(&list_query(Some("Noir"), SortField::Rating, 1, 20)).await.unwrap();

    assert!(page.movies.is_empty());
    assert_eq!(page.total, 0);
    assert_eq!(page.total_pages(), 0);
}

#[tokio::test]
async fn genre_filter_is_exact_membership() {
    let engine = seeded_engine().await;

    // "Dram" is a substring of "Drama" but not a member of any list
    let page = engine.list(&list_query(Some("Dram"), SortField::Rating, 1, 20)).await.unwrap();
    assert_eq!(page.total, 0);

    let page = engine.list(&list_query(Some("Sci-Fi"), SortField::Rating, 1, 20)).await.unwrap();
    assert_eq!(ids(&page.movies), ["6", "7"]);
}

#[tokio::test]
async fn empty_store_lists_nothing() {
    let engine = QueryEngine::new(common::empty_store().await);

    let page = engine.list(&ListQuery::default()).await.unwrap();

    assert!(page.movies.is_empty());
    assert_eq!(page.total, 0);
}

#[tokio::test]
async fn featured_returns_the_three_flagged_movies() {
    let engine = seeded_engine().await;

    let featured = engine.featured().await.unwrap();

    let ratings: Vec<f64> = featured.iter().map(|m| m.rating).collect();
    assert_eq!(ratings, [9.3, 9.2, 9.0]);
    assert!(featured.iter().all(|m| m.featured));
}

#[tokio::test]
async fn featured_is_capped_at_ten() {
    let store = common::seeded_store().await;
    for i in 0..12 {
        let mut movie = common::new_movie(&format!("Spotlight {i}"), 5.0, &[Genre::Drama]);
        movie.featured = true;
        store.insert(movie).await.unwrap();
    }

    let featured = QueryEngine::new(store).featured().await.unwrap();

    assert_eq!(featured.len(), 10);
    assert_eq!(ids(&featured[..3]), ["1", "2", "3"]);
}

#[tokio::test]
async fn top_rated_respects_limit_and_breaks_ties_by_id() {
    let engine = seeded_engine().await;

    let top = engine.top_rated(3).await.unwrap();
    assert_eq!(ids(&top), ["1", "2", "3"]);

    let all = engine.top_rated(20).await.unwrap();
    assert_eq!(all.len(), 8);
    // 8.8: Forrest Gump (5) and Inception (6); 8.7: The Matrix (7) and Goodfellas (8)
    assert_eq!(ids(&all[4..]), ["5", "6", "7", "8"]);
}

#[tokio::test]
async fn by_genre_ranks_members_by_rating() {
    let engine = seeded_engine().await;

    let crime = engine.by_genre("Crime").await.unwrap();
    assert_eq!(ids(&crime), ["2", "3", "4", "8"]);

    assert!(engine.by_genre("Western").await.unwrap().is_empty());
}

#[tokio::test]
async fn by_genre_is_capped_at_fifty() {
    let store = common::empty_store().await;
    for i in 0..55 {
        store.insert(common::new_movie(&format!("Horror {i}"), 6.0, &[Genre::Horror])).await.unwrap();
    }

    let horror = QueryEngine::new(store).by_genre("Horror").await.unwrap();

    assert_eq!(horror.len(), 50);
}

#[tokio::test]
async fn pages_beyond_any_offset_are_empty_with_total() {
    let engine = seeded_engine().await;

    for page in [1 << 62, u64::MAX] {
        let result = engine.list(&list_query(None, SortField::Rating, page, 100)).await.unwrap();
        assert!(result.movies.is_empty());
        assert_eq!(result.total, 8);
        assert_eq!(result.page, page);
    }

    let drama = engine.list(&list_query(Some("Drama"), SortField::Title, u64::MAX, 2)).await.unwrap();
    assert!(drama.movies.is_empty());
    assert_eq!(drama.total, 6);
}

#[tokio::test]
async fn top_rated_accepts_huge_limits() {
    let engine = seeded_engine().await;

    assert_eq!(engine.top_rated(u64::MAX).await.unwrap().len(), 8);
}

#[tokio::test]
async fn closed_store_reports_unavailable() {
    let store = common::seeded_store().await;
    let engine = QueryEngine::new(store.clone());

    store.db().clone().close().await.unwrap();

    let err = engine.list(&ListQuery::default()).await.unwrap_err();
    assert!(matches!(err, AppError::StoreUnavailable(_)), "{err:?}");
}
