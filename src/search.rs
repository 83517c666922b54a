use tracing::debug;

use crate::{
    error::AppResult,
    models::{Movie, SortField, SortOrder},
    store::{LIKE_ESCAPE, MovieFilter, MovieStore, fold},
};

pub const SEARCH_CAP: u64 = 50;

/// Case-insensitive substring search over title, director and genre.
/// Title and director are compared in Unicode lowercase.
#[derive(Clone, Debug)]
pub struct SearchEngine {
    store: MovieStore,
}

impl SearchEngine {
    pub fn new(store: MovieStore) -> Self {
        Self { store }
    }

    /// Movies where `query` occurs in the title, the director or any genre,
    /// best rated first. Expects a non-empty query.
    pub async fn search(&self, query: &str) -> AppResult<Vec<Movie>> {
        let filter = MovieFilter::matching(contains_pattern(&fold(query)));
        let movies = self
            .store
            .find(&filter, SortField::Rating, SortOrder::Descending, 0, Some(SEARCH_CAP))
            .await?;

        debug!(query = %query, returned = movies.len(), "search complete");
        Ok(movies)
    }
}

/// `%needle%` with LIKE metacharacters in the needle escaped.
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_') || c == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
