use tracing::debug;

use crate::{error::AppResult, store::MovieStore};

#[derive(Clone, Debug)]
pub struct GenreAggregator {
    store: MovieStore,
}

impl GenreAggregator {
    pub fn new(store: MovieStore) -> Self {
        Self { store }
    }

    /// Distinct genre names across all movies, ascending.
    pub async fn distinct_genres(&self) -> AppResult<Vec<String>> {
        let genres = self.store.distinct_genres().await?;
        debug!(count = genres.len(), "aggregated genres");
        Ok(genres)
    }
}
