use tracing::debug;

use crate::{
    error::{AppError, AppResult},
    models::{Movie, SortField, SortOrder},
    store::{MovieFilter, MovieStore},
};

/// Genre filter value that means "no genre constraint".
pub const ALL_GENRES: &str = "all";
pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 100;
pub const FEATURED_CAP: u64 = 10;
pub const TOP_RATED_DEFAULT: u64 = 20;
pub const BY_GENRE_CAP: u64 = 50;

#[derive(Clone, Debug, PartialEq)]
pub struct ListQuery {
    genre: Option<String>,
    sort_by: SortField,
    page: u64,
    page_size: u64,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self { genre: None, sort_by: SortField::default(), page: 1, page_size: DEFAULT_PAGE_SIZE }
    }
}

impl ListQuery {
    pub fn new(
        genre: Option<String>,
        sort_by: SortField,
        page: u64,
        page_size: u64,
    ) -> AppResult<Self> {
        if page < 1 {
            return Err(AppError::validation("page must be at least 1"));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(AppError::validation(format!(
                "limit must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }

        let genre = genre.filter(|g| g != ALL_GENRES);
        Ok(Self { genre, sort_by, page, page_size })
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Rows to skip, or `None` when the window starts past any offset the
    /// store can address (SQLite binds offsets as `i64`).
    pub fn offset(&self) -> Option<u64> {
        (self.page - 1)
            .checked_mul(self.page_size)
            .filter(|offset| i64::try_from(*offset).is_ok())
    }

    fn filter(&self) -> MovieFilter {
        MovieFilter { genre: self.genre.clone(), ..Default::default() }
    }
}

#[derive(Clone, Debug)]
pub struct MoviePage {
    pub movies: Vec<Movie>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}

impl MoviePage {
    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(self.per_page)
    }
}

#[derive(Clone, Debug)]
pub struct QueryEngine {
    store: MovieStore,
}

impl QueryEngine {
    pub fn new(store: MovieStore) -> Self {
        Self { store }
    }

    pub async fn list(&self, query: &ListQuery) -> AppResult<MoviePage> {
        let filter = query.filter();
        let sort = query.sort_by;

        debug!(
            genre = ?query.genre,
            sort_by = sort.as_str(),
            page = query.page,
            page_size = query.page_size,
            "listing movies"
        );

        let (total, movies) = match query.offset() {
            Some(offset) => futures::try_join!(
                self.store.count(&filter),
                self.store.find(
                    &filter,
                    sort,
                    sort.natural_order(),
                    offset,
                    Some(query.page_size),
                )
            )?,
            None => (self.store.count(&filter).await?, Vec::new()),
        };

        debug!(total = total, returned = movies.len(), "listed movies");

        Ok(MoviePage { movies, total, page: query.page, per_page: query.page_size })
    }

    pub async fn get(&self, id: &str) -> AppResult<Option<Movie>> {
        self.store.find_by_id(id).await
    }

    pub async fn featured(&self) -> AppResult<Vec<Movie>> {
        self.ranked(&MovieFilter::featured(), FEATURED_CAP).await
    }

    pub async fn top_rated(&self, limit: u64) -> AppResult<Vec<Movie>> {
        self.ranked(&MovieFilter::default(), limit).await
    }

    pub async fn by_genre(&self, genre: &str) -> AppResult<Vec<Movie>> {
        self.ranked(&MovieFilter::genre(genre), BY_GENRE_CAP).await
    }

    async fn ranked(&self, filter: &MovieFilter, cap: u64) -> AppResult<Vec<Movie>> {
        let movies = self
            .store
            .find(filter, SortField::Rating, SortOrder::Descending, 0, Some(cap))
            .await?;
        debug!(filter = ?filter, cap = cap, returned = movies.len(), "ranked movies");
        Ok(movies)
    }
}
