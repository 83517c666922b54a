use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, Statement,
    sea_query::{Expr, LikeExpr, Order},
};

use crate::{
    entities::movie,
    error::AppResult,
    models::{Movie, MoviePatch, NewMovie, SortField, SortOrder},
};

/// Largest OFFSET/LIMIT SQLite can bind (`i64::MAX`).
const MAX_BOUND: u64 = i64::MAX as u64;

/// Escape character used in every `LIKE` pattern built by this crate.
pub const LIKE_ESCAPE: char = '!';

const GENRE_EQUALS: &str = r#"EXISTS (SELECT 1 FROM json_each("movies"."genre") WHERE json_each.value = ?)"#;
const GENRE_LIKE: &str =
    r#"EXISTS (SELECT 1 FROM json_each("movies"."genre") WHERE json_each.value LIKE ? ESCAPE '!')"#;
const DISTINCT_GENRES: &str = r#"SELECT DISTINCT g.value AS name FROM "movies", json_each("movies"."genre") AS g ORDER BY name"#;

/// Predicate over the movie collection. Criteria that are set are ANDed.
#[derive(Clone, Debug, Default)]
pub struct MovieFilter {
    /// Exact membership in the genre list.
    pub genre: Option<String>,
    pub featured: Option<bool>,
    /// Escaped, already folded `LIKE` pattern matched against the folded
    /// title, the folded director or any genre.
    pub text_pattern: Option<String>,
}

impl MovieFilter {
    pub fn genre(genre: impl Into<String>) -> Self {
        Self { genre: Some(genre.into()), ..Default::default() }
    }

    pub fn featured() -> Self {
        Self { featured: Some(true), ..Default::default() }
    }

    pub fn matching(pattern: impl Into<String>) -> Self {
        Self { text_pattern: Some(pattern.into()), ..Default::default() }
    }

    fn condition(&self) -> Condition {
        let mut cond = Condition::all();

        if let Some(genre) = &self.genre {
            cond = cond.add(Expr::cust_with_values(GENRE_EQUALS, [genre.clone()]));
        }

        if let Some(featured) = self.featured {
            cond = cond.add(movie::Column::Featured.eq(featured));
        }

        if let Some(pattern) = &self.text_pattern {
            let like = || LikeExpr::new(pattern.clone()).escape(LIKE_ESCAPE);
            cond = cond.add(
                Condition::any()
                    .add(Expr::col((movie::Entity, movie::Column::TitleFolded)).like(like()))
                    .add(Expr::col((movie::Entity, movie::Column::DirectorFolded)).like(like()))
                    .add(Expr::cust_with_values(GENRE_LIKE, [pattern.clone()])),
            );
        }

        cond
    }
}

/// The persisted movie collection.
#[derive(Clone, Debug)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub async fn count(&self, filter: &MovieFilter) -> AppResult<u64> {
        let total = movie::Entity::find().filter(filter.condition()).count(&self.db).await?;
        Ok(total)
    }

    /// Filtered, sorted window of the collection. Ties on the sort key are
    /// broken by id ascending.
    pub async fn find(
        &self,
        filter: &MovieFilter,
        sort: SortField,
        order: SortOrder,
        offset: u64,
        limit: Option<u64>,
    ) -> AppResult<Vec<Movie>> {
        let order = match order {
            SortOrder::Ascending => Order::Asc,
            SortOrder::Descending => Order::Desc,
        };

        let rows = movie::Entity::find()
            .filter(filter.condition())
            .order_by(sort_column(sort), order)
            .order_by_asc(movie::Column::Id)
            .offset(offset.min(MAX_BOUND))
            .limit(limit.map(|limit| limit.min(MAX_BOUND)))
            .all(&self.db)
            .await?;

        rows.into_iter().map(Movie::try_from).collect()
    }

    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<Movie>> {
        movie::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await?
            .map(Movie::try_from)
            .transpose()
    }

    pub async fn insert(&self, new: NewMovie) -> AppResult<Movie> {
        let id = uuid::Uuid::new_v4().to_string();
        let model = new_active_model(id, new, now_ms())?;
        let row = model.insert(&self.db).await?;
        Movie::try_from(row)
    }

    /// Inserts records with caller-chosen ids in a single statement.
    pub async fn insert_many(&self, movies: Vec<(String, NewMovie)>) -> AppResult<u64> {
        let now = now_ms();
        let count = movies.len() as u64;
        let models = movies
            .into_iter()
            .map(|(id, new)| new_active_model(id, new, now))
            .collect::<AppResult<Vec<_>>>()?;

        if models.is_empty() {
            return Ok(0);
        }

        movie::Entity::insert_many(models).exec_without_returning(&self.db).await?;
        Ok(count)
    }

    /// Applies the fields present in `patch` and bumps `updated_at`.
    /// Returns the number of rows touched (0 or 1).
    pub async fn update(&self, id: &str, patch: MoviePatch) -> AppResult<u64> {
        let mut model = movie::ActiveModel { ..Default::default() };
        if let Some(title) = patch.title {
            model.title_folded = Set(fold(&title));
            model.title = Set(title);
        }
        if let Some(year) = patch.year {
            model.year = Set(year);
        }
        if let Some(rating) = patch.rating {
            model.rating = Set(rating);
        }
        if let Some(genre) = patch.genre {
            model.genre = Set(serde_json::to_string(&genre)?);
        }
        if let Some(director) = patch.director {
            model.director_folded = Set(fold(&director));
            model.director = Set(director);
        }
        if let Some(duration) = patch.duration {
            model.duration = Set(duration);
        }
        if let Some(poster) = patch.poster {
            model.poster = Set(poster);
        }
        if let Some(backdrop) = patch.backdrop {
            model.backdrop = Set(backdrop);
        }
        if let Some(plot) = patch.plot {
            model.plot = Set(plot);
        }
        if let Some(cast) = patch.cast {
            model.cast = Set(serde_json::to_string(&cast)?);
        }
        if let Some(featured) = patch.featured {
            model.featured = Set(featured);
        }

        // updated_at never drops below created_at
        let res = movie::Entity::update_many()
            .set(model)
            .col_expr(
                movie::Column::UpdatedAt,
                Expr::cust_with_values(r#"MAX("created_at", ?)"#, [now_ms()]),
            )
            .filter(movie::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        Ok(res.rows_affected)
    }

    pub async fn delete(&self, id: &str) -> AppResult<u64> {
        let res = movie::Entity::delete_by_id(id.to_string()).exec(&self.db).await?;
        Ok(res.rows_affected)
    }

    /// Every genre that appears on at least one movie, unwound from the
    /// per-movie lists and sorted ascending.
    pub async fn distinct_genres(&self) -> AppResult<Vec<String>> {
        let rows = self
            .db
            .query_all(Statement::from_string(
                self.db.get_database_backend(),
                DISTINCT_GENRES.to_string(),
            ))
            .await?;

        let mut genres = Vec::with_capacity(rows.len());
        for row in rows {
            genres.push(row.try_get::<String>("", "name")?);
        }
        Ok(genres)
    }
}

fn sort_column(sort: SortField) -> movie::Column {
    match sort {
        SortField::Rating => movie::Column::Rating,
        SortField::Year => movie::Column::Year,
        SortField::Title => movie::Column::Title,
        SortField::Featured => movie::Column::Featured,
    }
}

fn new_active_model(id: String, new: NewMovie, now: i64) -> AppResult<movie::ActiveModel> {
    Ok(movie::ActiveModel {
        id: Set(id),
        title_folded: Set(fold(&new.title)),
        title: Set(new.title),
        year: Set(new.year),
        rating: Set(new.rating),
        genre: Set(serde_json::to_string(&new.genre)?),
        director_folded: Set(fold(&new.director)),
        director: Set(new.director),
        duration: Set(new.duration),
        poster: Set(new.poster),
        backdrop: Set(new.backdrop),
        plot: Set(new.plot),
        cast: Set(serde_json::to_string(&new.cast)?),
        featured: Set(new.featured),
        created_at: Set(now),
        updated_at: Set(now),
    })
}

/// Unicode lowercase form used by the `*_folded` search columns.
pub fn fold(text: &str) -> String {
    text.to_lowercase()
}

fn now_ms() -> i64 {
    jiff::Timestamp::now().as_millisecond()
}
