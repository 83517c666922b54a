use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use tracing::info;

use crate::{
    AppState,
    error::{AppError, AppResult},
    models::{
        GenresResponse, ListParams, MessageResponse, Movie, MovieListResponse, MoviePatch,
        MoviesResponse, NewMovie, SearchParams, SearchResponse, SortField, TopRatedParams,
    },
    query::{DEFAULT_PAGE_SIZE, ListQuery, MAX_PAGE_SIZE, TOP_RATED_DEFAULT},
    seed,
};

const MAX_QUERY_CHARS: usize = 100;

pub async fn health() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Movie catalog API is running".to_string(),
        version: Some(env!("CARGO_PKG_VERSION")),
    })
}

pub async fn list_movies(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> AppResult<Json<MovieListResponse>> {
    let Query(params) = params?;

    let sort_by = match params.sort_by.as_deref() {
        Some(s) => s.parse()?,
        None => SortField::default(),
    };
    let query = ListQuery::new(
        params.genre,
        sort_by,
        params.page.unwrap_or(1),
        params.limit.unwrap_or(DEFAULT_PAGE_SIZE),
    )?;

    let page = state.query.list(&query).await?;
    let total_pages = page.total_pages();

    Ok(Json(MovieListResponse {
        movies: page.movies,
        total: page.total,
        page: page.page,
        per_page: page.per_page,
        total_pages,
    }))
}

pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    id: Result<Path<String>, PathRejection>,
) -> AppResult<Json<Movie>> {
    let Path(id) = id?;
    match state.query.get(&id).await? {
        Some(movie) => Ok(Json(movie)),
        None => Err(AppError::NotFound(id)),
    }
}

pub async fn search_movies(
    State(state): State<Arc<AppState>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> AppResult<Json<SearchResponse>> {
    let Query(params) = params?;

    let q = params.q.unwrap_or_default();
    let q = q.trim();
    if q.is_empty() {
        return Err(AppError::validation("q must not be empty"));
    }
    if q.chars().count() > MAX_QUERY_CHARS {
        return Err(AppError::validation(format!(
            "q must be at most {MAX_QUERY_CHARS} characters"
        )));
    }

    let movies = state.search.search(q).await?;
    Ok(Json(SearchResponse { total: movies.len(), movies }))
}

pub async fn featured_movies(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<MoviesResponse>> {
    let movies = state.query.featured().await?;
    Ok(Json(MoviesResponse { movies }))
}

pub async fn top_rated_movies(
    State(state): State<Arc<AppState>>,
    params: Result<Query<TopRatedParams>, QueryRejection>,
) -> AppResult<Json<MoviesResponse>> {
    let Query(params) = params?;

    let limit = params.limit.unwrap_or(TOP_RATED_DEFAULT);
    if !(1..=MAX_PAGE_SIZE).contains(&limit) {
        return Err(AppError::validation(format!(
            "limit must be between 1 and {MAX_PAGE_SIZE}"
        )));
    }

    let movies = state.query.top_rated(limit).await?;
    Ok(Json(MoviesResponse { movies }))
}

pub async fn movies_by_genre(
    State(state): State<Arc<AppState>>,
    genre: Result<Path<String>, PathRejection>,
) -> AppResult<Json<MoviesResponse>> {
    let Path(genre) = genre?;
    let movies = state.query.by_genre(&genre).await?;
    Ok(Json(MoviesResponse { movies }))
}

pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    body: Result<Json<NewMovie>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(new) = body?;
    new.validate()?;

    let movie = state.store.insert(new).await?;
    info!(id = %movie.id, title = %movie.title, "movie created");

    Ok((StatusCode::CREATED, Json(movie)))
}

pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    id: Result<Path<String>, PathRejection>,
    body: Result<Json<MoviePatch>, JsonRejection>,
) -> AppResult<Json<Movie>> {
    let Path(id) = id?;
    let Json(patch) = body?;
    patch.validate()?;

    if state.store.update(&id, patch).await? == 0 {
        return Err(AppError::NotFound(id));
    }
    info!(id = %id, "movie updated");

    match state.query.get(&id).await? {
        Some(movie) => Ok(Json(movie)),
        None => Err(AppError::NotFound(id)),
    }
}

pub async fn delete_movie(
    State(state): State<Arc<AppState>>,
    id: Result<Path<String>, PathRejection>,
) -> AppResult<StatusCode> {
    let Path(id) = id?;

    if state.store.delete(&id).await? == 0 {
        return Err(AppError::NotFound(id));
    }
    info!(id = %id, "movie deleted");

    Ok(StatusCode::NO_CONTENT)
}

pub async fn genres(State(state): State<Arc<AppState>>) -> AppResult<Json<GenresResponse>> {
    let genres = state.genres.distinct_genres().await?;
    Ok(Json(GenresResponse { genres }))
}

pub async fn seed(State(state): State<Arc<AppState>>) -> AppResult<Json<MessageResponse>> {
    let message = seed::seed_if_empty(&state.store).await?;
    Ok(Json(MessageResponse { message, version: None }))
}
