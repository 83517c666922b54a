pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod genres;
pub mod models;
pub mod query;
pub mod routes;
pub mod search;
pub mod seed;
pub mod store;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use sea_orm::DatabaseConnection;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{genres::GenreAggregator, query::QueryEngine, search::SearchEngine, store::MovieStore};

pub struct AppState {
    pub store: MovieStore,
    pub query: QueryEngine,
    pub search: SearchEngine,
    pub genres: GenreAggregator,
}

impl AppState {
    /// Wires every component to the same connection pool.
    pub fn new(db: DatabaseConnection) -> Self {
        let store = MovieStore::new(db);
        Self {
            query: QueryEngine::new(store.clone()),
            search: SearchEngine::new(store.clone()),
            genres: GenreAggregator::new(store.clone()),
            store,
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/", get(routes::health))
        .route("/api/movies", get(routes::list_movies).post(routes::create_movie))
        .route("/api/movies/search", get(routes::search_movies))
        .route("/api/movies/featured", get(routes::featured_movies))
        .route("/api/movies/top-rated", get(routes::top_rated_movies))
        .route("/api/movies/genre/{genre}", get(routes::movies_by_genre))
        .route(
            "/api/movies/{id}",
            get(routes::get_movie).patch(routes::update_movie).delete(routes::delete_movie),
        )
        .route("/api/genres", get(routes::genres))
        .route("/api/seed", post(routes::seed))
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}
