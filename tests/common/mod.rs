#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, header::CONTENT_TYPE},
    response::Response,
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use cinedex::{
    AppState, db,
    models::{Genre, Movie, NewMovie},
    seed,
    store::MovieStore,
};

/// Fresh, migrated, empty in-memory store.
pub async fn empty_store() -> MovieStore {
    let db = db::connect_and_migrate("sqlite::memory:", 1).await.expect("connect test database");
    MovieStore::new(db)
}

/// In-memory store holding the eight starter movies.
pub async fn seeded_store() -> MovieStore {
    let store = empty_store().await;
    seed::seed_if_empty(&store).await.expect("seed test database");
    store
}

pub async fn seeded_app() -> Router {
    let store = seeded_store().await;
    cinedex::router(Arc::new(AppState::new(store.db().clone())))
}

pub fn new_movie(title: &str, rating: f64, genre: &[Genre]) -> NewMovie {
    NewMovie {
        title: title.to_string(),
        year: 2001,
        rating,
        genre: genre.to_vec(),
        director: "Test Director".to_string(),
        duration: "101 min".to_string(),
        poster: "https://example.com/poster.jpg".to_string(),
        backdrop: "https://example.com/backdrop.jpg".to_string(),
        plot: "A movie that exists only for the test suite.".to_string(),
        cast: vec!["Lead Actor".to_string(), "Supporting Actor".to_string()],
        featured: false,
    }
}

pub fn ids(movies: &[Movie]) -> Vec<&str> {
    movies.iter().map(|m| m.id.as_str()).collect()
}

pub fn titles(movies: &[Movie]) -> Vec<&str> {
    movies.iter().map(|m| m.title.as_str()).collect()
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
