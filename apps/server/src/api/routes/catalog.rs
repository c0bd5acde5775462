//! Catalog API routes (`/api/v1`)

use crate::api::handlers::{films, genres, persons};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        // Static segments are matched before the id captures.
        .route("/films", get(films::list_films))
        .route("/films/search", get(films::search_films))
        .route("/films/:film_id", get(films::get_film))
        .route("/persons/search", get(persons::search_persons))
        .route("/persons/:person_id", get(persons::get_person))
        .route("/persons/:person_id/film", get(persons::list_person_films))
        .route("/genres", get(genres::list_genres))
        .route("/genres/:genre_id", get(genres::get_genre))
}
