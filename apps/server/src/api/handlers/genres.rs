//! Genre endpoints

use crate::api::extractors::parse_uuid;
use crate::{state::AppState, Error, Result};
use axum::{
    extract::{Path, State},
    Json,
};
use movies_query::Genre;

pub async fn list_genres(State(state): State<AppState>) -> Result<Json<Vec<Genre>>> {
    Ok(Json(state.genres.list_all().await?))
}

pub async fn get_genre(
    State(state): State<AppState>,
    Path(genre_id): Path<String>,
) -> Result<Json<Genre>> {
    let genre_id = parse_uuid(&genre_id, "genre_id")?;
    state
        .genres
        .get_by_id(genre_id)
        .await?
        .map(Json)
        .ok_or_else(|| Error::not_found("genre", genre_id))
}
