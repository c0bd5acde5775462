//! Film endpoints

use crate::api::extractors::{parse_uuid, FilmListParams, RawQuery, SearchParams};
use crate::{state::AppState, Error, Result};
use axum::{
    extract::{Path, State},
    Json,
};
use movies_query::{Film, FilmStub};

/// `GET /films` - rating or title ordered listing, optionally by genre.
pub async fn list_films(
    State(state): State<AppState>,
    query: RawQuery,
) -> Result<Json<Vec<FilmStub>>> {
    let params = FilmListParams::from_query(&query)?;
    let films = state
        .films
        .list(
            params.genre,
            &params.sort,
            params.page.number,
            params.page.size,
        )
        .await?;
    Ok(Json(films))
}

/// `GET /films/search`
pub async fn search_films(
    State(state): State<AppState>,
    query: RawQuery,
) -> Result<Json<Vec<FilmStub>>> {
    let params = SearchParams::from_query(&query)?;
    let films = state
        .films
        .search(&params.query, params.page.number, params.page.size)
        .await?;
    Ok(Json(films))
}

/// `GET /films/:film_id`
pub async fn get_film(
    State(state): State<AppState>,
    Path(film_id): Path<String>,
) -> Result<Json<Film>> {
    let film_id = parse_uuid(&film_id, "film_id")?;
    state
        .films
        .get_by_id(film_id)
        .await?
        .map(Json)
        .ok_or_else(|| Error::not_found("film", film_id))
}
