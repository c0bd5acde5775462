//! Person endpoints

use crate::api::extractors::{parse_uuid, RawQuery, SearchParams};
use crate::{state::AppState, Error, Result};
use axum::{
    extract::{Path, State},
    Json,
};
use movies_query::{FilmStub, Person};

/// `GET /persons/search`
pub async fn search_persons(
    State(state): State<AppState>,
    query: RawQuery,
) -> Result<Json<Vec<Person>>> {
    let params = SearchParams::from_query(&query)?;
    let persons = state
        .persons
        .search(&params.query, params.page.number, params.page.size)
        .await?;
    Ok(Json(persons))
}

/// `GET /persons/:person_id`
pub async fn get_person(
    State(state): State<AppState>,
    Path(person_id): Path<String>,
) -> Result<Json<Person>> {
    let person_id = parse_uuid(&person_id, "person_id")?;
    state
        .persons
        .get_by_id(person_id)
        .await?
        .map(Json)
        .ok_or_else(|| Error::not_found("person", person_id))
}

/// `GET /persons/:person_id/film`
///
/// An unknown person has no films; the listing is empty rather than 404.
pub async fn list_person_films(
    State(state): State<AppState>,
    Path(person_id): Path<String>,
) -> Result<Json<Vec<FilmStub>>> {
    let person_id = parse_uuid(&person_id, "person_id")?;
    Ok(Json(state.persons.list_films(person_id).await?))
}
