//! Conversion of raw index responses into catalog entities.
//!
//! Two response shapes are handled:
//! - `_source` documents, where every field holds its stored value
//! - doc-value `fields` projections, where every field holds an array of
//!   values and nested objects hold arrays of their own
//!
//! Missing optional values map to `None` or empty lists; a missing or malformed
//! identifier is an error.

use crate::error::{Error, Result};
use crate::models::{Film, FilmPerson, FilmStub, Genre, Person, PersonFilm};
use crate::resolver::RoleProjection;
use crate::role::Role;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Fields requested for [`FilmStub`] projections.
pub const FILM_STUB_FIELDS: [&str; 3] = ["id", "title", "imdb_rating"];

/// `_source` fields needed to build a full [`Film`].
pub fn film_fields() -> Vec<&'static str> {
    ["id", "title", "imdb_rating", "description", "genres"]
        .into_iter()
        .chain(Role::ALL.iter().map(Role::nested_path))
        .collect()
}

/// The `_source` object of a search hit.
pub fn source_of(hit: &JsonValue) -> Result<&JsonValue> {
    hit.get("_source")
        .filter(|source| source.is_object())
        .ok_or_else(|| Error::missing("_source"))
}

pub fn film_stub_from_source(source: &JsonValue) -> Result<FilmStub> {
    Ok(FilmStub {
        id: uuid_value(source.get("id"), "id")?,
        title: string_value(source.get("title"), "title")?,
        imdb_rating: opt_f64_value(source.get("imdb_rating"), "imdb_rating")?,
    })
}

/// Build a stub from a `fields` projection, unwrapping single-element arrays.
pub fn film_stub_from_fields(hit: &JsonValue) -> Result<FilmStub> {
    let fields = fields_of(hit)?;
    Ok(FilmStub {
        id: uuid_value(first_value(fields, "id"), "id")?,
        title: string_value(first_value(fields, "title"), "title")?,
        imdb_rating: opt_f64_value(first_value(fields, "imdb_rating"), "imdb_rating")?,
    })
}

pub fn film_from_source(source: &JsonValue) -> Result<Film> {
    let mut film = Film {
        id: uuid_value(source.get("id"), "id")?,
        title: string_value(source.get("title"), "title")?,
        imdb_rating: opt_f64_value(source.get("imdb_rating"), "imdb_rating")?,
        description: opt_string_value(source.get("description"), "description")?,
        genres: nested_list(source, "genres")?,
        directors: Vec::new(),
        actors: Vec::new(),
        writers: Vec::new(),
    };
    for role in Role::ALL {
        *film.people_mut(role) = nested_list::<FilmPerson>(source, role.nested_path())?;
    }
    Ok(film)
}

pub fn genre_from_source(source: &JsonValue) -> Result<Genre> {
    Ok(Genre {
        id: uuid_value(source.get("id"), "id")?,
        name: string_value(source.get("name"), "name")?,
    })
}

pub fn person_id_from_source(source: &JsonValue) -> Result<Uuid> {
    uuid_value(source.get("id"), "id")
}

/// Combine a person document with the filmography resolved for it.
pub fn person_from_source(source: &JsonValue, films: Vec<PersonFilm>) -> Result<Person> {
    Ok(Person {
        id: person_id_from_source(source)?,
        full_name: string_value(source.get("full_name"), "full_name")?,
        films,
    })
}

/// Read a film's per-role person ids from a `fields` projection of
/// `id` and every `"{role}s.id"`.
pub fn role_projection_from_fields(hit: &JsonValue) -> Result<RoleProjection> {
    let fields = fields_of(hit)?;
    let film_id = uuid_value(first_value(fields, "id"), "id")?;
    let mut projection = RoleProjection::new(film_id);

    for role in Role::ALL {
        let Some(members) = fields.get(role.nested_path()) else {
            continue;
        };
        let members = members
            .as_array()
            .ok_or_else(|| Error::invalid(role.nested_path(), "expected an array"))?;
        for member in members {
            if let Some(person_id) = first_value(member, "id").and_then(JsonValue::as_str) {
                projection.add(role, person_id);
            }
        }
    }

    Ok(projection)
}

fn fields_of(hit: &JsonValue) -> Result<&JsonValue> {
    hit.get("fields")
        .filter(|fields| fields.is_object())
        .ok_or_else(|| Error::missing("fields"))
}

fn first_value<'a>(fields: &'a JsonValue, name: &str) -> Option<&'a JsonValue> {
    match fields.get(name)? {
        JsonValue::Array(values) => values.first(),
        other => Some(other),
    }
}

fn uuid_value(value: Option<&JsonValue>, field: &str) -> Result<Uuid> {
    let raw = value
        .and_then(JsonValue::as_str)
        .ok_or_else(|| Error::missing(field))?;
    Uuid::parse_str(raw).map_err(|_| Error::InvalidId {
        field: field.to_string(),
        value: raw.to_string(),
    })
}

fn string_value(value: Option<&JsonValue>, field: &str) -> Result<String> {
    opt_string_value(value, field)?.ok_or_else(|| Error::missing(field))
}

fn opt_string_value(value: Option<&JsonValue>, field: &str) -> Result<Option<String>> {
    match value {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(Error::invalid(field, "expected a string")),
    }
}

fn opt_f64_value(value: Option<&JsonValue>, field: &str) -> Result<Option<f64>> {
    match value {
        None | Some(JsonValue::Null) => Ok(None),
        Some(v) => v
            .as_f64()
            .map(Some)
            .ok_or_else(|| Error::invalid(field, "expected a number")),
    }
}

fn nested_list<T: DeserializeOwned>(source: &JsonValue, field: &str) -> Result<Vec<T>> {
    match source.get(field) {
        None | Some(JsonValue::Null) => Ok(Vec::new()),
        Some(items) => serde_json::from_value(items.clone())
            .map_err(|e| Error::invalid(field, e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const FILM_ID: &str = "0312ed51-8833-413f-bff5-0e139c11264a";
    const GENRE_ID: &str = "b92ef010-5e4c-4fd0-99d6-41b6456272cd";
    const PERSON_X: &str = "a5a8f573-3cee-4ccc-8a2b-91cb9f55250a";
    const PERSON_Y: &str = "26e83050-29ef-4163-a99d-b546cac208f8";

    #[test]
    fn film_fields_include_every_role_array() {
        assert_eq!(
            film_fields(),
            vec![
                "id",
                "title",
                "imdb_rating",
                "description",
                "genres",
                "directors",
                "actors",
                "writers"
            ]
        );
    }

    #[test]
    fn stub_from_fields_unwraps_arrays() {
        let hit = json!({
            "_id": FILM_ID,
            "fields": {
                "id": [FILM_ID],
                "title": ["Star Wars"],
                "imdb_rating": [8.6]
            }
        });
        let stub = film_stub_from_fields(&hit).unwrap();
        assert_eq!(stub.id.to_string(), FILM_ID);
        assert_eq!(stub.title, "Star Wars");
        assert_eq!(stub.imdb_rating, Some(8.6));
    }

    #[test]
    fn stub_from_fields_without_rating() {
        let hit = json!({ "fields": { "id": [FILM_ID], "title": ["Untitled"] } });
        assert_eq!(film_stub_from_fields(&hit).unwrap().imdb_rating, None);
    }

    #[test]
    fn stub_from_source_rejects_bad_id() {
        let err = film_stub_from_source(&json!({ "id": "nope", "title": "x" })).unwrap_err();
        assert!(matches!(err, Error::InvalidId { .. }));
    }

    #[test]
    fn film_from_source_builds_nested_lists() {
        let source = json!({
            "id": FILM_ID,
            "title": "Star Wars",
            "imdb_rating": 8.6,
            "description": "A long time ago",
            "genres": [{ "id": GENRE_ID, "name": "Sci-Fi" }],
            "directors": [{ "id": PERSON_X, "full_name": "George Lucas" }],
            "actors": [
                { "id": PERSON_X, "full_name": "George Lucas" },
                { "id": PERSON_Y, "name": "Mark Hamill" }
            ],
            "writers": []
        });

        let film = film_from_source(&source).unwrap();
        assert_eq!(film.genres.len(), 1);
        assert_eq!(film.genres[0].name, "Sci-Fi");
        assert_eq!(film.people(Role::Director).len(), 1);
        assert_eq!(film.people(Role::Actor)[1].full_name, "Mark Hamill");
        assert!(film.people(Role::Writer).is_empty());
        assert_eq!(film.description.as_deref(), Some("A long time ago"));
    }

    #[test]
    fn film_from_source_tolerates_missing_arrays() {
        let film = film_from_source(&json!({ "id": FILM_ID, "title": "Solo" })).unwrap();
        assert!(film.genres.is_empty());
        assert!(film.actors.is_empty());
        assert_eq!(film.description, None);
    }

    #[test]
    fn person_and_genre_from_source() {
        let genre = genre_from_source(&json!({ "id": GENRE_ID, "name": "Drama" })).unwrap();
        assert_eq!(genre.name, "Drama");

        let person = person_from_source(
            &json!({ "id": PERSON_X, "full_name": "George Lucas" }),
            Vec::new(),
        )
        .unwrap();
        assert_eq!(person.full_name, "George Lucas");
        assert!(person.films.is_empty());

        assert!(matches!(
            person_from_source(&json!({ "full_name": "Nobody" }), Vec::new()),
            Err(Error::MissingField(field)) if field == "id"
        ));
    }

    #[test]
    fn role_projection_reads_nested_fields() {
        let hit = json!({
            "fields": {
                "id": [FILM_ID],
                "directors": [{ "id": [PERSON_X] }],
                "actors": [{ "id": [PERSON_X] }, { "id": [PERSON_Y] }]
            }
        });
        let projection = role_projection_from_fields(&hit).unwrap();
        assert_eq!(projection.film_id().to_string(), FILM_ID);
        assert!(projection.holds(Role::Director, PERSON_X));
        assert!(projection.holds(Role::Actor, PERSON_Y));
        assert!(!projection.holds(Role::Director, PERSON_Y));
        assert!(!projection.holds(Role::Writer, PERSON_X));
    }

    #[test]
    fn source_of_requires_object() {
        assert!(source_of(&json!({ "_id": "1" })).is_err());
        assert!(source_of(&json!({ "_source": { "id": FILM_ID } })).is_ok());
    }
}
