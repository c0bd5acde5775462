//! Catalog documents and hits in the shapes the search engine returns.

use movies_api::db::{SearchHits, TotalHits, TotalRelation};
use serde_json::{json, Value};

pub mod ids {
    pub const STAR_WARS: &str = "0312ed51-8833-413f-bff5-0e139c11264a";
    pub const EMPIRE: &str = "025c58cd-1b7e-43be-9ffb-8571a613579b";
    pub const AMERICAN_GRAFFITI: &str = "1f08a4c1-6a9d-4e9e-8d6b-1f1b6d0d4a11";
    pub const SCI_FI: &str = "6c162475-c7ed-4461-9184-001ef3d9f26e";
    pub const DRAMA: &str = "1cacff68-643e-4ddd-8f57-84b62538081a";
    pub const LUCAS: &str = "a5a8f573-3cee-4ccc-8a2b-91cb9f55250a";
    pub const HAMILL: &str = "26e83050-29ef-4163-a99d-b546cac208f8";
    pub const KASDAN: &str = "3217bc91-bcfc-44eb-a609-82d228115c50";
}

pub const MOVIES: &str = "movies";
pub const PERSONS: &str = "persons";
pub const GENRES: &str = "genres";

pub fn star_wars_source() -> Value {
    json!({
        "id": ids::STAR_WARS,
        "title": "Star Wars",
        "imdb_rating": 8.6,
        "description": "Luke Skywalker joins forces with a Jedi Knight.",
        "genres": [{ "id": ids::SCI_FI, "name": "Sci-Fi" }],
        "directors": [{ "id": ids::LUCAS, "full_name": "George Lucas" }],
        "actors": [{ "id": ids::HAMILL, "full_name": "Mark Hamill" }],
        "writers": [{ "id": ids::LUCAS, "full_name": "George Lucas" }]
    })
}

pub fn stub_source(id: &str, title: &str, rating: Option<f64>) -> Value {
    json!({ "id": id, "title": title, "imdb_rating": rating })
}

pub fn source_hit(source: Value) -> Value {
    json!({ "_id": source["id"].clone(), "_source": source })
}

/// Film stub as returned through a doc-value `fields` projection.
pub fn stub_fields_hit(id: &str, title: &str, rating: f64) -> Value {
    json!({
        "_id": id,
        "fields": { "id": [id], "title": [title], "imdb_rating": [rating] }
    })
}

/// Per-role person ids of one film through a `fields` projection.
pub fn roles_hit(film_id: &str, directors: &[&str], actors: &[&str], writers: &[&str]) -> Value {
    let members = |ids: &[&str]| -> Vec<Value> { ids.iter().map(|id| json!({ "id": [id] })).collect() };
    json!({
        "_id": film_id,
        "fields": {
            "id": [film_id],
            "directors": members(directors),
            "actors": members(actors),
            "writers": members(writers)
        }
    })
}

pub fn person_source(id: &str, full_name: &str) -> Value {
    json!({ "id": id, "full_name": full_name })
}

pub fn genre_source(id: &str, name: &str) -> Value {
    json!({ "id": id, "name": name })
}

pub fn hits(hits: Vec<Value>) -> SearchHits {
    let total = hits.len() as u64;
    SearchHits::new(hits).with_total(TotalHits {
        value: total,
        relation: TotalRelation::Eq,
    })
}
