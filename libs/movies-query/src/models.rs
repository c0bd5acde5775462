//! Catalog entities returned to callers.

use crate::role::Role;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reduced film record used by search and list results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilmStub {
    pub id: Uuid,
    pub title: String,
    pub imdb_rating: Option<f64>,
}

/// Full film record with genres and people per role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Film {
    pub id: Uuid,
    pub title: String,
    pub imdb_rating: Option<f64>,
    pub description: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub directors: Vec<FilmPerson>,
    #[serde(default)]
    pub actors: Vec<FilmPerson>,
    #[serde(default)]
    pub writers: Vec<FilmPerson>,
}

impl Film {
    pub fn people(&self, role: Role) -> &[FilmPerson] {
        match role {
            Role::Director => &self.directors,
            Role::Actor => &self.actors,
            Role::Writer => &self.writers,
        }
    }

    pub(crate) fn people_mut(&mut self, role: Role) -> &mut Vec<FilmPerson> {
        match role {
            Role::Director => &mut self.directors,
            Role::Actor => &mut self.actors,
            Role::Writer => &mut self.writers,
        }
    }
}

/// Person reference embedded in a film document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilmPerson {
    pub id: Uuid,
    #[serde(alias = "name")]
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: Uuid,
    pub name: String,
}

/// Person with their derived filmography.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: Uuid,
    pub full_name: String,
    pub films: Vec<PersonFilm>,
}

/// A film a person worked on and every role they held in it.
///
/// `roles` is never empty and follows [`Role::ALL`] order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonFilm {
    pub id: Uuid,
    pub roles: Vec<Role>,
}
