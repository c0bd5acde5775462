//! Person → film → role resolution.
//!
//! Film documents store their people denormalized, one nested array per role.
//! A single batched query fetches every film touching any requested person
//! (see [`crate::query::persons_filter`]); this module then works out, for
//! each requested person, which of those films they actually worked on and in
//! which roles. A film can match the batch because of another requested
//! person only, so every (person, film) pair is checked explicitly.

use crate::models::PersonFilm;
use crate::role::Role;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Fields to project for role resolution: the film id and every role's
/// nested person ids.
pub fn role_projection_fields() -> Vec<&'static str> {
    std::iter::once("id")
        .chain(Role::ALL.iter().map(Role::id_field))
        .collect()
}

/// Person ids per role for one film.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleProjection {
    film_id: Uuid,
    members: [HashSet<String>; 3],
}

impl RoleProjection {
    pub fn new(film_id: Uuid) -> Self {
        Self {
            film_id,
            members: Default::default(),
        }
    }

    pub fn film_id(&self) -> Uuid {
        self.film_id
    }

    /// Record that `person_id` appears in the film's `role` array.
    pub fn add(&mut self, role: Role, person_id: &str) {
        self.members[role.index()].insert(canonical_id(person_id));
    }

    pub fn with(mut self, role: Role, person_id: &str) -> Self {
        self.add(role, person_id);
        self
    }

    pub fn holds(&self, role: Role, person_id: &str) -> bool {
        self.members[role.index()].contains(&canonical_id(person_id))
    }

    fn members(&self, role: Role) -> &HashSet<String> {
        &self.members[role.index()]
    }
}

/// Uuid-shaped ids compare in their hyphenated lowercase form.
fn canonical_id(raw: &str) -> String {
    Uuid::parse_str(raw)
        .map(|id| id.to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// Resolve the filmography of every person in `person_ids` from a batch of
/// film role projections.
///
/// Every requested person gets an entry, possibly empty. Films keep the
/// order of `films`; roles within a film follow [`Role::ALL`]. A film is
/// listed for a person only when they hold at least one role in it.
pub fn resolve_roles(
    person_ids: &[Uuid],
    films: &[RoleProjection],
) -> HashMap<Uuid, Vec<PersonFilm>> {
    let wanted: HashMap<String, Uuid> = person_ids
        .iter()
        .map(|id| (id.to_string(), *id))
        .collect();
    let mut filmographies: HashMap<Uuid, Vec<PersonFilm>> = person_ids
        .iter()
        .map(|id| (*id, Vec::new()))
        .collect();

    for film in films {
        let mut held: HashMap<Uuid, Vec<Role>> = HashMap::new();
        for role in Role::ALL {
            for member in film.members(role) {
                if let Some(person_id) = wanted.get(member) {
                    let roles = held.entry(*person_id).or_default();
                    if !roles.contains(&role) {
                        roles.push(role);
                    }
                }
            }
        }

        for (person_id, roles) in held {
            if let Some(films) = filmographies.get_mut(&person_id) {
                films.push(PersonFilm {
                    id: film.film_id,
                    roles,
                });
            }
        }
    }

    filmographies
}
