//! Roles a person can hold in a film.
//!
//! Every role is stored on the film document as a nested array named after the
//! plural of the role (`directors`, `actors`, `writers`), each element carrying
//! the person `id` and `full_name`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Director,
    Actor,
    Writer,
}

impl Role {
    /// All roles in resolution order.
    pub const ALL: [Role; 3] = [Role::Director, Role::Actor, Role::Writer];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Director => "director",
            Self::Actor => "actor",
            Self::Writer => "writer",
        }
    }

    /// Nested array field on the film document (`"{role}s"`).
    pub fn nested_path(&self) -> &'static str {
        match self {
            Self::Director => "directors",
            Self::Actor => "actors",
            Self::Writer => "writers",
        }
    }

    /// Person identifier field beneath [`Role::nested_path`].
    pub fn id_field(&self) -> &'static str {
        match self {
            Self::Director => "directors.id",
            Self::Actor => "actors.id",
            Self::Writer => "writers.id",
        }
    }

    /// Position in [`Role::ALL`].
    pub(crate) fn index(&self) -> usize {
        match self {
            Self::Director => 0,
            Self::Actor => 1,
            Self::Writer => 2,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s || role.nested_path() == s)
            .ok_or_else(|| format!("unknown role: {s}"))
    }
}
