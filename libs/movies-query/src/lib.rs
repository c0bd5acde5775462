//! Query construction and relation resolution for the movies catalog.
//!
//! This crate knows how catalog documents are laid out in the search index and
//! how to ask for them. It performs no I/O:
//! - [`pagination`] bounds page requests to the engine's result window
//! - [`query`] builds search request bodies (fuzzy match, nested filters, sort)
//! - [`resolver`] reconstructs person → film → role associations
//! - [`mapper`] turns raw hits and documents into catalog entities
//!
//! # Example
//!
//! ```rust
//! use movies_query::{page_bounds, query, Projection, SearchRequest, SortSpec};
//!
//! let page = page_bounds(2, 20);
//! let body = SearchRequest::new(query::match_all())
//!     .sort(vec![SortSpec::parse("-imdb_rating")])
//!     .projection(Projection::source(["id", "title", "imdb_rating"]))
//!     .page(page)
//!     .to_body();
//!
//! assert_eq!(body["from"], 20);
//! assert_eq!(body["sort"][0]["imdb_rating"], "desc");
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod mapper;
pub mod models;
pub mod pagination;
pub mod query;
pub mod resolver;
pub mod role;

pub use error::{Error, Result};
pub use models::{Film, FilmPerson, FilmStub, Genre, Person, PersonFilm};
pub use pagination::{page_bounds, Page, WINDOW_CEILING};
pub use query::{Projection, SearchRequest, SortDirection, SortSpec};
pub use resolver::{resolve_roles, RoleProjection};
pub use role::Role;
