//! Business logic layer - catalog read services
//!
//! Each service owns a handle to the document store and builds its requests
//! with `movies_query`. Services are cache-agnostic: caching is applied around
//! the HTTP routes, never inside a service.

pub mod film;
pub mod genre;
pub mod person;

pub use film::FilmService;
pub use genre::GenreService;
pub use person::PersonService;
