//! Movies catalog API
//!
//! A read-only HTTP service over an Elasticsearch catalog of films, persons and
//! genres. Query construction, pagination bounds and role resolution live in
//! the `movies_query` crate; this crate wires them to the document store, the
//! response cache and the HTTP surface.

pub mod api;
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{Error, Result};
pub use state::AppState;
