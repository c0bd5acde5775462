//! Request handlers for API endpoints
//!
//! Handlers parse and validate request parameters, call a service and turn a
//! missing entity into a 404. They hold no query logic of their own.

pub mod films;
pub mod genres;
pub mod persons;
