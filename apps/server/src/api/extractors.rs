//! Query-string extractors for the catalog routes.
//!
//! Bracketed keys such as `page[number]` and `filter[genre]` are read from the
//! raw query string; the last occurrence of a single-valued key wins.

use crate::{Error, Result};
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use movies_query::SortSpec;
use uuid::Uuid;
use validator::Validate;

pub const PAGE_NUMBER: &str = "page[number]";
pub const PAGE_SIZE: &str = "page[size]";
pub const GENRE_FILTER: &str = "filter[genre]";
pub const SORT: &str = "sort";
pub const SEARCH_QUERY: &str = "query";

pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Sort keys accepted by the film listing.
const SORTABLE_FIELDS: [&str; 2] = ["imdb_rating", "title"];
const DEFAULT_SORT: &str = "-imdb_rating";

/// Raw query pairs in request order.
#[derive(Debug, Clone, Default)]
pub struct RawQuery {
    pairs: Vec<(String, String)>,
}

impl RawQuery {
    pub fn parse(query: &str) -> Self {
        Self {
            pairs: url::form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
        }
    }

    /// Last value given for `key`.
    pub fn last(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value given for `key`, in order.
    pub fn all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RawQuery
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        Ok(Self::parse(parts.uri.query().unwrap_or_default()))
    }
}

/// `page[number]` / `page[size]`, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Validate)]
pub struct PageParams {
    #[validate(range(min = 1, message = "page[number] must be at least 1"))]
    pub number: usize,
    #[validate(range(min = 1, max = 100, message = "page[size] must be between 1 and 100"))]
    pub size: usize,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            number: 1,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageParams {
    pub fn from_query(query: &RawQuery) -> Result<Self> {
        let defaults = Self::default();
        let params = Self {
            number: parse_usize(query.last(PAGE_NUMBER), PAGE_NUMBER, defaults.number)?,
            size: parse_usize(query.last(PAGE_SIZE), PAGE_SIZE, defaults.size)?,
        };
        params.validate().map_err(validation_error)?;
        Ok(params)
    }
}

/// Parameters of the `/search` routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub query: String,
    pub page: PageParams,
}

impl SearchParams {
    pub fn from_query(query: &RawQuery) -> Result<Self> {
        let term = query
            .last(SEARCH_QUERY)
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .ok_or_else(|| Error::Validation("query must not be empty".to_string()))?;
        Ok(Self {
            query: term.to_string(),
            page: PageParams::from_query(query)?,
        })
    }
}

/// Parameters of the film listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilmListParams {
    pub sort: Vec<SortSpec>,
    pub genre: Option<Uuid>,
    pub page: PageParams,
}

impl FilmListParams {
    pub fn from_query(query: &RawQuery) -> Result<Self> {
        Ok(Self {
            sort: parse_sort(query)?,
            genre: query
                .last(GENRE_FILTER)
                .map(|raw| parse_uuid(raw, GENRE_FILTER))
                .transpose()?,
            page: PageParams::from_query(query)?,
        })
    }
}

/// Parse a path or filter identifier, reporting which parameter was bad.
pub fn parse_uuid(raw: &str, name: &str) -> Result<Uuid> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| Error::Validation(format!("{name} must be a valid UUID, got '{raw}'")))
}

/// `sort` may be repeated or comma-separated; order of appearance is kept.
fn parse_sort(query: &RawQuery) -> Result<Vec<SortSpec>> {
    let mut specs = Vec::new();
    for raw in query.all(SORT).flat_map(|value| value.split(',')) {
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        let spec = SortSpec::parse(raw);
        if !SORTABLE_FIELDS.contains(&spec.field()) {
            return Err(Error::Validation(format!(
                "Unsupported sort '{raw}'; expected one of imdb_rating, -imdb_rating, title, -title"
            )));
        }
        specs.push(spec);
    }

    if specs.is_empty() {
        specs.push(SortSpec::parse(DEFAULT_SORT));
    }
    Ok(specs)
}

fn parse_usize(raw: Option<&str>, name: &str, default: usize) -> Result<usize> {
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| Error::Validation(format!("{name} must be a positive integer"))),
    }
}

fn validation_error(errors: validator::ValidationErrors) -> Error {
    let messages: Vec<String> = errors
        .field_errors()
        .into_values()
        .flat_map(|errs| errs.iter())
        .map(|err| {
            err.message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| err.code.to_string())
        })
        .collect();
    Error::Validation(messages.join("; "))
}
