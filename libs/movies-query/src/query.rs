//! Search request builder for the catalog indices.
//!
//! Builds Elasticsearch query DSL bodies:
//! - Full-text fuzzy match on a single field
//! - Exact filters on identifiers nested beneath an array field (OR semantics)
//! - Multi-field sort with the display title swapped for its keyword sub-field
//! - Field projection and `from`/`size` pagination

use crate::pagination::Page;
use crate::role::Role;
use serde_json::{json, Map, Value as JsonValue};
use uuid::Uuid;

/// Analyzed title field shown to users.
pub const TITLE_FIELD: &str = "title";

/// Keyword sub-field of [`TITLE_FIELD`]; text fields cannot be sorted on.
pub const TITLE_SORT_FIELD: &str = "title.raw";

/// Matches every document in the index.
pub fn match_all() -> JsonValue {
    json!({ "match_all": {} })
}

/// Full-text match with edit distance scaled to term length.
pub fn fuzzy_match(field: &str, term: &str) -> JsonValue {
    json!({
        "match": {
            field: {
                "query": term,
                "fuzziness": "auto"
            }
        }
    })
}

/// Exact match on a single identifier nested beneath `path`.
pub fn nested_term(path: &str, field: &str, value: &str) -> JsonValue {
    json!({
        "nested": {
            "path": path,
            "query": {
                "term": { field: value }
            }
        }
    })
}

/// Match when the nested `field` equals any of `values`.
pub fn nested_terms(path: &str, field: &str, values: &[String]) -> JsonValue {
    json!({
        "nested": {
            "path": path,
            "query": {
                "terms": { field: values }
            }
        }
    })
}

/// Non-scoring filter satisfied when at least one clause matches.
pub fn any_of(clauses: Vec<JsonValue>) -> JsonValue {
    json!({
        "bool": {
            "filter": {
                "bool": {
                    "should": clauses,
                    "minimum_should_match": 1
                }
            }
        }
    })
}

/// Films tagged with the given genre.
pub fn genre_filter(genre_id: &Uuid) -> JsonValue {
    any_of(vec![nested_term("genres", "genres.id", &genre_id.to_string())])
}

/// Films in which any of `person_ids` held any role.
pub fn persons_filter(person_ids: &[Uuid]) -> JsonValue {
    let ids: Vec<String> = person_ids.iter().map(Uuid::to_string).collect();
    let clauses = Role::ALL
        .iter()
        .map(|role| nested_terms(role.nested_path(), role.id_field(), &ids))
        .collect();
    any_of(clauses)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// A single sort key as given by callers (`"title"`, `"-imdb_rating"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    field: String,
    direction: SortDirection,
}

impl SortSpec {
    /// Parse a caller-facing sort key; a leading `-` sorts descending.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.strip_prefix('-') {
            Some(field) => Self::desc(field),
            None => Self::asc(raw.strip_prefix('+').unwrap_or(raw)),
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Index field actually sorted on.
    pub fn sort_field(&self) -> &str {
        if self.field == TITLE_FIELD {
            TITLE_SORT_FIELD
        } else {
            &self.field
        }
    }

    pub fn clause(&self) -> JsonValue {
        let mut clause = Map::new();
        clause.insert(
            self.sort_field().to_string(),
            JsonValue::String(self.direction.as_str().to_string()),
        );
        JsonValue::Object(clause)
    }
}

/// Which parts of each hit the store should return.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Projection {
    /// The whole `_source` document.
    #[default]
    Full,
    /// A filtered `_source` document.
    Source(Vec<String>),
    /// Doc-value `fields` (values arrive as arrays), `_source` disabled.
    Fields(Vec<String>),
}

impl Projection {
    pub fn source<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Source(fields.into_iter().map(Into::into).collect())
    }

    pub fn fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Fields(fields.into_iter().map(Into::into).collect())
    }
}

/// Search request body under construction.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    query: JsonValue,
    sort: Vec<SortSpec>,
    projection: Projection,
    page: Option<Page>,
}

impl SearchRequest {
    pub fn new(query: JsonValue) -> Self {
        Self {
            query,
            sort: Vec::new(),
            projection: Projection::Full,
            page: None,
        }
    }

    pub fn sort(mut self, sort: Vec<SortSpec>) -> Self {
        self.sort = sort;
        self
    }

    pub fn projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    pub fn page(mut self, page: Page) -> Self {
        self.page = Some(page);
        self
    }

    pub fn to_body(&self) -> JsonValue {
        let mut body = Map::new();
        body.insert("query".to_string(), self.query.clone());

        if !self.sort.is_empty() {
            let sort = self.sort.iter().map(SortSpec::clause).collect();
            body.insert("sort".to_string(), JsonValue::Array(sort));
        }

        match &self.projection {
            Projection::Full => {}
            Projection::Source(fields) => {
                body.insert("_source".to_string(), json!(fields));
            }
            Projection::Fields(fields) => {
                body.insert("fields".to_string(), json!(fields));
                body.insert("_source".to_string(), JsonValue::Bool(false));
            }
        }

        if let Some(page) = self.page {
            body.insert("from".to_string(), json!(page.offset));
            body.insert("size".to_string(), json!(page.limit));
        }

        JsonValue::Object(body)
    }
}
