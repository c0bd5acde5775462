//! Core trait for the document search backend

use crate::Result;
use async_trait::async_trait;
use serde_json::Value as JsonValue;

/// Read-only access to a document search index.
///
/// Implementations are long-lived, shared handles (`Arc<dyn DocumentStore>`);
/// every call is independent and safe to abandon mid-flight.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch one document by identifier
    ///
    /// # Arguments
    /// * `index` - Index name (e.g., "movies")
    /// * `id` - Document identifier
    /// * `source` - Optional list of `_source` fields to return
    ///
    /// # Returns
    /// * `Ok(Some(source))` - The document's `_source` object
    /// * `Ok(None)` - No such document
    async fn get(
        &self,
        index: &str,
        id: &str,
        source: Option<&[&str]>,
    ) -> Result<Option<JsonValue>>;

    /// Run a search request body against an index
    ///
    /// Returns the raw hits in engine order; each hit carries `_source` or
    /// `fields` depending on the projection in `body`.
    async fn search(&self, index: &str, body: &JsonValue) -> Result<SearchHits>;
}

/// Hits of a single search response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchHits {
    pub hits: Vec<JsonValue>,
    pub total: Option<TotalHits>,
}

impl SearchHits {
    pub fn new(hits: Vec<JsonValue>) -> Self {
        Self { hits, total: None }
    }

    pub fn with_total(mut self, total: TotalHits) -> Self {
        self.total = Some(total);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Whether the engine matched more documents than it returned because
    /// of the result window.
    pub fn exceeds(&self, window: usize) -> bool {
        match self.total {
            Some(TotalHits {
                value,
                relation: TotalRelation::Eq,
            }) => value > window as u64,
            Some(TotalHits {
                value,
                relation: TotalRelation::Gte,
            }) => value >= window as u64 && self.hits.len() >= window,
            None => false,
        }
    }
}

/// Reported number of matching documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TotalHits {
    pub value: u64,
    pub relation: TotalRelation,
}

/// Whether [`TotalHits::value`] is exact or a lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TotalRelation {
    Eq,
    Gte,
}
