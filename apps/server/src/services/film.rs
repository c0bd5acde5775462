//! Film service - film lookup, search and filtered listing

use crate::{db::DocumentStore, Result};
use movies_query::{
    mapper::{self, FILM_STUB_FIELDS},
    page_bounds, query, Film, FilmStub, Projection, SearchRequest, SortSpec,
};
use std::sync::Arc;
use uuid::Uuid;

/// Analyzed field matched by film search.
const SEARCH_FIELD: &str = "title";

pub struct FilmService {
    store: Arc<dyn DocumentStore>,
    index: String,
}

impl FilmService {
    pub fn new(store: Arc<dyn DocumentStore>, index: impl Into<String>) -> Self {
        Self {
            store,
            index: index.into(),
        }
    }

    /// Full film record, or `None` when no film has this id.
    #[tracing::instrument(skip(self))]
    pub async fn get_by_id(&self, film_id: Uuid) -> Result<Option<Film>> {
        let fields = mapper::film_fields();
        let Some(source) = self
            .store
            .get(&self.index, &film_id.to_string(), Some(fields.as_slice()))
            .await?
        else {
            return Ok(None);
        };
        Ok(Some(mapper::film_from_source(&source)?))
    }

    /// Fuzzy title search.
    #[tracing::instrument(skip(self))]
    pub async fn search(
        &self,
        term: &str,
        page_number: usize,
        page_size: usize,
    ) -> Result<Vec<FilmStub>> {
        let page = page_bounds(page_number, page_size);
        if page.is_empty() {
            tracing::debug!("Page lies beyond the result window");
            return Ok(Vec::new());
        }

        let request = SearchRequest::new(query::fuzzy_match(SEARCH_FIELD, term))
            .projection(Projection::source(FILM_STUB_FIELDS))
            .page(page);
        self.fetch_stubs(&request).await
    }

    /// Films, optionally restricted to one genre, in the requested order.
    #[tracing::instrument(skip(self))]
    pub async fn list(
        &self,
        genre_id: Option<Uuid>,
        sort: &[SortSpec],
        page_number: usize,
        page_size: usize,
    ) -> Result<Vec<FilmStub>> {
        let page = page_bounds(page_number, page_size);
        if page.is_empty() {
            tracing::debug!("Page lies beyond the result window");
            return Ok(Vec::new());
        }

        let filter = match genre_id {
            Some(genre_id) => query::genre_filter(&genre_id),
            None => query::match_all(),
        };
        let request = SearchRequest::new(filter)
            .sort(sort.to_vec())
            .projection(Projection::source(FILM_STUB_FIELDS))
            .page(page);
        self.fetch_stubs(&request).await
    }

    async fn fetch_stubs(&self, request: &SearchRequest) -> Result<Vec<FilmStub>> {
        let hits = self.store.search(&self.index, &request.to_body()).await?;
        let films = hits
            .hits
            .iter()
            .map(|hit| mapper::source_of(hit).and_then(mapper::film_stub_from_source))
            .collect::<movies_query::Result<Vec<_>>>()?;
        Ok(films)
    }
}
