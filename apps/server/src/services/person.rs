//! Person service - person lookup and search with resolved filmographies
//!
//! Filmographies are not stored on person documents. They are rebuilt from
//! the per-role person arrays of film documents with one batched query per
//! request, however many persons are being resolved.

use crate::{
    db::{DocumentStore, SearchHits},
    Result,
};
use movies_query::{
    mapper::{self, FILM_STUB_FIELDS},
    page_bounds, query,
    resolver::{resolve_roles, role_projection_fields},
    FilmStub, Page, Person, PersonFilm, Projection, SearchRequest, WINDOW_CEILING,
};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Analyzed field matched by person search.
const SEARCH_FIELD: &str = "full_name";

pub struct PersonService {
    store: Arc<dyn DocumentStore>,
    persons_index: String,
    movies_index: String,
}

impl PersonService {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        persons_index: impl Into<String>,
        movies_index: impl Into<String>,
    ) -> Self {
        Self {
            store,
            persons_index: persons_index.into(),
            movies_index: movies_index.into(),
        }
    }

    /// Person with filmography, or `None` when no person has this id.
    #[tracing::instrument(skip(self))]
    pub async fn get_by_id(&self, person_id: Uuid) -> Result<Option<Person>> {
        let Some(source) = self
            .store
            .get(&self.persons_index, &person_id.to_string(), None)
            .await?
        else {
            return Ok(None);
        };

        let mut filmographies = self.filmographies(&[person_id]).await?;
        let films = filmographies.remove(&person_id).unwrap_or_default();
        Ok(Some(mapper::person_from_source(&source, films)?))
    }

    /// Fuzzy name search; every hit carries its resolved filmography.
    #[tracing::instrument(skip(self))]
    pub async fn search(
        &self,
        term: &str,
        page_number: usize,
        page_size: usize,
    ) -> Result<Vec<Person>> {
        let page = page_bounds(page_number, page_size);
        if page.is_empty() {
            tracing::debug!("Page lies beyond the result window");
            return Ok(Vec::new());
        }

        let request = SearchRequest::new(query::fuzzy_match(SEARCH_FIELD, term)).page(page);
        let hits = self
            .store
            .search(&self.persons_index, &request.to_body())
            .await?;
        if hits.is_empty() {
            return Ok(Vec::new());
        }

        let sources = hits
            .hits
            .iter()
            .map(mapper::source_of)
            .collect::<movies_query::Result<Vec<_>>>()?;
        let person_ids = sources
            .iter()
            .map(|source| mapper::person_id_from_source(source))
            .collect::<movies_query::Result<Vec<_>>>()?;

        let filmographies = self.filmographies(&person_ids).await?;
        let persons = sources
            .into_iter()
            .zip(&person_ids)
            .map(|(source, person_id)| {
                let films = filmographies.get(person_id).cloned().unwrap_or_default();
                mapper::person_from_source(source, films)
            })
            .collect::<movies_query::Result<Vec<_>>>()?;
        Ok(persons)
    }

    /// Every film the person worked on, in any role.
    #[tracing::instrument(skip(self))]
    pub async fn list_films(&self, person_id: Uuid) -> Result<Vec<FilmStub>> {
        let request = SearchRequest::new(query::persons_filter(&[person_id]))
            .projection(Projection::fields(FILM_STUB_FIELDS))
            .page(Page::full_window());
        let hits = self.search_films(&request, 1).await?;
        let films = hits
            .hits
            .iter()
            .map(mapper::film_stub_from_fields)
            .collect::<movies_query::Result<Vec<_>>>()?;
        Ok(films)
    }

    /// Resolve the filmographies of `person_ids` with a single batched query.
    async fn filmographies(&self, person_ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<PersonFilm>>> {
        let request = SearchRequest::new(query::persons_filter(person_ids))
            .projection(Projection::fields(role_projection_fields()))
            .page(Page::full_window());
        let hits = self.search_films(&request, person_ids.len()).await?;
        let projections = hits
            .hits
            .iter()
            .map(mapper::role_projection_from_fields)
            .collect::<movies_query::Result<Vec<_>>>()?;
        Ok(resolve_roles(person_ids, &projections))
    }

    async fn search_films(&self, request: &SearchRequest, persons: usize) -> Result<SearchHits> {
        let hits = self
            .store
            .search(&self.movies_index, &request.to_body())
            .await?;
        if hits.exceeds(WINDOW_CEILING) {
            // No deep pagination: films past the window are dropped.
            tracing::warn!(
                persons,
                returned = hits.hits.len(),
                total = hits.total.map(|t| t.value),
                "Person film lookup truncated to the result window"
            );
        }
        Ok(hits)
    }
}
