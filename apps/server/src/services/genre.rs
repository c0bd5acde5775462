//! Genre service

use crate::{db::DocumentStore, Result};
use movies_query::{mapper, page_bounds, query, Genre, SearchRequest};
use std::sync::Arc;
use uuid::Uuid;

/// Genres are a small fixed vocabulary; one page returns all of them.
const GENRE_LIST_SIZE: usize = 100;

pub struct GenreService {
    store: Arc<dyn DocumentStore>,
    index: String,
}

impl GenreService {
    pub fn new(store: Arc<dyn DocumentStore>, index: impl Into<String>) -> Self {
        Self {
            store,
            index: index.into(),
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_by_id(&self, genre_id: Uuid) -> Result<Option<Genre>> {
        let Some(source) = self
            .store
            .get(&self.index, &genre_id.to_string(), None)
            .await?
        else {
            return Ok(None);
        };
        Ok(Some(mapper::genre_from_source(&source)?))
    }

    #[tracing::instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<Genre>> {
        let request =
            SearchRequest::new(query::match_all()).page(page_bounds(1, GENRE_LIST_SIZE));
        let hits = self.store.search(&self.index, &request.to_body()).await?;
        let genres = hits
            .hits
            .iter()
            .map(|hit| mapper::source_of(hit).and_then(mapper::genre_from_source))
            .collect::<movies_query::Result<Vec<_>>>()?;
        Ok(genres)
    }
}
