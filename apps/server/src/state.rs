//! Shared application state

use crate::{
    cache::ResponseCache,
    config::Config,
    db::{DocumentStore, ElasticStore},
    services::{FilmService, GenreService, PersonService},
    Result,
};
use std::sync::Arc;

/// Handles shared by every request; cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub films: Arc<FilmService>,
    pub persons: Arc<PersonService>,
    pub genres: Arc<GenreService>,
    /// `None` when the response cache is disabled.
    pub cache: Option<Arc<ResponseCache>>,
}

impl AppState {
    /// Build state backed by the configured Elasticsearch cluster.
    pub fn new(config: Config) -> Result<Self> {
        let store = ElasticStore::new(&config.elastic)?;
        tracing::info!(url = %config.elastic.url, "Document store client ready");
        Ok(Self::with_store(config, Arc::new(store)))
    }

    /// Build state around an existing store.
    pub fn with_store(config: Config, store: Arc<dyn DocumentStore>) -> Self {
        let elastic = &config.elastic;
        let films = FilmService::new(store.clone(), elastic.movies_index.as_str());
        let persons = PersonService::new(
            store.clone(),
            elastic.persons_index.as_str(),
            elastic.movies_index.as_str(),
        );
        let genres = GenreService::new(store, elastic.genres_index.as_str());

        let cache = config.cache.enabled.then(|| {
            tracing::info!(
                ttl_seconds = config.cache.ttl_seconds,
                capacity = config.cache.capacity,
                "Response cache enabled"
            );
            Arc::new(ResponseCache::from_config(&config.cache))
        });

        Self {
            config: Arc::new(config),
            films: Arc::new(films),
            persons: Arc::new(persons),
            genres: Arc::new(genres),
            cache,
        }
    }
}
