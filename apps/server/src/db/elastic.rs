//! Elasticsearch REST client

use super::traits::{DocumentStore, SearchHits, TotalHits, TotalRelation};
use crate::{config::ElasticConfig, Error, Result};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde_json::Value as JsonValue;

/// [`DocumentStore`] backed by the Elasticsearch HTTP API.
///
/// The inner `reqwest::Client` pools connections and is cheap to share.
#[derive(Debug, Clone)]
pub struct ElasticStore {
    client: Client,
    base_url: String,
}

impl ElasticStore {
    pub fn new(config: &ElasticConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self::with_client(client, &config.url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn doc_url(&self, index: &str, id: &str) -> String {
        let id: String = url::form_urlencoded::byte_serialize(id.as_bytes()).collect();
        format!("{}/{}/_doc/{}", self.base_url, index, id)
    }

    fn search_url(&self, index: &str) -> String {
        format!("{}/{}/_search", self.base_url, index)
    }
}

#[async_trait]
impl DocumentStore for ElasticStore {
    #[tracing::instrument(name = "elastic.get", skip_all, fields(index = %index, id = %id))]
    async fn get(
        &self,
        index: &str,
        id: &str,
        source: Option<&[&str]>,
    ) -> Result<Option<JsonValue>> {
        let mut request = self.client.get(self.doc_url(index, id));
        if let Some(fields) = source {
            request = request.query(&[("_source_includes", fields.join(","))]);
        }

        let response = request.send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!("Document not found");
            return Ok(None);
        }
        let document: JsonValue = ensure_success(response).await?.json().await?;
        Ok(source_from_get(document))
    }

    #[tracing::instrument(name = "elastic.search", skip_all, fields(index = %index))]
    async fn search(&self, index: &str, body: &JsonValue) -> Result<SearchHits> {
        let response = self
            .client
            .post(self.search_url(index))
            .json(body)
            .send()
            .await?;
        let payload: JsonValue = ensure_success(response).await?.json().await?;
        let hits = parse_search_response(&payload)?;
        tracing::debug!(hits = hits.hits.len(), "Search completed");
        Ok(hits)
    }
}

async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(Error::Store {
        status: status.as_u16(),
        body,
    })
}

/// Extract `_source` from a get-by-id response; `found: false` means absent.
fn source_from_get(mut document: JsonValue) -> Option<JsonValue> {
    if document.get("found").and_then(JsonValue::as_bool) == Some(false) {
        return None;
    }
    match document.get_mut("_source") {
        Some(source) => Some(source.take()),
        None => Some(JsonValue::Object(Default::default())),
    }
}

fn parse_search_response(payload: &JsonValue) -> Result<SearchHits> {
    let hits = payload
        .get("hits")
        .and_then(|h| h.get("hits"))
        .and_then(JsonValue::as_array)
        .cloned()
        .ok_or_else(|| Error::Store {
            status: 200,
            body: "search response has no hits.hits array".to_string(),
        })?;

    let total = payload
        .get("hits")
        .and_then(|h| h.get("total"))
        .and_then(parse_total);

    Ok(SearchHits { hits, total })
}

/// `hits.total` is an object in Elasticsearch 7+ and a bare number before.
fn parse_total(total: &JsonValue) -> Option<TotalHits> {
    if let Some(value) = total.as_u64() {
        return Some(TotalHits {
            value,
            relation: TotalRelation::Eq,
        });
    }
    let value = total.get("value")?.as_u64()?;
    let relation = match total.get("relation").and_then(JsonValue::as_str) {
        Some("gte") => TotalRelation::Gte,
        _ => TotalRelation::Eq,
    };
    Some(TotalHits { value, relation })
}
