//! Scripted in-memory document store.

use async_trait::async_trait;
use movies_api::{
    db::{DocumentStore, SearchHits},
    Error, Result,
};
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// One call received by the store.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    Get {
        index: String,
        id: String,
        source: Option<Vec<String>>,
    },
    Search {
        index: String,
        body: Value,
    },
}

/// Serves documents by `(index, id)` and queued search responses per index.
///
/// A search against an index with nothing queued returns no hits.
#[derive(Default)]
pub struct FakeStore {
    documents: Mutex<HashMap<(String, String), Value>>,
    searches: Mutex<HashMap<String, VecDeque<SearchHits>>>,
    failure: Mutex<Option<u16>>,
    calls: Mutex<Vec<StoreCall>>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_document(&self, index: &str, id: &str, source: Value) {
        self.documents
            .lock()
            .unwrap()
            .insert((index.to_string(), id.to_string()), source);
    }

    pub fn push_search(&self, index: &str, hits: SearchHits) {
        self.searches
            .lock()
            .unwrap()
            .entry(index.to_string())
            .or_default()
            .push_back(hits);
    }

    /// Make every following call fail with the given engine status.
    pub fn fail_with(&self, status: u16) {
        *self.failure.lock().unwrap() = Some(status);
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Bodies of every search sent to `index`, in order.
    pub fn search_bodies(&self, index: &str) -> Vec<Value> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                StoreCall::Search { index: i, body } if i == index => Some(body),
                _ => None,
            })
            .collect()
    }

    fn check_failure(&self) -> Result<()> {
        match *self.failure.lock().unwrap() {
            Some(status) => Err(Error::Store {
                status,
                body: "scripted failure".to_string(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DocumentStore for FakeStore {
    async fn get(&self, index: &str, id: &str, source: Option<&[&str]>) -> Result<Option<Value>> {
        self.calls.lock().unwrap().push(StoreCall::Get {
            index: index.to_string(),
            id: id.to_string(),
            source: source.map(|fields| fields.iter().map(|f| f.to_string()).collect()),
        });
        self.check_failure()?;

        Ok(self
            .documents
            .lock()
            .unwrap()
            .get(&(index.to_string(), id.to_string()))
            .cloned())
    }

    async fn search(&self, index: &str, body: &Value) -> Result<SearchHits> {
        self.calls.lock().unwrap().push(StoreCall::Search {
            index: index.to_string(),
            body: body.clone(),
        });
        self.check_failure()?;

        Ok(self
            .searches
            .lock()
            .unwrap()
            .get_mut(index)
            .and_then(VecDeque::pop_front)
            .unwrap_or_default())
    }
}
