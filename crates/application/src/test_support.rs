//! In-memory fakes for the application ports.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use restlab_domain::request::OutboundRequest;
use restlab_domain::response::TransportResponse;

use crate::ports::{HttpClient, HttpClientError, KeyValueStore, StoreError};

/// Store backed by a map, counting write calls (`set_many` counts once).
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(entries: &[(&str, &str)]) -> Self {
        let store = Self::new();
        {
            let mut values = store.values.lock();
            for (key, value) in entries {
                values.insert((*key).to_string(), (*value).to_string());
            }
        }
        store
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.values.lock().remove(key);
        Ok(())
    }

    fn set_many(&self, entries: &[(&str, String)]) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut values = self.values.lock();
        for (key, value) in entries {
            values.insert((*key).to_string(), value.clone());
        }
        Ok(())
    }
}

/// HTTP client that answers every request with the same canned result.
pub struct StubHttpClient {
    result: Result<TransportResponse, HttpClientError>,
    requests: Mutex<Vec<OutboundRequest>>,
}

impl StubHttpClient {
    pub fn respond(status: u16, content_type: &str, body: &str) -> Self {
        Self {
            result: Ok(TransportResponse::new(
                status,
                vec![("Content-Type".to_string(), content_type.to_string())],
                body.as_bytes().to_vec(),
                Duration::from_millis(3),
            )),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn fail(error: HttpClientError) -> Self {
        Self {
            result: Err(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn last_request(&self) -> Option<OutboundRequest> {
        self.requests.lock().last().cloned()
    }
}

impl HttpClient for StubHttpClient {
    fn execute(
        &self,
        request: OutboundRequest,
    ) -> impl Future<Output = Result<TransportResponse, HttpClientError>> + Send {
        self.requests.lock().push(request);
        let result = self.result.clone();
        async move { result }
    }
}
