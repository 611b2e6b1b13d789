//! Hand-written doubles for the cache and the upstream client.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use edge_sdk::edge_cache::{CacheError, CacheResult, InMemoryStore, KvStore};
use edge_sdk::edge_data::{FetchError, HttpClient, HttpRequest, HttpResponse};
use serde_json::Value;

pub const PROJECTS_LISTING: &str = r#"{
    "documents": [
        {
            "name": "projects/p/databases/(default)/documents/projects/abc",
            "fields": {
                "title": {"stringValue": "Site"},
                "stars": {"integerValue": "12"},
                "tags": {"arrayValue": {"values": [{"stringValue": "rust"}]}}
            }
        },
        {
            "name": "projects/p/databases/(default)/documents/projects/def"
        }
    ]
}"#;

/// Upstream double answering every request with one canned reply.
pub struct StubUpstream {
    reply: Option<(u16, String)>,
    pub calls: Cell<usize>,
    pub urls: RefCell<Vec<String>>,
}

impl StubUpstream {
    pub fn replying(status: u16, body: &str) -> Self {
        Self {
            reply: Some((status, body.to_string())),
            calls: Cell::new(0),
            urls: RefCell::new(Vec::new()),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            reply: None,
            calls: Cell::new(0),
            urls: RefCell::new(Vec::new()),
        }
    }
}

#[async_trait(?Send)]
impl HttpClient for StubUpstream {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, FetchError> {
        self.calls.set(self.calls.get() + 1);
        self.urls.borrow_mut().push(request.url);
        match &self.reply {
            Some((status, body)) => Ok(HttpResponse::new(*status, body.as_str())),
            None => Err(FetchError::Request("connection refused".to_string())),
        }
    }
}

/// In-memory store that records traffic and can be told to fail.
#[derive(Default)]
pub struct RecordingStore {
    inner: InMemoryStore,
    pub gets: Cell<usize>,
    pub writes: RefCell<Vec<(String, String, Duration)>>,
    pub broken: bool,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Self::default()
        }
    }

    pub async fn preload(&self, key: &str, value: &str) {
        self.inner
            .set_ex(key, value, Duration::from_secs(600))
            .await
            .unwrap();
    }
}

#[async_trait(?Send)]
impl KvStore for RecordingStore {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        self.gets.set(self.gets.get() + 1);
        if self.broken {
            return Err(CacheError::Storage("store offline".to_string()));
        }
        self.inner.get(key).await
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        if self.broken {
            return Err(CacheError::Storage("store offline".to_string()));
        }
        self.writes
            .borrow_mut()
            .push((key.to_string(), value.to_string(), ttl));
        self.inner.set_ex(key, value, ttl).await
    }
}

/// One client speaking both the Upstash command protocol and the
/// Firestore listing endpoint, routed by URL.
pub struct RoutingClient {
    cache_url: String,
    listing: String,
    entries: RefCell<HashMap<String, String>>,
    pub commands: RefCell<Vec<Value>>,
    pub auth: RefCell<Vec<Option<String>>>,
    pub upstream_calls: Cell<usize>,
}

impl RoutingClient {
    pub fn new(cache_url: &str, listing: &str) -> Self {
        Self {
            cache_url: cache_url.trim_end_matches('/').to_string(),
            listing: listing.to_string(),
            entries: RefCell::new(HashMap::new()),
            commands: RefCell::new(Vec::new()),
            auth: RefCell::new(Vec::new()),
            upstream_calls: Cell::new(0),
        }
    }

    fn redis(&self, command: Vec<String>) -> String {
        let reply = match command.as_slice() {
            [get, key] if get == "GET" => match self.entries.borrow().get(key) {
                Some(value) => Value::String(value.clone()),
                None => Value::Null,
            },
            [set, key, value, ..] if set == "SET" => {
                self.entries.borrow_mut().insert(key.clone(), value.clone());
                Value::String("OK".to_string())
            }
            _ => return r#"{"error":"ERR unknown command"}"#.to_string(),
        };
        serde_json::json!({ "result": reply }).to_string()
    }
}

#[async_trait(?Send)]
impl HttpClient for RoutingClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, FetchError> {
        if request.url == self.cache_url {
            let body = request.body.as_deref().unwrap_or_default();
            let command: Vec<String> = serde_json::from_slice(body)?;
            self.commands
                .borrow_mut()
                .push(serde_json::to_value(&command)?);
            self.auth
                .borrow_mut()
                .push(request.header_value("authorization").map(str::to_string));
            return Ok(HttpResponse::new(200, self.redis(command)));
        }

        self.upstream_calls.set(self.upstream_calls.get() + 1);
        Ok(HttpResponse::new(200, self.listing.as_str()))
    }
}
