//! Redis over the Upstash REST API.
//!
//! Each command is a `POST` of a JSON array (`["GET", "key"]`) to the
//! database URL with a bearer token; the reply is `{"result": ...}` or
//! `{"error": "..."}`.

use std::time::Duration;

use async_trait::async_trait;
use edge_data::{HttpClient, HttpRequest};
use serde::Deserialize;
use serde_json::Value;

use crate::{CacheError, CacheResult, KvStore};

#[derive(Debug, Deserialize)]
struct CommandReply {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

/// Key-value store backed by an Upstash Redis database.
#[derive(Debug, Clone)]
pub struct UpstashStore<C> {
    client: C,
    url: String,
    token: String,
}

impl<C: HttpClient> UpstashStore<C> {
    /// Create a store for the database at `url`.
    pub fn new(client: C, url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    async fn command(&self, args: &[&str]) -> CacheResult<Option<Value>> {
        let name = args.first().copied().unwrap_or_default().to_string();

        let request = HttpRequest::post(self.url.as_str())
            .bearer_auth(&self.token)
            .json(args)?;
        let response = self.client.send(request).await?;

        let reply: CommandReply = match response.json() {
            Ok(reply) => reply,
            Err(_) if !response.is_success() => {
                return Err(CacheError::Command {
                    command: name,
                    message: format!("HTTP {}", response.status),
                })
            }
            Err(e) => return Err(CacheError::Transport(e)),
        };

        if let Some(message) = reply.error {
            return Err(CacheError::Command {
                command: name,
                message,
            });
        }
        if !response.is_success() {
            return Err(CacheError::Command {
                command: name,
                message: format!("HTTP {}", response.status),
            });
        }

        Ok(reply.result)
    }
}

#[async_trait(?Send)]
impl<C: HttpClient> KvStore for UpstashStore<C> {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        match self.command(&["GET", key]).await? {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(other) => Ok(Some(other.to_string())),
        }
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        let ttl = ttl.as_secs().max(1).to_string();
        match self.command(&["SET", key, value, "EX", &ttl]).await? {
            Some(Value::String(ok)) if ok == "OK" => Ok(()),
            other => Err(CacheError::Command {
                command: "SET".to_string(),
                message: format!("unexpected reply: {}", other.unwrap_or(Value::Null)),
            }),
        }
    }
}
