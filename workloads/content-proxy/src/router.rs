//! Request routing and the error boundary.

use edge_sdk::edge_cache::{KvStore, UpstashStore};
use edge_sdk::edge_core::{ProxyConfig, RequestContext, RequestId, TimingContext};
use edge_sdk::edge_data::{FirestoreClient, HttpClient};
use edge_sdk::edge_observability::{LogSettings, StructuredLogger};
use edge_sdk::edge_security::{presets, CollectionAllowlist, CorsPolicy};
use http::{Method, Response};

use crate::{response, CollectionFetcher, ProxyError};

/// Service name attached to every log line.
pub const SERVICE_NAME: &str = "content-proxy";

/// The proxy: allowlist, CORS and cache-aside loading behind one handler.
pub struct ContentProxy<S, C> {
    fetcher: CollectionFetcher<S, C>,
    allowlist: CollectionAllowlist,
    cors: CorsPolicy,
    log: LogSettings,
}

impl<C: HttpClient + Clone> ContentProxy<UpstashStore<C>, C> {
    /// Build the Upstash and Firestore clients once from configuration.
    pub fn from_config(config: &ProxyConfig, client: C) -> Result<Self, ProxyError> {
        let log = LogSettings::from_config(config)?;
        let store = UpstashStore::new(client.clone(), &config.cache_url, &config.cache_token);
        let firestore = FirestoreClient::new(client, &config.firestore_project);

        Ok(Self::new(CollectionFetcher::new(store, firestore)).with_log_settings(log))
    }
}

impl<S: KvStore, C: HttpClient> ContentProxy<S, C> {
    pub fn new(fetcher: CollectionFetcher<S, C>) -> Self {
        Self {
            fetcher,
            allowlist: presets::content_sections(),
            cors: CorsPolicy::default(),
            log: LogSettings::default(),
        }
    }

    pub fn with_allowlist(mut self, allowlist: CollectionAllowlist) -> Self {
        self.allowlist = allowlist;
        self
    }

    pub fn with_log_settings(mut self, log: LogSettings) -> Self {
        self.log = log;
        self
    }

    /// Handle a request with a freshly generated context.
    pub async fn handle_request(&self, method: Method, path: &str) -> Response<Vec<u8>> {
        self.handle(RequestContext::new(method, path)).await
    }

    /// Route one request.
    ///
    /// `OPTIONS` answers 204 on any path. Other methods on an allowed
    /// collection are served like `GET`; anything else is a 404.
    pub async fn handle(&self, mut ctx: RequestContext) -> Response<Vec<u8>> {
        let logger = StructuredLogger::new(ctx.request_id.clone())
            .with_service(SERVICE_NAME)
            .with_route(ctx.path.as_str())
            .with_settings(self.log);

        logger
            .debug_builder("request started")
            .field("method", ctx.method.as_str())
            .emit();

        if self.cors.is_preflight(&ctx.method) {
            return response::preflight(&self.cors);
        }

        let collection = match self.allowlist.resolve(&ctx.path) {
            Ok(collection) => collection,
            Err(err) => {
                logger
                    .info_builder("invalid collection")
                    .field("reason", err.to_string())
                    .emit();
                return response::invalid_collection(&self.cors);
            }
        };

        match self
            .serve(collection, &ctx.request_id, &mut ctx.timing, &logger)
            .await
        {
            Ok(response) => response,
            Err(err) => {
                logger
                    .error_builder("request failed")
                    .field("collection", collection)
                    .field("error", err.to_string())
                    .emit();
                response::internal_error(&self.cors)
            }
        }
    }

    async fn serve(
        &self,
        collection: &str,
        request_id: &RequestId,
        timing: &mut TimingContext,
        logger: &StructuredLogger,
    ) -> Result<Response<Vec<u8>>, ProxyError> {
        let payload = self.fetcher.fetch(collection, timing, logger).await?;
        let response = response::collection(&self.cors, &payload, request_id)?;

        logger
            .info_builder("request completed")
            .field("collection", collection)
            .field("cache", payload.from.cache_status().as_str())
            .duration_ms("elapsed_ms", timing.elapsed())
            .emit();

        Ok(response)
    }
}
