//! Outbound HTTP transport.

use async_trait::async_trait;

use crate::{FetchError, HttpRequest, HttpResponse};

/// Transport used for every outbound call.
///
/// Futures are `?Send`: Spin's outbound HTTP futures are not `Send`.
#[async_trait(?Send)]
pub trait HttpClient {
    /// Send a request and buffer the full response.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, FetchError>;
}

#[async_trait(?Send)]
impl<C: HttpClient + ?Sized> HttpClient for &C {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, FetchError> {
        (**self).send(request).await
    }
}

#[async_trait(?Send)]
impl<C: HttpClient + ?Sized> HttpClient for std::sync::Arc<C> {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, FetchError> {
        (**self).send(request).await
    }
}

/// Platform client backed by Spin's outbound HTTP.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpinHttpClient;

#[cfg(target_arch = "wasm32")]
#[async_trait(?Send)]
impl HttpClient for SpinHttpClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, FetchError> {
        use spin_sdk::http::{Method as SpinMethod, Request, Response};

        let method = match request.method {
            crate::Method::Get => SpinMethod::Get,
            crate::Method::Post => SpinMethod::Post,
        };

        let mut builder = Request::builder();
        builder.method(method).uri(request.url.as_str());
        for (key, value) in &request.headers {
            builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder.body(body);
        }

        let response: Response = spin_sdk::http::send(builder.build())
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        let status = *response.status();
        Ok(HttpResponse::new(status, response.into_body()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait(?Send)]
impl HttpClient for SpinHttpClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, FetchError> {
        Err(FetchError::Request(format!(
            "outbound HTTP unavailable outside Spin: {} {}",
            request.method.as_str(),
            request.url
        )))
    }
}
