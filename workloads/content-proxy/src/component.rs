//! Spin HTTP entry point.

use std::sync::OnceLock;

use edge_sdk::edge_cache::{header_names, UpstashStore};
use edge_sdk::edge_core::{ConfigError, ProxyConfig, RequestContext, RequestId, CONFIG_VARS};
use edge_sdk::edge_data::SpinHttpClient;
use edge_sdk::edge_observability::StructuredLogger;
use edge_sdk::edge_security::CorsPolicy;
use spin_sdk::http::{IntoResponse, Method as SpinMethod, Request, Response};
use spin_sdk::http_component;

use crate::{response, ContentProxy, SERVICE_NAME};

type Proxy = ContentProxy<UpstashStore<SpinHttpClient>, SpinHttpClient>;

// Built on first request and reused for the lifetime of the instance.
static PROXY: OnceLock<Proxy> = OnceLock::new();

fn load_config() -> Result<ProxyConfig, ConfigError> {
    let vars = CONFIG_VARS.iter().filter_map(|name| {
        spin_sdk::variables::get(name)
            .ok()
            .map(|value| (name.to_string(), value))
    });
    ProxyConfig::from_variables(vars)
}

fn proxy() -> anyhow::Result<&'static Proxy> {
    if let Some(proxy) = PROXY.get() {
        return Ok(proxy);
    }
    let proxy = ContentProxy::from_config(&load_config()?, SpinHttpClient)?;
    Ok(PROXY.get_or_init(|| proxy))
}

fn to_http_method(method: &SpinMethod) -> http::Method {
    match method {
        SpinMethod::Get => http::Method::GET,
        SpinMethod::Post => http::Method::POST,
        SpinMethod::Put => http::Method::PUT,
        SpinMethod::Delete => http::Method::DELETE,
        SpinMethod::Patch => http::Method::PATCH,
        SpinMethod::Head => http::Method::HEAD,
        SpinMethod::Options => http::Method::OPTIONS,
        SpinMethod::Connect => http::Method::CONNECT,
        SpinMethod::Trace => http::Method::TRACE,
        SpinMethod::Other(other) => {
            http::Method::from_bytes(other.as_bytes()).unwrap_or(http::Method::GET)
        }
    }
}

fn into_spin(response: http::Response<Vec<u8>>) -> Response {
    let (parts, body) = response.into_parts();
    let mut builder = Response::builder();
    builder.status(parts.status.as_u16());
    for (name, value) in &parts.headers {
        if let Ok(value) = value.to_str() {
            builder.header(name.as_str(), value);
        }
    }
    builder.body(body).build()
}

#[http_component]
async fn handle_content_proxy(req: Request) -> anyhow::Result<impl IntoResponse> {
    let mut ctx = RequestContext::new(to_http_method(req.method()), req.path());
    if let Some(id) = req
        .header(header_names::X_REQUEST_ID)
        .and_then(|value| value.as_str())
        .filter(|id| !id.is_empty())
    {
        ctx = ctx.with_request_id(RequestId::from_string(id));
    }

    let response = match proxy() {
        Ok(proxy) => proxy.handle(ctx).await,
        Err(err) => {
            StructuredLogger::new(ctx.request_id.clone())
                .with_service(SERVICE_NAME)
                .with_route(ctx.path.as_str())
                .error_with("proxy unavailable", &[("error", &err)]);
            response::internal_error(&CorsPolicy::default())
        }
    };

    Ok(into_spin(response))
}
