//! Response construction. Every response carries the CORS headers.

use edge_sdk::edge_cache::header_names;
use edge_sdk::edge_core::RequestId;
use edge_sdk::edge_security::CorsPolicy;
use http::header::CONTENT_TYPE;
use http::{HeaderName, HeaderValue, Response, StatusCode};

use crate::{CollectionPayload, ProxyError};

const INVALID_COLLECTION_BODY: &[u8] = br#"{"error":"Invalid collection"}"#;
const INTERNAL_ERROR_BODY: &[u8] = br#"{"error":"Internal server error"}"#;

fn empty(status: StatusCode, cors: &CorsPolicy) -> Response<Vec<u8>> {
    let mut response = Response::new(Vec::new());
    *response.status_mut() = status;
    cors.apply(response.headers_mut());
    response
}

fn json(status: StatusCode, body: Vec<u8>, cors: &CorsPolicy) -> Response<Vec<u8>> {
    let mut response = empty(status, cors);
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    *response.body_mut() = body;
    response
}

/// 204 answer to a preflight request.
pub fn preflight(cors: &CorsPolicy) -> Response<Vec<u8>> {
    empty(StatusCode::NO_CONTENT, cors)
}

/// 404 for a path outside the allowlist.
pub fn invalid_collection(cors: &CorsPolicy) -> Response<Vec<u8>> {
    json(StatusCode::NOT_FOUND, INVALID_COLLECTION_BODY.to_vec(), cors)
}

/// 500 with a generic body; details only go to the log.
pub fn internal_error(cors: &CorsPolicy) -> Response<Vec<u8>> {
    json(
        StatusCode::INTERNAL_SERVER_ERROR,
        INTERNAL_ERROR_BODY.to_vec(),
        cors,
    )
}

/// 200 carrying a collection payload plus cache explain headers.
pub fn collection(
    cors: &CorsPolicy,
    payload: &CollectionPayload,
    request_id: &RequestId,
) -> Result<Response<Vec<u8>>, ProxyError> {
    let body = serde_json::to_vec(payload)?;
    let mut response = json(StatusCode::OK, body, cors);

    let headers = response.headers_mut();
    headers.insert(
        HeaderName::from_static(header_names::X_CACHE_STATUS),
        HeaderValue::from_static(payload.from.cache_status().as_str()),
    );
    if let Ok(id) = HeaderValue::from_str(request_id.as_str()) {
        headers.insert(HeaderName::from_static(header_names::X_REQUEST_ID), id);
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DataSource;
    use serde_json::json;

    fn assert_cors(response: &Response<Vec<u8>>) {
        let headers = response.headers();
        assert_eq!(headers["access-control-allow-origin"], "*");
        assert_eq!(headers["access-control-allow-methods"], "GET, OPTIONS");
        assert_eq!(headers["access-control-allow-headers"], "Content-Type");
    }

    #[test]
    fn test_preflight() {
        let response = preflight(&CorsPolicy::default());
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(response.body().is_empty());
        assert!(response.headers().get(CONTENT_TYPE).is_none());
        assert_cors(&response);
    }

    #[test]
    fn test_invalid_collection() {
        let response = invalid_collection(&CorsPolicy::default());
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(
            serde_json::from_slice::<serde_json::Value>(response.body()).unwrap(),
            json!({"error": "Invalid collection"})
        );
        assert_cors(&response);
    }

    #[test]
    fn test_internal_error() {
        let response = internal_error(&CorsPolicy::default());
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.body().as_slice(), INTERNAL_ERROR_BODY);
        assert_cors(&response);
    }

    #[test]
    fn test_collection() {
        let payload = CollectionPayload {
            from: DataSource::Cache,
            collection: "about".to_string(),
            data: json!([{"id": "me"}]),
        };
        let response = collection(
            &CorsPolicy::default(),
            &payload,
            &RequestId::from_string("req-7"),
        )
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(response.headers()["x-cache-status"], "HIT");
        assert_eq!(response.headers()["x-request-id"], "req-7");
        assert_cors(&response);
        assert_eq!(
            std::str::from_utf8(response.body()).unwrap(),
            r#"{"from":"redis-cache","collection":"about","data":[{"id":"me"}]}"#
        );
    }

    #[test]
    fn test_collection_skips_unrepresentable_request_id() {
        let payload = CollectionPayload {
            from: DataSource::Upstream,
            collection: "skills".to_string(),
            data: json!([]),
        };
        let response = collection(
            &CorsPolicy::default(),
            &payload,
            &RequestId::from_string("bad\nid"),
        )
        .unwrap();

        assert_eq!(response.headers()["x-cache-status"], "MISS");
        assert!(response.headers().get("x-request-id").is_none());
    }
}
