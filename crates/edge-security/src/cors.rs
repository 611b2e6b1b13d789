//! Fixed CORS policy applied to every response.

use http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use http::{HeaderMap, HeaderName, HeaderValue, Method};

/// CORS response headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsPolicy {
    allow_origin: HeaderValue,
    allow_methods: HeaderValue,
    allow_headers: HeaderValue,
}

impl CorsPolicy {
    /// Any origin, read-only methods, `Content-Type` request header.
    pub fn public_read_only() -> Self {
        Self {
            allow_origin: HeaderValue::from_static("*"),
            allow_methods: HeaderValue::from_static("GET, OPTIONS"),
            allow_headers: HeaderValue::from_static("Content-Type"),
        }
    }

    /// Whether `method` is a CORS preflight.
    pub fn is_preflight(&self, method: &Method) -> bool {
        method == Method::OPTIONS
    }

    /// The headers as name/value pairs.
    pub fn headers(&self) -> [(HeaderName, HeaderValue); 3] {
        [
            (ACCESS_CONTROL_ALLOW_ORIGIN, self.allow_origin.clone()),
            (ACCESS_CONTROL_ALLOW_METHODS, self.allow_methods.clone()),
            (ACCESS_CONTROL_ALLOW_HEADERS, self.allow_headers.clone()),
        ]
    }

    /// Insert the headers into `map`, replacing existing values.
    pub fn apply(&self, map: &mut HeaderMap) {
        for (name, value) in self.headers() {
            map.insert(name, value);
        }
    }
}

impl Default for CorsPolicy {
    fn default() -> Self {
        Self::public_read_only()
    }
}
