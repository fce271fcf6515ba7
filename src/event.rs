//! Per-request event
//!
//! Everything the dispatcher, policy and notifier need to know about one
//! inbound request. Built at request entry and dropped once the response is
//! written.

use hyper::header::{HeaderMap, USER_AGENT};
use hyper::{Method, Request};
use std::fmt::Write;
use std::net::SocketAddr;

use crate::dispatch::extract_extension;

#[derive(Debug, Clone)]
pub struct RequestEvent {
    pub source: SocketAddr,
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    /// Extension of the final path segment, empty when absent
    pub extension: String,
}

impl RequestEvent {
    pub fn new(source: SocketAddr, method: Method, path: &str, headers: HeaderMap) -> Self {
        Self {
            source,
            method,
            path: path.to_string(),
            headers,
            extension: extract_extension(path).to_string(),
        }
    }

    /// Build the event with the percent-decoded request path
    pub fn from_request<B>(req: &Request<B>, source: SocketAddr) -> Self {
        Self::new(
            source,
            req.method().clone(),
            &decode_path(req.uri().path()),
            req.headers().clone(),
        )
    }

    /// User-Agent header, empty if missing or not valid text
    pub fn user_agent(&self) -> &str {
        self.headers
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
    }

    /// Raw header set rendered as `{name: value, ...}`
    ///
    /// Non-text header values are shown lossily.
    pub fn headers_display(&self) -> String {
        let mut out = String::from("{");
        for (i, (name, value)) in self.headers.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "{name}: {}", String::from_utf8_lossy(value.as_bytes()));
        }
        out.push('}');
        out
    }
}

/// Percent-decode a raw request path
///
/// Malformed escapes are kept as written and invalid UTF-8 is replaced.
pub fn decode_path(raw: &str) -> String {
    String::from_utf8_lossy(&urlencoding::decode_binary(raw.as_bytes())).into_owned()
}
