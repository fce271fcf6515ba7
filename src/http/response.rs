//! HTTP response building module
//!
//! Every request is answered `200 OK` with the rendered artifact and the
//! token header.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::{Response, StatusCode};

use crate::config::SecretToken;
use crate::dispatch::ResponseArtifact;

/// Header carrying the secret token on every response
pub const SECRET_TOKEN_HEADER: &str = "X-Secret-Token";

/// Build the `200 OK` response for a rendered artifact
pub fn build_token_response(artifact: ResponseArtifact, token: &SecretToken) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(artifact.body));
    *response.status_mut() = StatusCode::OK;

    let headers = response.headers_mut();
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static(artifact.content_type),
    );
    headers.insert(SECRET_TOKEN_HEADER, token.header_value().clone());
    response
}
