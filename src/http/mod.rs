//! HTTP protocol layer module
//!
//! Content type lookup and response construction, independent of how the
//! body was rendered.

pub mod mime;
pub mod response;

pub use response::{build_token_response, SECRET_TOKEN_HEADER};
