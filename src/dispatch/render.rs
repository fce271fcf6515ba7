//! Response rendering
//!
//! Builds the body for each format with the secret token embedded.

use hyper::body::Bytes;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::format::{content_type_for, extract_extension, ResponseFormat};
use super::templates::TemplateStore;
use crate::config::SecretToken;
use crate::logger;

/// Placeholder replaced by the token in HTML and CSV templates
pub const TOKEN_PLACEHOLDER: &str = "{{token}}";

/// Shape shared by the JSON and XML bodies
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename = "SerializableResponse")]
pub struct TokenDocument {
    pub token: String,
}

/// Content type and body computed for a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseArtifact {
    pub content_type: &'static str,
    pub body: Bytes,
}

/// Turns request paths into response artifacts
#[derive(Clone)]
pub struct Dispatcher {
    token: SecretToken,
    templates: Arc<TemplateStore>,
}

impl Dispatcher {
    pub fn new(token: SecretToken, templates: impl Into<TemplateStore>) -> Self {
        Self {
            token,
            templates: Arc::new(templates.into()),
        }
    }

    pub const fn token(&self) -> &SecretToken {
        &self.token
    }

    /// Render the response for `path`
    ///
    /// Never fails: missing templates and serialization errors give an
    /// empty body with the format's content type.
    pub async fn render(&self, path: &str) -> ResponseArtifact {
        let extension = extract_extension(path);
        let format = ResponseFormat::from_extension(extension);
        ResponseArtifact {
            content_type: content_type_for(format, extension),
            body: self.render_body(format).await,
        }
    }

    async fn render_body(&self, format: ResponseFormat) -> Bytes {
        let token = self.token.as_str();
        match format {
            ResponseFormat::Json => self.render_json(),
            ResponseFormat::Xml => self.render_xml(),
            ResponseFormat::Html | ResponseFormat::Csv => self.render_template(format).await,
            ResponseFormat::Text => Bytes::from(format!("token={token}")),
            // TODO: render the token into generated media instead of serving static assets
            ResponseFormat::Png
            | ResponseFormat::Jpeg
            | ResponseFormat::Gif
            | ResponseFormat::Mp3
            | ResponseFormat::Mp4 => self.load_template(format).await.unwrap_or_default(),
            ResponseFormat::Fallback => Bytes::from(token.to_string()),
        }
    }

    fn document(&self) -> TokenDocument {
        TokenDocument {
            token: self.token.as_str().to_string(),
        }
    }

    fn render_json(&self) -> Bytes {
        match serde_json::to_vec(&self.document()) {
            Ok(data) => Bytes::from(data),
            Err(e) => {
                logger::error("Failed to serialize JSON response", &[("error", &e.to_string())]);
                Bytes::new()
            }
        }
    }

    fn render_xml(&self) -> Bytes {
        match quick_xml::se::to_string(&self.document()) {
            Ok(data) => Bytes::from(data),
            Err(e) => {
                logger::error("Failed to serialize XML response", &[("error", &e.to_string())]);
                Bytes::new()
            }
        }
    }

    async fn render_template(&self, format: ResponseFormat) -> Bytes {
        let Some(template) = self.load_template(format).await else {
            return Bytes::new();
        };
        let text = String::from_utf8_lossy(&template);
        Bytes::from(text.replace(TOKEN_PLACEHOLDER, self.token.as_str()))
    }

    async fn load_template(&self, format: ResponseFormat) -> Option<Bytes> {
        let name = format.template_name()?;
        let data = self.templates.load(name).await;
        if data.is_none() {
            logger::debug("Template unavailable, serving empty body", &[("template", name)]);
        }
        data
    }
}
