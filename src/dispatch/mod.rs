//! Response dispatch module
//!
//! Chooses a response format from the request extension and renders the
//! secret token into it.

pub mod format;
pub mod render;
pub mod templates;

pub use format::{extract_extension, ResponseFormat};
pub use render::{Dispatcher, ResponseArtifact, TokenDocument};
pub use templates::{CachedTemplates, TemplateDir, TemplateStore};
