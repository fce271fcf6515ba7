//! Template and asset store
//!
//! Read-only lookup of the files backing the HTML, CSV and media formats.
//! A missing or unreadable file is reported as absent, never as an error.

use hyper::body::Bytes;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

use crate::logger;

/// Where template contents come from while serving
#[derive(Debug, Clone)]
pub enum TemplateStore {
    /// Preloaded at startup, no disk access per request
    Cached(CachedTemplates),
    /// Read from disk on every lookup
    Disk(TemplateDir),
}

impl TemplateStore {
    /// Raw template contents by logical name, `None` when absent
    pub async fn load(&self, name: &str) -> Option<Bytes> {
        match self {
            Self::Cached(cache) => cache.get(name),
            Self::Disk(dir) => dir.load(name).await,
        }
    }
}

impl From<CachedTemplates> for TemplateStore {
    fn from(cache: CachedTemplates) -> Self {
        Self::Cached(cache)
    }
}

impl From<TemplateDir> for TemplateStore {
    fn from(dir: TemplateDir) -> Self {
        Self::Disk(dir)
    }
}

/// Reduce a template name to plain path components
///
/// Rejects anything that could leave the template directory: parent
/// references, absolute paths and drive prefixes.
pub fn sanitize_template_name(name: &str) -> Option<PathBuf> {
    let mut clean = PathBuf::new();
    for component in Path::new(name).components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    (!clean.as_os_str().is_empty()).then_some(clean)
}

/// Reads templates from disk on every lookup
#[derive(Debug, Clone)]
pub struct TemplateDir {
    root: PathBuf,
}

impl TemplateDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn exists(&self) -> bool {
        self.root.is_dir()
    }

    async fn resolve(&self, name: &str) -> Option<PathBuf> {
        let relative = sanitize_template_name(name)?;

        // Security: the resolved file must stay within the template directory
        let root = fs::canonicalize(&self.root).await.ok()?;
        let path = fs::canonicalize(root.join(relative)).await.ok()?;
        if path.starts_with(&root) {
            Some(path)
        } else {
            logger::warn(
                "Template path escapes template directory",
                &[("template", name)],
            );
            None
        }
    }

    pub async fn load(&self, name: &str) -> Option<Bytes> {
        let path = self.resolve(name).await?;
        match fs::read(&path).await {
            Ok(data) => Some(Bytes::from(data)),
            Err(e) => {
                logger::debug(
                    "Template read failed",
                    &[("template", name), ("error", &e.to_string())],
                );
                None
            }
        }
    }
}

/// Templates held in memory, filled once at startup
#[derive(Debug, Clone, Default)]
pub struct CachedTemplates {
    entries: HashMap<String, Bytes>,
}

impl CachedTemplates {
    /// Load every named template from `dir`, skipping absent ones
    pub async fn preload<'a>(dir: &TemplateDir, names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut entries = HashMap::new();
        for name in names {
            if let Some(data) = dir.load(name).await {
                entries.insert(name.to_string(), data);
            }
        }
        Self { entries }
    }

    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Bytes>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<Bytes> {
        let key = sanitize_template_name(name)?;
        self.entries.get(key.to_str()?).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_template_name() {
        assert_eq!(
            sanitize_template_name("html.html"),
            Some(PathBuf::from("html.html"))
        );
        assert_eq!(
            sanitize_template_name("./csv.csv"),
            Some(PathBuf::from("csv.csv"))
        );
        assert_eq!(sanitize_template_name("../secret"), None);
        assert_eq!(sanitize_template_name("a/../../etc/passwd"), None);
        assert_eq!(sanitize_template_name("/etc/passwd"), None);
        assert_eq!(sanitize_template_name(""), None);
    }

    #[tokio::test]
    async fn test_template_dir_reads_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("csv.csv"), "token\n{{token}}\n").unwrap();

        let templates = TemplateDir::new(dir.path());
        assert!(templates.exists());
        assert_eq!(
            templates.load("csv.csv").await.as_deref(),
            Some(&b"token\n{{token}}\n"[..])
        );
        assert!(templates.load("html.html").await.is_none());
    }

    #[tokio::test]
    async fn test_disk_store_sees_changes_without_restart() {
        let dir = tempfile::tempdir().unwrap();
        let store = TemplateStore::from(TemplateDir::new(dir.path()));
        assert!(store.load("html.html").await.is_none());

        std::fs::write(dir.path().join("html.html"), "<p>{{token}}</p>").unwrap();
        assert_eq!(
            store.load("html.html").await.as_deref(),
            Some(&b"<p>{{token}}</p>"[..])
        );
    }

    #[tokio::test]
    async fn test_template_dir_blocks_traversal() {
        let outer = tempfile::tempdir().unwrap();
        let inner = outer.path().join("templates");
        std::fs::create_dir(&inner).unwrap();
        std::fs::write(outer.path().join("secret.txt"), "do not serve").unwrap();

        let templates = TemplateDir::new(&inner);
        assert!(templates.load("../secret.txt").await.is_none());
    }

    #[tokio::test]
    async fn test_missing_directory_is_absent() {
        let templates = TemplateDir::new("/nonexistent/sheriff/templates");
        assert!(!templates.exists());
        assert!(templates.load("html.html").await.is_none());
    }

    #[tokio::test]
    async fn test_preload_skips_missing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("html.html"), "<p>{{token}}</p>").unwrap();

        let cache =
            CachedTemplates::preload(&TemplateDir::new(dir.path()), ["html.html", "csv.csv"]).await;
        assert_eq!(cache.len(), 1);
        assert!(cache.get("html.html").is_some());
        assert!(cache.get("./html.html").is_some());
        assert!(cache.get("csv.csv").is_none());

        // The cache is a snapshot: later disk changes are not picked up
        std::fs::write(dir.path().join("csv.csv"), "late").unwrap();
        let store = TemplateStore::from(cache);
        assert!(store.load("csv.csv").await.is_none());
    }
}
