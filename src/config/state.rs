// Application state module
// Immutable per-process state shared by every request handler

use super::types::Config;
use crate::dispatch::{CachedTemplates, Dispatcher, ResponseFormat, TemplateDir, TemplateStore};
use crate::error::ConfigError;
use crate::logger;
use crate::notify::{AlertWorker, NotificationPolicy, Notifier, SlackWebhook};

/// Application state
///
/// Built once at startup and shared through `Arc`; nothing in it changes
/// while requests are served.
pub struct AppState {
    pub config: Config,
    pub dispatcher: Dispatcher,
    pub policy: NotificationPolicy,
    /// `None` when no webhook is configured
    pub notifier: Option<Notifier>,
}

impl AppState {
    pub fn new(config: Config, dispatcher: Dispatcher, notifier: Option<Notifier>) -> Self {
        let policy = NotificationPolicy {
            healthcheck_path: config.healthcheck_path().map(ToString::to_string),
            webhook_configured: notifier.is_some(),
        };
        Self {
            config,
            dispatcher,
            policy,
            notifier,
        }
    }

    /// Build the state from configuration
    ///
    /// Must run inside a tokio runtime: the alert worker is spawned here.
    /// Returns the worker handle when alerts are enabled.
    pub async fn from_config(config: Config) -> Result<(Self, Option<AlertWorker>), ConfigError> {
        let token = config.token()?;
        let dispatcher = Dispatcher::new(token, load_templates(&config).await);

        let (notifier, worker) = match config.webhook() {
            Some(url) => {
                let channel = SlackWebhook::new(url, config.notify_timeout())?;
                let (notifier, worker) = Notifier::spawn(channel, config.notify_queue_size);
                (Some(notifier), Some(worker))
            }
            None => {
                logger::warn("No webhook_url configured, alerts disabled", &[]);
                (None, None)
            }
        };

        Ok((Self::new(config, dispatcher, notifier), worker))
    }
}

async fn load_templates(config: &Config) -> TemplateStore {
    let dir = TemplateDir::new(&config.templates_dir);
    if !dir.exists() {
        logger::warn(
            "Template directory not found, template formats will be empty",
            &[("templates_dir", &config.templates_dir)],
        );
    }

    if config.cache_templates {
        let cache = CachedTemplates::preload(&dir, ResponseFormat::all_template_names()).await;
        let loaded = cache.len().to_string();
        logger::info("Templates cached", &[("count", &loaded)]);
        TemplateStore::Cached(cache)
    } else {
        TemplateStore::Disk(dir)
    }
}
