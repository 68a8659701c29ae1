//! The `Generator` facade and its construction options.

use crate::store::{VersionSet, VersionStore};
use chrono::Utc;
use reqwest::Client;
use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument::WithSubscriber;
use tracing::{debug, info, warn, Dispatch};
use uaforge_core::{
    CacheConfig, CrawlerType, ForgeConfig, Result, SourcesConfig, VersionOrigin,
};
use uaforge_headers::{
    browser_headers, chrome_user_agent, crawler_headers, random_user_agent, Headers,
};
use uaforge_sources::{approximate_version, build_http_client, Coordinator};

/// Where and for how long acquired versions are cached on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskCache {
    /// Cache file location
    pub path: PathBuf,
    /// Maximum age of a usable cache file
    pub ttl: Duration,
}

/// Options for [`Generator::new`]. Every setter is independent of the others.
#[derive(Clone, Default)]
pub struct GeneratorOptions {
    http_client: Option<Client>,
    dispatch: Option<Dispatch>,
    disk_cache: Option<DiskCache>,
    sources: SourcesConfig,
    timeout: Option<Duration>,
    coordinator: Option<Coordinator>,
}

impl GeneratorOptions {
    /// Defaults: built-in sources, no disk cache, ambient tracing subscriber.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options matching a loaded configuration.
    #[must_use]
    pub fn from_config(config: &ForgeConfig) -> Self {
        let disk_cache = config.cache.enabled.then(|| DiskCache {
            path: config.cache.resolved_path(),
            ttl: config.cache.ttl(),
        });

        Self {
            disk_cache,
            sources: config.sources.clone(),
            ..Self::default()
        }
    }

    /// Use this client for the built-in sources instead of building one.
    #[must_use]
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Route construction and refresh diagnostics to this dispatcher.
    #[must_use]
    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = Some(dispatch);
        self
    }

    /// Enable the disk cache. `None` uses the default file in the temp dir.
    #[must_use]
    pub fn with_disk_cache(mut self, path: Option<PathBuf>, ttl: Duration) -> Self {
        let path = path.unwrap_or_else(|| CacheConfig::default().resolved_path());
        self.disk_cache = Some(DiskCache { path, ttl });
        self
    }

    /// Override the shared acquisition deadline.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Race these sources instead of the built-in ones.
    #[must_use]
    pub fn with_sources(mut self, coordinator: Coordinator) -> Self {
        self.coordinator = Some(coordinator);
        self
    }

    fn build_coordinator(&mut self) -> Coordinator {
        let coordinator = match self.coordinator.take() {
            Some(coordinator) => coordinator,
            None => {
                let client = match self.http_client.take() {
                    Some(client) => Ok(client),
                    None => build_http_client(self.timeout.unwrap_or_else(|| self.sources.timeout())),
                };
                self.builtin_coordinator(client)
            }
        };

        match self.timeout {
            Some(timeout) => coordinator.with_deadline(timeout),
            None => coordinator,
        }
    }

    /// The built-in sources, or none at all when there is no client to run
    /// them with. An empty coordinator always approximates.
    fn builtin_coordinator(&self, client: uaforge_sources::Result<Client>) -> Coordinator {
        match client {
            Ok(client) => Coordinator::from_config(&self.sources, &client),
            Err(e) => {
                warn!(error = %e, "failed to create HTTP client, network sources disabled");
                Coordinator::new(self.sources.timeout())
            }
        }
    }
}

impl fmt::Debug for GeneratorOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorOptions")
            .field("custom_client", &self.http_client.is_some())
            .field("custom_dispatch", &self.dispatch.is_some())
            .field("disk_cache", &self.disk_cache)
            .field("sources", &self.sources)
            .field("timeout", &self.timeout)
            .field("custom_sources", &self.coordinator.is_some())
            .finish()
    }
}

/// Produces current browser User-Agents and matching request headers.
///
/// Construction resolves a version set once: from a fresh disk cache if one
/// is enabled, else by racing the remote sources, else by approximation.
/// After that every accessor is synchronous and infallible.
pub struct Generator {
    store: VersionStore,
    coordinator: Coordinator,
    disk_cache: Option<DiskCache>,
    dispatch: Option<Dispatch>,
}

impl Generator {
    /// Build a generator and resolve its initial version set.
    ///
    /// Never fails: a missing HTTP client or failing sources fall through to
    /// the approximation.
    pub async fn new(mut options: GeneratorOptions) -> Self {
        let coordinator = match options.dispatch.clone() {
            Some(dispatch) => {
                tracing::dispatcher::with_default(&dispatch, || options.build_coordinator())
            }
            None => options.build_coordinator(),
        };
        let generator = Self {
            store: VersionStore::new(),
            coordinator,
            disk_cache: options.disk_cache,
            dispatch: options.dispatch,
        };

        generator.scoped(generator.initialize()).await;
        generator
    }

    /// Build a generator from the user configuration file and environment.
    ///
    /// # Errors
    /// Returns error if the configuration file is unreadable or invalid.
    pub async fn from_env() -> Result<Self> {
        let config = ForgeConfig::load_with_env()?;
        Ok(Self::new(GeneratorOptions::from_config(&config)).await)
    }

    async fn initialize(&self) {
        if let Some(cache) = &self.disk_cache {
            if self.store.load_from_disk(&cache.path, cache.ttl) {
                info!(
                    path = %cache.path.display(),
                    count = self.store.snapshot().versions().len(),
                    "loaded browser versions from disk cache"
                );
                return;
            }
        }
        self.acquire().await;
    }

    async fn acquire(&self) -> VersionOrigin {
        let acquisition = self.coordinator.acquire().await;
        let origin = match acquisition.source() {
            Some(source) => VersionOrigin::Network {
                source: source.to_string(),
            },
            None => VersionOrigin::Approximation,
        };

        let versions = acquisition.into_versions();
        self.store.install(VersionSet::new(versions, origin.clone()));

        if let Some(cache) = &self.disk_cache {
            self.store.save_to_disk(&cache.path);
        }
        origin
    }

    /// Resolve a fresh version set from the sources, skipping the disk cache.
    ///
    /// The new set replaces the old one atomically and is written back to
    /// the cache when caching is enabled.
    pub async fn refresh(&self) -> VersionOrigin {
        self.scoped(async {
            let origin = self.acquire().await;
            debug!(origin = %origin, "refreshed browser versions");
            origin
        })
        .await
    }

    async fn scoped<F: Future>(&self, future: F) -> F::Output {
        match &self.dispatch {
            Some(dispatch) => future.with_subscriber(dispatch.clone()).await,
            None => future.await,
        }
    }

    /// A random Chrome or Edge User-Agent built from a known version.
    #[must_use]
    pub fn user_agent(&self) -> String {
        let snapshot = self.store.snapshot();
        random_user_agent(&mut rand::thread_rng(), snapshot.versions())
            .unwrap_or_else(|| chrome_user_agent(&approximate_version(Utc::now())))
    }

    /// A full browser header set around a fresh random User-Agent.
    ///
    /// `target_url` drives `referer` and `origin`; see
    /// [`uaforge_headers::browser_headers`].
    #[must_use]
    pub fn headers(&self, target_url: Option<&str>) -> Headers {
        browser_headers(&self.user_agent(), target_url)
    }

    /// Headers announcing a search-engine crawler, using the newest version.
    #[must_use]
    pub fn crawler_headers(&self, crawler: CrawlerType) -> Headers {
        let snapshot = self.store.snapshot();
        match snapshot.latest() {
            Some(version) => crawler_headers(crawler, version),
            None => crawler_headers(crawler, &approximate_version(Utc::now())),
        }
    }

    /// Same as [`crawler_headers`](Self::crawler_headers) for a numeric
    /// crawler code (0 Google, 1 Bing, 2 Yandex).
    ///
    /// # Errors
    /// Returns [`uaforge_core::ForgeError::UnknownCrawler`] for any other code.
    pub fn crawler_headers_for(&self, code: i64) -> Result<Headers> {
        let crawler = CrawlerType::try_from(code)?;
        Ok(self.crawler_headers(crawler))
    }

    /// Copy of the known versions, most recent first.
    #[must_use]
    pub fn versions(&self) -> Vec<String> {
        self.store.snapshot().versions().to_vec()
    }

    /// Which tier produced the current versions.
    #[must_use]
    pub fn origin(&self) -> Option<VersionOrigin> {
        self.store.snapshot().origin().cloned()
    }

    /// The current version snapshot, shared without copying.
    #[must_use]
    pub fn snapshot(&self) -> Arc<VersionSet> {
        self.store.snapshot()
    }
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("versions", &self.store.snapshot())
            .field("disk_cache", &self.disk_cache)
            .field("deadline", &self.coordinator.deadline())
            .finish_non_exhaustive()
    }
}
