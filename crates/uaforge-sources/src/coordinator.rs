//! Acquisition coordinator: race every source, first success wins.
//!
//! Each source runs on its own task under one shared cancellation token and
//! one shared deadline. The first successful result goes into a one-slot
//! channel; later successes are dropped without blocking. When every sender
//! is gone without a result, or the deadline passes, the date approximation
//! is used instead. `acquire` never returns an error.

use crate::approximate::approximate_versions;
use crate::chrome::ChromeReleasesSource;
use crate::edge::EdgeRepoSource;
use crate::source::VersionSource;
use chrono::Utc;
use reqwest::Client;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::instrument::WithSubscriber;
use tracing::{debug, error, info, warn};
use uaforge_core::SourcesConfig;

/// Why acquisition fell back to the approximation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// Every source finished without a usable result
    AllSourcesFailed,
    /// The shared deadline elapsed first
    DeadlineElapsed,
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::AllSourcesFailed => write!(f, "all sources failed"),
            FallbackReason::DeadlineElapsed => write!(f, "deadline elapsed"),
        }
    }
}

/// Outcome of one acquisition. Both variants carry a non-empty version list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Acquisition {
    /// A remote source answered first
    Fetched {
        /// Winning source name
        source: String,
        /// Versions, most recent first
        versions: Vec<String>,
    },
    /// No source answered in time
    Approximated {
        /// What went wrong upstream
        reason: FallbackReason,
        /// Approximated versions, most recent first
        versions: Vec<String>,
    },
}

impl Acquisition {
    /// Versions carried by this outcome.
    #[must_use]
    pub fn versions(&self) -> &[String] {
        match self {
            Acquisition::Fetched { versions, .. } | Acquisition::Approximated { versions, .. } => {
                versions
            }
        }
    }

    /// Consume the outcome, keeping only the versions.
    #[must_use]
    pub fn into_versions(self) -> Vec<String> {
        match self {
            Acquisition::Fetched { versions, .. } | Acquisition::Approximated { versions, .. } => {
                versions
            }
        }
    }

    /// Name of the winning source, if any.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        match self {
            Acquisition::Fetched { source, .. } => Some(source),
            Acquisition::Approximated { .. } => None,
        }
    }

    /// Whether the approximation tier was used.
    #[must_use]
    pub fn is_approximated(&self) -> bool {
        matches!(self, Acquisition::Approximated { .. })
    }
}

/// Races a set of version sources under one deadline.
#[derive(Clone)]
pub struct Coordinator {
    sources: Vec<Arc<dyn VersionSource>>,
    deadline: Duration,
}

impl Coordinator {
    /// Create a coordinator with no sources.
    #[must_use]
    pub fn new(deadline: Duration) -> Self {
        Self {
            sources: Vec::new(),
            deadline,
        }
    }

    /// Create a coordinator with the built-in Chrome and Edge sources.
    #[must_use]
    pub fn from_config(config: &SourcesConfig, client: &Client) -> Self {
        Self::new(config.timeout())
            .with_source(Arc::new(ChromeReleasesSource::with_url(
                client.clone(),
                config.chrome_releases_url.clone(),
                config.chrome_keep,
            )))
            .with_source(Arc::new(EdgeRepoSource::with_url(
                client.clone(),
                config.edge_repo_url.clone(),
                config.edge_keep,
            )))
    }

    /// Add a source to the race.
    #[must_use]
    pub fn with_source(mut self, source: Arc<dyn VersionSource>) -> Self {
        self.sources.push(source);
        self
    }

    /// Replace the shared deadline.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Registered sources.
    #[must_use]
    pub fn sources(&self) -> &[Arc<dyn VersionSource>] {
        &self.sources
    }

    /// Shared deadline for one acquisition.
    #[must_use]
    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Run all sources concurrently and return the first success, or the
    /// approximation if none succeeds before the deadline.
    pub async fn acquire(&self) -> Acquisition {
        let cancel = CancellationToken::new();
        let (tx, mut rx) = mpsc::channel::<(String, Vec<String>)>(1);

        for source in &self.sources {
            let task = race_source(Arc::clone(source), tx.clone(), cancel.clone());
            tokio::spawn(task.with_current_subscriber());
        }
        // Only the tasks hold senders now, so `recv` yields `None` once all of them fail.
        drop(tx);

        let outcome = tokio::time::timeout(self.deadline, rx.recv()).await;
        cancel.cancel();

        match outcome {
            Ok(Some((source, versions))) => {
                info!(source = %source, count = versions.len(), "fetched browser versions");
                Acquisition::Fetched { source, versions }
            }
            Ok(None) => {
                warn!("falling back to approximation: every version source failed");
                Acquisition::Approximated {
                    reason: FallbackReason::AllSourcesFailed,
                    versions: approximate_versions(Utc::now()),
                }
            }
            Err(_) => {
                error!(
                    deadline_ms = u64::try_from(self.deadline.as_millis()).unwrap_or(u64::MAX),
                    "falling back to approximation: version sources timed out"
                );
                Acquisition::Approximated {
                    reason: FallbackReason::DeadlineElapsed,
                    versions: approximate_versions(Utc::now()),
                }
            }
        }
    }
}

async fn race_source(
    source: Arc<dyn VersionSource>,
    tx: mpsc::Sender<(String, Vec<String>)>,
    cancel: CancellationToken,
) {
    let name = source.name().to_string();
    debug!(source = %name, "requesting browser versions");

    let result = tokio::select! {
        () = cancel.cancelled() => {
            debug!(source = %name, "request cancelled, another source answered first or the deadline passed");
            return;
        }
        result = source.fetch() => result,
    };

    match result {
        Ok(versions) if versions.is_empty() => {
            warn!(source = %name, "source returned an empty version list");
        }
        Ok(versions) => match tx.try_send((name.clone(), versions)) {
            Ok(()) => debug!(source = %name, "delivered browser versions"),
            Err(_) => debug!(source = %name, "discarding result, another source already answered"),
        },
        Err(e) => {
            warn!(source = %name, error = %e, "failed to fetch versions from source");
        }
    }
}
