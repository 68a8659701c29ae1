//! The live version set and its disk cache.
//!
//! The set is an immutable snapshot behind a `RwLock`. Writers build a new
//! snapshot off-lock and swap the `Arc`; readers clone the `Arc` and release
//! the lock immediately, so no reader ever sees a half-installed set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tracing::{debug, error, warn};
use uaforge_core::VersionOrigin;

/// An immutable snapshot of known versions, most recent first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionSet {
    versions: Vec<String>,
    origin: Option<VersionOrigin>,
}

impl VersionSet {
    /// Create a snapshot from versions and the tier that produced them.
    #[must_use]
    pub fn new(versions: Vec<String>, origin: VersionOrigin) -> Self {
        Self {
            versions,
            origin: Some(origin),
        }
    }

    /// All versions, most recent first.
    #[must_use]
    pub fn versions(&self) -> &[String] {
        &self.versions
    }

    /// The most recent version.
    #[must_use]
    pub fn latest(&self) -> Option<&str> {
        self.versions.first().map(String::as_str)
    }

    /// Which tier produced this snapshot. `None` before the first install.
    #[must_use]
    pub fn origin(&self) -> Option<&VersionOrigin> {
        self.origin.as_ref()
    }

    /// Whether the snapshot holds no versions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

/// On-disk representation of a version snapshot.
#[derive(Debug, Serialize, Deserialize)]
struct CacheRecord {
    timestamp: DateTime<Utc>,
    versions: Vec<String>,
}

/// Thread-safe holder of the current [`VersionSet`].
#[derive(Debug, Default)]
pub struct VersionStore {
    current: RwLock<Arc<VersionSet>>,
}

impl VersionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<VersionSet> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Atomically replace the current snapshot.
    pub fn install(&self, set: VersionSet) {
        let next = Arc::new(set);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = next;
    }

    /// Load a cached snapshot if it exists, parses, is younger than `ttl`
    /// and is non-empty. Returns whether the store was updated.
    pub fn load_from_disk(&self, path: &Path, ttl: Duration) -> bool {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no version cache on disk");
                return false;
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read version cache");
                return false;
            }
        };

        let record: CacheRecord = match serde_json::from_str(&data) {
            Ok(record) => record,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to parse version cache");
                return false;
            }
        };

        // A timestamp in the future counts as fresh.
        let age = (Utc::now() - record.timestamp).to_std().unwrap_or_default();
        if age > ttl {
            debug!(path = %path.display(), age_secs = age.as_secs(), "version cache is stale");
            return false;
        }

        if record.versions.is_empty() {
            warn!(path = %path.display(), "version cache is empty");
            return false;
        }

        self.install(VersionSet::new(record.versions, VersionOrigin::DiskCache));
        true
    }

    /// Persist the current snapshot with a fresh timestamp.
    ///
    /// The record is written to a temporary file in the destination directory
    /// and renamed over `path`, so the cache is never observed half-written.
    /// Failures are logged; the in-memory snapshot stays authoritative.
    pub fn save_to_disk(&self, path: &Path) {
        let snapshot = self.snapshot();
        if snapshot.is_empty() {
            warn!("skipping version cache save, no versions loaded");
            return;
        }

        let record = CacheRecord {
            timestamp: Utc::now(),
            versions: snapshot.versions().to_vec(),
        };

        match write_atomically(path, &record) {
            Ok(()) => debug!(path = %path.display(), "saved versions to disk cache"),
            Err(e) => error!(path = %path.display(), error = %e, "failed to save version cache"),
        }
    }
}

fn write_atomically(path: &Path, record: &CacheRecord) -> io::Result<()> {
    let data = serde_json::to_vec(record)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    // Dropped (and deleted) on every early return; `persist` consumes it on success.
    let mut temp = tempfile::Builder::new()
        .prefix("uaforge-cache-")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    temp.write_all(&data)?;
    temp.flush()?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn versions(list: &[&str]) -> Vec<String> {
        list.iter().map(|v| (*v).to_string()).collect()
    }

    fn network(list: &[&str]) -> VersionSet {
        VersionSet::new(
            versions(list),
            VersionOrigin::Network {
                source: "test".to_string(),
            },
        )
    }

    fn write_record(path: &Path, timestamp: DateTime<Utc>, list: &[&str]) {
        let record = CacheRecord {
            timestamp,
            versions: versions(list),
        };
        fs::write(path, serde_json::to_vec(&record).expect("serialize")).expect("write cache");
    }

    #[test]
    fn test_empty_store() {
        let store = VersionStore::new();
        let snapshot = store.snapshot();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.latest(), None);
        assert_eq!(snapshot.origin(), None);
    }

    #[test]
    fn test_install_swaps_snapshot() {
        let store = VersionStore::new();
        let before = store.snapshot();

        store.install(network(&["141.0.7390.108", "141.0.7390.77"]));

        assert!(before.is_empty(), "old snapshot must stay untouched");
        assert_eq!(store.snapshot().latest(), Some("141.0.7390.108"));
    }

    #[test]
    fn test_cache_round_trip() {
        let tmp = TempDir::new().expect("create temp dir");
        let path = tmp.path().join("versions.json");

        let store = VersionStore::new();
        store.install(network(&["141.0.7390.108", "140.0.7339.208", "139.0.7258.155"]));
        store.save_to_disk(&path);

        let loaded = VersionStore::new();
        assert!(loaded.load_from_disk(&path, Duration::from_secs(3600)));
        assert_eq!(
            loaded.snapshot().versions(),
            versions(&["141.0.7390.108", "140.0.7339.208", "139.0.7258.155"]).as_slice()
        );
        assert_eq!(loaded.snapshot().origin(), Some(&VersionOrigin::DiskCache));
    }

    #[test]
    fn test_save_leaves_no_temp_files() {
        let tmp = TempDir::new().expect("create temp dir");
        let path = tmp.path().join("versions.json");

        let store = VersionStore::new();
        store.install(network(&["141.0.7390.108"]));
        store.save_to_disk(&path);
        store.save_to_disk(&path);

        let names: Vec<_> = fs::read_dir(tmp.path())
            .expect("read dir")
            .map(|entry| entry.expect("dir entry").file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("versions.json")]);
    }

    #[test]
    fn test_stale_cache_rejected() {
        let tmp = TempDir::new().expect("create temp dir");
        let path = tmp.path().join("versions.json");
        write_record(
            &path,
            Utc::now() - chrono::Duration::hours(2),
            &["141.0.7390.108"],
        );

        let store = VersionStore::new();
        assert!(!store.load_from_disk(&path, Duration::from_secs(3600)));
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_empty_cache_rejected() {
        let tmp = TempDir::new().expect("create temp dir");
        let path = tmp.path().join("versions.json");
        write_record(&path, Utc::now(), &[]);

        let store = VersionStore::new();
        assert!(!store.load_from_disk(&path, Duration::from_secs(3600)));
    }

    #[test]
    fn test_malformed_and_missing_cache_rejected() {
        let tmp = TempDir::new().expect("create temp dir");
        let path = tmp.path().join("versions.json");
        let store = VersionStore::new();

        assert!(!store.load_from_disk(&path, Duration::from_secs(3600)));

        fs::write(&path, "{\"timestamp\": 12, \"versions\": ").expect("write garbage");
        assert!(!store.load_from_disk(&path, Duration::from_secs(3600)));
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_failed_load_keeps_current_snapshot() {
        let tmp = TempDir::new().expect("create temp dir");
        let store = VersionStore::new();
        store.install(network(&["141.0.7390.108"]));

        assert!(!store.load_from_disk(&tmp.path().join("absent.json"), Duration::from_secs(60)));
        assert_eq!(store.snapshot().latest(), Some("141.0.7390.108"));
    }

    #[test]
    fn test_save_to_missing_directory_is_harmless() {
        let tmp = TempDir::new().expect("create temp dir");
        let path = tmp.path().join("no-such-dir").join("versions.json");

        let store = VersionStore::new();
        store.install(network(&["141.0.7390.108"]));
        store.save_to_disk(&path);

        assert!(!path.exists());
        assert_eq!(store.snapshot().latest(), Some("141.0.7390.108"));
    }

    #[test]
    fn test_empty_store_is_not_saved() {
        let tmp = TempDir::new().expect("create temp dir");
        let path = tmp.path().join("versions.json");

        VersionStore::new().save_to_disk(&path);
        assert!(!path.exists());
    }
}
