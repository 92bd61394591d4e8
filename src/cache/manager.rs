//! Cache manager for persisting the last forecast document to disk
//!
//! Provides a `CacheManager` that keeps the most recent raw forecast under a
//! fixed key so it can be shown before the network answers.

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::data::RawForecast;

/// Cache key of the last forecast document
const FORECAST_CACHE_KEY: &str = "WeatherModel";

/// Wrapper struct for the cached document stored on disk
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    /// Forecast document exactly as received
    body: String,
    /// When the document was cached
    cached_at: DateTime<Utc>,
}

/// Manages reading and writing the cached forecast
///
/// The document is stored as a JSON file in an XDG-compliant cache directory
/// (`~/.cache/weathernow/` on Linux). Every save replaces the previous entry;
/// entries never expire.
#[derive(Debug, Clone)]
pub struct CacheManager {
    /// Directory where cache files are stored
    cache_dir: PathBuf,
}

impl CacheManager {
    /// Creates a new CacheManager using XDG-compliant cache directory
    ///
    /// Returns `None` if the cache directory cannot be determined (e.g., no home directory).
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "weathernow")?;
        let cache_dir = project_dirs.cache_dir().to_path_buf();
        Some(Self { cache_dir })
    }

    /// Creates a new CacheManager with a custom cache directory
    pub fn with_dir(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// Returns the path to a cache file for the given key
    fn cache_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", key))
    }

    /// Ensures the cache directory exists
    fn ensure_dir(&self) -> io::Result<()> {
        fs::create_dir_all(&self.cache_dir)
    }

    /// Stores a forecast document, replacing the previous one
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err` if directory creation or file writing fails
    pub fn save(&self, raw: &RawForecast) -> io::Result<()> {
        self.ensure_dir()?;

        let entry = CacheEntry {
            body: raw.body().to_string(),
            cached_at: Utc::now(),
        };

        let json = serde_json::to_string_pretty(&entry)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        fs::write(self.cache_path(FORECAST_CACHE_KEY), json)
    }

    /// Reads the last stored forecast document
    ///
    /// Returns `None` if nothing was stored yet. An unreadable or corrupt
    /// entry is logged and also reported as `None`.
    pub fn load_last(&self) -> Option<RawForecast> {
        let path = self.cache_path(FORECAST_CACHE_KEY);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read cached forecast");
                return None;
            }
        };

        let entry: CacheEntry = match serde_json::from_str(&content) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring corrupt cache entry");
                return None;
            }
        };

        match RawForecast::parse(entry.body) {
            Ok(raw) => {
                debug!(cached_at = %entry.cached_at, "loaded cached forecast");
                Some(raw)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring cached forecast");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_cache() -> (CacheManager, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let cache = CacheManager::with_dir(temp_dir.path().to_path_buf());
        (cache, temp_dir)
    }

    fn raw(body: &str) -> RawForecast {
        RawForecast::parse(body).expect("test body is JSON")
    }

    #[test]
    fn test_save_creates_file_in_cache_directory() {
        let (cache, temp_dir) = create_test_cache();

        cache
            .save(&raw(r#"{"location":{"name":"Moscow"}}"#))
            .expect("Save should succeed");

        let expected_path = temp_dir.path().join("WeatherModel.json");
        assert!(expected_path.exists(), "Cache file should exist");

        let content = fs::read_to_string(&expected_path).expect("Should read file");
        assert!(content.contains("\"body\""));
        assert!(content.contains("\"cached_at\""));
        assert!(content.contains("Moscow"));
    }

    #[test]
    fn test_load_last_returns_none_when_empty() {
        let (cache, _temp_dir) = create_test_cache();
        assert!(cache.load_last().is_none());
    }

    #[test]
    fn test_load_last_returns_saved_body_verbatim() {
        let (cache, _temp_dir) = create_test_cache();
        let original = raw("{ \"location\" :  { \"name\": \"Москва\" } }");

        cache.save(&original).expect("Save should succeed");

        let loaded = cache.load_last().expect("Should load cached forecast");
        assert_eq!(loaded, original);
        assert_eq!(loaded.body(), original.body());
    }

    #[test]
    fn test_last_write_wins() {
        let (cache, _temp_dir) = create_test_cache();

        cache.save(&raw(r#"{"n":1}"#)).expect("First save should succeed");
        cache.save(&raw(r#"{"n":2}"#)).expect("Second save should succeed");

        let loaded = cache.load_last().expect("Should load cached forecast");
        assert_eq!(loaded.body(), r#"{"n":2}"#);
    }

    #[test]
    fn test_corrupt_entry_is_treated_as_absent() {
        let (cache, temp_dir) = create_test_cache();
        fs::write(temp_dir.path().join("WeatherModel.json"), "not json at all")
            .expect("Should write corrupt file");

        assert!(cache.load_last().is_none());
    }

    #[test]
    fn test_entry_with_invalid_body_is_treated_as_absent() {
        let (cache, temp_dir) = create_test_cache();
        let entry = r#"{"body":"{ broken","cached_at":"2024-07-05T11:00:00Z"}"#;
        fs::write(temp_dir.path().join("WeatherModel.json"), entry)
            .expect("Should write cache file");

        assert!(cache.load_last().is_none());
    }

    #[test]
    fn test_save_creates_directory_if_missing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let nested_path = temp_dir.path().join("nested").join("cache").join("dir");
        let cache = CacheManager::with_dir(nested_path.clone());

        cache.save(&raw("{}")).expect("Save should succeed");

        assert!(nested_path.exists(), "Nested directory should be created");
        assert!(nested_path.join("WeatherModel.json").exists());
    }

    #[test]
    fn test_cached_at_timestamp_is_recorded() {
        let (cache, temp_dir) = create_test_cache();

        let before = Utc::now();
        cache.save(&raw("{}")).expect("Save should succeed");
        let after = Utc::now();

        let content = fs::read_to_string(temp_dir.path().join("WeatherModel.json")).unwrap();
        let entry: CacheEntry = serde_json::from_str(&content).unwrap();
        assert!(entry.cached_at >= before);
        assert!(entry.cached_at <= after);
    }

    #[test]
    fn test_new_creates_xdg_compliant_path() {
        if let Some(cache) = CacheManager::new() {
            let path_str = cache.cache_dir.to_string_lossy();
            assert!(
                path_str.contains("weathernow"),
                "Cache path should contain project name"
            );
        }
        // Test passes if new() returns None (e.g., no home directory in CI)
    }
}
