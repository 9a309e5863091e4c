//! Versioned local cache of the full entry collection.
//!
//! One JSON file holds the whole collection and is rewritten wholesale on
//! every offline-mode mutation. A legacy v1 file (records without
//! `exerciseLabel`) is read once when the v2 file is absent and migrated
//! forward; that read path is kept permanently for backward compatibility.

use chrono::Local;
use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::codec::{self, LegacyEntry};
use crate::models::Entry;

const CACHE_FILE_V2: &str = "strength-log-v2.json";
const CACHE_FILE_V1: &str = "strength-log-v1.json";

#[derive(Debug)]
pub enum CacheError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, serde_json::Error),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::Io(path, e) => {
                write!(f, "Failed to access cache file '{}': {}", path.display(), e)
            }
            CacheError::Parse(path, e) => {
                write!(f, "Failed to parse cache file '{}': {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for CacheError {}

/// File-backed cache rooted at a data directory.
#[derive(Debug, Clone)]
pub struct LocalCache {
    data_dir: PathBuf,
}

impl LocalCache {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    fn path_v2(&self) -> PathBuf {
        self.data_dir.join(CACHE_FILE_V2)
    }

    fn path_v1(&self) -> PathBuf {
        self.data_dir.join(CACHE_FILE_V1)
    }

    /// Loads the cached collection.
    ///
    /// Prefers the current-version file; falls back to migrating the legacy
    /// one. Returns `None` when neither exists.
    pub fn load(&self) -> Result<Option<Vec<Entry>>, CacheError> {
        let v2 = self.path_v2();
        if v2.exists() {
            let raw = fs::read_to_string(&v2).map_err(|e| CacheError::Io(v2.clone(), e))?;
            let entries: Vec<Entry> =
                serde_json::from_str(&raw).map_err(|e| CacheError::Parse(v2, e))?;
            return Ok(Some(entries));
        }

        let v1 = self.path_v1();
        if v1.exists() {
            let raw = fs::read_to_string(&v1).map_err(|e| CacheError::Io(v1.clone(), e))?;
            let old: Vec<LegacyEntry> =
                serde_json::from_str(&raw).map_err(|e| CacheError::Parse(v1, e))?;
            let today = Local::now().date_naive();
            let migrated = old
                .into_iter()
                .map(|record| codec::migrate_legacy(record, today))
                .collect::<Vec<_>>();
            tracing::info!("Migrated {} legacy cache record(s)", migrated.len());
            return Ok(Some(migrated));
        }

        Ok(None)
    }

    /// Serializes the full collection to the current-version file,
    /// overwriting whatever was there.
    pub fn save(&self, entries: &[Entry]) -> Result<(), CacheError> {
        let path = self.path_v2();
        fs::create_dir_all(&self.data_dir).map_err(|e| CacheError::Io(path.clone(), e))?;
        let raw = serde_json::to_string(entries)
            .map_err(|e| CacheError::Parse(path.clone(), e))?;
        fs::write(&path, raw).map_err(|e| CacheError::Io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Day, Entry};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn test_cache() -> (LocalCache, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let cache = LocalCache::new(temp_dir.path().to_path_buf());
        (cache, temp_dir)
    }

    fn sample_entry() -> Entry {
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        Entry::new(date, "1", Day::A, "HT").with_weight("60")
    }

    #[test]
    fn test_load_without_files() {
        let (cache, _dir) = test_cache();
        assert!(cache.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let (cache, _dir) = test_cache();
        let entries = vec![sample_entry()];
        cache.save(&entries).unwrap();

        let loaded = cache.load().unwrap().unwrap();
        assert_eq!(loaded, entries);
    }

    #[test]
    fn test_save_creates_data_dir() {
        let temp_dir = TempDir::new().unwrap();
        let cache = LocalCache::new(temp_dir.path().join("nested").join("dir"));
        cache.save(&[sample_entry()]).unwrap();
        assert!(cache.load().unwrap().is_some());
    }

    #[test]
    fn test_legacy_file_is_migrated() {
        let (cache, dir) = test_cache();
        let v1 = r#"[{
            "id": "old-1",
            "date": "2024-10-01",
            "week": 2,
            "day": "B",
            "exercise": "Hip Thrust",
            "weight": "50",
            "sets": ["10", "10"]
        }]"#;
        std::fs::write(dir.path().join(CACHE_FILE_V1), v1).unwrap();

        let loaded = cache.load().unwrap().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, "old-1");
        assert_eq!(loaded[0].exercise, "HT");
        assert_eq!(loaded[0].exercise_label, "Hip Thrust");
        assert_eq!(loaded[0].week, "2");
    }

    #[test]
    fn test_v2_wins_over_v1() {
        let (cache, dir) = test_cache();
        std::fs::write(dir.path().join(CACHE_FILE_V1), "[]").unwrap();
        cache.save(&[sample_entry()]).unwrap();

        let loaded = cache.load().unwrap().unwrap();
        assert_eq!(loaded.len(), 1);
    }

    #[test]
    fn test_corrupt_cache_is_an_error() {
        let (cache, dir) = test_cache();
        std::fs::write(dir.path().join(CACHE_FILE_V2), "not json").unwrap();
        assert!(matches!(cache.load(), Err(CacheError::Parse(_, _))));
    }
}
