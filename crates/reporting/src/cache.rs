//! Shared, read-only base datasets keyed by file path. A dataset is read
//! from disk once and then handed out as `Arc<Dataset>` to every caller.

use crate::dataset::Dataset;
use adcost_core::AdCostResult;
use dashmap::DashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

pub struct DatasetCache {
    datasets: DashMap<PathBuf, Arc<Dataset>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self {
            datasets: DashMap::new(),
        }
    }

    pub fn get_or_load(&self, path: impl AsRef<Path>) -> AdCostResult<Arc<Dataset>> {
        let path = path.as_ref();
        if let Some(cached) = self.datasets.get(path) {
            debug!(path = %path.display(), "Dataset cache hit");
            return Ok(cached.clone());
        }

        let dataset = Arc::new(Dataset::load(path)?);
        let entry = self
            .datasets
            .entry(path.to_path_buf())
            .or_insert(dataset);
        Ok(entry.clone())
    }

    pub fn insert(&self, path: impl Into<PathBuf>, dataset: Dataset) -> Arc<Dataset> {
        let dataset = Arc::new(dataset);
        self.datasets.insert(path.into(), dataset.clone());
        dataset
    }

    /// Drop a cached dataset so the next request rereads the file.
    pub fn invalidate(&self, path: impl AsRef<Path>) -> bool {
        self.datasets.remove(path.as_ref()).is_some()
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

impl Default for DatasetCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::tests::record;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("adcost-cache-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_loads_once_and_shares() {
        let path = temp_path("shared.csv");
        Dataset::new(vec![record((2023, 1, 2), "НТВ", "День (09:00-18:00)", 90_000)])
            .save(&path)
            .unwrap();

        let cache = DatasetCache::new();
        let first = cache.get_or_load(&path).unwrap();
        let second = cache.get_or_load(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);

        // Later writes are not seen until invalidated.
        Dataset::default().save(&path).unwrap();
        assert_eq!(cache.get_or_load(&path).unwrap().len(), 1);
        assert!(cache.invalidate(&path));
        assert!(cache.get_or_load(&path).unwrap().is_empty());

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_file_not_cached() {
        let cache = DatasetCache::new();
        assert!(cache.get_or_load(temp_path("missing.csv")).is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_insert() {
        let cache = DatasetCache::new();
        let ds = cache.insert("memory", Dataset::default());
        assert!(Arc::ptr_eq(&ds, &cache.get_or_load("memory").unwrap()));
    }
}
