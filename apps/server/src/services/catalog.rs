// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Process-wide catalog snapshot with an explicit init/reload lifecycle.

use crate::config::Config;
use crate::services::discovery::{self, DiscoveryError};
use reno_lite_matching::{AttributeCache, CacheStats, Catalog};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Catalog lifecycle errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog discovery failed: {0}")]
    Discovery(#[from] DiscoveryError),
}

/// One immutable view of the catalog: the document mapping plus its
/// descriptor cache. Pure derived data; safe to share across requests.
#[derive(Debug)]
pub struct CatalogSnapshot {
    pub catalog: Catalog,
    pub cache: AttributeCache,
}

/// Holder of the current snapshot.
///
/// Built once at startup and swapped atomically on reload; request handlers
/// clone the `Arc` and keep the snapshot they started with for their whole
/// run, so a reload mid-request is never observable.
pub struct CatalogStore {
    archive: PathBuf,
    extract_to: PathBuf,
    inner: RwLock<Arc<CatalogSnapshot>>,
}

impl CatalogStore {
    /// Discover the catalog and build the initial snapshot.
    pub fn load(config: &Config) -> Result<Self, CatalogError> {
        let archive = PathBuf::from(&config.catalog_archive);
        let extract_to = PathBuf::from(&config.catalog_dir);
        let snapshot = build_snapshot(&archive, &extract_to)?;
        Ok(Self {
            archive,
            extract_to,
            inner: RwLock::new(Arc::new(snapshot)),
        })
    }

    /// The current snapshot. Cheap: one `Arc` clone.
    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        self.inner.read().expect("catalog lock poisoned").clone()
    }

    /// Re-discover the catalog source and swap the snapshot in one step.
    pub fn reload(&self) -> Result<CacheStats, CatalogError> {
        let snapshot = build_snapshot(&self.archive, &self.extract_to)?;
        let stats = snapshot.cache.stats();
        *self.inner.write().expect("catalog lock poisoned") = Arc::new(snapshot);
        tracing::info!(
            indexed = stats.indexed,
            skipped = stats.skipped,
            "Catalog snapshot reloaded"
        );
        Ok(stats)
    }
}

fn build_snapshot(archive: &PathBuf, extract_to: &PathBuf) -> Result<CatalogSnapshot, CatalogError> {
    let catalog = discovery::load_catalog(archive, extract_to)?;
    let cache = AttributeCache::build(&catalog);
    Ok(CatalogSnapshot { catalog, cache })
}
