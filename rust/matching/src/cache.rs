// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Descriptor cache over the proposal catalog.

use crate::catalog::{read_mesh_document, Catalog, CatalogEntry, CatalogKey, DocumentError};
use rayon::prelude::*;
use reno_lite_geometry::GeometryDescriptor;
use rustc_hash::FxHashMap;
use serde::Serialize;
use thiserror::Error;

/// Why a catalog entry was left out of the descriptor cache.
///
/// Partial catalogs are expected; each reason is logged and counted, and
/// construction itself never fails.
#[derive(Error, Debug)]
pub enum SkipReason {
    #[error("entry has no mesh document")]
    MissingMeshDocument,

    #[error("mesh document {0}")]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Geometry(#[from] reno_lite_geometry::Error),
}

/// Counters from one cache build.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct CacheStats {
    /// Entries in the source catalog.
    pub total_entries: usize,
    /// Entries with a usable descriptor.
    pub indexed: usize,
    /// Entries skipped (missing, unreadable or degenerate mesh document).
    pub skipped: usize,
}

/// CatalogKey -> GeometryDescriptor lookup for every entry with a usable
/// mesh document.
///
/// Built once at initialization and shared read-only across requests; it is
/// pure derived data with no mutation after construction. Rebuild when the
/// catalog source changes.
#[derive(Debug)]
pub struct AttributeCache {
    descriptors: FxHashMap<CatalogKey, GeometryDescriptor>,
    stats: CacheStats,
}

impl AttributeCache {
    /// Extract a descriptor for every usable catalog entry, in parallel.
    pub fn build(catalog: &Catalog) -> Self {
        let jobs: Vec<(CatalogKey, &CatalogEntry)> =
            catalog.iter().map(|(key, entry)| (*key, entry)).collect();

        let results: Vec<(CatalogKey, Result<GeometryDescriptor, SkipReason>)> = jobs
            .into_par_iter()
            .map(|(key, entry)| (key, index_entry(entry)))
            .collect();

        let mut descriptors = FxHashMap::default();
        let mut skipped = 0usize;
        for (key, result) in results {
            match result {
                Ok(descriptor) => {
                    descriptors.insert(key, descriptor);
                }
                Err(reason) => {
                    skipped += 1;
                    tracing::warn!(key = %key, reason = %reason, "Skipping catalog entry");
                }
            }
        }

        let stats = CacheStats {
            total_entries: catalog.len(),
            indexed: descriptors.len(),
            skipped,
        };
        tracing::info!(
            total_entries = stats.total_entries,
            indexed = stats.indexed,
            skipped = stats.skipped,
            "Catalog attribute cache built"
        );

        Self { descriptors, stats }
    }

    /// Wrap precomputed descriptors.
    pub fn from_descriptors(descriptors: FxHashMap<CatalogKey, GeometryDescriptor>) -> Self {
        let stats = CacheStats {
            total_entries: descriptors.len(),
            indexed: descriptors.len(),
            skipped: 0,
        };
        Self { descriptors, stats }
    }

    /// Counters from the build.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Number of indexed entries.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// True when no entry is usable for matching.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Descriptor for one entry, if indexed.
    pub fn get(&self, key: &CatalogKey) -> Option<&GeometryDescriptor> {
        self.descriptors.get(key)
    }

    /// Iterate over indexed entries. Order is unspecified.
    pub fn iter(&self) -> impl Iterator<Item = (&CatalogKey, &GeometryDescriptor)> {
        self.descriptors.iter()
    }
}

fn index_entry(entry: &CatalogEntry) -> Result<GeometryDescriptor, SkipReason> {
    let path = entry
        .mesh_document
        .as_ref()
        .ok_or(SkipReason::MissingMeshDocument)?;
    let mesh = read_mesh_document(path)?;
    Ok(GeometryDescriptor::from_mesh(&mesh)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn mesh_document(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    const GOOD_MESH: &str = r#"[{"particles": [
        {"x0":0,"y0":0,"z0":0,"x1":2,"y1":0,"z1":0,"x2":0,"y2":2,"z2":3,"area":2.0}
    ]}]"#;

    #[test]
    fn test_build_indexes_usable_and_skips_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        let mut catalog = Catalog::default();

        // Usable entry.
        catalog.insert(
            CatalogKey::compose(1, 1),
            CatalogEntry {
                cost_document: None,
                mesh_document: Some(mesh_document(dir.path(), "a.3D.json", GOOD_MESH)),
            },
        );
        // No mesh document at all.
        catalog.insert(CatalogKey::compose(1, 2), CatalogEntry::default());
        // Malformed JSON.
        catalog.insert(
            CatalogKey::compose(1, 3),
            CatalogEntry {
                cost_document: None,
                mesh_document: Some(mesh_document(dir.path(), "b.3D.json", "{ nope")),
            },
        );
        // Parses but has an empty particle list: no descriptor.
        catalog.insert(
            CatalogKey::compose(1, 4),
            CatalogEntry {
                cost_document: None,
                mesh_document: Some(mesh_document(
                    dir.path(),
                    "c.3D.json",
                    r#"[{"particles": []}]"#,
                )),
            },
        );

        let cache = AttributeCache::build(&catalog);
        assert_eq!(cache.len(), 1);
        assert!(cache.get(&CatalogKey::compose(1, 1)).is_some());

        let stats = cache.stats();
        assert_eq!(stats.total_entries, 4);
        assert_eq!(stats.indexed, 1);
        assert_eq!(stats.skipped, 3);
    }

    #[test]
    fn test_build_on_empty_catalog() {
        let cache = AttributeCache::build(&Catalog::default());
        assert!(cache.is_empty());
        assert_eq!(cache.stats().skipped, 0);
    }
}
