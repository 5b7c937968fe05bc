// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Nearest-neighbour search over the descriptor cache.

use crate::cache::AttributeCache;
use crate::catalog::CatalogKey;
use crate::error::{Error, Result};
use reno_lite_geometry::GeometryDescriptor;

/// The winning catalog entry and its distance to the query descriptor.
#[derive(Debug, Clone, Copy)]
pub struct MatchResult {
    pub key: CatalogKey,
    pub distance: f64,
}

/// Find the catalog entry whose descriptor is nearest to `descriptor`.
///
/// Plain unweighted Euclidean distance over the six descriptor fields; the
/// first candidate strictly below the running minimum wins. Two bit-identical
/// distances resolve by map iteration order, which is unspecified; exact
/// ties between real catalog buildings do not occur in practice.
pub fn find_nearest(
    cache: &AttributeCache,
    descriptor: &GeometryDescriptor,
) -> Result<MatchResult> {
    let mut best: Option<MatchResult> = None;

    for (key, candidate) in cache.iter() {
        let distance = descriptor.distance(candidate);
        tracing::trace!(key = %key, distance, "Candidate distance");
        if best.map_or(true, |b| distance < b.distance) {
            best = Some(MatchResult {
                key: *key,
                distance,
            });
        }
    }

    best.ok_or(Error::NoCatalogMatch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap;

    fn descriptor(
        area: f64,
        particle_count: f64,
        length: f64,
        width: f64,
        height: f64,
        volume: f64,
    ) -> GeometryDescriptor {
        GeometryDescriptor {
            area,
            particle_count,
            length,
            width,
            height,
            volume,
        }
    }

    #[test]
    fn test_single_entry_always_wins() {
        let key = CatalogKey::from_raw(1001);
        let mut map = FxHashMap::default();
        map.insert(key, descriptor(100.0, 10.0, 5.0, 5.0, 3.0, 300.0));
        let cache = AttributeCache::from_descriptors(map);

        // Arbitrarily distant query still matches the only entry.
        let query = descriptor(0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        assert_eq!(find_nearest(&cache, &query).unwrap().key, key);
    }

    #[test]
    fn test_nearest_of_two() {
        let near = CatalogKey::from_raw(1001);
        let far = CatalogKey::from_raw(1002);
        let mut map = FxHashMap::default();
        map.insert(near, descriptor(100.0, 10.0, 5.0, 5.0, 3.0, 300.0));
        map.insert(far, descriptor(50.0, 5.0, 2.0, 2.0, 2.0, 100.0));
        let cache = AttributeCache::from_descriptors(map);

        let query = descriptor(95.0, 9.0, 4.8, 4.9, 2.9, 275.0);
        let result = find_nearest(&cache, &query).unwrap();
        assert_eq!(result.key, near);
        assert!(result.distance < 30.0);
    }

    #[test]
    fn test_empty_cache_is_no_match() {
        let cache = AttributeCache::from_descriptors(FxHashMap::default());
        let query = descriptor(1.0, 1.0, 1.0, 1.0, 1.0, 1.0);
        assert!(matches!(
            find_nearest(&cache, &query),
            Err(Error::NoCatalogMatch)
        ));
    }
}
