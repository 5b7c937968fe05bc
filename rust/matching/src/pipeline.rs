// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end match-and-rescale pipeline.

use crate::cache::AttributeCache;
use crate::catalog::{read_cost_document, read_mesh_document, Catalog, CatalogKey};
use crate::error::{Error, Result};
use crate::matcher::find_nearest;
use crate::proposal::Proposal;
use crate::rescale::{rescale_proposal, scale_index};
use reno_lite_geometry::{normalize, rescale_volume_proxy, GeometryDescriptor, Mesh};

/// Outcome of one match-and-rescale run.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ProposalOutcome {
    pub proposal: Proposal,
    pub matched_key: CatalogKey,
    pub distance: f64,
    pub scale_index: f64,
}

/// Match a freshly fetched building mesh against the catalog and rescale the
/// winning proposal to its volume.
///
/// The raw mesh is normalized into the canonical frame first; catalog mesh
/// documents are already stored in that frame and are consumed as-is. Runs
/// synchronously start to finish: either a complete, internally consistent
/// proposal comes back or an error does.
pub fn make_proposal(
    catalog: &Catalog,
    cache: &AttributeCache,
    raw_mesh: &Mesh,
) -> Result<ProposalOutcome> {
    let normalized = normalize(raw_mesh);
    let descriptor = GeometryDescriptor::from_mesh(&normalized)?;
    tracing::debug!(
        area = descriptor.area,
        particles = descriptor.particle_count,
        height = descriptor.height,
        "Descriptor extracted for new building"
    );

    let matched = find_nearest(cache, &descriptor)?;
    tracing::info!(key = %matched.key, distance = matched.distance, "Matched catalog entry");

    let (catalog_mesh, source) = load_matched_documents(catalog, matched.key)?;

    let catalog_volume = rescale_volume_proxy(&catalog_mesh)?;
    let new_volume = rescale_volume_proxy(&normalized)?;
    let index = scale_index(new_volume, catalog_volume)?;
    tracing::info!(
        catalog_volume,
        new_volume,
        scale_index = index,
        "Rescaling matched proposal"
    );

    Ok(ProposalOutcome {
        proposal: rescale_proposal(&source, index),
        matched_key: matched.key,
        distance: matched.distance,
        scale_index: index,
    })
}

/// Load the winner's mesh and cost documents.
///
/// Tolerant skipping only applies while the cache is built; once an entry has
/// won the match there is nothing to fall back to, so any missing or
/// unreadable document is fatal.
fn load_matched_documents(catalog: &Catalog, key: CatalogKey) -> Result<(Mesh, Proposal)> {
    let entry = catalog.get(&key).ok_or_else(|| Error::CatalogLoad {
        key,
        reason: "entry missing from catalog".into(),
    })?;

    let mesh_path = entry.mesh_document.as_ref().ok_or_else(|| Error::CatalogLoad {
        key,
        reason: "mesh document missing".into(),
    })?;
    let mesh = read_mesh_document(mesh_path).map_err(|e| Error::CatalogLoad {
        key,
        reason: format!("mesh document {e}"),
    })?;

    let cost_path = entry.cost_document.as_ref().ok_or_else(|| Error::CatalogLoad {
        key,
        reason: "cost document missing".into(),
    })?;
    let proposal = read_cost_document(cost_path).map_err(|e| Error::CatalogLoad {
        key,
        reason: format!("cost document {e}"),
    })?;

    Ok((mesh, proposal))
}
