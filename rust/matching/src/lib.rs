// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reno-Lite Matching
//!
//! The proposal pipeline: index a catalog of completed renovation proposals
//! by geometric descriptor, find the entry nearest to a new building, and
//! rescale its cost document to the new building's volume.

pub mod cache;
pub mod catalog;
pub mod error;
pub mod matcher;
pub mod pipeline;
pub mod proposal;
pub mod rescale;

pub use cache::{AttributeCache, CacheStats};
pub use catalog::{
    read_cost_document, read_mesh_document, Catalog, CatalogEntry, CatalogKey, DocumentError,
    ModelRecord,
};
pub use error::{Error, Result};
pub use matcher::{find_nearest, MatchResult};
pub use pipeline::{make_proposal, ProposalOutcome};
pub use proposal::{CostItem, Proposal};
pub use rescale::{rescale_proposal, scale_index};
