// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Catalog model and document readers.

use reno_lite_geometry::Mesh;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Opaque identifier of one catalog entry.
///
/// Composed by catalog discovery as `group * 1000 + proposal_number`, where
/// the group index counts delivered bundles and the proposal number comes
/// from the `PROPOSAL<n>` filename. Unique within a single catalog load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CatalogKey(u64);

impl CatalogKey {
    /// Compose a key from a bundle group index and a proposal number.
    #[inline]
    pub fn compose(group: u64, proposal_number: u64) -> Self {
        Self(group * 1000 + proposal_number)
    }

    /// Wrap an already-composed raw key.
    #[inline]
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw integer value.
    #[inline]
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for CatalogKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One catalog entry: locations of the two documents a completed proposal
/// ships with. Either may be absent; an entry with no mesh document can
/// never be chosen by the matcher.
#[derive(Debug, Clone, Default)]
pub struct CatalogEntry {
    /// Cost-proposal document (line items and totals).
    pub cost_document: Option<PathBuf>,
    /// 3D mesh document (model records with particle lists).
    pub mesh_document: Option<PathBuf>,
}

/// The catalog mapping supplied by discovery.
pub type Catalog = FxHashMap<CatalogKey, CatalogEntry>;

/// One top-level model record of a mesh document. The remote particles
/// endpoint returns the same shape.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelRecord {
    pub particles: Mesh,
}

/// Errors reading a single catalog document.
///
/// During cache construction these become skip reasons; once an entry has
/// won the match they are fatal.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("unreadable: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document has no model records")]
    NoRecords,
}

/// Read the mesh out of a mesh document.
///
/// The document is a sequence of model records; only the FIRST record's
/// `particles` list is consumed. Records past the first are ignored, never
/// aggregated.
pub fn read_mesh_document(path: &Path) -> Result<Mesh, DocumentError> {
    let file = File::open(path)?;
    let records: Vec<ModelRecord> = serde_json::from_reader(BufReader::new(file))?;
    records
        .into_iter()
        .next()
        .map(|record| record.particles)
        .ok_or(DocumentError::NoRecords)
}

/// Read and parse a cost-proposal document.
pub fn read_cost_document(path: &Path) -> Result<crate::proposal::Proposal, DocumentError> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_composition() {
        assert_eq!(CatalogKey::compose(2, 12), CatalogKey::from_raw(2012));
        assert_eq!(CatalogKey::compose(1, 1).as_u64(), 1001);
        assert_eq!(format!("{}", CatalogKey::compose(3, 7)), "3007");
    }

    #[test]
    fn test_read_mesh_document_first_record_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("PROPOSAL1.3D.json");
        std::fs::write(
            &path,
            r#"[
                {"particles": [{"x0":0,"y0":0,"z0":0,"x1":1,"y1":0,"z1":0,"x2":0,"y2":1,"z2":0,"area":0.5}]},
                {"particles": [{"x0":9,"y0":9,"z0":9,"x1":9,"y1":9,"z1":9,"x2":9,"y2":9,"z2":9,"area":99.0},
                               {"x0":9,"y0":9,"z0":9,"x1":9,"y1":9,"z1":9,"x2":9,"y2":9,"z2":9,"area":99.0}]}
            ]"#,
        )
        .unwrap();

        let mesh = read_mesh_document(&path).unwrap();
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.triangles[0].area, 0.5);
    }

    #[test]
    fn test_read_mesh_document_empty_sequence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("PROPOSAL2.3D.json");
        std::fs::write(&path, "[]").unwrap();
        assert!(matches!(
            read_mesh_document(&path),
            Err(DocumentError::NoRecords)
        ));
    }

    #[test]
    fn test_read_mesh_document_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("PROPOSAL3.3D.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            read_mesh_document(&path),
            Err(DocumentError::Json(_))
        ));
    }

    #[test]
    fn test_read_mesh_document_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.3D.json");
        assert!(matches!(read_mesh_document(&path), Err(DocumentError::Io(_))));
    }
}
