// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fixed-size geometric descriptors for similarity search.

use crate::error::{Error, Result};
use crate::mesh::Mesh;
use nalgebra::Point3;
use serde::Serialize;

/// Six-number geometric fingerprint of one building mesh.
///
/// All six fields are mandatory and ordered; they are the coordinates the
/// matcher measures Euclidean distance in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeometryDescriptor {
    /// Sum of per-facet areas.
    pub area: f64,
    /// Facet count, as a real number so it participates in the distance.
    pub particle_count: f64,
    /// Bounding-box extent along x.
    pub length: f64,
    /// Bounding-box extent along y.
    pub width: f64,
    /// Bounding-box extent along z.
    pub height: f64,
    /// Descriptor volume: `area * height`. A coarse proxy, not a true
    /// geometric volume. The rescaling stage uses a different formula for a
    /// different question (see [`crate::volume`]).
    pub volume: f64,
}

impl GeometryDescriptor {
    /// Reduce a mesh to its descriptor.
    ///
    /// Deterministic and order-independent over the facet list (sums and
    /// extrema only). An empty mesh has no bounding box and is rejected.
    pub fn from_mesh(mesh: &Mesh) -> Result<Self> {
        if mesh.is_empty() {
            return Err(Error::InvalidGeometry(
                "empty mesh has no descriptor".into(),
            ));
        }

        let mut min = Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY);
        let mut max = Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
        let mut area = 0.0;

        for t in mesh.iter() {
            area += t.area;
            for v in t.vertices() {
                min.x = min.x.min(v.x);
                min.y = min.y.min(v.y);
                min.z = min.z.min(v.z);
                max.x = max.x.max(v.x);
                max.y = max.y.max(v.y);
                max.z = max.z.max(v.z);
            }
        }

        let height = max.z - min.z;

        Ok(Self {
            area,
            particle_count: mesh.triangle_count() as f64,
            length: max.x - min.x,
            width: max.y - min.y,
            height,
            volume: area * height,
        })
    }

    /// Unweighted Euclidean distance to another descriptor.
    ///
    /// No normalization between fields of different units; the catalog was
    /// indexed on this exact scale.
    pub fn distance(&self, other: &Self) -> f64 {
        self.fields()
            .iter()
            .zip(other.fields().iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt()
    }

    #[inline]
    fn fields(&self) -> [f64; 6] {
        [
            self.area,
            self.particle_count,
            self.length,
            self.width,
            self.height,
            self.volume,
        ]
    }
}
