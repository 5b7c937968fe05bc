// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh data structures

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// One triangular facet of a building's exterior surface.
///
/// Field names match the external particle documents byte for byte: three
/// corner points stored as nine flat coordinates plus a precomputed surface
/// area. Coordinates are meters. Immutable once read from its source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub x0: f64,
    pub y0: f64,
    pub z0: f64,
    pub x1: f64,
    pub y1: f64,
    pub z1: f64,
    pub x2: f64,
    pub y2: f64,
    pub z2: f64,
    /// Precomputed facet area, carried by the source document.
    pub area: f64,
}

impl Triangle {
    /// The three corner points.
    #[inline]
    pub fn vertices(&self) -> [Point3<f64>; 3] {
        [
            Point3::new(self.x0, self.y0, self.z0),
            Point3::new(self.x1, self.y1, self.z1),
            Point3::new(self.x2, self.y2, self.z2),
        ]
    }

    /// The nine coordinate slots in document order (x0, y0, z0, ..., z2).
    #[inline]
    pub fn slots(&self) -> [f64; 9] {
        [
            self.x0, self.y0, self.z0, self.x1, self.y1, self.z1, self.x2, self.y2, self.z2,
        ]
    }

    /// Rebuild a triangle from nine coordinate slots, keeping the area.
    #[inline]
    pub fn from_slots(slots: [f64; 9], area: f64) -> Self {
        Self {
            x0: slots[0],
            y0: slots[1],
            z0: slots[2],
            x1: slots[3],
            y1: slots[4],
            z1: slots[5],
            x2: slots[6],
            y2: slots[7],
            z2: slots[8],
            area,
        }
    }

    /// The z coordinate of each corner.
    #[inline]
    pub fn z_coordinates(&self) -> [f64; 3] {
        [self.z0, self.z1, self.z2]
    }
}

/// Triangle mesh: an ordered sequence of facets.
///
/// Not required to be closed or manifold; the pipeline only consumes corner
/// coordinates and per-facet areas. Serializes transparently as the particle
/// array of the external documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    /// Wrap an already-parsed triangle list.
    pub fn from_triangles(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    /// Get triangle count
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Check if mesh is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Sum of the per-facet areas.
    #[inline]
    pub fn total_area(&self) -> f64 {
        self.triangles.iter().map(|t| t.area).sum()
    }

    /// Iterate over facets in document order.
    pub fn iter(&self) -> impl Iterator<Item = &Triangle> {
        self.triangles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri(x: f64, area: f64) -> Triangle {
        Triangle {
            x0: x,
            y0: 0.0,
            z0: 0.0,
            x1: x + 1.0,
            y1: 0.0,
            z1: 0.0,
            x2: x,
            y2: 1.0,
            z2: 0.0,
            area,
        }
    }

    #[test]
    fn test_mesh_creation() {
        let mesh = Mesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.triangle_count(), 0);
        assert_eq!(mesh.total_area(), 0.0);
    }

    #[test]
    fn test_total_area() {
        let mesh = Mesh::from_triangles(vec![tri(0.0, 0.5), tri(2.0, 1.5)]);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.total_area(), 2.0);
    }

    #[test]
    fn test_slots_round_trip() {
        let t = tri(3.0, 0.5);
        let rebuilt = Triangle::from_slots(t.slots(), t.area);
        assert_eq!(t, rebuilt);
    }

    #[test]
    fn test_deserialize_particle_array() {
        let json = r#"[{
            "x0": 1.0, "y0": 2.0, "z0": 3.0,
            "x1": 4.0, "y1": 5.0, "z1": 6.0,
            "x2": 7.0, "y2": 8.0, "z2": 9.0,
            "area": 12.5
        }]"#;
        let mesh: Mesh = serde_json::from_str(json).unwrap();
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.triangles[0].area, 12.5);
        assert_eq!(mesh.triangles[0].vertices()[2], Point3::new(7.0, 8.0, 9.0));
    }
}
