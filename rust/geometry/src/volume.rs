// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Volume proxy used by cost rescaling.

use crate::error::{Error, Result};
use crate::mesh::Mesh;

/// Volume proxy for the rescaling ratio between two buildings.
///
/// Sums the facet areas, then derives a height from the set of all corner
/// z coordinates: `maxZ` when `minZ == 0`, otherwise `maxZ / minZ`. The
/// result is `totalArea * height`.
///
/// This is deliberately a different formula from the descriptor volume
/// (`area * bounding-box height`): the descriptor answers shape similarity,
/// this one feeds the cost scale ratio, and catalog proposals were priced
/// against exactly this quantity. Keep the two separate.
pub fn rescale_volume_proxy(mesh: &Mesh) -> Result<f64> {
    if mesh.is_empty() {
        return Err(Error::InvalidGeometry("empty mesh has no volume".into()));
    }

    let mut total_area = 0.0;
    let mut min_z = f64::INFINITY;
    let mut max_z = f64::NEG_INFINITY;

    for t in mesh.iter() {
        total_area += t.area;
        for z in t.z_coordinates() {
            min_z = min_z.min(z);
            max_z = max_z.max(z);
        }
    }

    let height = if min_z == 0.0 { max_z } else { max_z / min_z };

    Ok(total_area * height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Triangle;
    use approx::assert_relative_eq;

    fn tri_with_z(z: [f64; 3], area: f64) -> Triangle {
        Triangle {
            x0: 0.0,
            y0: 0.0,
            z0: z[0],
            x1: 1.0,
            y1: 0.0,
            z1: z[1],
            x2: 0.0,
            y2: 1.0,
            z2: z[2],
            area,
        }
    }

    #[test]
    fn test_grounded_mesh_uses_max_z() {
        // minZ == 0 -> height is simply maxZ.
        let mesh = Mesh::from_triangles(vec![
            tri_with_z([0.0, 2.0, 4.0], 3.0),
            tri_with_z([1.0, 6.0, 2.0], 2.0),
        ]);
        assert_relative_eq!(rescale_volume_proxy(&mesh).unwrap(), 5.0 * 6.0);
    }

    #[test]
    fn test_elevated_mesh_uses_z_ratio() {
        // minZ != 0 -> height is maxZ / minZ.
        let mesh = Mesh::from_triangles(vec![tri_with_z([2.0, 8.0, 4.0], 10.0)]);
        assert_relative_eq!(rescale_volume_proxy(&mesh).unwrap(), 10.0 * 4.0);
    }

    #[test]
    fn test_flat_grounded_mesh_is_degenerate() {
        // Every corner at z == 0: height collapses to zero and so does the
        // volume, which the rescaler must reject as a scale denominator.
        let mesh = Mesh::from_triangles(vec![
            tri_with_z([0.0, 0.0, 0.0], 4.0),
            tri_with_z([0.0, 0.0, 0.0], 2.0),
        ]);
        assert_relative_eq!(rescale_volume_proxy(&mesh).unwrap(), 0.0);
    }

    #[test]
    fn test_empty_mesh_rejected() {
        assert!(rescale_volume_proxy(&Mesh::new()).is_err());
    }
}
