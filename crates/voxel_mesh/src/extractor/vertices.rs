//! Slice vertex emit.
//!
//! Every cell owns the three cube edges incident on its origin corner (the
//! -X, -Y and -Z edges). For each crossed owned edge a vertex is emitted
//! at the edge midpoint (half the sampling step) and its mesh index is
//! recorded in the matching per-slice grid; the other nine edges of the
//! cube are resolved during index emit by reading a neighbouring cell's
//! grid entry.

use glam::IVec3;

use super::grid_index;
use crate::mesh::{SurfaceMesh, SurfaceVertex};
use crate::region::Region;
use crate::tables::EDGE_TABLE;
use crate::volume::VolumeSampler;

/// Sentinel for "no vertex recorded" in the index grids.
pub(super) const NO_VERTEX: i32 = -1;

/// Emit vertices for every crossed owned edge of a slice.
///
/// `bitmask` is the slice's configuration grid from the bitmask phase.
/// The three vertex-index grids are reset and refilled for this slice.
#[allow(clippy::too_many_arguments)]
pub(super) fn generate_vertices_for_slice<V: VolumeSampler>(
  volume: &V,
  level: u8,
  slice: &Region,
  offset: IVec3,
  stride: usize,
  bitmask: &[u8],
  mesh: &mut SurfaceMesh<SurfaceVertex>,
  vertex_x: &mut [i32],
  vertex_y: &mut [i32],
  vertex_z: &mut [i32],
) {
  let step = 1i32 << level;
  let half_step = 0.5 * step as f32;
  let z = slice.lower.z;

  vertex_x.fill(NO_VERTEX);
  vertex_y.fill(NO_VERTEX);
  vertex_z.fill(NO_VERTEX);

  let mut y = slice.lower.y;
  while y <= slice.upper.y {
    let mut x = slice.lower.x;
    while x <= slice.upper.x {
      let xr = x - offset.x;
      let yr = y - offset.y;
      let zr = z - offset.z;

      let config = bitmask[grid_index(xr, yr, stride)];
      let edges = EDGE_TABLE[config as usize];

      // Cell entirely inside or outside the surface.
      if edges == 0 {
        x += step;
        continue;
      }

      let v000 = volume.sample_sub_sampled(x, y, z, level);

      // Edge 0: the cell's -X edge. Cells in the last column only
      // contribute their -Z vertex; a triangle needing this one would
      // lie outside the region.
      if edges & (1 << 0) != 0 && x != slice.upper.x {
        let v100 = volume.sample_sub_sampled_with_bounds(x + step, y, z, level);
        let index = mesh.add_vertex(SurfaceVertex::new(
          [xr as f32 + half_step, yr as f32, zr as f32],
          [if v000 > v100 { 1.0 } else { -1.0 }, 0.0, 0.0],
          v000 | v100,
        ));
        vertex_x[grid_index(xr, yr, stride)] = index as i32;
      }

      // Edge 3: the cell's -Y edge.
      if edges & (1 << 3) != 0 && y != slice.upper.y {
        let v010 = volume.sample_sub_sampled_with_bounds(x, y + step, z, level);
        let index = mesh.add_vertex(SurfaceVertex::new(
          [xr as f32, yr as f32 + half_step, zr as f32],
          [0.0, if v000 > v010 { 1.0 } else { -1.0 }, 0.0],
          v000 | v010,
        ));
        vertex_y[grid_index(xr, yr, stride)] = index as i32;
      }

      // Edge 8: the cell's -Z edge.
      if edges & (1 << 8) != 0 {
        let v001 = volume.sample_sub_sampled_with_bounds(x, y, z + step, level);
        let index = mesh.add_vertex(SurfaceVertex::new(
          [xr as f32, yr as f32, zr as f32 + half_step],
          [0.0, 0.0, if v000 > v001 { 1.0 } else { -1.0 }],
          v000 | v001,
        ));
        vertex_z[grid_index(xr, yr, stride)] = index as i32;
      }

      x += step;
    }
    y += step;
  }
}

#[cfg(test)]
#[path = "vertices_test.rs"]
mod vertices_test;
