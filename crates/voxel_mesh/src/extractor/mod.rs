//! Level-of-detail capable marching-cubes surface extraction.
//!
//! # Processing pipeline
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │ INPUT                                                         │
//! │   volume: &impl VolumeSampler   (read-only 8-bit densities)   │
//! │   region: Region                (axis-aligned, inclusive)     │
//! │   level:  u8                    (sampling step = 1 << level)  │
//! └───────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼ crop region to the volume
//! ┌───────────────────────────────────────────────────────────────┐
//! │ Per Z slice (two slice buffers alternate as lower/upper):     │
//! │                                                               │
//! │   1. Bitmask build   - 8-bit cell configuration per cell,     │
//! │                        reusing -X/-Y/-Z neighbour bits        │
//! │   2. Vertex emit     - up to three vertices per cell on its   │
//! │                        owned -X/-Y/-Z edges, recorded in      │
//! │                        per-slice index grids                  │
//! │   3. Index emit      - twelve-edge lookup across both slices, │
//! │                        triangles from the triangle table      │
//! │   4. Swap buffers, advance Z by the step                      │
//! └───────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌───────────────────────────────────────────────────────────────┐
//! │ OUTPUT: SurfaceMesh<SurfaceVertex>                            │
//! │   deduplicated vertices, u32 triangle indices,                │
//! │   owning region, one LOD record covering the index array      │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! Vertex positions are region-local (sample position minus the cropped
//! region's lower corner). Meshes of adjacent regions are extracted
//! independently and are not stitched; callers that need seamless output
//! extract with one cell of overlap and merge outside this module.

mod bitmask;
mod indices;
mod vertices;

use glam::IVec3;

use crate::mesh::{LodRecord, SurfaceMesh, SurfaceVertex};
use crate::region::Region;
use crate::volume::VolumeSampler;

/// Scratch pad for the extra rows the one-past-last reads touch.
const SCRATCH_PAD_LOD0: i32 = 8;
const SCRATCH_PAD_DECIMATED: i32 = 2;

/// Index into a slice grid; rows are `stride` entries wide.
#[inline]
fn grid_index(x_reg: i32, y_reg: i32, stride: usize) -> usize {
  debug_assert!(x_reg >= 0 && y_reg >= 0);
  x_reg as usize + y_reg as usize * stride
}

/// Per-slice scratch: the configuration bitmask plus one vertex-index grid
/// per owned edge orientation. Two instances alternate roles as the lower
/// and upper slice of the sweep.
struct SliceGrids {
  bitmask: Vec<u8>,
  vertex_x: Vec<i32>,
  vertex_y: Vec<i32>,
  vertex_z: Vec<i32>,
}

impl SliceGrids {
  fn new(len: usize) -> Self {
    Self {
      bitmask: vec![0; len],
      vertex_x: vec![vertices::NO_VERTEX; len],
      vertex_y: vec![vertices::NO_VERTEX; len],
      vertex_z: vec![vertices::NO_VERTEX; len],
    }
  }
}

/// Marching-cubes surface extractor over a read-only volume.
///
/// The same extractor can serve any number of `extract` calls; each call
/// owns its slice scratch, so one extractor per worker thread is all the
/// caller needs for cross-region parallelism.
pub struct SurfaceExtractor<'a, V: VolumeSampler> {
  volume: &'a V,
  lod_level: u8,
}

impl<'a, V: VolumeSampler> SurfaceExtractor<'a, V> {
  pub fn new(volume: &'a V) -> Self {
    Self {
      volume,
      lod_level: 0,
    }
  }

  /// Builder-style LOD selection; the sampling step is `1 << level`.
  pub fn with_lod_level(mut self, level: u8) -> Self {
    self.lod_level = level;
    self
  }

  pub fn lod_level(&self) -> u8 {
    self.lod_level
  }

  pub fn set_lod_level(&mut self, level: u8) {
    self.lod_level = level;
  }

  /// Extract the iso-surface of `region` into `mesh`.
  ///
  /// The mesh's previous contents are cleared. A request that does not
  /// intersect the volume (or whose step exceeds it) succeeds with an
  /// empty mesh. One [`LodRecord`] covering the whole index array is
  /// appended.
  #[cfg_attr(
    feature = "tracing",
    tracing::instrument(skip_all, name = "extractor::extract", fields(level = self.lod_level))
  )]
  pub fn extract(&self, region: Region, mesh: &mut SurfaceMesh<SurfaceVertex>) {
    mesh.clear();
    mesh.region = region;

    let level = self.lod_level;
    let step = 1i32 << level;

    // The far corner lookups read up to one step beyond a cell, and
    // decimated sampling snaps to the coarse lattice, so the region is
    // clipped to keep every read inside the volume.
    let mut volume_bounds = self.volume.enclosing_region();
    if level > 0 {
      volume_bounds.upper -= IVec3::splat(2 * step - 1);
    }

    let mut region = region;
    region.crop_to(&volume_bounds);

    if !region.is_valid() {
      mesh.lod_records.push(LodRecord { begin: 0, end: 0 });
      return;
    }

    mesh.region = region;
    let offset = region.lower;
    let stride = region.width() as usize;

    let pad = if level == 0 {
      SCRATCH_PAD_LOD0
    } else {
      SCRATCH_PAD_DECIMATED
    };
    let grid_len = ((region.width() + pad) * (region.height() + pad)) as usize;
    let mut lower = SliceGrids::new(grid_len);
    let mut upper = SliceGrids::new(grid_len);

    // First slice: bitmask and vertices only; triangles need a pair.
    let mut lower_slice = region;
    lower_slice.upper.z = lower_slice.lower.z;

    let mut lower_non_empty = bitmask::compute_bitmask_for_slice(
      self.volume,
      level,
      &lower_slice,
      offset,
      stride,
      &mut lower.bitmask,
      None,
    );
    if lower_non_empty != 0 {
      vertices::generate_vertices_for_slice(
        self.volume,
        level,
        &lower_slice,
        offset,
        stride,
        &lower.bitmask,
        mesh,
        &mut lower.vertex_x,
        &mut lower.vertex_y,
        &mut lower.vertex_z,
      );
    }

    while lower_slice.lower.z + step <= region.upper.z {
      let mut upper_slice = lower_slice;
      upper_slice.shift(IVec3::new(0, 0, step));

      let upper_non_empty = bitmask::compute_bitmask_for_slice(
        self.volume,
        level,
        &upper_slice,
        offset,
        stride,
        &mut upper.bitmask,
        Some(lower.bitmask.as_slice()),
      );
      if upper_non_empty != 0 {
        vertices::generate_vertices_for_slice(
          self.volume,
          level,
          &upper_slice,
          offset,
          stride,
          &upper.bitmask,
          mesh,
          &mut upper.vertex_x,
          &mut upper.vertex_y,
          &mut upper.vertex_z,
        );
      }

      if lower_non_empty != 0 || upper_non_empty != 0 {
        indices::generate_indices_for_slice(
          level,
          &lower_slice,
          offset,
          stride,
          &lower,
          &upper,
          mesh,
        );
      }

      std::mem::swap(&mut lower, &mut upper);
      lower_non_empty = upper_non_empty;
      lower_slice = upper_slice;
    }

    mesh.lod_records.push(LodRecord {
      begin: 0,
      end: mesh.index_count(),
    });
  }
}

/// One-shot convenience wrapper around [`SurfaceExtractor`].
pub fn extract_surface<V: VolumeSampler>(
  volume: &V,
  region: Region,
  lod_level: u8,
) -> SurfaceMesh<SurfaceVertex> {
  let mut mesh = SurfaceMesh::new();
  SurfaceExtractor::new(volume)
    .with_lod_level(lod_level)
    .extract(region, &mut mesh);
  mesh
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;
