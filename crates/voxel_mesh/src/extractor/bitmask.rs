//! Slice configuration-bitmask build.
//!
//! For every cell of a one-slice-thick region this computes the 8-bit
//! configuration index (bit `k` set iff corner `k` is empty). A cell shares
//! four corners with each of its -X, -Y and -Z neighbours, so in the
//! interior only the one corner no neighbour owns (`+X+Y+Z`) has to be
//! read from the volume; the other seven bits are lifted out of the
//! neighbouring cells' already-computed configurations:
//!
//! - previous-Z cell: its upper face, bits `{4,5,6,7} >> 4`, covers our
//!   bits `{0,1,2,3}`;
//! - previous-Y cell: its upper-Y face, `(bits & 0xCC) >> 2`, covers our
//!   bits `{0,1,4,5}`;
//! - previous-X cell: its upper-X face, `(bits & 0xAA) >> 1`, covers our
//!   bits `{0,2,4,6}`.
//!
//! When several neighbours are available the masks shrink to the bits the
//! cheaper sources do not already provide. Eight code paths cover the
//! availability combinations; cells at the volume boundary fall back to
//! reading all eight corners bounds-checked.

use glam::IVec3;

use super::grid_index;
use crate::region::Region;
use crate::tables::EDGE_TABLE;
use crate::volume::VolumeSampler;

/// Compute the configuration bitmask for one slice of cells.
///
/// `slice` is one slice thick (`lower.z == upper.z`) in volume
/// coordinates; `offset` is the lower corner of the cropped extraction
/// region. `previous` is the bitmask of the slice one step below, absent
/// for the first slice. Returns the number of cells whose edge table entry
/// is non-empty.
pub(super) fn compute_bitmask_for_slice<V: VolumeSampler>(
  volume: &V,
  level: u8,
  slice: &Region,
  offset: IVec3,
  stride: usize,
  bitmask: &mut [u8],
  previous: Option<&[u8]>,
) -> u32 {
  let step = 1i32 << level;
  let vol = volume.enclosing_region();
  let z = slice.lower.z;
  let mut non_empty_cells = 0u32;

  let mut y = slice.lower.y;
  while y <= slice.upper.y {
    let mut x = slice.lower.x;
    while x <= slice.upper.x {
      let xr = x - offset.x;
      let yr = y - offset.y;

      let interior =
        x + step <= vol.upper.x && y + step <= vol.upper.y && z + step <= vol.upper.z;

      let config = if interior {
        let prev_x = xr > 0;
        let prev_y = yr > 0;

        match (previous, prev_y, prev_x) {
          (Some(prev), true, true) => {
            let v111 = volume.sample_sub_sampled(x + step, y + step, z + step, level);

            let z_bits = prev[grid_index(xr, yr, stride)] >> 4;
            let y_bits = (bitmask[grid_index(xr, yr - step, stride)] & 0xC0) >> 2;
            let x_bits = (bitmask[grid_index(xr - step, yr, stride)] & 0x80) >> 1;

            let mut config = x_bits | y_bits | z_bits;
            if v111 == 0 {
              config |= 128;
            }
            config
          }
          (Some(prev), true, false) => {
            let v011 = volume.sample_sub_sampled(x, y + step, z + step, level);
            let v111 = volume.sample_sub_sampled(x + step, y + step, z + step, level);

            let z_bits = prev[grid_index(xr, yr, stride)] >> 4;
            let y_bits = (bitmask[grid_index(xr, yr - step, stride)] & 0xC0) >> 2;

            let mut config = y_bits | z_bits;
            if v011 == 0 {
              config |= 64;
            }
            if v111 == 0 {
              config |= 128;
            }
            config
          }
          (Some(prev), false, true) => {
            let v101 = volume.sample_sub_sampled(x + step, y, z + step, level);
            let v111 = volume.sample_sub_sampled(x + step, y + step, z + step, level);

            let z_bits = prev[grid_index(xr, yr, stride)] >> 4;
            let x_bits = (bitmask[grid_index(xr - step, yr, stride)] & 0xA0) >> 1;

            let mut config = x_bits | z_bits;
            if v101 == 0 {
              config |= 32;
            }
            if v111 == 0 {
              config |= 128;
            }
            config
          }
          (Some(prev), false, false) => {
            let v001 = volume.sample_sub_sampled(x, y, z + step, level);
            let v101 = volume.sample_sub_sampled(x + step, y, z + step, level);
            let v011 = volume.sample_sub_sampled(x, y + step, z + step, level);
            let v111 = volume.sample_sub_sampled(x + step, y + step, z + step, level);

            let mut config = prev[grid_index(xr, yr, stride)] >> 4;
            if v001 == 0 {
              config |= 16;
            }
            if v101 == 0 {
              config |= 32;
            }
            if v011 == 0 {
              config |= 64;
            }
            if v111 == 0 {
              config |= 128;
            }
            config
          }
          (None, true, true) => {
            let v110 = volume.sample_sub_sampled(x + step, y + step, z, level);
            let v111 = volume.sample_sub_sampled(x + step, y + step, z + step, level);

            let y_bits = (bitmask[grid_index(xr, yr - step, stride)] & 0xCC) >> 2;
            let x_bits = (bitmask[grid_index(xr - step, yr, stride)] & 0xAA) >> 1;

            let mut config = x_bits | y_bits;
            if v110 == 0 {
              config |= 8;
            }
            if v111 == 0 {
              config |= 128;
            }
            config
          }
          (None, true, false) => {
            let v010 = volume.sample_sub_sampled(x, y + step, z, level);
            let v110 = volume.sample_sub_sampled(x + step, y + step, z, level);
            let v011 = volume.sample_sub_sampled(x, y + step, z + step, level);
            let v111 = volume.sample_sub_sampled(x + step, y + step, z + step, level);

            let mut config = (bitmask[grid_index(xr, yr - step, stride)] & 0xCC) >> 2;
            if v010 == 0 {
              config |= 4;
            }
            if v110 == 0 {
              config |= 8;
            }
            if v011 == 0 {
              config |= 64;
            }
            if v111 == 0 {
              config |= 128;
            }
            config
          }
          (None, false, true) => {
            let v100 = volume.sample_sub_sampled(x + step, y, z, level);
            let v110 = volume.sample_sub_sampled(x + step, y + step, z, level);
            let v101 = volume.sample_sub_sampled(x + step, y, z + step, level);
            let v111 = volume.sample_sub_sampled(x + step, y + step, z + step, level);

            let mut config = (bitmask[grid_index(xr - step, yr, stride)] & 0xAA) >> 1;
            if v100 == 0 {
              config |= 2;
            }
            if v110 == 0 {
              config |= 8;
            }
            if v101 == 0 {
              config |= 32;
            }
            if v111 == 0 {
              config |= 128;
            }
            config
          }
          (None, false, false) => {
            let mut config = 0u8;
            for corner in 0..8u8 {
              let cx = x + ((corner as i32) & 1) * step;
              let cy = y + ((corner as i32 >> 1) & 1) * step;
              let cz = z + ((corner as i32 >> 2) & 1) * step;
              if volume.sample_sub_sampled(cx, cy, cz, level) == 0 {
                config |= 1 << corner;
              }
            }
            config
          }
        }
      } else {
        // Volume boundary: no neighbour derivation, all eight corners
        // read bounds-checked (outside reads as empty).
        let mut config = 0u8;
        for corner in 0..8u8 {
          let cx = x + ((corner as i32) & 1) * step;
          let cy = y + ((corner as i32 >> 1) & 1) * step;
          let cz = z + ((corner as i32 >> 2) & 1) * step;
          if volume.sample_sub_sampled_with_bounds(cx, cy, cz, level) == 0 {
            config |= 1 << corner;
          }
        }
        config
      };

      bitmask[grid_index(xr, yr, stride)] = config;

      if EDGE_TABLE[config as usize] != 0 {
        non_empty_cells += 1;
      }

      x += step;
    }
    y += step;
  }

  non_empty_cells
}

#[cfg(test)]
#[path = "bitmask_test.rs"]
mod bitmask_test;
