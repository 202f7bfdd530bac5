//! Gradient estimation over binarised voxels.
//!
//! The extractor's own per-edge normals are axis-aligned; callers wanting
//! smooth shading re-estimate normals from the volume after extraction.
//! All kernels binarise the voxel field (solid = 1, empty = 0) and are
//! oriented so the result points out of the solid, matching the
//! extractor's convention.

use glam::{IVec3, Vec3A};

use crate::volume::VolumeSampler;

/// A combined gradient shorter than this falls back to [`GradientMethod::Simple`].
const FALLBACK_LENGTH_SQUARED: f32 = 1e-4;

/// Gradient estimation kernel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GradientMethod {
  /// One-sided difference along the axis the position sits on. Cheapest,
  /// and the only method that works at the volume boundary.
  Simple,
  /// Six-neighbour central difference.
  #[default]
  CentralDifference,
  /// 3x3x3 weighted kernel; smoothest, samples 26 neighbours.
  Sobel,
}

#[inline]
fn solidity<V: VolumeSampler>(volume: &V, x: i32, y: i32, z: i32) -> f32 {
  if volume.sample_with_bounds(x, y, z) > 0 {
    1.0
  } else {
    0.0
  }
}

/// Central-difference gradient at an integer coordinate.
pub fn central_difference_gradient<V: VolumeSampler>(volume: &V, point: IVec3) -> Vec3A {
  let IVec3 { x, y, z } = point;
  Vec3A::new(
    solidity(volume, x - 1, y, z) - solidity(volume, x + 1, y, z),
    solidity(volume, x, y - 1, z) - solidity(volume, x, y + 1, z),
    solidity(volume, x, y, z - 1) - solidity(volume, x, y, z + 1),
  )
}

/// Sobel gradient at an integer coordinate.
///
/// Each axis difference is smoothed over the perpendicular 3x3
/// neighbourhood with weights 2/3/2, 3/6/3, 2/3/2.
pub fn sobel_gradient<V: VolumeSampler>(volume: &V, point: IVec3) -> Vec3A {
  const SMOOTH: [[f32; 3]; 3] = [[2.0, 3.0, 2.0], [3.0, 6.0, 3.0], [2.0, 3.0, 2.0]];
  let IVec3 { x, y, z } = point;

  let mut gradient = Vec3A::ZERO;
  for u in -1i32..=1 {
    for v in -1i32..=1 {
      let weight = SMOOTH[(u + 1) as usize][(v + 1) as usize];
      gradient.x +=
        weight * (solidity(volume, x - 1, y + u, z + v) - solidity(volume, x + 1, y + u, z + v));
      gradient.y +=
        weight * (solidity(volume, x + u, y - 1, z + v) - solidity(volume, x + u, y + 1, z + v));
      gradient.z +=
        weight * (solidity(volume, x + u, y + v, z - 1) - solidity(volume, x + u, y + v, z + 1));
    }
  }
  gradient
}

/// One-sided difference along the axis `position` is fractional on.
///
/// Extraction places vertices at half-step edge midpoints, so at most one
/// coordinate has a fractional part. Integer positions yield zero.
pub fn simple_gradient<V: VolumeSampler>(volume: &V, position: Vec3A) -> Vec3A {
  let floor = position.floor();
  let frac = position - floor;
  let base = floor.as_ivec3();

  let here = solidity(volume, base.x, base.y, base.z);
  if frac.x > 0.25 {
    Vec3A::new(here - solidity(volume, base.x + 1, base.y, base.z), 0.0, 0.0)
  } else if frac.y > 0.25 {
    Vec3A::new(0.0, here - solidity(volume, base.x, base.y + 1, base.z), 0.0)
  } else if frac.z > 0.25 {
    Vec3A::new(0.0, 0.0, here - solidity(volume, base.x, base.y, base.z + 1))
  } else {
    Vec3A::ZERO
  }
}

/// Estimate a unit normal at a sub-voxel position.
///
/// Samples the chosen kernel at the two integer corners bracketing the
/// position and sums them; falls back to [`GradientMethod::Simple`] near
/// the volume boundary or when the combined gradient degenerates.
/// Returns zero only when even the fallback has nothing to work with.
pub fn compute_normal<V: VolumeSampler>(
  volume: &V,
  position: Vec3A,
  method: GradientMethod,
) -> Vec3A {
  let floor = position.floor().as_ivec3();
  let frac = position - position.floor();

  let mut method = method;
  // Kernels need a one-voxel apron on every side.
  if !volume.contains(floor, 1) || !volume.contains(floor + IVec3::ONE, 1) {
    method = GradientMethod::Simple;
  }

  let ceil = floor
    + IVec3::new(
      (frac.x > 0.25) as i32,
      (frac.y > 0.25) as i32,
      (frac.z > 0.25) as i32,
    );

  let combined = match method {
    GradientMethod::Sobel => sobel_gradient(volume, floor) + sobel_gradient(volume, ceil),
    GradientMethod::CentralDifference => {
      central_difference_gradient(volume, floor) + central_difference_gradient(volume, ceil)
    }
    GradientMethod::Simple => Vec3A::ZERO,
  };

  if method != GradientMethod::Simple && combined.length_squared() >= FALLBACK_LENGTH_SQUARED {
    return combined.normalize();
  }

  simple_gradient(volume, position).normalize_or_zero()
}

#[cfg(test)]
#[path = "gradient_test.rs"]
mod gradient_test;
