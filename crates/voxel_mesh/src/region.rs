//! Axis-aligned integer regions of a voxel volume.

use glam::IVec3;

/// An axis-aligned box of voxels, identified by its inclusive lower and
/// upper corners.
///
/// A region with `lower == upper` contains exactly one voxel; `width()`
/// etc. therefore count `upper - lower + 1` samples per axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
  /// Minimum corner (inclusive).
  pub lower: IVec3,
  /// Maximum corner (inclusive).
  pub upper: IVec3,
}

impl Region {
  /// Create a region from inclusive corners.
  ///
  /// # Panics
  /// Debug-asserts that `lower <= upper` on all axes.
  pub fn new(lower: IVec3, upper: IVec3) -> Self {
    debug_assert!(
      lower.x <= upper.x && lower.y <= upper.y && lower.z <= upper.z,
      "region lower must be <= upper on all axes"
    );
    Self { lower, upper }
  }

  /// Region covering `[0, dim - 1]` on each axis.
  pub fn from_dimensions(width: i32, height: i32, depth: i32) -> Self {
    Self::new(IVec3::ZERO, IVec3::new(width - 1, height - 1, depth - 1))
  }

  /// Number of voxels along X (inclusive corners, so `upper - lower + 1`).
  #[inline]
  pub fn width(&self) -> i32 {
    self.upper.x - self.lower.x + 1
  }

  /// Number of voxels along Y.
  #[inline]
  pub fn height(&self) -> i32 {
    self.upper.y - self.lower.y + 1
  }

  /// Number of voxels along Z.
  #[inline]
  pub fn depth(&self) -> i32 {
    self.upper.z - self.lower.z + 1
  }

  /// True when the corners are ordered on every axis.
  ///
  /// Cropping against a disjoint region can produce an inverted (empty)
  /// result; callers test this before iterating.
  #[inline]
  pub fn is_valid(&self) -> bool {
    self.lower.x <= self.upper.x && self.lower.y <= self.upper.y && self.lower.z <= self.upper.z
  }

  /// Clip this region to the intersection with `other`.
  ///
  /// The result may be invalid when the regions are disjoint.
  pub fn crop_to(&mut self, other: &Region) {
    self.lower = self.lower.max(other.lower);
    self.upper = self.upper.min(other.upper);
  }

  /// Translate both corners by `amount`.
  pub fn shift(&mut self, amount: IVec3) {
    self.lower += amount;
    self.upper += amount;
  }

  /// Check whether `point` lies at least `boundary` voxels inside the
  /// region on every axis.
  #[inline]
  pub fn contains_point(&self, point: IVec3, boundary: i32) -> bool {
    point.x >= self.lower.x + boundary
      && point.x <= self.upper.x - boundary
      && point.y >= self.lower.y + boundary
      && point.y <= self.upper.y - boundary
      && point.z >= self.lower.z + boundary
      && point.z <= self.upper.z - boundary
  }
}

#[cfg(test)]
#[path = "region_test.rs"]
mod region_test;
