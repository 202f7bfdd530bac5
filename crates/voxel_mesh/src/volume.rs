//! Voxel volume access.
//!
//! The extractor and the gradient estimators only ever read voxels through
//! the [`VolumeSampler`] trait, so callers can plug in paged, procedural or
//! compressed storage. [`DenseVolume`] is the batteries-included dense
//! implementation used by the tests and benches.
//!
//! A voxel is an unsigned 8-bit density; a voxel is *solid* iff its value
//! is greater than zero. The value doubles as the material identifier of
//! the solid it belongs to.

use glam::IVec3;

use crate::region::Region;

/// Read access to a bounded 8-bit voxel field.
pub trait VolumeSampler {
  /// Read the voxel at `(x, y, z)`. The coordinate must be inside
  /// [`enclosing_region`](Self::enclosing_region).
  fn sample(&self, x: i32, y: i32, z: i32) -> u8;

  /// The full extent of the volume.
  fn enclosing_region(&self) -> Region;

  /// Read the voxel at `(x, y, z)`, returning 0 outside the volume.
  fn sample_with_bounds(&self, x: i32, y: i32, z: i32) -> u8 {
    if self
      .enclosing_region()
      .contains_point(IVec3::new(x, y, z), 0)
    {
      self.sample(x, y, z)
    } else {
      0
    }
  }

  /// Read the voxel at `(x, y, z)` snapped down to the `1 << level` grid.
  ///
  /// `level == 0` is equivalent to [`sample`](Self::sample). Decimated
  /// extraction uses this so that every read lands on the coarse lattice
  /// regardless of which fine coordinate asked for it.
  fn sample_sub_sampled(&self, x: i32, y: i32, z: i32, level: u8) -> u8 {
    self.sample(
      (x >> level) << level,
      (y >> level) << level,
      (z >> level) << level,
    )
  }

  /// Bounds-checked variant of [`sample_sub_sampled`](Self::sample_sub_sampled);
  /// returns 0 when the snapped coordinate is outside the volume.
  fn sample_sub_sampled_with_bounds(&self, x: i32, y: i32, z: i32, level: u8) -> u8 {
    self.sample_with_bounds(
      (x >> level) << level,
      (y >> level) << level,
      (z >> level) << level,
    )
  }

  /// Check that `point` lies at least `boundary` voxels inside the volume
  /// on every axis.
  fn contains(&self, point: IVec3, boundary: i32) -> bool {
    self.enclosing_region().contains_point(point, boundary)
  }
}

/// Blanket impl so `&V` and boxed samplers work wherever a sampler is
/// expected.
impl<'a, V: VolumeSampler + ?Sized> VolumeSampler for &'a V {
  fn sample(&self, x: i32, y: i32, z: i32) -> u8 {
    (**self).sample(x, y, z)
  }

  fn enclosing_region(&self) -> Region {
    (**self).enclosing_region()
  }
}

/// Dense row-major voxel storage with its lower corner at the origin.
///
/// X is the fastest-varying axis. Intended for tests, benches and small
/// volumes; production callers typically implement [`VolumeSampler`] over
/// their own paged storage.
#[derive(Clone)]
pub struct DenseVolume {
  width: i32,
  height: i32,
  depth: i32,
  data: Box<[u8]>,
}

impl DenseVolume {
  /// Create a zero-filled volume of the given dimensions.
  pub fn new(width: i32, height: i32, depth: i32) -> Self {
    debug_assert!(width > 0 && height > 0 && depth > 0);
    Self {
      width,
      height,
      depth,
      data: vec![0u8; (width * height * depth) as usize].into_boxed_slice(),
    }
  }

  /// Create a volume with every voxel set to `value`.
  pub fn filled(width: i32, height: i32, depth: i32, value: u8) -> Self {
    let mut volume = Self::new(width, height, depth);
    volume.data.fill(value);
    volume
  }

  /// Create a volume by evaluating `f` at every coordinate.
  pub fn from_fn(width: i32, height: i32, depth: i32, mut f: impl FnMut(i32, i32, i32) -> u8) -> Self {
    let mut volume = Self::new(width, height, depth);
    for z in 0..depth {
      for y in 0..height {
        for x in 0..width {
          volume.data[Self::index_for(width, height, x, y, z)] = f(x, y, z);
        }
      }
    }
    volume
  }

  #[inline]
  fn index_for(width: i32, height: i32, x: i32, y: i32, z: i32) -> usize {
    (x + width * (y + height * z)) as usize
  }

  #[inline]
  fn index(&self, x: i32, y: i32, z: i32) -> usize {
    Self::index_for(self.width, self.height, x, y, z)
  }

  /// Write the voxel at `(x, y, z)`. The coordinate must be in bounds.
  pub fn set(&mut self, x: i32, y: i32, z: i32, value: u8) {
    debug_assert!(self.enclosing_region().contains_point(IVec3::new(x, y, z), 0));
    let idx = self.index(x, y, z);
    self.data[idx] = value;
  }
}

impl VolumeSampler for DenseVolume {
  #[inline]
  fn sample(&self, x: i32, y: i32, z: i32) -> u8 {
    debug_assert!(
      self.enclosing_region().contains_point(IVec3::new(x, y, z), 0),
      "sample out of bounds: ({x}, {y}, {z})"
    );
    self.data[self.index(x, y, z)]
  }

  #[inline]
  fn enclosing_region(&self) -> Region {
    Region::from_dimensions(self.width, self.height, self.depth)
  }
}

#[cfg(test)]
#[path = "volume_test.rs"]
mod volume_test;
