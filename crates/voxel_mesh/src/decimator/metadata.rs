//! Vertex classification data for the decimator.

use glam::Vec3A;

use crate::region::Region;

/// How close a vertex must be to a region face to count as lying on it.
const FACE_EPSILON: f32 = 1e-3;

/// One bit per axis-aligned face of the owning region.
///
/// A vertex on a region face may only collapse onto a vertex that lies on
/// at least the same faces, so shared faces of independently meshed
/// neighbouring regions simplify identically.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(super) struct FaceFlags(u8);

impl FaceFlags {
  const NEG_X: u8 = 1 << 0;
  const POS_X: u8 = 1 << 1;
  const NEG_Y: u8 = 1 << 2;
  const POS_Y: u8 = 1 << 3;
  const NEG_Z: u8 = 1 << 4;
  const POS_Z: u8 = 1 << 5;

  /// Classify a region-local position against the region's six faces.
  pub fn classify(position: Vec3A, region: Region) -> Self {
    // Work in region-local space: faces at zero and at upper - lower.
    let size = region.upper - region.lower;
    let extent = Vec3A::new(size.x as f32, size.y as f32, size.z as f32);

    let mut bits = 0u8;
    if position.x < FACE_EPSILON {
      bits |= Self::NEG_X;
    }
    if position.x > extent.x - FACE_EPSILON {
      bits |= Self::POS_X;
    }
    if position.y < FACE_EPSILON {
      bits |= Self::NEG_Y;
    }
    if position.y > extent.y - FACE_EPSILON {
      bits |= Self::POS_Y;
    }
    if position.z < FACE_EPSILON {
      bits |= Self::NEG_Z;
    }
    if position.z > extent.z - FACE_EPSILON {
      bits |= Self::POS_Z;
    }
    Self(bits)
  }

  #[inline]
  pub fn any(self) -> bool {
    self.0 != 0
  }

  /// True when every face this vertex lies on also holds `other`.
  ///
  /// Face vertices may collapse onto edge vertices and edge vertices onto
  /// corner vertices, never the reverse.
  #[inline]
  pub fn is_subset_of(self, other: FaceFlags) -> bool {
    self.0 & !other.0 == 0
  }
}

/// Per-vertex classification, rebuilt at the start of every pass.
#[derive(Clone, Debug, Default)]
pub(super) struct VertexMetadata {
  /// Working normal: the stored vertex normal, or for position-material
  /// meshes the normalised sum of adjacent face normals.
  pub normal: Vec3A,
  /// Set when the vertex borders more than one material.
  pub on_material_edge: bool,
  /// Region faces the vertex lies on.
  pub region_faces: FaceFlags,
}

#[cfg(test)]
#[path = "metadata_test.rs"]
mod metadata_test;
