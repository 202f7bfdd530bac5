//! Indexed surface meshes and their vertex types.

use glam::{IVec3, Vec3A};

use crate::region::Region;

/// Behaviour the mesh container and the decimator need from a vertex type.
pub trait MeshVertex: Copy {
  /// Whether this vertex layout stores a per-vertex normal. Drives the
  /// decimator's choice of metadata source and flip-test threshold.
  const HAS_NORMAL: bool;

  fn position(&self) -> Vec3A;

  fn material(&self) -> u8;

  /// The stored normal; meaningless when `HAS_NORMAL` is false.
  fn normal(&self) -> Vec3A;
}

/// Vertex produced by the surface extractor: position, normal and the
/// material of the solid it sits on.
///
/// Positions are region-local single-precision floats; for cell-edge
/// vertices they lie on the owning edge at half the sampling step.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceVertex {
  pub position: [f32; 3],
  pub normal: [f32; 3],
  pub material: u8,
}

impl SurfaceVertex {
  pub fn new(position: [f32; 3], normal: [f32; 3], material: u8) -> Self {
    Self {
      position,
      normal,
      material,
    }
  }
}

impl MeshVertex for SurfaceVertex {
  const HAS_NORMAL: bool = true;

  #[inline]
  fn position(&self) -> Vec3A {
    Vec3A::from_array(self.position)
  }

  #[inline]
  fn material(&self) -> u8 {
    self.material
  }

  #[inline]
  fn normal(&self) -> Vec3A {
    Vec3A::from_array(self.normal)
  }
}

/// Position-material vertex for blocky meshes whose normals are implied by
/// their faces. The decimator reconstructs working normals from adjacent
/// face normals instead.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlatVertex {
  pub position: [f32; 3],
  pub material: u8,
}

impl FlatVertex {
  pub fn new(position: [f32; 3], material: u8) -> Self {
    Self { position, material }
  }
}

impl MeshVertex for FlatVertex {
  const HAS_NORMAL: bool = false;

  #[inline]
  fn position(&self) -> Vec3A {
    Vec3A::from_array(self.position)
  }

  #[inline]
  fn material(&self) -> u8 {
    self.material
  }

  #[inline]
  fn normal(&self) -> Vec3A {
    Vec3A::ZERO
  }
}

/// A contiguous `[begin, end)` range of the index array holding one level
/// of detail. Records partition the index array in order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LodRecord {
  pub begin: u32,
  pub end: u32,
}

/// An indexed triangle mesh covering one region of a volume.
///
/// Produced by the surface extractor, optionally simplified in place by
/// the decimator, uploaded or persisted by the caller.
#[derive(Clone)]
pub struct SurfaceMesh<V: MeshVertex> {
  pub vertices: Vec<V>,
  /// Triangle indices, three per triangle.
  pub indices: Vec<u32>,
  /// The region this mesh was extracted from; vertex positions are
  /// relative to its lower corner.
  pub region: Region,
  pub lod_records: Vec<LodRecord>,
}

impl<V: MeshVertex> Default for SurfaceMesh<V> {
  fn default() -> Self {
    Self::new()
  }
}

impl<V: MeshVertex> SurfaceMesh<V> {
  pub fn new() -> Self {
    Self {
      vertices: Vec::new(),
      indices: Vec::new(),
      region: Region::new(IVec3::ZERO, IVec3::ZERO),
      lod_records: Vec::new(),
    }
  }

  /// Clear all buffers, preserving capacity. The owning region is left
  /// untouched; extraction overwrites it.
  pub fn clear(&mut self) {
    self.vertices.clear();
    self.indices.clear();
    self.lod_records.clear();
  }

  /// Returns true if no geometry is present.
  pub fn is_empty(&self) -> bool {
    self.vertices.is_empty() || self.indices.is_empty()
  }

  /// Append a vertex and return its index.
  #[inline]
  pub fn add_vertex(&mut self, vertex: V) -> u32 {
    let index = self.vertices.len() as u32;
    self.vertices.push(vertex);
    index
  }

  /// Append one triangle.
  #[inline]
  pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
    debug_assert!(
      (i0 as usize) < self.vertices.len()
        && (i1 as usize) < self.vertices.len()
        && (i2 as usize) < self.vertices.len()
    );
    self.indices.extend_from_slice(&[i0, i1, i2]);
  }

  pub fn index_count(&self) -> u32 {
    self.indices.len() as u32
  }

  pub fn triangle_count(&self) -> usize {
    self.indices.len() / 3
  }

  pub fn region(&self) -> Region {
    self.region
  }

  pub fn lod_records(&self) -> &[LodRecord] {
    &self.lod_records
  }

  /// Remove triangles with any two indices equal, compacting in place.
  pub fn remove_degenerate_tris(&mut self) {
    let mut write = 0;
    for read in (0..self.indices.len()).step_by(3) {
      let (a, b, c) = (
        self.indices[read],
        self.indices[read + 1],
        self.indices[read + 2],
      );
      if a != b && b != c && a != c {
        self.indices.copy_within(read..read + 3, write);
        write += 3;
      }
    }
    self.indices.truncate(write);
  }

  /// Drop vertices no triangle references, remapping the index array.
  pub fn remove_unused_vertices(&mut self) {
    let mut used = vec![false; self.vertices.len()];
    for &index in &self.indices {
      used[index as usize] = true;
    }

    let mut remap = vec![u32::MAX; self.vertices.len()];
    let mut write = 0;
    for read in 0..self.vertices.len() {
      if used[read] {
        self.vertices[write] = self.vertices[read];
        remap[read] = write as u32;
        write += 1;
      }
    }
    self.vertices.truncate(write);

    for index in &mut self.indices {
      *index = remap[*index as usize];
    }
  }
}

#[cfg(test)]
#[path = "mesh_test.rs"]
mod mesh_test;
