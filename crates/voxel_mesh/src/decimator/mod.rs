//! Iterative edge-collapse mesh simplification.
//!
//! The decimator repeatedly runs single-edge-collapse passes over a mesh
//! until a pass yields no collapses:
//!
//! 1. Build connectivity: face normals per triangle, incident-triangle
//!    lists per vertex (flat arrays indexed by vertex id).
//! 2. Classify vertices: region-face flags, material-edge flag, working
//!    normal.
//! 3. Attempt the three directed edges of every triangle. A collapse of
//!    `src -> dst` records `src` in the vertex mapper and locks both ends
//!    for the rest of the pass.
//! 4. Rewrite the index array through the mapper and drop degenerate
//!    triangles.
//!
//! A collapse must satisfy every applicable constraint:
//!
//! - a source vertex on a material edge never collapses;
//! - a source vertex on a region face only collapses onto a vertex lying
//!   on at least the same faces, and only when both normals agree to
//!   within `0.999` (independently meshed neighbour regions must simplify
//!   their shared face identically);
//! - the vertex normals must agree to the caller's threshold, and no
//!   triangle incident on the source may have its face normal swing past
//!   the threshold when the source is substituted (this catches folds and
//!   holes the aggregate normal misses).
//!
//! Termination is guaranteed: every successful collapse locks two
//! vertices, locks reset only between passes, and the loop exits on the
//! first pass without a collapse.

mod metadata;

use glam::Vec3A;
use smallvec::SmallVec;

use self::metadata::{FaceFlags, VertexMetadata};
use crate::mesh::{LodRecord, MeshVertex, SurfaceMesh};

/// Normal agreement required to collapse along a region face, and for the
/// face-flip test of meshes without stored normals. Tight enough to only
/// admit floating-point error, not actual movement.
const STRICT_NORMAL_TOLERANCE: f32 = 0.999;

/// A triangle of the working mesh with its face normal.
struct TriangleData {
  v0: u32,
  v1: u32,
  v2: u32,
  normal: Vec3A,
}

/// Edge-collapse simplifier over a [`SurfaceMesh`].
///
/// The input is copied into `output` at construction; every pass mutates
/// the output in place. `edge_collapse_threshold` is the minimum dot
/// product between vertex normals for a collapse: `1.0` disables
/// collapsing entirely, `0.0` lets any pair of normals collapse.
pub struct MeshDecimator<'a, V: MeshVertex> {
  mesh: &'a mut SurfaceMesh<V>,
  min_dot_for_collapse: f32,
  triangles: Vec<TriangleData>,
  triangles_using_vertex: Vec<SmallVec<[u32; 6]>>,
  metadata: Vec<VertexMetadata>,
  vertex_mapper: Vec<u32>,
  vertex_locked: Vec<bool>,
}

impl<'a, V: MeshVertex> MeshDecimator<'a, V> {
  /// Copy `input` into `output` and prepare to decimate it.
  pub fn new(
    input: &SurfaceMesh<V>,
    output: &'a mut SurfaceMesh<V>,
    edge_collapse_threshold: f32,
  ) -> Self {
    output.clone_from(input);
    Self {
      mesh: output,
      min_dot_for_collapse: edge_collapse_threshold,
      triangles: Vec::new(),
      triangles_using_vertex: Vec::new(),
      metadata: Vec::new(),
      vertex_mapper: Vec::new(),
      vertex_locked: Vec::new(),
    }
  }

  /// Run collapse passes until one yields nothing.
  ///
  /// If any collapse happened, unreferenced vertices are dropped and the
  /// LOD records are reset to a single record spanning the index array;
  /// otherwise the output is left identical to the input.
  #[cfg_attr(
    feature = "tracing",
    tracing::instrument(skip_all, name = "decimator::execute")
  )]
  pub fn execute(&mut self) {
    if self.mesh.vertices.is_empty() || self.mesh.indices.is_empty() {
      return;
    }
    if self.min_dot_for_collapse >= 1.0 {
      return;
    }

    let mut total_collapsed = 0u32;
    loop {
      self.build_connectivity();
      self.fill_vertex_metadata();

      let collapsed = self.perform_pass();
      if collapsed == 0 {
        break;
      }
      total_collapsed += collapsed;
      self.mesh.remove_degenerate_tris();
    }

    if total_collapsed > 0 {
      self.mesh.remove_unused_vertices();

      // The collapse invalidated any recorded LOD ranges.
      self.mesh.lod_records.clear();
      self.mesh.lod_records.push(LodRecord {
        begin: 0,
        end: self.mesh.index_count(),
      });
    }
  }

  /// Rebuild triangle data and the vertex -> triangles map.
  fn build_connectivity(&mut self) {
    self.triangles.clear();
    self.triangles.reserve(self.mesh.indices.len() / 3);
    for tri in self.mesh.indices.chunks_exact(3) {
      let p0 = self.mesh.vertices[tri[0] as usize].position();
      let p1 = self.mesh.vertices[tri[1] as usize].position();
      let p2 = self.mesh.vertices[tri[2] as usize].position();

      self.triangles.push(TriangleData {
        v0: tri[0],
        v1: tri[1],
        v2: tri[2],
        normal: (p1 - p0).cross(p2 - p0).normalize_or_zero(),
      });
    }

    self.triangles_using_vertex.clear();
    self
      .triangles_using_vertex
      .resize(self.mesh.vertices.len(), SmallVec::new());
    for (index, tri) in self.triangles.iter().enumerate() {
      self.triangles_using_vertex[tri.v0 as usize].push(index as u32);
      self.triangles_using_vertex[tri.v1 as usize].push(index as u32);
      self.triangles_using_vertex[tri.v2 as usize].push(index as u32);
    }
  }

  /// Classify every vertex for this pass.
  fn fill_vertex_metadata(&mut self) {
    let vertices = &self.mesh.vertices;

    self.metadata.clear();
    self.metadata.resize(vertices.len(), VertexMetadata::default());

    // Region-local face flags; positions are already relative to the
    // region's lower corner.
    for (vertex, meta) in vertices.iter().zip(&mut self.metadata) {
      meta.region_faces = FaceFlags::classify(vertex.position(), self.mesh.region);
    }

    // Working normal.
    if V::HAS_NORMAL {
      for (vertex, meta) in vertices.iter().zip(&mut self.metadata) {
        meta.normal = vertex.normal();
      }
    } else {
      for (index, meta) in self.metadata.iter_mut().enumerate() {
        let sum: Vec3A = self.triangles_using_vertex[index]
          .iter()
          .map(|&tri| self.triangles[tri as usize].normal)
          .sum();
        meta.normal = sum.normalize_or_zero();
      }
    }

    // A triangle whose three vertices do not all share one material puts
    // all three on a material edge.
    for tri in &self.triangles {
      let m0 = vertices[tri.v0 as usize].material();
      let m1 = vertices[tri.v1 as usize].material();
      let m2 = vertices[tri.v2 as usize].material();
      if m0 != m1 || m1 != m2 {
        self.metadata[tri.v0 as usize].on_material_edge = true;
        self.metadata[tri.v1 as usize].on_material_edge = true;
        self.metadata[tri.v2 as usize].on_material_edge = true;
      }
    }

    // Meshes without stored normals keep coincident vertices apart by
    // treating duplicated positions as material edges. Sorting an
    // integer projection (z-major, then y, then x) makes duplicates
    // adjacent.
    if !V::HAS_NORMAL {
      let mut projected: Vec<(i32, i32, i32, u32)> = vertices
        .iter()
        .enumerate()
        .map(|(index, vertex)| {
          let p = vertex.position();
          (p.z as i32, p.y as i32, p.x as i32, index as u32)
        })
        .collect();
      projected.sort_unstable();

      for pair in projected.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if a.0 == b.0 && a.1 == b.1 && a.2 == b.2 {
          self.metadata[a.3 as usize].on_material_edge = true;
          self.metadata[b.3 as usize].on_material_edge = true;
        }
      }
    }
  }

  /// One collapse pass. Returns the number of edges collapsed.
  fn perform_pass(&mut self) -> u32 {
    let vertex_count = self.mesh.vertices.len();

    self.vertex_mapper.clear();
    self.vertex_mapper.extend(0..vertex_count as u32);
    self.vertex_locked.clear();
    self.vertex_locked.resize(vertex_count, false);

    let mut collapsed = 0u32;
    for tri in 0..self.triangles.len() {
      let (v0, v1, v2) = {
        let t = &self.triangles[tri];
        (t.v0, t.v1, t.v2)
      };

      collapsed += self.attempt_edge_collapse(v0, v1) as u32;
      collapsed += self.attempt_edge_collapse(v1, v2) as u32;
      collapsed += self.attempt_edge_collapse(v2, v0) as u32;
    }

    if collapsed > 0 {
      for index in &mut self.mesh.indices {
        *index = self.vertex_mapper[*index as usize];
      }
    }

    collapsed
  }

  /// Try to collapse `src` onto `dst`.
  fn attempt_edge_collapse(&mut self, src: u32, dst: u32) -> bool {
    // A locked vertex already took part in a collapse this pass.
    if self.vertex_locked[src as usize] || self.vertex_locked[dst as usize] {
      return false;
    }

    if !self.can_collapse_edge(src, dst) {
      return false;
    }

    self.vertex_mapper[src as usize] = dst;
    self.vertex_locked[src as usize] = true;
    self.vertex_locked[dst as usize] = true;
    true
  }

  fn can_collapse_edge(&self, src: u32, dst: u32) -> bool {
    if self.metadata[src as usize].on_material_edge && !self.can_collapse_material_edge(src, dst)
    {
      return false;
    }

    if self.metadata[src as usize].region_faces.any() && !self.can_collapse_region_edge(src, dst)
    {
      return false;
    }

    self.can_collapse_normal_edge(src, dst)
  }

  /// Material edges are rigid.
  fn can_collapse_material_edge(&self, _src: u32, _dst: u32) -> bool {
    false
  }

  fn can_collapse_region_edge(&self, src: u32, dst: u32) -> bool {
    let src_meta = &self.metadata[src as usize];
    let dst_meta = &self.metadata[dst as usize];

    if !src_meta.region_faces.is_subset_of(dst_meta.region_faces) {
      return false;
    }

    // The caller's threshold does not apply on region faces; only
    // floating-point disagreement is tolerated, so the neighbouring
    // region's mesh collapses the same edge the same way.
    src_meta.normal.dot(dst_meta.normal) >= STRICT_NORMAL_TOLERANCE
  }

  fn can_collapse_normal_edge(&self, src: u32, dst: u32) -> bool {
    if V::HAS_NORMAL {
      let dot = self.metadata[src as usize]
        .normal
        .dot(self.metadata[dst as usize].normal);
      if dot < self.min_dot_for_collapse {
        return false;
      }
      !self.collapse_changes_face_normals(src, dst, self.min_dot_for_collapse)
    } else {
      // No stored normal to compare: face vertices may slide onto edge
      // vertices freely, so only the flip test stands between a flat
      // mesh and a fold.
      !self.collapse_changes_face_normals(src, dst, STRICT_NORMAL_TOLERANCE)
    }
  }

  /// Would replacing `src` with `dst` swing any incident face normal past
  /// `threshold`?
  ///
  /// Positions are read through the vertex mapper: neighbours may already
  /// have moved earlier in this pass.
  fn collapse_changes_face_normals(&self, src: u32, dst: u32, threshold: f32) -> bool {
    let indices = &self.mesh.indices;
    let vertices = &self.mesh.vertices;

    for &tri in &self.triangles_using_vertex[src as usize] {
      let base = tri as usize * 3;
      let old = [indices[base], indices[base + 1], indices[base + 2]];
      if old[0] == old[1] || old[1] == old[2] || old[2] == old[0] {
        continue;
      }

      let new = old.map(|v| if v == src { dst } else { v });
      if new[0] == new[1] || new[1] == new[2] || new[2] == new[0] {
        // The triangle disappears in this collapse; nothing to flip.
        continue;
      }

      let position = |v: u32| vertices[self.vertex_mapper[v as usize] as usize].position();

      let old_pos = old.map(position);
      let new_pos = new.map(position);

      let old_normal =
        (old_pos[1] - old_pos[0]).cross(old_pos[2] - old_pos[1]).normalize_or_zero();
      let new_normal =
        (new_pos[1] - new_pos[0]).cross(new_pos[2] - new_pos[1]).normalize_or_zero();

      if old_normal.dot(new_normal) < threshold {
        return true;
      }
    }

    false
  }
}

/// One-shot convenience wrapper around [`MeshDecimator`].
pub fn decimate<V: MeshVertex>(
  input: &SurfaceMesh<V>,
  output: &mut SurfaceMesh<V>,
  edge_collapse_threshold: f32,
) {
  MeshDecimator::new(input, output, edge_collapse_threshold).execute();
}
