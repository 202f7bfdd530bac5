use glam::Vec3A;

use super::*;
use crate::extractor::extract_surface;
use crate::volume::{DenseVolume, VolumeSampler};

/// 2×2×2 volume, lower layer solid: one cell, one quad at z = 0.5.
fn half_solid_fixture() -> DenseVolume {
  DenseVolume::from_fn(2, 2, 2, |_, _, z| if z == 0 { 255 } else { 0 })
}

fn face_normal(mesh: &SurfaceMesh<SurfaceVertex>, tri: &[u32]) -> Vec3A {
  let p0 = Vec3A::from_array(mesh.vertices[tri[0] as usize].position);
  let p1 = Vec3A::from_array(mesh.vertices[tri[1] as usize].position);
  let p2 = Vec3A::from_array(mesh.vertices[tri[2] as usize].position);
  (p1 - p0).cross(p2 - p0).normalize()
}

#[test]
fn test_single_cell_quad() {
  let volume = half_solid_fixture();
  let mesh = extract_surface(&volume, volume.enclosing_region(), 0);

  assert_eq!(mesh.triangle_count(), 2);
  assert_eq!(mesh.vertices.len(), 4);

  for vertex in &mesh.vertices {
    assert_eq!(vertex.position[2], 0.5);
    assert_eq!(vertex.material, 255);
  }
}

#[test]
fn test_quad_references_every_vertex() {
  let volume = half_solid_fixture();
  let mesh = extract_surface(&volume, volume.enclosing_region(), 0);

  let mut used = [false; 4];
  for &index in &mesh.indices {
    assert!((index as usize) < mesh.vertices.len());
    used[index as usize] = true;
  }
  assert!(used.iter().all(|&u| u), "quad should use all four vertices");
}

#[test]
fn test_no_degenerate_triangles() {
  let volume = half_solid_fixture();
  let mesh = extract_surface(&volume, volume.enclosing_region(), 0);

  for tri in mesh.indices.chunks_exact(3) {
    assert!(tri[0] != tri[1] && tri[1] != tri[2] && tri[0] != tri[2]);
  }
}

#[test]
fn test_winding_points_from_solid_to_empty() {
  let volume = half_solid_fixture();
  let mesh = extract_surface(&volume, volume.enclosing_region(), 0);

  // Solid below, empty above: both faces must point +Z.
  for tri in mesh.indices.chunks_exact(3) {
    let normal = face_normal(&mesh, tri);
    assert!(
      normal.z > 0.99,
      "face normal {normal:?} should point toward the empty side"
    );
  }
}

#[test]
fn test_shared_edge_vertices_are_reused() {
  // Two cells side by side over a solid floor: the shared edge vertex
  // must be looked up from the neighbouring cell's grid, not duplicated.
  let volume = DenseVolume::from_fn(3, 2, 2, |_, _, z| if z == 0 { 255 } else { 0 });
  let mesh = extract_surface(&volume, volume.enclosing_region(), 0);

  assert_eq!(mesh.triangle_count(), 4);
  assert_eq!(mesh.vertices.len(), 6);

  // No two vertices may coincide.
  for (i, a) in mesh.vertices.iter().enumerate() {
    for b in &mesh.vertices[i + 1..] {
      assert_ne!(a.position, b.position, "duplicated vertex");
    }
  }
}
