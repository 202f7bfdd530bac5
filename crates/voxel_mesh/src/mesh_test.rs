use super::*;

fn vertex(x: f32, y: f32, z: f32) -> SurfaceVertex {
  SurfaceVertex::new([x, y, z], [0.0, 0.0, 1.0], 1)
}

fn quad_mesh() -> SurfaceMesh<SurfaceVertex> {
  let mut mesh = SurfaceMesh::new();
  let a = mesh.add_vertex(vertex(0.0, 0.0, 0.0));
  let b = mesh.add_vertex(vertex(1.0, 0.0, 0.0));
  let c = mesh.add_vertex(vertex(1.0, 1.0, 0.0));
  let d = mesh.add_vertex(vertex(0.0, 1.0, 0.0));
  mesh.add_triangle(a, b, c);
  mesh.add_triangle(a, c, d);
  mesh
}

#[test]
fn test_add_vertex_returns_sequential_indices() {
  let mut mesh: SurfaceMesh<SurfaceVertex> = SurfaceMesh::new();
  assert_eq!(mesh.add_vertex(vertex(0.0, 0.0, 0.0)), 0);
  assert_eq!(mesh.add_vertex(vertex(1.0, 0.0, 0.0)), 1);
  assert_eq!(mesh.vertices.len(), 2);
}

#[test]
fn test_counts() {
  let mesh = quad_mesh();
  assert_eq!(mesh.index_count(), 6);
  assert_eq!(mesh.triangle_count(), 2);
  assert!(!mesh.is_empty());
}

#[test]
fn test_clear() {
  let mut mesh = quad_mesh();
  mesh.lod_records.push(LodRecord { begin: 0, end: 6 });
  mesh.clear();
  assert!(mesh.is_empty());
  assert!(mesh.lod_records.is_empty());
}

#[test]
fn test_remove_degenerate_tris() {
  let mut mesh = quad_mesh();
  mesh.add_triangle(0, 0, 1);
  mesh.add_triangle(2, 3, 3);
  assert_eq!(mesh.triangle_count(), 4);

  mesh.remove_degenerate_tris();
  assert_eq!(mesh.triangle_count(), 2);
  assert_eq!(&mesh.indices, &[0, 1, 2, 0, 2, 3]);
}

#[test]
fn test_remove_degenerate_tris_is_idempotent() {
  let mut mesh = quad_mesh();
  mesh.add_triangle(1, 1, 2);
  mesh.remove_degenerate_tris();
  let once = mesh.indices.clone();
  mesh.remove_degenerate_tris();
  assert_eq!(mesh.indices, once);
}

#[test]
fn test_remove_unused_vertices() {
  let mut mesh = SurfaceMesh::new();
  let _unused0 = mesh.add_vertex(vertex(9.0, 9.0, 9.0));
  let a = mesh.add_vertex(vertex(0.0, 0.0, 0.0));
  let b = mesh.add_vertex(vertex(1.0, 0.0, 0.0));
  let _unused1 = mesh.add_vertex(vertex(8.0, 8.0, 8.0));
  let c = mesh.add_vertex(vertex(0.0, 1.0, 0.0));
  mesh.add_triangle(a, b, c);

  mesh.remove_unused_vertices();

  assert_eq!(mesh.vertices.len(), 3);
  assert_eq!(&mesh.indices, &[0, 1, 2]);
  assert_eq!(mesh.vertices[0].position, [0.0, 0.0, 0.0]);
  assert_eq!(mesh.vertices[2].position, [0.0, 1.0, 0.0]);
}

#[test]
fn test_remove_unused_keeps_all_when_all_used() {
  let mut mesh = quad_mesh();
  let before = mesh.vertices.clone();
  mesh.remove_unused_vertices();
  assert_eq!(mesh.vertices, before);
}

#[test]
fn test_flat_vertex_has_no_normal() {
  assert!(!FlatVertex::HAS_NORMAL);
  assert!(SurfaceVertex::HAS_NORMAL);

  let v = FlatVertex::new([1.0, 2.0, 3.0], 7);
  assert_eq!(v.material(), 7);
  assert_eq!(v.normal(), glam::Vec3A::ZERO);
}
