use std::collections::HashMap;

use glam::{IVec3, Vec3A};

use super::*;
use crate::mesh::LodRecord;
use crate::volume::{DenseVolume, VolumeSampler};

fn sphere_volume(size: i32, radius: f32) -> DenseVolume {
  let center = size as f32 / 2.0;
  DenseVolume::from_fn(size, size, size, |x, y, z| {
    let dx = x as f32 - center;
    let dy = y as f32 - center;
    let dz = z as f32 - center;
    if (dx * dx + dy * dy + dz * dz).sqrt() < radius {
      255
    } else {
      0
    }
  })
}

fn face_normal(mesh: &SurfaceMesh<SurfaceVertex>, tri: &[u32]) -> Vec3A {
  let p0 = Vec3A::from_array(mesh.vertices[tri[0] as usize].position);
  let p1 = Vec3A::from_array(mesh.vertices[tri[1] as usize].position);
  let p2 = Vec3A::from_array(mesh.vertices[tri[2] as usize].position);
  (p1 - p0).cross(p2 - p0).normalize_or_zero()
}

#[test]
fn test_empty_volume_produces_empty_mesh() {
  let volume = DenseVolume::new(8, 8, 8);
  let mesh = extract_surface(&volume, volume.enclosing_region(), 0);

  assert!(mesh.vertices.is_empty());
  assert!(mesh.indices.is_empty());
  assert_eq!(mesh.lod_records, vec![LodRecord { begin: 0, end: 0 }]);
}

#[test]
fn test_region_outside_volume_is_empty_success() {
  let volume = sphere_volume(8, 3.0);
  let region = Region::new(IVec3::splat(20), IVec3::splat(30));
  let mesh = extract_surface(&volume, region, 0);

  assert!(mesh.vertices.is_empty());
  assert_eq!(mesh.lod_records, vec![LodRecord { begin: 0, end: 0 }]);
}

#[test]
fn test_oversized_lod_step_is_empty_success() {
  let volume = sphere_volume(4, 2.0);
  // Step 8 cannot fit a 4-voxel volume once the far-corner margin is
  // reserved.
  let mesh = extract_surface(&volume, volume.enclosing_region(), 3);

  assert!(mesh.vertices.is_empty());
  assert_eq!(mesh.lod_records, vec![LodRecord { begin: 0, end: 0 }]);
}

#[test]
fn test_fully_solid_interior_region_is_empty() {
  // No cell of an interior region has an empty corner, so no surface.
  let volume = DenseVolume::filled(8, 8, 8, 255);
  let region = Region::new(IVec3::splat(1), IVec3::splat(6));
  let mesh = extract_surface(&volume, region, 0);

  assert!(mesh.vertices.is_empty());
  assert!(mesh.indices.is_empty());
}

#[test]
fn test_single_voxel_yields_closed_octahedron() {
  // One solid voxel: each of the eight incident cells is a
  // single-solid-corner configuration contributing one triangle over
  // the six shared edge-midpoint vertices.
  let mut volume = DenseVolume::new(3, 3, 3);
  volume.set(1, 1, 1, 255);
  let mesh = extract_surface(&volume, volume.enclosing_region(), 0);

  assert_eq!(mesh.vertices.len(), 6);
  assert_eq!(mesh.triangle_count(), 8);

  let mut positions: Vec<[f32; 3]> = mesh.vertices.iter().map(|v| v.position).collect();
  positions.sort_by(|a, b| a.partial_cmp(b).unwrap());
  let mut expected = vec![
    [0.5, 1.0, 1.0],
    [1.5, 1.0, 1.0],
    [1.0, 0.5, 1.0],
    [1.0, 1.5, 1.0],
    [1.0, 1.0, 0.5],
    [1.0, 1.0, 1.5],
  ];
  expected.sort_by(|a, b| a.partial_cmp(b).unwrap());
  assert_eq!(positions, expected);

  for vertex in &mesh.vertices {
    assert_eq!(vertex.material, 255);
  }
}

#[test]
fn test_octahedron_is_closed_and_outward() {
  let mut volume = DenseVolume::new(3, 3, 3);
  volume.set(1, 1, 1, 255);
  let mesh = extract_surface(&volume, volume.enclosing_region(), 0);

  // Closed orientable surface: every undirected edge borders exactly
  // two triangles.
  let mut edge_counts: HashMap<(u32, u32), u32> = HashMap::new();
  for tri in mesh.indices.chunks_exact(3) {
    for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
      let key = (a.min(b), a.max(b));
      *edge_counts.entry(key).or_insert(0) += 1;
    }
  }
  assert_eq!(edge_counts.len(), 12);
  assert!(edge_counts.values().all(|&count| count == 2));

  // Winding faces away from the solid voxel.
  let center = Vec3A::splat(1.0);
  for tri in mesh.indices.chunks_exact(3) {
    let centroid = (Vec3A::from_array(mesh.vertices[tri[0] as usize].position)
      + Vec3A::from_array(mesh.vertices[tri[1] as usize].position)
      + Vec3A::from_array(mesh.vertices[tri[2] as usize].position))
      / 3.0;
    assert!(
      face_normal(&mesh, tri).dot(centroid - center) > 0.0,
      "inward-facing triangle {tri:?}"
    );
  }
}

#[test]
fn test_planar_interface() {
  // Solid below z = 4 inside a wider volume; the region is interior in
  // X and Y so the only surface is the plane of quads at z = 3.5.
  let volume = DenseVolume::from_fn(8, 8, 8, |_, _, z| if z < 4 { 255 } else { 0 });
  let region = Region::new(IVec3::new(2, 2, 0), IVec3::new(5, 5, 7));
  let mesh = extract_surface(&volume, region, 0);

  assert_eq!(mesh.vertices.len(), 16);
  assert_eq!(mesh.triangle_count(), 18);

  for vertex in &mesh.vertices {
    assert_eq!(vertex.position[2], 3.5, "all vertices on the interface");
    assert_eq!(vertex.normal, [0.0, 0.0, 1.0]);
    assert_eq!(vertex.material, 255);
  }

  for tri in mesh.indices.chunks_exact(3) {
    let normal = face_normal(&mesh, tri);
    assert!(normal.z > 0.99, "face normal {normal:?} should be +Z");
  }
}

#[test]
fn test_positions_are_region_local() {
  let volume = DenseVolume::from_fn(8, 8, 8, |_, _, z| if z < 4 { 255 } else { 0 });
  let region = Region::new(IVec3::new(2, 2, 0), IVec3::new(5, 5, 7));
  let mesh = extract_surface(&volume, region, 0);

  assert_eq!(mesh.region(), region);
  for vertex in &mesh.vertices {
    assert!(vertex.position[0] >= 0.0 && vertex.position[0] <= 3.0);
    assert!(vertex.position[1] >= 0.0 && vertex.position[1] <= 3.0);
  }
}

#[test]
fn test_extraction_is_deterministic() {
  let volume = sphere_volume(16, 5.0);
  let first = extract_surface(&volume, volume.enclosing_region(), 0);
  let second = extract_surface(&volume, volume.enclosing_region(), 0);

  assert_eq!(first.vertices, second.vertices);
  assert_eq!(first.indices, second.indices);
  assert_eq!(first.lod_records, second.lod_records);
}

#[test]
fn test_no_duplicate_vertices() {
  let volume = sphere_volume(16, 5.0);
  let mesh = extract_surface(&volume, volume.enclosing_region(), 0);
  assert!(!mesh.is_empty());

  let mut seen = std::collections::HashSet::new();
  for vertex in &mesh.vertices {
    let key = vertex.position.map(|c| c.to_bits());
    assert!(seen.insert(key), "duplicate vertex at {:?}", vertex.position);
  }
}

#[test]
fn test_indices_are_valid_and_nondegenerate() {
  let volume = sphere_volume(16, 5.0);
  let mesh = extract_surface(&volume, volume.enclosing_region(), 0);

  assert_eq!(mesh.indices.len() % 3, 0);
  for tri in mesh.indices.chunks_exact(3) {
    assert!(tri[0] != tri[1] && tri[1] != tri[2] && tri[0] != tri[2]);
    for &index in tri {
      assert!((index as usize) < mesh.vertices.len());
    }
  }
}

#[test]
fn test_lod_record_covers_index_array() {
  let volume = sphere_volume(16, 5.0);
  let mesh = extract_surface(&volume, volume.enclosing_region(), 0);

  assert_eq!(
    mesh.lod_records,
    vec![LodRecord {
      begin: 0,
      end: mesh.index_count()
    }]
  );
}

#[test]
fn test_decimated_extraction() {
  let volume = sphere_volume(20, 6.0);
  let full = extract_surface(&volume, volume.enclosing_region(), 0);
  let coarse = extract_surface(&volume, volume.enclosing_region(), 1);

  assert!(!coarse.is_empty());
  assert!(
    coarse.triangle_count() < full.triangle_count(),
    "step-2 sampling must emit fewer triangles ({} vs {})",
    coarse.triangle_count(),
    full.triangle_count()
  );

  // At step 2 every vertex sits on an integer lattice point: cell
  // origins are even, the crossing offset is half a step.
  for vertex in &coarse.vertices {
    for component in vertex.position {
      assert_eq!(component.fract(), 0.0, "off-lattice vertex {:?}", vertex.position);
    }
  }

  for tri in coarse.indices.chunks_exact(3) {
    assert!(tri[0] != tri[1] && tri[1] != tri[2] && tri[0] != tri[2]);
    for &index in tri {
      assert!((index as usize) < coarse.vertices.len());
    }
  }
}

#[test]
fn test_decimated_region_is_contracted() {
  let volume = sphere_volume(20, 6.0);
  let mesh = extract_surface(&volume, volume.enclosing_region(), 1);

  // The upper corner retreats by 2 * step - 1 so the far 2x2x2 corner
  // lookup always has room.
  assert_eq!(mesh.region().upper, IVec3::splat(16));
}

#[test]
fn test_caller_mesh_is_cleared() {
  let volume = sphere_volume(16, 5.0);
  let mut mesh = SurfaceMesh::new();
  SurfaceExtractor::new(&volume).extract(volume.enclosing_region(), &mut mesh);
  let first_len = mesh.vertices.len();

  // Re-extracting into the same storage must not accumulate.
  SurfaceExtractor::new(&volume).extract(volume.enclosing_region(), &mut mesh);
  assert_eq!(mesh.vertices.len(), first_len);
  assert_eq!(mesh.lod_records.len(), 1);
}
