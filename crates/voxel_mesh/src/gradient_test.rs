use glam::{IVec3, Vec3A};

use super::*;
use crate::volume::DenseVolume;

/// 8³ volume, solid below z = 4.
fn half_space() -> DenseVolume {
  DenseVolume::from_fn(8, 8, 8, |_, _, z| if z < 4 { 255 } else { 0 })
}

fn assert_close(actual: Vec3A, expected: Vec3A) {
  assert!(
    (actual - expected).length() < 1e-5,
    "expected {expected:?}, got {actual:?}"
  );
}

#[test]
fn test_central_difference_points_out_of_the_solid() {
  let volume = half_space();
  // At the last solid layer the +Z neighbour is empty.
  assert_close(
    central_difference_gradient(&volume, IVec3::new(4, 4, 3)),
    Vec3A::new(0.0, 0.0, 1.0),
  );
}

#[test]
fn test_central_difference_is_zero_in_homogeneous_interior() {
  let volume = half_space();
  assert_close(
    central_difference_gradient(&volume, IVec3::new(4, 4, 1)),
    Vec3A::ZERO,
  );
}

#[test]
fn test_sobel_points_out_of_the_solid() {
  let volume = half_space();
  let gradient = sobel_gradient(&volume, IVec3::new(4, 4, 3));
  assert!(gradient.z > 0.0);
  assert_eq!(gradient.x, 0.0);
  assert_eq!(gradient.y, 0.0);
}

#[test]
fn test_sobel_weighs_full_neighbourhood() {
  let volume = half_space();
  // Every (u, v) term contributes weight * 1 on the Z axis: total 26.
  let gradient = sobel_gradient(&volume, IVec3::new(4, 4, 3));
  assert_close(gradient, Vec3A::new(0.0, 0.0, 26.0));
}

#[test]
fn test_simple_gradient_on_edge_midpoint() {
  let volume = half_space();
  // Vertex position the extractor would emit for the z = 3 / z = 4 edge.
  assert_close(
    simple_gradient(&volume, Vec3A::new(4.0, 4.0, 3.5)),
    Vec3A::new(0.0, 0.0, 1.0),
  );
}

#[test]
fn test_simple_gradient_integer_position_is_zero() {
  let volume = half_space();
  assert_close(simple_gradient(&volume, Vec3A::new(4.0, 4.0, 3.0)), Vec3A::ZERO);
}

#[test]
fn test_compute_normal_central_difference() {
  let volume = half_space();
  let normal = compute_normal(
    &volume,
    Vec3A::new(4.0, 4.0, 3.5),
    GradientMethod::CentralDifference,
  );
  assert_close(normal, Vec3A::new(0.0, 0.0, 1.0));
}

#[test]
fn test_compute_normal_sobel() {
  let volume = half_space();
  let normal = compute_normal(&volume, Vec3A::new(4.0, 4.0, 3.5), GradientMethod::Sobel);
  assert_close(normal, Vec3A::new(0.0, 0.0, 1.0));
}

#[test]
fn test_compute_normal_off_axis_average() {
  let volume = half_space();
  // An X-edge vertex right under the interface: the two bracketing
  // corners still agree on +Z.
  let normal = compute_normal(
    &volume,
    Vec3A::new(3.5, 4.0, 3.0),
    GradientMethod::CentralDifference,
  );
  assert_close(normal, Vec3A::new(0.0, 0.0, 1.0));
}

#[test]
fn test_compute_normal_falls_back_near_boundary() {
  let volume = half_space();
  // Too close to the volume edge for a kernel apron; the one-sided
  // fallback still finds the interface.
  let normal = compute_normal(
    &volume,
    Vec3A::new(0.0, 0.0, 3.5),
    GradientMethod::CentralDifference,
  );
  assert_close(normal, Vec3A::new(0.0, 0.0, 1.0));
}

#[test]
fn test_compute_normal_degenerate_is_zero() {
  let volume = DenseVolume::filled(8, 8, 8, 255);
  let normal = compute_normal(&volume, Vec3A::new(4.0, 4.0, 4.5), GradientMethod::Sobel);
  assert_close(normal, Vec3A::ZERO);
}
