use glam::IVec3;

use super::*;

#[test]
fn test_set_and_sample() {
  let mut volume = DenseVolume::new(4, 4, 4);
  volume.set(1, 2, 3, 200);

  assert_eq!(volume.sample(1, 2, 3), 200);
  assert_eq!(volume.sample(0, 0, 0), 0);
}

#[test]
fn test_filled() {
  let volume = DenseVolume::filled(3, 3, 3, 255);
  assert_eq!(volume.sample(0, 0, 0), 255);
  assert_eq!(volume.sample(2, 2, 2), 255);
}

#[test]
fn test_from_fn() {
  let volume = DenseVolume::from_fn(4, 4, 4, |x, y, z| (x + 4 * y + 16 * z) as u8);
  assert_eq!(volume.sample(0, 0, 0), 0);
  assert_eq!(volume.sample(3, 0, 0), 3);
  assert_eq!(volume.sample(0, 1, 0), 4);
  assert_eq!(volume.sample(0, 0, 2), 32);
}

#[test]
fn test_enclosing_region() {
  let volume = DenseVolume::new(8, 4, 2);
  let region = volume.enclosing_region();
  assert_eq!(region.lower, IVec3::ZERO);
  assert_eq!(region.upper, IVec3::new(7, 3, 1));
}

#[test]
fn test_sample_with_bounds_outside_is_zero() {
  let volume = DenseVolume::filled(4, 4, 4, 9);

  assert_eq!(volume.sample_with_bounds(0, 0, 0), 9);
  assert_eq!(volume.sample_with_bounds(-1, 0, 0), 0);
  assert_eq!(volume.sample_with_bounds(4, 0, 0), 0);
  assert_eq!(volume.sample_with_bounds(0, 0, 100), 0);
}

#[test]
fn test_sub_sampled_snaps_to_grid() {
  let volume = DenseVolume::from_fn(8, 8, 8, |x, y, z| {
    if x == 2 && y == 4 && z == 6 {
      77
    } else {
      0
    }
  });

  // Level 1 snaps to even coordinates.
  assert_eq!(volume.sample_sub_sampled(2, 4, 6, 1), 77);
  assert_eq!(volume.sample_sub_sampled(3, 5, 7, 1), 77);
  assert_eq!(volume.sample_sub_sampled(3, 5, 6, 1), 77);
  // Level 2 snaps to multiples of 4: (2,4,6) -> (0,4,4).
  assert_eq!(volume.sample_sub_sampled(2, 4, 6, 2), 0);
}

#[test]
fn test_sub_sampled_level0_matches_sample() {
  let volume = DenseVolume::from_fn(4, 4, 4, |x, _, _| x as u8);
  for x in 0..4 {
    assert_eq!(volume.sample_sub_sampled(x, 1, 1, 0), volume.sample(x, 1, 1));
  }
}

#[test]
fn test_sub_sampled_with_bounds() {
  let volume = DenseVolume::filled(4, 4, 4, 5);

  // (3,3,3) snaps to (2,2,2), inside.
  assert_eq!(volume.sample_sub_sampled_with_bounds(3, 3, 3, 1), 5);
  // (5,0,0) snaps to (4,0,0), outside a 4-wide volume.
  assert_eq!(volume.sample_sub_sampled_with_bounds(5, 0, 0, 1), 0);
}

#[test]
fn test_contains_boundary() {
  let volume = DenseVolume::new(8, 8, 8);
  assert!(volume.contains(IVec3::splat(1), 1));
  assert!(!volume.contains(IVec3::splat(0), 1));
  assert!(!volume.contains(IVec3::splat(7), 1));
}
