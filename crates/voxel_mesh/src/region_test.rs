use glam::IVec3;

use super::*;

#[test]
fn test_dimensions() {
  let region = Region::new(IVec3::new(2, 3, 4), IVec3::new(5, 7, 9));
  assert_eq!(region.width(), 4);
  assert_eq!(region.height(), 5);
  assert_eq!(region.depth(), 6);
}

#[test]
fn test_single_voxel_region() {
  let region = Region::new(IVec3::splat(3), IVec3::splat(3));
  assert_eq!(region.width(), 1);
  assert!(region.is_valid());
}

#[test]
fn test_from_dimensions() {
  let region = Region::from_dimensions(16, 8, 4);
  assert_eq!(region.lower, IVec3::ZERO);
  assert_eq!(region.upper, IVec3::new(15, 7, 3));
}

#[test]
fn test_crop_to_overlapping() {
  let mut region = Region::new(IVec3::new(-4, -4, -4), IVec3::new(10, 10, 10));
  region.crop_to(&Region::from_dimensions(8, 8, 8));
  assert_eq!(region.lower, IVec3::ZERO);
  assert_eq!(region.upper, IVec3::splat(7));
  assert!(region.is_valid());
}

#[test]
fn test_crop_to_disjoint_is_invalid() {
  let mut region = Region::new(IVec3::splat(20), IVec3::splat(30));
  region.crop_to(&Region::from_dimensions(8, 8, 8));
  assert!(!region.is_valid());
}

#[test]
fn test_shift() {
  let mut region = Region::from_dimensions(4, 4, 4);
  region.shift(IVec3::new(1, 2, 3));
  assert_eq!(region.lower, IVec3::new(1, 2, 3));
  assert_eq!(region.upper, IVec3::new(4, 5, 6));
}

#[test]
fn test_contains_point() {
  let region = Region::from_dimensions(8, 8, 8);

  assert!(region.contains_point(IVec3::ZERO, 0));
  assert!(region.contains_point(IVec3::splat(7), 0));
  assert!(!region.contains_point(IVec3::splat(8), 0));
  assert!(!region.contains_point(IVec3::new(-1, 0, 0), 0));
}

#[test]
fn test_contains_point_with_boundary() {
  let region = Region::from_dimensions(8, 8, 8);

  assert!(region.contains_point(IVec3::splat(1), 1));
  assert!(region.contains_point(IVec3::splat(6), 1));
  assert!(!region.contains_point(IVec3::ZERO, 1));
  assert!(!region.contains_point(IVec3::splat(7), 1));
}
