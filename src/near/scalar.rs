use crate::near::{Mismatch, NearEq};
use num_traits::Zero;
use std::ops::Sub;

#[cfg(test)]
use proptest::prelude::*;

/// Numeric element the checker compares: integers, unsigned integers and
/// floats alike.
pub trait Element: Copy + PartialOrd + Sub<Output = Self> + Zero {}

impl<T: Copy + PartialOrd + Sub<Output = T> + Zero> Element for T {}

/// `|actual - expected| <= tolerance`. The larger value is always the
/// minuend, so unsigned types never underflow. NaN on either side never
/// matches, and a negative tolerance rejects every pair.
pub fn within<T: Element>(actual: T, expected: T, tolerance: T) -> bool {
  let gap = if actual >= expected {
    actual - expected
  } else {
    expected - actual
  };

  gap <= tolerance
}

impl<T: Element> NearEq<T> for T {
  fn near_eq(&self, expected: &Self, tolerance: T) -> Result<(), Mismatch> {
    if within(*self, *expected, tolerance) {
      Ok(())
    } else {
      Err(Mismatch::Value)
    }
  }
}

#[test]
fn scalar_within_tolerance() {
  assert_eq!(1.001f64.near_eq(&1.0, 0.01), Ok(()));
  assert_eq!(1.02f64.near_eq(&1.0, 0.01), Err(Mismatch::Value));
  assert_eq!((-3.0f32).near_eq(&-3.0, 0.0), Ok(()));
}

#[test]
fn scalar_boundary_is_inclusive() {
  assert!(within(1.5f64, 1.0, 0.5));
  assert!(within(1.0f64, 1.5, 0.5));
  assert!(!within(1.5f64, 1.0, 0.25));
}

#[test]
fn scalar_negative_tolerance_rejects_everything() {
  assert!(!within(1.0f64, 1.0, -1.0));
  assert!(!within(2.0f64, 1.0, -1.0));
}

#[test]
fn scalar_integers() {
  assert!(within(3i32, 5, 2));
  assert!(!within(3i32, 6, 2));
  assert!(within(-4i64, 4, 8));
  assert_eq!(7i32.near_eq(&7, 0), Ok(()));
  assert_eq!(7i32.near_eq(&8, 0), Err(Mismatch::Value));
}

#[test]
fn scalar_unsigned_does_not_underflow() {
  assert!(within(0u8, 255, 255));
  assert!(!within(0u8, 255, 254));
  assert!(!within(10u32, 3, 6));
  assert!(within(3u32, 10, 7));
}

#[test]
fn scalar_nan_never_matches() {
  assert!(!within(std::f64::NAN, 1.0, 1e9));
  assert!(!within(std::f64::NAN, std::f64::NAN, 1e9));
  assert!(!within(1.0f64, std::f64::NAN, 1e9));
}

#[cfg(test)]
proptest! {
#[test]
fn scalar_matches_abs_difference(
  actual in -1e6f64..1e6,
  expected in -1e6f64..1e6,
  tolerance in 0.0f64..1e3,
) {
  let result = actual.near_eq(&expected, tolerance);
  if (actual - expected).abs() <= tolerance {
    prop_assert_eq!(result, Ok(()));
  } else {
    prop_assert_eq!(result, Err(Mismatch::Value));
  }
}

#[test]
fn scalar_is_symmetric(
  actual in -1e6f64..1e6,
  expected in -1e6f64..1e6,
  tolerance in 0.0f64..1e3,
) {
  prop_assert_eq!(
    within(actual, expected, tolerance),
    within(expected, actual, tolerance)
  );
}
}
