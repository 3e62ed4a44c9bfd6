use crate::near::{elements_within, Element, Mismatch, NearEq};

#[cfg(test)]
use proptest::prelude::*;

// Lengths are part of the type, so there is nothing to size check.

impl<T: Element, const N: usize> NearEq<T> for [T; N] {
  fn near_eq(&self, expected: &Self, tolerance: T) -> Result<(), Mismatch> {
    elements_within(self, expected, tolerance)
  }
}

impl<T: Element, const M: usize, const N: usize> NearEq<T>
  for [[T; N]; M]
{
  fn near_eq(&self, expected: &Self, tolerance: T) -> Result<(), Mismatch> {
    elements_within(
      self.iter().flatten(),
      expected.iter().flatten(),
      tolerance,
    )
  }
}

#[test]
fn fixed_sequence_compare() {
  assert_eq!([1.0f64, 2.0, 3.0].near_eq(&[1.0, 2.0, 3.0], 0.0), Ok(()));
  assert_eq!(
    [1.0f64, 2.0, 3.0].near_eq(&[1.0, 2.0, 3.5], 0.1),
    Err(Mismatch::Element)
  );
  assert_eq!([0.0f32; 0].near_eq(&[], 0.0), Ok(()));
}

#[test]
fn fixed_nested_compare() {
  let actual = [[1.0f64, 2.0], [3.0, 4.0]];
  assert_eq!(actual.near_eq(&[[1.0, 2.0], [3.0, 4.0]], 0.0), Ok(()));
  assert_eq!(
    actual.near_eq(&[[1.0, 2.0], [3.0, 5.0]], 0.0),
    Err(Mismatch::Element)
  );
  assert_eq!(
    actual.near_eq(&[[1.0, 2.1], [3.0, 4.0]], 0.05),
    Err(Mismatch::Element)
  );
}

#[cfg(test)]
proptest! {
#[test]
fn fixed_nested_within_tolerance(
  rows in prop::array::uniform3(prop::array::uniform4(-1e3f64..1e3)),
  tolerance in 0.0f64..1.0,
) {
  let mut shifted = rows;
  for row in shifted.iter_mut() {
    for value in row.iter_mut() {
      *value += tolerance / 2.0;
    }
  }
  prop_assert_eq!(rows.near_eq(&shifted, tolerance), Ok(()));
}
}
