use crate::near::{elements_within, Element, Mismatch, NearEq};

#[cfg(test)]
use proptest::prelude::*;

impl<T: Element> NearEq<T> for [Vec<T>] {
  fn near_eq(&self, expected: &Self, tolerance: T) -> Result<(), Mismatch> {
    if self.len() != expected.len() {
      return Err(Mismatch::Size);
    }

    // rows after the first failing row are never looked at
    for (actual_row, expected_row) in self.iter().zip(expected) {
      if actual_row.len() != expected_row.len() {
        return Err(Mismatch::Size);
      }

      elements_within(actual_row, expected_row, tolerance)?;
    }

    Ok(())
  }
}

impl<T: Element> NearEq<T> for Vec<Vec<T>> {
  fn near_eq(&self, expected: &Self, tolerance: T) -> Result<(), Mismatch> {
    self.as_slice().near_eq(expected.as_slice(), tolerance)
  }
}

#[test]
fn nested_outer_size_mismatch() {
  let actual = vec![vec![1.0f64, 2.0], vec![3.0, 4.0]];
  let expected = vec![vec![1.0f64, 2.0]];
  assert_eq!(actual.near_eq(&expected, 1.0), Err(Mismatch::Size));
}

#[test]
fn nested_inner_size_mismatch() {
  let actual = vec![vec![1.0f64, 2.0], vec![3.0, 4.0]];
  let expected = vec![vec![1.0f64, 2.0], vec![3.0]];
  assert_eq!(actual.near_eq(&expected, 1.0), Err(Mismatch::Size));
}

#[test]
fn nested_element_mismatch_in_later_row() {
  let actual = vec![vec![1.0f64, 2.0], vec![3.0, 4.0]];
  let expected = vec![vec![1.0f64, 2.0], vec![3.0, 5.0]];
  assert_eq!(actual.near_eq(&expected, 0.0), Err(Mismatch::Element));
}

#[test]
fn nested_first_failing_row_wins() {
  // row 0 fails on an element, row 1 would fail on size
  let actual = vec![vec![1.0f64, 9.0], vec![3.0, 4.0]];
  let expected = vec![vec![1.0f64, 2.0], vec![3.0]];
  assert_eq!(actual.near_eq(&expected, 0.0), Err(Mismatch::Element));

  // row 0 fails on size, row 1 would fail on an element
  let actual = vec![vec![1.0f64], vec![3.0, 9.0]];
  let expected = vec![vec![1.0f64, 2.0], vec![3.0, 4.0]];
  assert_eq!(actual.near_eq(&expected, 0.0), Err(Mismatch::Size));
}

#[test]
fn nested_ragged_rows_match_when_shapes_agree() {
  let actual = vec![vec![1.0f64], vec![], vec![2.0, 3.0, 4.0]];
  assert_eq!(actual.near_eq(&actual.clone(), 0.0), Ok(()));
}

#[cfg(test)]
proptest! {
#[test]
fn nested_equal_to_itself(
  rows in prop::collection::vec(
    prop::collection::vec(-1e6f64..1e6, 0..8),
    0..8,
  ),
) {
  prop_assert_eq!(rows.near_eq(&rows, 0.0), Ok(()));
}

#[test]
fn nested_dropped_row_element_is_size_mismatch(
  rows in prop::collection::vec(
    prop::collection::vec(-1e6f64..1e6, 1..8),
    1..8,
  ),
  row in 0usize..8,
) {
  let mut truncated = rows.clone();
  let row = row % rows.len();
  truncated[row].pop();
  prop_assert_eq!(rows.near_eq(&truncated, 1e9), Err(Mismatch::Size));
}
}
