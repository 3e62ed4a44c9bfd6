use crate::near::{within, Element, Mismatch, NearEq};
use nalgebra::storage::Storage;
use nalgebra::{Dim, Matrix, Scalar};

#[cfg(test)]
use nalgebra::{DMatrix, Matrix2x3};
#[cfg(test)]
use proptest::prelude::*;

/// Row-major scan for the first out of tolerance entry. Shapes are checked
/// first, so `Err(Shape)` wins over any element mismatch.
pub fn locate_mismatch<T, R, C, S>(
  actual: &Matrix<T, R, C, S>,
  expected: &Matrix<T, R, C, S>,
  tolerance: T,
) -> Result<(), Mismatch>
where
  T: Element + Scalar,
  R: Dim,
  C: Dim,
  S: Storage<T, R, C>,
{
  if actual.shape() != expected.shape() {
    return Err(Mismatch::Shape);
  }

  let (rows, cols) = actual.shape();

  for row in 0..rows {
    for col in 0..cols {
      if !within(actual[(row, col)], expected[(row, col)], tolerance) {
        return Err(Mismatch::ElementAt { row, col });
      }
    }
  }

  Ok(())
}

impl<T, R, C, S> NearEq<T> for Matrix<T, R, C, S>
where
  T: Element + Scalar,
  R: Dim,
  C: Dim,
  S: Storage<T, R, C>,
{
  fn near_eq(&self, expected: &Self, tolerance: T) -> Result<(), Mismatch> {
    locate_mismatch(self, expected, tolerance).map_err(|mismatch| {
      match mismatch {
        Mismatch::ElementAt { .. } => Mismatch::Element,
        other => other,
      }
    })
  }
}

#[test]
fn matrix_shape_mismatch() {
  let actual = DMatrix::<f64>::zeros(2, 3);
  let expected = DMatrix::<f64>::zeros(3, 2);
  assert_eq!(actual.near_eq(&expected, 1.0), Err(Mismatch::Shape));
  assert_eq!(
    locate_mismatch(&actual, &expected, 1.0),
    Err(Mismatch::Shape)
  );
}

#[test]
fn matrix_element_location_is_row_major() {
  let actual = Matrix2x3::new(1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0);
  // (0, 2) and (1, 0) both differ; row-major order reports (0, 2) first
  let expected = Matrix2x3::new(1.0f64, 2.0, 3.5, 4.5, 5.0, 6.0);
  assert_eq!(
    locate_mismatch(&actual, &expected, 0.1),
    Err(Mismatch::ElementAt { row: 0, col: 2 })
  );
  assert_eq!(actual.near_eq(&expected, 0.1), Err(Mismatch::Element));
  assert_eq!(actual.near_eq(&expected, 0.5), Ok(()));
}

#[test]
fn matrix_from_rows() {
  let actual = DMatrix::from_row_slice(2, 2, &[1.0f64, 2.0, 3.0, 4.0]);
  let expected = DMatrix::from_row_slice(2, 2, &[1.0f64, 2.0, 3.0, 5.0]);
  assert_eq!(
    locate_mismatch(&actual, &expected, 0.0),
    Err(Mismatch::ElementAt { row: 1, col: 1 })
  );
}

#[cfg(test)]
proptest! {
#[test]
fn matrix_single_perturbation_is_located(
  rows in 1usize..6,
  cols in 1usize..6,
  row in 0usize..6,
  col in 0usize..6,
  offset in 1.0f64..10.0,
) {
  let (row, col) = (row % rows, col % cols);
  let actual =
    DMatrix::<f64>::from_fn(rows, cols, |i, j| (i * cols + j) as f64);
  let mut expected = actual.clone();
  expected[(row, col)] += offset;
  prop_assert_eq!(
    locate_mismatch(&actual, &expected, 0.5),
    Err(Mismatch::ElementAt { row, col })
  );
}
}
