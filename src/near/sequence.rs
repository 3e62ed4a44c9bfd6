use crate::near::{elements_within, Element, Mismatch, NearEq};

#[cfg(test)]
use proptest::prelude::*;

impl<T: Element> NearEq<T> for [T] {
  fn near_eq(&self, expected: &Self, tolerance: T) -> Result<(), Mismatch> {
    if self.len() != expected.len() {
      return Err(Mismatch::Size);
    }

    elements_within(self, expected, tolerance)
  }
}

impl<T: Element> NearEq<T> for Vec<T> {
  fn near_eq(&self, expected: &Self, tolerance: T) -> Result<(), Mismatch> {
    self.as_slice().near_eq(expected.as_slice(), tolerance)
  }
}

#[test]
fn sequence_size_mismatch() {
  assert_eq!(
    vec![1.0f64, 2.0, 3.0].near_eq(&vec![1.0, 2.0], 0.0),
    Err(Mismatch::Size)
  );
  assert_eq!(
    Vec::<f64>::new().near_eq(&vec![1.0], 10.0),
    Err(Mismatch::Size)
  );
}

#[test]
fn sequence_element_mismatch() {
  assert_eq!(
    vec![1.0f64, 2.0, 3.0].near_eq(&vec![1.0, 2.5, 3.0], 0.1),
    Err(Mismatch::Element)
  );
  assert_eq!(
    vec![1.0f64, 2.0, 3.0].near_eq(&vec![1.0, 2.05, 3.0], 0.1),
    Ok(())
  );
}

#[test]
fn empty_sequences_match() {
  assert_eq!(Vec::<f32>::new().near_eq(&Vec::new(), 0.0), Ok(()));
}

#[test]
fn slices_compare_like_vecs() {
  let actual = [1.0f64, 2.0, 3.0, 4.0];
  let expected = [1.0f64, 2.0, 3.0];
  assert_eq!(actual[..3].near_eq(&expected[..], 0.0), Ok(()));
  assert_eq!(actual[..].near_eq(&expected[..], 0.0), Err(Mismatch::Size));
}

#[cfg(test)]
proptest! {
#[test]
fn sequence_equal_to_itself(
  values in prop::collection::vec(-1e6f64..1e6, 0..32),
) {
  prop_assert_eq!(values.near_eq(&values, 0.0), Ok(()));
}

#[test]
fn sequence_length_change_is_size_mismatch(
  values in prop::collection::vec(-1e6f64..1e6, 1..32),
  tolerance in 0.0f64..1e9,
) {
  let shorter = values[..values.len() - 1].to_vec();
  prop_assert_eq!(values.near_eq(&shorter, tolerance), Err(Mismatch::Size));
  prop_assert_eq!(shorter.near_eq(&values, tolerance), Err(Mismatch::Size));
}

#[test]
fn sequence_single_perturbation_is_element_mismatch(
  values in prop::collection::vec(-1e3f64..1e3, 1..32),
  index in 0usize..32,
  offset in 1.0f64..10.0,
) {
  let mut perturbed = values.clone();
  perturbed[index % values.len()] += offset;
  prop_assert_eq!(values.near_eq(&perturbed, 0.5), Err(Mismatch::Element));
}
}
