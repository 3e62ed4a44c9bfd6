pub mod fixed;
pub mod matrix;
pub mod nested;
pub mod scalar;
pub mod sequence;

pub use scalar::{within, Element};

/// Why a comparison failed. Only the first mismatch of a comparison is
/// reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mismatch {
  Value,
  Size,
  Shape,
  Element,
  ElementAt { row: usize, col: usize },
}

impl Mismatch {
  /// Text appended to the failure message, if any. A plain scalar failure
  /// only prints the message.
  pub fn detail(&self) -> Option<String> {
    match self {
      Mismatch::Value => None,
      Mismatch::Size => Some("Size mismatch.".to_owned()),
      Mismatch::Shape => Some("Shape mismatch.".to_owned()),
      Mismatch::Element => Some("Element mismatch.".to_owned()),
      Mismatch::ElementAt { row, col } => {
        Some(format!("Element mismatch at ({}, {}).", row, col))
      }
    }
  }
}

/// A shape of numeric data that can be compared against another value of the
/// same shape, element by element, within an absolute tolerance.
pub trait NearEq<T: Element> {
  fn near_eq(&self, expected: &Self, tolerance: T) -> Result<(), Mismatch>;
}

// first mismatch stops the scan
pub(crate) fn elements_within<'a, T: Element + 'a>(
  actual: impl IntoIterator<Item = &'a T>,
  expected: impl IntoIterator<Item = &'a T>,
  tolerance: T,
) -> Result<(), Mismatch> {
  if actual
    .into_iter()
    .zip(expected)
    .all(|(actual, expected)| within(*actual, *expected, tolerance))
  {
    Ok(())
  } else {
    Err(Mismatch::Element)
  }
}

#[test]
fn mismatch_detail_text() {
  assert_eq!(Mismatch::Value.detail(), None);
  assert_eq!(Mismatch::Size.detail().unwrap(), "Size mismatch.");
  assert_eq!(Mismatch::Shape.detail().unwrap(), "Shape mismatch.");
  assert_eq!(Mismatch::Element.detail().unwrap(), "Element mismatch.");
  assert_eq!(
    Mismatch::ElementAt { row: 2, col: 0 }.detail().unwrap(),
    "Element mismatch at (2, 0)."
  );
  assert_eq!(format!("{:?}", Mismatch::Value), "Value");
}
