use crate::near::{matrix::locate_mismatch, Element, Mismatch, NearEq};
use crate::Error;
use nalgebra::storage::Storage;
use nalgebra::{Dim, Matrix, Scalar};
use std::io::{self, Write};
use std::marker::PhantomData;

#[cfg(test)]
use nalgebra::DMatrix;
#[cfg(test)]
use crate::near::within;
#[cfg(test)]
use proptest::prelude::*;
#[cfg(test)]
use proptest_derive::Arbitrary;

/// Accumulated outcome of every check since construction or the last reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
  Clean,
  Failed,
}

impl Status {
  pub fn is_failed(self) -> bool {
    self == Status::Failed
  }
}

/// Near-equality checker over scalars of type `T`.
///
/// Failing checks print `FAILURE: <message>[ <detail>]` followed by a blank
/// line to `W` and leave the checker `Failed` until `reset_test_failed_flag`.
/// Passing checks print nothing and never clear a failure. Use one checker
/// per sequential run; mutation needs `&mut self`.
pub struct Tester<T: Element, W: Write = io::Stdout> {
  status: Status,
  output: W,
  scalar: PhantomData<T>,
}

impl<T: Element> Tester<T> {
  pub fn new() -> Self {
    Self::with_output(io::stdout())
  }
}

impl<T: Element> Default for Tester<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T: Element, W: Write> Tester<T, W> {
  pub fn with_output(output: W) -> Self {
    Self {
      status: Status::Clean,
      output,
      scalar: PhantomData,
    }
  }

  pub fn status(&self) -> Status {
    self.status
  }

  pub fn has_failed(&self) -> bool {
    self.status.is_failed()
  }

  pub fn output(&self) -> &W {
    &self.output
  }

  pub fn into_output(self) -> W {
    self.output
  }

  /// Compares `actual` against `expected` for any supported shape: scalars,
  /// slices and `Vec`s, fixed-size arrays, nested `Vec`s, nested arrays and
  /// `nalgebra` matrices. Only the first mismatch of a call is reported.
  pub fn expect_near<A: NearEq<T> + ?Sized>(
    &mut self,
    actual: &A,
    expected: &A,
    tolerance: T,
    message: &str,
  ) -> Status {
    self.check_tolerance(tolerance, message);

    if let Err(mismatch) = actual.near_eq(expected, tolerance) {
      self.record(message, mismatch);
    }

    self.status
  }

  /// Matrix comparison that names the first mismatching `(row, col)` in the
  /// failure line.
  pub fn expect_near_2d<R, C, S>(
    &mut self,
    actual: &Matrix<T, R, C, S>,
    expected: &Matrix<T, R, C, S>,
    tolerance: T,
    message: &str,
  ) -> Status
  where
    T: Scalar,
    R: Dim,
    C: Dim,
    S: Storage<T, R, C>,
  {
    self.check_tolerance(tolerance, message);

    if let Err(mismatch) = locate_mismatch(actual, expected, tolerance) {
      self.record(message, mismatch);
    }

    self.status
  }

  /// `Err(Error::TestFailed)` if any check failed since the last reset.
  /// Leaves the state untouched.
  pub fn throw_error_if_test_failed(&self) -> Result<(), Error> {
    match self.status {
      Status::Clean => Ok(()),
      Status::Failed => Err(Error::TestFailed),
    }
  }

  pub fn reset_test_failed_flag(&mut self) {
    self.status = Status::Clean;
  }

  fn check_tolerance(&self, tolerance: T, message: &str) {
    if tolerance < T::zero() {
      tracing::warn!(
        check = message,
        "negative tolerance given, every comparison will fail"
      );
    }
  }

  fn record(&mut self, message: &str, mismatch: Mismatch) {
    tracing::debug!(check = message, ?mismatch, "near-equality check failed");

    self.status = Status::Failed;

    let line = match mismatch.detail() {
      Some(detail) => format!("FAILURE: {} {}", message, detail),
      None => format!("FAILURE: {}", message),
    };

    // losing the text must not lose the failure itself
    if let Err(err) = writeln!(self.output, "{}", line)
      .and_then(|_| writeln!(self.output))
    {
      tracing::warn!(%err, "unable to write failure diagnostic");
    }
  }
}

#[cfg(test)]
fn captured() -> Tester<f64, Vec<u8>> {
  Tester::with_output(Vec::new())
}

#[cfg(test)]
fn text<T: Element>(tester: &Tester<T, Vec<u8>>) -> String {
  String::from_utf8(tester.output().clone()).unwrap()
}

#[test]
fn scalar_pass_is_silent() {
  let mut tester = captured();
  assert_eq!(tester.expect_near(&1.001, &1.000, 0.01, "x"), Status::Clean);
  assert!(!tester.has_failed());
  assert_eq!(text(&tester), "");
}

#[test]
fn scalar_failure_prints_message_only() {
  let mut tester = captured();
  assert_eq!(tester.expect_near(&1.02, &1.00, 0.01, "x"), Status::Failed);
  assert_eq!(text(&tester), "FAILURE: x\n\n");
}

#[test]
fn sequence_size_mismatch_line() {
  let mut tester = captured();
  tester.expect_near(&vec![1.0, 2.0, 3.0], &vec![1.0, 2.0], 0.0, "v");
  assert!(tester.has_failed());
  assert_eq!(text(&tester), "FAILURE: v Size mismatch.\n\n");
}

#[test]
fn sequence_reports_one_element_mismatch_per_call() {
  let mut tester = captured();
  tester.expect_near(&vec![1.0, 2.0, 3.0], &vec![0.0, 0.0, 0.0], 0.5, "v");
  assert_eq!(text(&tester), "FAILURE: v Element mismatch.\n\n");
}

#[test]
fn fixed_sequence_element_mismatch_line() {
  let mut tester = captured();
  tester.expect_near(&[1.0, 2.0], &[1.0, 2.0], 0.0, "a");
  tester.expect_near(&[1.0, 2.0], &[1.0, 3.0], 0.0, "b");
  assert_eq!(text(&tester), "FAILURE: b Element mismatch.\n\n");
}

#[test]
fn nested_element_mismatch_line() {
  let mut tester = captured();
  tester.expect_near(
    &vec![vec![1.0, 2.0], vec![3.0, 4.0]],
    &vec![vec![1.0, 2.0], vec![3.0, 5.0]],
    0.0,
    "m",
  );
  assert!(tester.has_failed());
  assert_eq!(text(&tester), "FAILURE: m Element mismatch.\n\n");
}

#[test]
fn nested_inner_size_mismatch_line() {
  let mut tester = captured();
  tester.expect_near(
    &vec![vec![1.0, 2.0], vec![3.0]],
    &vec![vec![1.0, 2.0], vec![3.0, 4.0]],
    0.0,
    "m",
  );
  assert_eq!(text(&tester), "FAILURE: m Size mismatch.\n\n");
}

#[test]
fn fixed_nested_element_mismatch_line() {
  let mut tester = captured();
  tester.expect_near(
    &[[1.0, 2.0], [3.0, 4.0]],
    &[[1.0, 2.0], [3.0, 5.0]],
    0.0,
    "f",
  );
  assert_eq!(text(&tester), "FAILURE: f Element mismatch.\n\n");
}

#[test]
fn matrix_lines() {
  let mut tester = captured();
  let actual = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
  let expected = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 5.0]);
  tester.expect_near(&actual, &expected, 0.0, "plain");
  tester.expect_near_2d(&actual, &expected, 0.0, "located");
  tester.expect_near_2d(&actual, &DMatrix::zeros(1, 2), 0.0, "shape");
  assert_eq!(
    text(&tester),
    "FAILURE: plain Element mismatch.\n\n\
     FAILURE: located Element mismatch at (1, 1).\n\n\
     FAILURE: shape Shape mismatch.\n\n"
  );
}

#[test]
fn failure_is_sticky_across_passing_checks() {
  let mut tester = captured();
  tester.expect_near(&1.0, &2.0, 0.1, "bad");
  assert_eq!(tester.expect_near(&1.0, &1.0, 0.1, "good"), Status::Failed);
  assert!(tester.has_failed());
  assert_eq!(text(&tester), "FAILURE: bad\n\n");
}

#[test]
fn every_failing_call_is_reported() {
  let mut tester = captured();
  tester.expect_near(&1.0, &2.0, 0.1, "first");
  tester.expect_near(&vec![1.0], &vec![], 0.1, "second");
  assert_eq!(
    text(&tester),
    "FAILURE: first\n\nFAILURE: second Size mismatch.\n\n"
  );
}

#[test]
fn escalation_round_trip() {
  let mut tester = captured();
  assert!(tester.throw_error_if_test_failed().is_ok());

  tester.expect_near(&1.0, &2.0, 0.1, "bad");
  let err = tester.throw_error_if_test_failed().unwrap_err();
  assert!(matches!(err, Error::TestFailed));
  assert_eq!(err.to_string(), "Test failed.");

  // escalation observes, it does not reset
  assert!(tester.throw_error_if_test_failed().is_err());

  tester.reset_test_failed_flag();
  assert_eq!(tester.status(), Status::Clean);
  assert!(tester.throw_error_if_test_failed().is_ok());
}

#[test]
fn reset_then_passing_checks_stay_clean() {
  let mut tester = captured();
  tester.reset_test_failed_flag();
  tester.expect_near(&1.0, &1.0, 0.0, "a");
  tester.expect_near(&vec![1.0, 2.0], &vec![1.0, 2.0], 0.0, "b");
  assert_eq!(tester.status(), Status::Clean);
  assert!(tester.throw_error_if_test_failed().is_ok());
  assert_eq!(text(&tester), "");
}

#[test]
fn negative_tolerance_fails_even_on_equal_values() {
  let mut tester = captured();
  assert_eq!(tester.expect_near(&1.0, &1.0, -0.5, "neg"), Status::Failed);
  assert_eq!(text(&tester), "FAILURE: neg\n\n");
}

#[test]
fn integer_tester() {
  let mut tester: Tester<i32, Vec<u8>> = Tester::with_output(Vec::new());
  tester.expect_near(&vec![1, 2, 3], &vec![1, 2, 3], 0, "same");
  assert_eq!(tester.status(), Status::Clean);
  tester.expect_near(&vec![1, 2, 3], &vec![1, 2], 0, "v");
  tester.expect_near(&[[1, 2], [3, 4]], &[[1, 2], [3, 6]], 1, "m");
  tester.expect_near(&10, &12, 2, "near enough");
  assert!(tester.throw_error_if_test_failed().is_err());
  assert_eq!(
    text(&tester),
    "FAILURE: v Size mismatch.\n\nFAILURE: m Element mismatch.\n\n"
  );
}

#[test]
fn unsigned_tester() {
  let mut tester: Tester<u8, Vec<u8>> = Tester::with_output(Vec::new());
  tester.expect_near(&vec![0, 255], &vec![2, 250], 5, "bytes");
  assert_eq!(tester.status(), Status::Clean);
  tester.expect_near(&vec![0, 255], &vec![9, 255], 5, "bytes");
  assert_eq!(text(&tester), "FAILURE: bytes Element mismatch.\n\n");
}

#[test]
fn f32_tester() {
  let mut tester: Tester<f32, Vec<u8>> = Tester::with_output(Vec::new());
  tester.expect_near(&[0.1f32 + 0.2], &[0.3], 1e-6, "f32");
  assert!(!tester.has_failed());
}

#[cfg(test)]
struct BrokenSink;

#[cfg(test)]
impl Write for BrokenSink {
  fn write(&mut self, _: &[u8]) -> io::Result<usize> {
    Err(io::Error::new(io::ErrorKind::Other, "closed"))
  }

  fn flush(&mut self) -> io::Result<()> {
    Ok(())
  }
}

#[test]
fn unwritable_sink_still_records_failure() {
  let mut tester: Tester<f64, BrokenSink> = Tester::with_output(BrokenSink);
  assert_eq!(tester.expect_near(&1.0, &2.0, 0.0, "lost"), Status::Failed);
  assert!(tester.throw_error_if_test_failed().is_err());
}

#[cfg(test)]
proptest! {
#[test]
fn one_line_per_failing_call(
  pairs in prop::collection::vec((-1e3f64..1e3, -1e3f64..1e3), 0..16),
  tolerance in 0.0f64..100.0,
) {
  let mut tester = captured();
  let mut failures = 0;
  for (actual, expected) in &pairs {
    if (actual - expected).abs() > tolerance {
      failures += 1;
    }
    tester.expect_near(actual, expected, tolerance, "p");
  }
  prop_assert_eq!(tester.has_failed(), failures > 0);
  prop_assert_eq!(text(&tester), "FAILURE: p\n\n".repeat(failures));
}

#[test]
fn one_line_per_call_for_every_shape(
  shape: ShapeOption,
  base in -1e3f64..1e3,
  offset in 0.0f64..2.0,
  tolerance in 0.0f64..1.0,
) {
  let mut tester = captured();
  let status = shape.check(&mut tester, base, offset, tolerance);

  let expected_text = if within(base, base + offset, tolerance) {
    String::new()
  } else {
    match shape {
      ShapeOption::Scalar => "FAILURE: s\n\n".to_owned(),
      _ => "FAILURE: s Element mismatch.\n\n".to_owned(),
    }
  };
  prop_assert_eq!(status.is_failed(), !expected_text.is_empty());
  prop_assert_eq!(text(&tester), expected_text);
}
}

#[cfg(test)]
#[derive(Debug, Arbitrary)]
enum ShapeOption {
  Scalar,
  Flat,
  Fixed,
  Nested,
  FixedNested,
  Matrix,
}

#[cfg(test)]
impl ShapeOption {
  // every shape holds `base` everywhere except for one or more entries that
  // are `base + offset` on the expected side
  fn check(
    &self,
    tester: &mut Tester<f64, Vec<u8>>,
    base: f64,
    offset: f64,
    tolerance: f64,
  ) -> Status {
    let (a, e) = (base, base + offset);
    match self {
      ShapeOption::Scalar => tester.expect_near(&a, &e, tolerance, "s"),
      ShapeOption::Flat => {
        tester.expect_near(&vec![a, a, a], &vec![a, e, e], tolerance, "s")
      }
      ShapeOption::Fixed => {
        tester.expect_near(&[a, a, a], &[e, a, e], tolerance, "s")
      }
      ShapeOption::Nested => tester.expect_near(
        &vec![vec![a, a], vec![a]],
        &vec![vec![a, e], vec![e]],
        tolerance,
        "s",
      ),
      ShapeOption::FixedNested => {
        tester.expect_near(&[[a, a], [a, a]], &[[e, a], [a, e]], tolerance, "s")
      }
      ShapeOption::Matrix => tester.expect_near(
        &DMatrix::from_element(3, 2, a),
        &DMatrix::from_fn(3, 2, |i, _| if i == 1 { e } else { a }),
        tolerance,
        "s",
      ),
    }
  }
}
