/// `expect_near!(tester, actual, expected, tolerance[, message])`
///
/// Without a message the failure line names the call site and the compared
/// expressions.
#[macro_export]
macro_rules! expect_near {
  ($tester : expr, $actual : expr, $expected : expr, $tolerance : expr) => {
    $tester.expect_near(
      &$actual,
      &$expected,
      $tolerance,
      concat!(
        file!(),
        ":",
        line!(),
        ": ",
        stringify!($actual),
        " near ",
        stringify!($expected)
      ),
    )
  };
  (
    $tester : expr,
    $actual : expr,
    $expected : expr,
    $tolerance : expr,
    $message : expr
  ) => {
    $tester.expect_near(&$actual, &$expected, $tolerance, $message)
  };
}

#[cfg(test)]
use crate::{Status, Tester};

#[test]
fn macro_default_message_names_expressions() {
  let mut tester: Tester<f64, Vec<u8>> = Tester::with_output(Vec::new());
  let computed = 0.5;
  assert_eq!(expect_near!(tester, computed, 0.5, 0.0), Status::Clean);
  assert_eq!(expect_near!(tester, computed, 0.75, 0.1), Status::Failed);

  let text = String::from_utf8(tester.into_output()).unwrap();
  assert!(text.starts_with("FAILURE: "));
  assert!(text.contains("utils.rs:"));
  assert!(text.ends_with(": computed near 0.75\n\n"));
}

#[test]
fn macro_passes_message_through() {
  let mut tester: Tester<f64, Vec<u8>> = Tester::with_output(Vec::new());
  expect_near!(tester, vec![1.0, 2.0], vec![1.0], 0.0, "rows");
  assert_eq!(
    String::from_utf8(tester.into_output()).unwrap(),
    "FAILURE: rows Size mismatch.\n\n"
  );
}
