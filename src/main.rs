use clap::Parser;
use mcap_tester::{load_table, to_matrix, Error, Tester};
use std::path::PathBuf;
use std::process;

/// Compare two numeric tables element by element within an absolute tolerance
#[derive(Parser, Debug)]
#[command(version = "1.0", author = "Ryan G.")]
struct Opts {
  /// File holding the computed values
  actual: PathBuf,

  /// File holding the reference values
  expected: PathBuf,

  #[arg(short, long, default_value_t = 1e-9)]
  tolerance: f64,

  /// Printed after "FAILURE: " when the tables differ
  #[arg(short, long, default_value = "comparison")]
  message: String,

  /// Compare as matrices and report the first mismatching (row, col)
  #[arg(short, long)]
  locate: bool,
}

fn run(opts: &Opts) -> Result<(), Error> {
  let actual = load_table(&opts.actual)?;
  let expected = load_table(&opts.expected)?;

  tracing::debug!(
    rows_actual = actual.len(),
    rows_expected = expected.len(),
    tolerance = opts.tolerance,
    "tables loaded"
  );

  let mut tester: Tester<f64> = Tester::new();

  if opts.locate {
    tester.expect_near_2d(
      &to_matrix(&actual)?,
      &to_matrix(&expected)?,
      opts.tolerance,
      &opts.message,
    );
  } else {
    tester.expect_near(&actual, &expected, opts.tolerance, &opts.message);
  }

  tester.throw_error_if_test_failed()
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .with_writer(std::io::stderr)
    .with_target(false)
    .init();

  let opts = Opts::parse();

  if let Err(err) = run(&opts) {
    eprintln!("{}", err);
    process::exit(1);
  }
}
