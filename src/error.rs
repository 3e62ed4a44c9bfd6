use std::io;
use std::num::ParseFloatError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("Test failed.")]
  TestFailed,

  #[error("File error {0}")]
  FileSystem(#[from] io::Error),

  #[error("Unable to parse number on line {line}: {source}")]
  Parse {
    line: usize,
    #[source]
    source: ParseFloatError,
  },

  #[error("Row {row} has {found} columns, expected {expected}")]
  Ragged {
    row: usize,
    expected: usize,
    found: usize,
  },
}
