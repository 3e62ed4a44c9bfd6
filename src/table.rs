use crate::Error;
use nalgebra::DMatrix;
use regex::Regex;
use std::fs::File;
use std::io::{prelude::*, BufReader};
use std::path::Path;

#[cfg(test)]
use tempfile::NamedTempFile;

pub type Table = Vec<Vec<f64>>;

/// Reads a numeric table: one row per non-blank line, `#` starts a comment
/// line. Fields are separated by a run of whitespace or by a single comma or
/// semicolon (optionally padded with whitespace); an empty field such as the
/// one in `1,,2` is a parse error.
pub fn load_table(path: &Path) -> Result<Table, Error> {
  read_table(BufReader::new(File::open(path)?))
}

pub fn read_table<R: BufRead>(reader: R) -> Result<Table, Error> {
  let separator_re =
    Regex::new(r"\s*[,;]\s*|\s+").expect("separator regex is valid");

  let mut rows = Vec::new();

  for (line_idx, line) in reader.lines().enumerate() {
    let line = line?;
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
      continue;
    }

    let row = separator_re
      .split(line)
      .map(|field| {
        field.parse().map_err(|source| Error::Parse {
          line: line_idx + 1,
          source,
        })
      })
      .collect::<Result<Vec<f64>, _>>()?;

    rows.push(row);
  }

  Ok(rows)
}

/// Requires every row to have the same number of columns as the first one.
pub fn to_matrix(rows: &[Vec<f64>]) -> Result<DMatrix<f64>, Error> {
  let ncols = rows.first().map_or(0, |row| row.len());

  for (row_idx, row) in rows.iter().enumerate() {
    if row.len() != ncols {
      return Err(Error::Ragged {
        row: row_idx,
        expected: ncols,
        found: row.len(),
      });
    }
  }

  Ok(DMatrix::from_fn(rows.len(), ncols, |i, j| rows[i][j]))
}

#[test]
fn reads_mixed_separators_and_comments() {
  let text = "# header\n1 2 3\n\n4.5,5e-1;-6\n  7\t8   9  \n";
  let rows = read_table(text.as_bytes()).unwrap();
  assert_eq!(
    rows,
    vec![vec![1.0, 2.0, 3.0], vec![4.5, 0.5, -6.0], vec![7.0, 8.0, 9.0]]
  );
}

#[test]
fn reports_bad_field_with_line_number() {
  let text = "1 2\n# skipped\n3 x\n";
  match read_table(text.as_bytes()) {
    Err(Error::Parse { line, .. }) => assert_eq!(line, 3),
    other => panic!("unexpected result {:?}", other),
  }
}

#[test]
fn empty_fields_are_rejected() {
  for text in &["1,,2\n", "1;;2\n", "1 , , 2\n", "1,2,\n", "3\n,4\n"] {
    match read_table(text.as_bytes()) {
      Err(Error::Parse { .. }) => {}
      other => panic!("{:?} loaded as {:?}", text, other),
    }
  }
}

#[test]
fn padded_separators_split_once() {
  let rows = read_table("1 , 2 ;3\t,\t4\n".as_bytes()).unwrap();
  assert_eq!(rows, vec![vec![1.0, 2.0, 3.0, 4.0]]);
}

#[test]
fn ragged_rows_are_not_a_matrix() {
  let rows = vec![vec![1.0, 2.0], vec![3.0]];
  match to_matrix(&rows) {
    Err(Error::Ragged {
      row,
      expected,
      found,
    }) => assert_eq!((row, expected, found), (1, 2, 1)),
    other => panic!("unexpected result {:?}", other),
  }
}

#[test]
fn matrix_is_row_major() {
  let matrix = to_matrix(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
  assert_eq!(matrix.shape(), (2, 3));
  assert_eq!(matrix[(0, 2)], 3.0);
  assert_eq!(matrix[(1, 0)], 4.0);
  assert_eq!(to_matrix(&[]).unwrap().shape(), (0, 0));
}

#[test]
fn loads_from_file() {
  let mut file = NamedTempFile::new().expect("Failed to create temp file");
  writeln!(file, "0.25 0.5\n1 2").unwrap();
  let rows = load_table(file.path()).unwrap();
  assert_eq!(rows, vec![vec![0.25, 0.5], vec![1.0, 2.0]]);
}

#[test]
fn missing_file_is_a_file_system_error() {
  let dir = tempfile::tempdir().unwrap();
  let result = load_table(&dir.path().join("missing.txt"));
  assert!(matches!(result, Err(Error::FileSystem(_))));
}
