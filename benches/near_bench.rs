use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mcap_tester::{NearEq, Tester};
use nalgebra::DMatrix;
use std::io;

fn table(rows: usize, cols: usize) -> Vec<Vec<f64>> {
  (0..rows)
    .map(|i| (0..cols).map(|j| (i * cols + j) as f64 * 0.1).collect())
    .collect()
}

fn flat(c: &mut Criterion) {
  for len in [16, 1024, 65536].iter() {
    let actual: Vec<f64> = (0..*len).map(|i| i as f64).collect();
    let expected = actual.clone();

    c.bench_function(&format!("flat near_eq x {}", len), |b| {
      b.iter(|| black_box(&actual).near_eq(black_box(&expected), 1e-9))
    });
  }
}

fn nested(c: &mut Criterion) {
  for size in [4, 64, 256].iter() {
    let actual = table(*size, *size);
    let expected = actual.clone();

    c.bench_function(&format!("nested near_eq {0}x{0}", size), |b| {
      b.iter(|| black_box(&actual).near_eq(black_box(&expected), 1e-9))
    });

    let actual_matrix = DMatrix::from_fn(*size, *size, |i, j| actual[i][j]);
    let expected_matrix = actual_matrix.clone();

    c.bench_function(&format!("matrix near_eq {0}x{0}", size), |b| {
      b.iter(|| {
        black_box(&actual_matrix).near_eq(black_box(&expected_matrix), 1e-9)
      })
    });
  }
}

fn tester(c: &mut Criterion) {
  let actual = table(64, 64);
  let mut expected = actual.clone();
  expected[63][63] += 1.0;

  let mut tester: Tester<f64, io::Sink> = Tester::with_output(io::sink());

  c.bench_function("tester failing nested 64x64", |b| {
    b.iter(|| {
      tester.expect_near(
        black_box(&actual),
        black_box(&expected),
        1e-9,
        "bench",
      )
    })
  });
}

criterion_group!(benches, flat, nested, tester);
criterion_main!(benches);
