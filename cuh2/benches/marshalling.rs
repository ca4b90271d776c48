use ndarray::{Array1, Array2};

use cuh2::{Error, ForceEvaluator, ForceInput, PotentialAdapter, StorageOrder};
use cuh2::layout::to_atom_major;

use criterion::{Criterion, black_box, criterion_group, criterion_main};

/// Evaluator doing no work, to measure the marshalling overhead only
struct Noop;

impl ForceEvaluator for Noop {
    fn compute(&self, _: &ForceInput<'_>, _: &mut [f64]) -> Result<f64, Error> {
        Ok(0.0)
    }
}

fn transpose(c: &mut Criterion) {
    let mut group = c.benchmark_group("column-major to atom-major");
    group.noise_threshold(0.05);

    for &n_atoms in black_box(&[10, 100, 1000, 10000]) {
        let buffer = (0..3 * n_atoms).map(|i| i as f64).collect::<Vec<_>>();
        group.bench_function(format!("n_atoms = {}", n_atoms), |b| b.iter(|| {
            to_atom_major(&buffer, n_atoms, StorageOrder::ColumnMajor)
        }));
    }
}

fn evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate without potential");
    group.noise_threshold(0.05);

    let adapter = PotentialAdapter::new(Noop);
    let cell = Array2::from_diag(&Array1::from_elem(3, 30.0));
    for &n_atoms in black_box(&[10, 100, 1000, 10000]) {
        let positions = Array2::from_shape_fn((n_atoms, 3), |(i, j)| (i + j) as f64);
        let atomic_numbers = Array1::from_shape_fn(n_atoms, |i| if i % 4 == 0 { 1 } else { 29 });

        group.bench_function(format!("n_atoms = {}", n_atoms), |b| b.iter(|| {
            adapter.evaluate(positions.view(), atomic_numbers.view(), cell.view()).unwrap()
        }));
    }
}

criterion_group!(marshalling, transpose, evaluate);
criterion_main!(marshalling);
