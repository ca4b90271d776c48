//! Conversions between the storage order of host matrices and the atom-major
//! layout used by the native force routine.
//!
//! An N×3 matrix of per-atom vectors can be stored either column-major (all
//! x, then all y, then all z; the native order of most numerical host
//! runtimes) or row-major (x, y, z for the first atom, then for the second
//! atom, ...). The native routine reads positions and writes forces as
//! row-major/atom-major triples, so column-major buffers must be transposed
//! before the call. Getting this wrong silently produces wrong energies.
use ndarray::ArrayView2;
use serde::{Serialize, Deserialize};
use schemars::JsonSchema;

/// Storage order of a raw matrix buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum StorageOrder {
    /// Columns are stored contiguously, element `(row, col)` lives at
    /// `col * n_rows + row`
    #[default]
    ColumnMajor,
    /// Rows are stored contiguously, element `(row, col)` lives at
    /// `row * n_cols + col`
    RowMajor,
}

impl StorageOrder {
    /// Index of element `(row, col)` in a buffer with this storage order and
    /// the given shape
    #[inline]
    pub fn index(self, row: usize, col: usize, shape: (usize, usize)) -> usize {
        match self {
            StorageOrder::ColumnMajor => col * shape.0 + row,
            StorageOrder::RowMajor => row * shape.1 + col,
        }
    }
}

/// Convert an N×3 buffer stored with the given `order` into atom-major
/// triples, `result[a * 3 + c] = buffer[c * N + a]` for column-major input.
pub fn to_atom_major(buffer: &[f64], n_atoms: usize, order: StorageOrder) -> Vec<f64> {
    assert_eq!(buffer.len(), 3 * n_atoms, "buffer size does not match the number of atoms");
    match order {
        StorageOrder::RowMajor => buffer.to_vec(),
        StorageOrder::ColumnMajor => {
            let mut result = vec![0.0; buffer.len()];
            for atom in 0..n_atoms {
                for coordinate in 0..3 {
                    result[atom * 3 + coordinate] = buffer[coordinate * n_atoms + atom];
                }
            }
            result
        }
    }
}

/// Inverse of [`to_atom_major`]: convert atom-major triples back to an N×3
/// buffer stored with the given `order`.
pub fn from_atom_major(buffer: &[f64], n_atoms: usize, order: StorageOrder) -> Vec<f64> {
    assert_eq!(buffer.len(), 3 * n_atoms, "buffer size does not match the number of atoms");
    match order {
        StorageOrder::RowMajor => buffer.to_vec(),
        StorageOrder::ColumnMajor => {
            let mut result = vec![0.0; buffer.len()];
            for atom in 0..n_atoms {
                for coordinate in 0..3 {
                    result[coordinate * n_atoms + atom] = buffer[atom * 3 + coordinate];
                }
            }
            result
        }
    }
}

/// Copy an N×3 array into atom-major triples, whatever its memory layout is.
pub fn array_to_atom_major(positions: ArrayView2<'_, f64>) -> Vec<f64> {
    debug_assert_eq!(positions.ncols(), 3);
    // ndarray iterates in logical order, independently of the strides
    positions.iter().copied().collect()
}
