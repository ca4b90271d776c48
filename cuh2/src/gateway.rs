//! Dynamic calling convention for numerical host runtimes.
//!
//! Host runtimes hand over arguments as type-tagged matrices, with a runtime
//! number of inputs and requested outputs. The [`call`] function checks all
//! of these at runtime, converts the matrices and forwards the call to a
//! [`PotentialAdapter`]. The single output is a [`ResultRecord`] with the
//! `energy` and `forces` fields.
use ndarray::{Array2, ArrayView1};

use crate::{Error, ForceEvaluator, PotentialAdapter, SimulationBox, SpeciesCounts};
use crate::layout::{to_atom_major, StorageOrder};

/// Number of inputs expected by [`call`]: positions, atomic numbers and box
pub const N_INPUTS: usize = 3;
/// Maximal number of outputs [`call`] can produce
pub const MAX_OUTPUTS: usize = 1;

/// A dense matrix as stored by the host
#[derive(Debug, Clone, PartialEq)]
pub struct HostMatrix<T> {
    rows: usize,
    cols: usize,
    order: StorageOrder,
    data: Vec<T>,
}

impl<T: Copy> HostMatrix<T> {
    /// Create a new `rows x cols` matrix, with `data` stored in the given
    /// `order`.
    pub fn new(rows: usize, cols: usize, order: StorageOrder, data: Vec<T>) -> Result<HostMatrix<T>, Error> {
        if data.len() != rows * cols {
            return Err(Error::InvalidParameter(format!(
                "a {}x{} matrix needs {} elements, got {}",
                rows, cols, rows * cols, data.len()
            )));
        }

        Ok(HostMatrix { rows, cols, order, data })
    }

    /// Get the number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Get the number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get the storage order of the data
    pub fn order(&self) -> StorageOrder {
        self.order
    }

    /// Get the raw data, stored in `self.order()`
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Get the element at `(row, col)`
    pub fn get(&self, row: usize, col: usize) -> T {
        assert!(row < self.rows && col < self.cols, "index ({}, {}) out of bounds", row, col);
        self.data[self.order.index(row, col, (self.rows, self.cols))]
    }

    fn is_vector(&self) -> bool {
        self.rows == 1 || self.cols == 1 || self.data.is_empty()
    }

    fn shape(&self) -> String {
        format!("a {}x{} matrix", self.rows, self.cols)
    }
}

/// The output of [`call`], a record with two fields
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRecord {
    /// total energy
    pub energy: f64,
    /// N×3 matrix of forces, in the layout written by the force routine
    pub forces: HostMatrix<f64>,
}

impl ResultRecord {
    /// Names of the fields in this record, in order
    pub const FIELDS: [&'static str; 2] = ["energy", "forces"];

    /// Get a field by name, converted back to a host value
    pub fn field(&self, name: &str) -> Option<HostValue> {
        match name {
            "energy" => Some(HostValue::Double(HostMatrix {
                rows: 1,
                cols: 1,
                order: StorageOrder::ColumnMajor,
                data: vec![self.energy],
            })),
            "forces" => Some(HostValue::Double(self.forces.clone())),
            _ => None,
        }
    }
}

/// A type-tagged value exchanged with the host
#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
    /// real double precision matrix
    Double(HostMatrix<f64>),
    /// 32-bit integer matrix
    Int32(HostMatrix<i32>),
    /// structured record
    Record(ResultRecord),
}

impl HostValue {
    fn type_name(&self) -> &'static str {
        match self {
            HostValue::Double(_) => "double",
            HostValue::Int32(_) => "int32",
            HostValue::Record(_) => "record",
        }
    }
}

/// Evaluate the potential with host-provided `inputs` (positions, atomic
/// numbers and box, in this order), producing at most `n_outputs` values.
///
/// The positions must be a real N×3 matrix, the atomic numbers an int32
/// vector with N elements, and the box a real 3×3 matrix. Positions and box
/// must be stored in the `host_order` of the adapter options.
#[time_graph::instrument(name = "gateway::call")]
pub fn call<E: ForceEvaluator>(
    adapter: &PotentialAdapter<E>,
    inputs: &[HostValue],
    n_outputs: usize,
) -> Result<Vec<HostValue>, Error> {
    if inputs.len() != N_INPUTS {
        return Err(Error::ArgumentCount(format!(
            "three input arguments required (positions, atomic numbers, box), got {}",
            inputs.len()
        )));
    } else if n_outputs > MAX_OUTPUTS {
        return Err(Error::ArgumentCount(format!(
            "too many output arguments, a single record is produced but {} outputs were requested",
            n_outputs
        )));
    }

    let positions = match &inputs[0] {
        HostValue::Double(matrix) => matrix,
        other => {
            log::debug!("got {} value for positions", other.type_name());
            return Err(Error::InvalidType { name: "positions", expected: "a real matrix" });
        }
    };
    if positions.cols != 3 {
        return Err(Error::InvalidShape {
            name: "positions",
            expected: "one x, y, z triple per row (N x 3 matrix)".into(),
            got: positions.shape(),
        });
    }
    check_order("positions", positions.order, adapter)?;
    let n_atoms = positions.rows;

    let atomic_numbers = match &inputs[1] {
        HostValue::Int32(matrix) => matrix,
        other => {
            log::debug!("got {} value for atomic numbers", other.type_name());
            return Err(Error::InvalidType { name: "atomic numbers", expected: "an int32 vector" });
        }
    };
    if !atomic_numbers.is_vector() || atomic_numbers.data.len() != n_atoms {
        return Err(Error::InvalidShape {
            name: "atomic numbers",
            expected: format!("a vector with one entry per atom ({} elements)", n_atoms),
            got: atomic_numbers.shape(),
        });
    }

    let cell = match &inputs[2] {
        HostValue::Double(matrix) => matrix,
        other => {
            log::debug!("got {} value for box", other.type_name());
            return Err(Error::InvalidType { name: "box", expected: "a real 3x3 matrix" });
        }
    };
    if cell.rows != 3 || cell.cols != 3 {
        return Err(Error::InvalidShape {
            name: "box",
            expected: "a 3x3 matrix".into(),
            got: cell.shape(),
        });
    }
    check_order("box", cell.order, adapter)?;
    let cell = Array2::from_shape_fn((3, 3), |(i, j)| cell.get(i, j));
    let cell = SimulationBox::from_matrix(cell.view(), adapter.options())?;

    let counts = SpeciesCounts::classify(ArrayView1::from(&atomic_numbers.data[..]))?;

    let positions = to_atom_major(&positions.data, n_atoms, positions.order);
    let (energy, forces) = adapter.compute(counts, cell, &positions)?;

    // the force routine writes one x, y, z triple per atom
    let record = ResultRecord {
        energy: energy,
        forces: HostMatrix {
            rows: n_atoms,
            cols: 3,
            order: StorageOrder::RowMajor,
            data: forces,
        },
    };

    Ok(vec![HostValue::Record(record)])
}

fn check_order<E: ForceEvaluator>(name: &str, order: StorageOrder, adapter: &PotentialAdapter<E>) -> Result<(), Error> {
    let expected = adapter.options().host_order;
    if order != expected {
        return Err(Error::InvalidParameter(format!(
            "{} is stored in {:?} order, but the host order is {:?}", name, order, expected
        )));
    }
    Ok(())
}
