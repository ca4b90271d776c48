//! The `SimulationBox` type represents the periodic box around the atoms, as
//! understood by the Cu-H potential.
use ndarray::ArrayView2;

use crate::{Error, BoxPolicy, AdapterOptions};

/// The shape of a box, determined from its off-diagonal entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxShape {
    /// Cuboid box, only the diagonal of the matrix is non-zero
    Orthorhombic,
    /// Arbitrary parallelepiped box
    Triclinic,
}

/// A `SimulationBox` is what the native routine sees of the box matrix: the
/// three diagonal entries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationBox {
    lengths: [f64; 3],
    shape: BoxShape,
}

impl SimulationBox {
    /// Create an orthorhombic box with side lengths `a, b, c`
    pub fn orthorhombic(a: f64, b: f64, c: f64) -> SimulationBox {
        SimulationBox {
            lengths: [a, b, c],
            shape: BoxShape::Orthorhombic,
        }
    }

    /// Build a box from a 3×3 `matrix`, following `options.box_policy` for
    /// tilted boxes.
    pub fn from_matrix(matrix: ArrayView2<'_, f64>, options: &AdapterOptions) -> Result<SimulationBox, Error> {
        if matrix.dim() != (3, 3) {
            return Err(Error::InvalidShape {
                name: "box",
                expected: "a 3x3 matrix".into(),
                got: format!("a {}x{} matrix", matrix.nrows(), matrix.ncols()),
            });
        }

        let is_close_0 = |value: f64| f64::abs(value) <= options.tilt_tolerance;
        let is_diagonal = is_close_0(matrix[[0, 1]]) && is_close_0(matrix[[0, 2]]) &&
                          is_close_0(matrix[[1, 0]]) && is_close_0(matrix[[1, 2]]) &&
                          is_close_0(matrix[[2, 0]]) && is_close_0(matrix[[2, 1]]);

        let shape = if is_diagonal {
            BoxShape::Orthorhombic
        } else {
            BoxShape::Triclinic
        };

        if shape == BoxShape::Triclinic {
            match options.box_policy {
                BoxPolicy::Reject => {
                    return Err(Error::InvalidShape {
                        name: "box",
                        expected: "a diagonal (orthorhombic) matrix".into(),
                        got: "a matrix with non-zero off-diagonal entries".into(),
                    });
                }
                BoxPolicy::Diagonal => {
                    log::warn!(
                        "the box has non-zero off-diagonal entries, only the diagonal will be used"
                    );
                }
            }
        }

        return Ok(SimulationBox {
            lengths: [matrix[[0, 0]], matrix[[1, 1]], matrix[[2, 2]]],
            shape: shape,
        });
    }

    /// Get the side lengths passed to the native routine
    pub fn lengths(&self) -> [f64; 3] {
        self.lengths
    }

    /// Get the shape of the matrix this box was created from
    pub fn shape(&self) -> BoxShape {
        self.shape
    }

    /// Volume of the orthorhombic box actually used for the calculation
    pub fn volume(&self) -> f64 {
        self.lengths.iter().product()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr2, Array2};

    #[test]
    fn diagonal() {
        let matrix = arr2(&[[10.0, 0.0, 0.0], [0.0, 11.0, 0.0], [0.0, 0.0, 12.0]]);
        let cell = SimulationBox::from_matrix(matrix.view(), &AdapterOptions::default()).unwrap();
        assert_eq!(cell.lengths(), [10.0, 11.0, 12.0]);
        assert_eq!(cell.shape(), BoxShape::Orthorhombic);
        assert_eq!(cell.volume(), 1320.0);
        assert_eq!(cell, SimulationBox::orthorhombic(10.0, 11.0, 12.0));
    }

    #[test]
    fn tilted_uses_diagonal() {
        let matrix = arr2(&[[10.0, 2.0, 0.0], [0.0, 11.0, 0.0], [0.5, 0.0, 12.0]]);
        let cell = SimulationBox::from_matrix(matrix.view(), &AdapterOptions::default()).unwrap();
        assert_eq!(cell.lengths(), [10.0, 11.0, 12.0]);
        assert_eq!(cell.shape(), BoxShape::Triclinic);
    }

    #[test]
    fn tilted_rejected() {
        let options = AdapterOptions {
            box_policy: BoxPolicy::Reject,
            ..Default::default()
        };

        let matrix = arr2(&[[10.0, 0.0, 0.0], [0.0, 11.0, 3.0], [0.0, 0.0, 12.0]]);
        let error = SimulationBox::from_matrix(matrix.view(), &options).unwrap_err();
        assert!(matches!(error, Error::InvalidShape { name: "box", .. }));

        // tiny tilts are below the tolerance
        let matrix = arr2(&[[10.0, 1e-9, 0.0], [0.0, 11.0, 0.0], [0.0, 0.0, 12.0]]);
        let cell = SimulationBox::from_matrix(matrix.view(), &options).unwrap();
        assert_eq!(cell.shape(), BoxShape::Orthorhombic);
    }

    #[test]
    fn wrong_shape() {
        let matrix = Array2::<f64>::zeros((2, 3));
        let error = SimulationBox::from_matrix(matrix.view(), &AdapterOptions::default()).unwrap_err();
        assert_eq!(
            error.to_string(),
            "invalid shape for box: expected a 3x3 matrix, got a 2x3 matrix"
        );
    }
}
