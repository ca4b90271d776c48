use ndarray::{Array2, ArrayView1, ArrayView2};
use serde::Serialize;

use crate::{Error, AdapterOptions, SimulationBox, SpeciesCounts};
use crate::{ForceEvaluator, ForceInput};
use crate::layout::array_to_atom_major;

/// Result of a potential evaluation: the energy of the configuration and the
/// force acting on each atom.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationResult {
    /// total energy
    pub energy: f64,
    /// N×3 array of forces, one row per atom
    pub forces: Array2<f64>,
}

/// The `PotentialAdapter` validates host-provided inputs, converts them to
/// the layout expected by a [`ForceEvaluator`], and packages the results.
pub struct PotentialAdapter<E> {
    evaluator: E,
    options: AdapterOptions,
}

impl<E: ForceEvaluator> PotentialAdapter<E> {
    /// Create an adapter around `evaluator` using the default options
    pub fn new(evaluator: E) -> PotentialAdapter<E> {
        PotentialAdapter {
            evaluator: evaluator,
            options: AdapterOptions::default(),
        }
    }

    /// Create an adapter around `evaluator` with the given `options`
    pub fn with_options(evaluator: E, options: AdapterOptions) -> Result<PotentialAdapter<E>, Error> {
        options.validate()?;
        Ok(PotentialAdapter {
            evaluator: evaluator,
            options: options,
        })
    }

    /// Get the options used by this adapter
    pub fn options(&self) -> &AdapterOptions {
        &self.options
    }

    /// Get the underlying force evaluator
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Compute the energy and forces of the configuration made of atoms at
    /// `positions` (N×3, one row per atom) with the given `atomic_numbers`
    /// (29 for copper, 1 for hydrogen), inside the simulation box `cell`
    /// (3×3, only the diagonal is used).
    ///
    /// Inputs are validated in order (positions, atomic numbers, box, atomic
    /// number values), and the evaluator is only called if all of them are
    /// valid.
    #[time_graph::instrument(name = "PotentialAdapter::evaluate")]
    pub fn evaluate(
        &self,
        positions: ArrayView2<'_, f64>,
        atomic_numbers: ArrayView1<'_, i32>,
        cell: ArrayView2<'_, f64>,
    ) -> Result<EvaluationResult, Error> {
        let (n_atoms, cell, counts) = time_graph::spanned!("PotentialAdapter::validate", {
            let n_atoms = check_positions(positions)?;
            check_atomic_numbers(atomic_numbers, n_atoms)?;
            let cell = SimulationBox::from_matrix(cell, &self.options)?;
            let counts = SpeciesCounts::classify(atomic_numbers)?;
            (n_atoms, cell, counts)
        });

        let positions = time_graph::spanned!("PotentialAdapter::marshal", {
            array_to_atom_major(positions)
        });
        let (energy, forces) = self.compute(counts, cell, &positions)?;

        let forces = Array2::from_shape_vec((n_atoms, 3), forces)
            .expect("force buffer size does not match the number of atoms");

        return Ok(EvaluationResult {
            energy: energy,
            forces: forces,
        });
    }

    /// Call the evaluator on already validated atom-major `positions`,
    /// returning the energy and the atom-major forces.
    pub(crate) fn compute(
        &self,
        counts: SpeciesCounts,
        cell: SimulationBox,
        positions: &[f64],
    ) -> Result<(f64, Vec<f64>), Error> {
        debug_assert_eq!(counts.total() * 3, positions.len());

        let input = ForceInput {
            counts: counts,
            cell: cell.lengths(),
            positions: positions,
        };

        log::debug!(
            "natoms = {} (Cu = {}, H = {}), ndim = {}, box = {:?}",
            input.n_atoms(), counts.copper, counts.hydrogen, input.degrees_of_freedom(), input.cell
        );
        log::trace!("positions = {:?}", positions);

        let mut forces = vec![0.0; positions.len()];
        let energy = time_graph::spanned!("ForceEvaluator::compute", {
            self.evaluator.compute(&input, &mut forces)
        })?;

        log::trace!("forces = {:?}", forces);
        log::debug!("energy = {}", energy);

        return Ok((energy, forces));
    }
}

fn check_positions(positions: ArrayView2<'_, f64>) -> Result<usize, Error> {
    if positions.ncols() != 3 {
        return Err(Error::InvalidShape {
            name: "positions",
            expected: "one x, y, z triple per row (N x 3 matrix)".into(),
            got: format!("a {}x{} matrix", positions.nrows(), positions.ncols()),
        });
    }
    Ok(positions.nrows())
}

fn check_atomic_numbers(atomic_numbers: ArrayView1<'_, i32>, n_atoms: usize) -> Result<(), Error> {
    if atomic_numbers.len() != n_atoms {
        return Err(Error::InvalidShape {
            name: "atomic numbers",
            expected: format!("one entry per atom ({} elements)", n_atoms),
            got: format!("{} elements", atomic_numbers.len()),
        });
    }
    Ok(())
}
