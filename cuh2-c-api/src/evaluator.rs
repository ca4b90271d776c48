use std::os::raw::{c_char, c_void};
use std::ffi::CStr;

use ndarray::{ArrayView1, ArrayView2, ShapeBuilder};

use cuh2::{AdapterOptions, Error, ForceEvaluator, ForceInput, PotentialAdapter, StorageOrder};

use super::{catch_unwind, cuh2_status_t};

/// A `cuh2_evaluator_t` computes the energy and forces of a Cu-H
/// configuration.
///
/// This struct contains a manual implementation of a virtual table, allowing
/// to implement the rust `ForceEvaluator` trait in C and other languages.
/// `user_data` contains a pointer to the data needed by the implementation,
/// and is passed back as the first parameter of `compute`.
#[repr(C)]
#[allow(non_camel_case_types)]
pub struct cuh2_evaluator_t {
    /// User-provided data should be stored here, it will be passed as the
    /// first parameter to `compute`.
    pub user_data: *mut c_void,
    /// This function should compute the energy and forces of a configuration.
    ///
    /// `counts` points to two values, the number of copper and the number of
    /// hydrogen atoms. `ndim` is the number of degrees of freedom (three times
    /// the number of atoms). `cell` contains the three side lengths of the
    /// box. `positions` and `forces` contain `ndim` values, one x, y, z
    /// triple per atom. The energy should be written to `energy`.
    ///
    /// The function should return 0 on success, and any other value on
    /// error.
    pub compute: Option<unsafe extern fn(
        user_data: *mut c_void,
        counts: *const usize,
        ndim: usize,
        cell: *const f64,
        positions: *const f64,
        forces: *mut f64,
        energy: *mut f64,
    ) -> i32>,
}

impl ForceEvaluator for cuh2_evaluator_t {
    #[time_graph::instrument(name = "cuh2_evaluator_t::compute")]
    fn compute(&self, input: &ForceInput<'_>, forces: &mut [f64]) -> Result<f64, Error> {
        input.check_buffers(forces)?;
        let function = self.compute.ok_or_else(|| Error::Evaluator(
            "cuh2_evaluator_t.compute function is NULL".into()
        ))?;

        let counts = input.counts.as_array();
        let mut energy = 0.0;
        let status = unsafe {
            function(
                self.user_data,
                counts.as_ptr(),
                input.degrees_of_freedom(),
                input.cell.as_ptr(),
                input.positions.as_ptr(),
                forces.as_mut_ptr(),
                &mut energy,
            )
        };

        if status != 0 {
            return Err(Error::Evaluator(format!(
                "cuh2_evaluator_t.compute failed with status {}", status
            )));
        }

        return Ok(energy);
    }
}

/// Get an evaluator calling the Fortran implementation of the Cu-H
/// embedded-atom method potential. This is only available if the library was
/// compiled with the `native` feature.
#[cfg(feature = "native")]
#[no_mangle]
pub unsafe extern fn cuh2_native_evaluator() -> cuh2_evaluator_t {
    unsafe extern fn compute(
        _: *mut c_void,
        counts: *const usize,
        ndim: usize,
        cell: *const f64,
        positions: *const f64,
        forces: *mut f64,
        energy: *mut f64,
    ) -> i32 {
        let counts = std::slice::from_raw_parts(counts, 2);
        let input = ForceInput {
            counts: cuh2::SpeciesCounts { copper: counts[0], hydrogen: counts[1] },
            cell: [*cell, *cell.add(1), *cell.add(2)],
            positions: std::slice::from_raw_parts(positions, ndim),
        };
        let forces = std::slice::from_raw_parts_mut(forces, ndim);

        match cuh2::NativeEam.compute(&input, forces) {
            Ok(value) => {
                *energy = value;
                0
            }
            Err(error) => {
                log::error!("{}", error);
                1
            }
        }
    }

    cuh2_evaluator_t {
        user_data: std::ptr::null_mut(),
        compute: Some(compute),
    }
}

/// Compute the energy and forces of a configuration of copper and hydrogen
/// atoms with the given `evaluator`.
///
/// `positions` and `cell` are read in the storage order given by the
/// `host_order` option (column-major by default). The forces are always
/// written as one x, y, z triple per atom.
///
/// @param evaluator force evaluator to use
/// @param positions positions of the atoms, `3 * n_atoms` values
/// @param n_atoms number of atoms
/// @param atomic_numbers atomic number of each atom (29 or 1),
///                       `n_atomic_numbers` values
/// @param n_atomic_numbers number of atomic numbers, must be `n_atoms`
/// @param cell 3x3 box matrix, only the diagonal is used by default
/// @param options JSON-formatted options as a NULL-terminated string, or
///                NULL to use the default options
/// @param energy will be set to the energy of the configuration
/// @param forces pre-allocated array of `forces_count` values, will contain
///               the forces acting on the atoms
/// @param forces_count size of the forces array, must be `3 * n_atoms`
///
/// @returns The status code of this operation. If the status is not
///          `CUH2_SUCCESS`, you can use `cuh2_last_error()` to get the full
///          error message.
#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub unsafe extern fn cuh2_evaluate(
    evaluator: *const cuh2_evaluator_t,
    positions: *const f64,
    n_atoms: usize,
    atomic_numbers: *const i32,
    n_atomic_numbers: usize,
    cell: *const f64,
    options: *const c_char,
    energy: *mut f64,
    forces: *mut f64,
    forces_count: usize,
) -> cuh2_status_t {
    catch_unwind(|| {
        check_pointers!(evaluator, cell, energy);
        if n_atoms != 0 {
            check_pointers!(positions, forces);
        }
        if n_atomic_numbers != 0 {
            check_pointers!(atomic_numbers);
        }

        let options = if options.is_null() {
            AdapterOptions::default()
        } else {
            AdapterOptions::from_json(CStr::from_ptr(options).to_str()?)?
        };

        let n_values = n_atoms.checked_mul(3).ok_or_else(|| Error::InvalidParameter(format!(
            "n_atoms ({}) is too large", n_atoms
        )))?;
        if forces_count != n_values {
            return Err(Error::InvalidShape {
                name: "forces",
                expected: format!("{} values (3 per atom)", n_values),
                got: format!("{} values", forces_count),
            });
        }

        let order = options.host_order;
        let positions = if n_atoms == 0 {
            ArrayView2::from_shape((0, 3), &[] as &[f64]).expect("invalid shape")
        } else {
            host_matrix(positions, (n_atoms, 3), order)
        };
        let atomic_numbers = if n_atomic_numbers == 0 {
            ArrayView1::from(&[] as &[i32])
        } else {
            ArrayView1::from(std::slice::from_raw_parts(atomic_numbers, n_atomic_numbers))
        };
        let cell = host_matrix(cell, (3, 3), order);

        let adapter = PotentialAdapter::with_options(&*evaluator, options)?;
        let result = adapter.evaluate(positions, atomic_numbers, cell)?;

        *energy = result.energy;
        if n_atoms != 0 {
            let output = std::slice::from_raw_parts_mut(forces, forces_count);
            for (output, &value) in output.iter_mut().zip(result.forces.iter()) {
                *output = value;
            }
        }

        Ok(())
    })
}

/// Create a view over a host matrix with the given `shape` and storage `order`
unsafe fn host_matrix<'a>(data: *const f64, shape: (usize, usize), order: StorageOrder) -> ArrayView2<'a, f64> {
    match order {
        StorageOrder::RowMajor => ArrayView2::from_shape_ptr(shape, data),
        StorageOrder::ColumnMajor => ArrayView2::from_shape_ptr(shape.f(), data),
    }
}
