//! The external force routine, seen from Rust.
use crate::{Error, SpeciesCounts};

/// Everything the force routine needs to know about a configuration, already
/// converted to the layout it expects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceInput<'a> {
    /// number of copper and hydrogen atoms
    pub counts: SpeciesCounts,
    /// diagonal of the simulation box
    pub cell: [f64; 3],
    /// atom-major positions, `positions[3 * i + c]` is coordinate `c` of atom `i`
    pub positions: &'a [f64],
}

impl<'a> ForceInput<'a> {
    /// Number of atoms in this configuration
    pub fn n_atoms(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of degrees of freedom (three per atom)
    pub fn degrees_of_freedom(&self) -> usize {
        self.positions.len()
    }

    /// Check that the species counts, the positions and the `forces` output
    /// all describe the same number of atoms. Evaluators handing raw
    /// pointers to foreign code must call this first.
    pub fn check_buffers(&self, forces: &[f64]) -> Result<(), Error> {
        if self.positions.len() % 3 != 0 {
            return Err(Error::InvalidParameter(format!(
                "positions must contain 3 values per atom, got {} values", self.positions.len()
            )));
        }

        let expected = self.counts.total().checked_mul(3).ok_or_else(|| Error::InvalidParameter(
            "number of atoms is too large".into()
        ))?;
        if expected != self.positions.len() {
            return Err(Error::InvalidParameter(format!(
                "species counts describe {} atoms but positions contain {} atoms",
                self.counts.total(), self.n_atoms()
            )));
        }

        if forces.len() != self.positions.len() {
            return Err(Error::InvalidParameter(format!(
                "forces buffer must contain {} values, got {}", self.positions.len(), forces.len()
            )));
        }

        Ok(())
    }
}

/// A `ForceEvaluator` computes the energy and atomic forces of a Cu-H
/// configuration. This is the seam between this crate and the embedded-atom
/// method implementation, which is treated as a black box.
pub trait ForceEvaluator {
    /// Compute the energy of the configuration described by `input`, and
    /// write the forces in `forces`.
    ///
    /// `forces` has the same atom-major layout and size as
    /// `input.positions`, and is zero-initialized by the caller.
    fn compute(&self, input: &ForceInput<'_>, forces: &mut [f64]) -> Result<f64, Error>;
}

impl<'e, E: ForceEvaluator + ?Sized> ForceEvaluator for &'e E {
    fn compute(&self, input: &ForceInput<'_>, forces: &mut [f64]) -> Result<f64, Error> {
        (**self).compute(input, forces)
    }
}

#[cfg(feature = "native")]
mod native {
    use std::os::raw::c_int;
    use std::sync::Mutex;

    use super::{ForceEvaluator, ForceInput};
    use crate::Error;

    extern "C" {
        // Fortran routine exported with ISO_C_BINDING
        fn c_force_eam(
            natms: *mut c_int,
            ndim: c_int,
            cell: *mut f64,
            positions: *mut f64,
            forces: *mut f64,
            energy: *mut f64,
        );
    }

    // the Fortran code keeps module-level state, calls must not overlap
    static NATIVE_LOCK: Mutex<()> = Mutex::new(());

    fn to_c_int(value: usize, name: &str) -> Result<c_int, Error> {
        c_int::try_from(value).map_err(|_| Error::InvalidParameter(format!(
            "{} ({}) is too large for the native force routine", name, value
        )))
    }

    /// Force evaluator calling the Fortran implementation of the Cu-H
    /// embedded-atom method potential (`c_force_eam`).
    #[derive(Debug, Clone, Copy, Default)]
    pub struct NativeEam;

    impl ForceEvaluator for NativeEam {
        #[time_graph::instrument(name = "NativeEam::compute")]
        fn compute(&self, input: &ForceInput<'_>, forces: &mut [f64]) -> Result<f64, Error> {
            input.check_buffers(forces)?;

            let mut natms = [
                to_c_int(input.counts.copper, "number of copper atoms")?,
                to_c_int(input.counts.hydrogen, "number of hydrogen atoms")?,
            ];
            let ndim = to_c_int(input.degrees_of_freedom(), "number of degrees of freedom")?;

            // the routine takes non-const pointers, give it copies
            let mut cell = input.cell;
            let mut positions = input.positions.to_vec();
            let mut energy = 0.0;

            let _guard = NATIVE_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            unsafe {
                c_force_eam(
                    natms.as_mut_ptr(),
                    ndim,
                    cell.as_mut_ptr(),
                    positions.as_mut_ptr(),
                    forces.as_mut_ptr(),
                    &mut energy,
                );
            }

            Ok(energy)
        }
    }
}

#[cfg(feature = "native")]
pub use self::native::NativeEam;
