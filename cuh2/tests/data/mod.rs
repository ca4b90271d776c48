#![allow(dead_code)]

use std::sync::Mutex;

use cuh2::{Error, ForceEvaluator, ForceInput, SpeciesCounts};

/// Everything a `Recording` evaluator was called with
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub counts: SpeciesCounts,
    pub degrees_of_freedom: usize,
    pub cell: [f64; 3],
    pub positions: Vec<f64>,
}

/// Stand-in for the native force routine: records its inputs, returns a fixed
/// energy and writes `forces[i] = scale * (i + 1)`.
pub struct Recording {
    pub energy: f64,
    pub scale: f64,
    pub calls: Mutex<Vec<RecordedCall>>,
}

impl Recording {
    pub fn new(energy: f64, scale: f64) -> Recording {
        Recording {
            energy: energy,
            scale: scale,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("mutex was poisoned").clone()
    }

    pub fn expected_forces(&self, n_atoms: usize) -> Vec<f64> {
        (0..3 * n_atoms).map(|i| self.scale * (i + 1) as f64).collect()
    }
}

impl ForceEvaluator for Recording {
    fn compute(&self, input: &ForceInput<'_>, forces: &mut [f64]) -> Result<f64, Error> {
        assert!(forces.iter().all(|&f| f == 0.0), "forces buffer is not zero-initialized");
        assert_eq!(forces.len(), input.positions.len());

        self.calls.lock().expect("mutex was poisoned").push(RecordedCall {
            counts: input.counts,
            degrees_of_freedom: input.degrees_of_freedom(),
            cell: input.cell,
            positions: input.positions.to_vec(),
        });

        for (i, force) in forces.iter_mut().enumerate() {
            *force = self.scale * (i + 1) as f64;
        }

        Ok(self.energy)
    }
}

/// Evaluator failing every call
pub struct Failing;

impl ForceEvaluator for Failing {
    fn compute(&self, _: &ForceInput<'_>, _: &mut [f64]) -> Result<f64, Error> {
        Err(Error::Evaluator("the potential is not available".into()))
    }
}
