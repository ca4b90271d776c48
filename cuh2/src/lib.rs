//! Typed binding layer around the Cu-H embedded-atom method (EAM) force
//! routine.
//!
//! The energy and forces are computed by an external [`ForceEvaluator`],
//! usually the Fortran `c_force_eam` routine (see `NativeEam`, available
//! with the `native` feature). This crate validates inputs, converts them to
//! the layout the routine expects and packages the results.
#![warn(clippy::all, clippy::pedantic)]

// disable some style lints
#![allow(clippy::needless_return, clippy::must_use_candidate, clippy::redundant_field_names)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc, clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]

// Tests lints
#![cfg_attr(test, allow(clippy::float_cmp))]

mod errors;
pub use self::errors::Error;

mod species;
pub use self::species::{Species, SpeciesCounts};

pub mod layout;
pub use self::layout::StorageOrder;

mod options;
pub use self::options::{AdapterOptions, BoxPolicy, options_schema};

mod cell;
pub use self::cell::{SimulationBox, BoxShape};

mod evaluator;
pub use self::evaluator::{ForceEvaluator, ForceInput};
#[cfg(feature = "native")]
pub use self::evaluator::NativeEam;

mod adapter;
pub use self::adapter::{PotentialAdapter, EvaluationResult};

pub mod gateway;
