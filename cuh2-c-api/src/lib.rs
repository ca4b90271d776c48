//! C API for the Cu-H embedded-atom method binding layer.
//!
//! Host runtimes load this library, provide a `cuh2_evaluator_t` (or get the
//! Fortran one with `cuh2_native_evaluator`) and call `cuh2_evaluate`.
#![warn(clippy::all, clippy::pedantic)]

// disable some style lints
#![allow(clippy::needless_return, clippy::redundant_field_names, clippy::upper_case_acronyms)]
#![allow(clippy::missing_errors_doc, clippy::missing_safety_doc, clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate, clippy::module_name_repetitions)]

mod utils;
#[macro_use]
mod status;
pub use self::status::{catch_unwind, cuh2_status_t, cuh2_last_error};

pub mod logging;
pub mod profiling;
pub mod evaluator;
