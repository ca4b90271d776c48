//! Timing of the evaluation steps, collected with
//! [`time_graph`](https://docs.rs/time-graph/).
//!
//! Every call to `cuh2_evaluate` records a `PotentialAdapter::evaluate` span,
//! split into `PotentialAdapter::validate`, `PotentialAdapter::marshal` and
//! `ForceEvaluator::compute` (which contains the span of the evaluator
//! itself, `cuh2_evaluator_t::compute` or `NativeEam::compute`).
use std::os::raw::c_char;
use std::ffi::CStr;

use cuh2::Error;

use crate::{catch_unwind, cuh2_status_t};
use crate::utils::copy_str_to_c;

/// Formats in which the profiling data can be extracted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReportFormat {
    /// table with the full name of the spans
    Table,
    /// table with the short name of the spans
    ShortTable,
    /// JSON document with timings and call counts
    Json,
}

impl ReportFormat {
    fn parse(format: &str) -> Result<ReportFormat, Error> {
        match format {
            "table" => Ok(ReportFormat::Table),
            "short_table" => Ok(ReportFormat::ShortTable),
            "json" => Ok(ReportFormat::Json),
            _ => Err(Error::InvalidParameter(format!(
                "invalid data format in cuh2_profiling_get: {}, expected 'table', 'short_table' or 'json'",
                format
            )))
        }
    }

    fn report(self) -> String {
        let graph = time_graph::get_full_graph();
        match self {
            ReportFormat::Table => graph.as_table(),
            ReportFormat::ShortTable => graph.as_short_table(),
            ReportFormat::Json => graph.as_json(),
        }
    }
}

/// Clear all collected profiling data
///
/// @returns The status code of this operation. If the status is not
///          `CUH2_SUCCESS`, you can use `cuh2_last_error()` to get the full
///          error message.
#[no_mangle]
pub unsafe extern fn cuh2_profiling_clear() -> cuh2_status_t {
    catch_unwind(|| {
        time_graph::clear_collected_data();
        Ok(())
    })
}

/// Enable or disable the collection of timings for `cuh2_evaluate`. Data
/// collection is disabled by default.
///
/// @param enabled whether data collection should be enabled or not
///
/// @returns The status code of this operation. If the status is not
///          `CUH2_SUCCESS`, you can use `cuh2_last_error()` to get the full
///          error message.
#[no_mangle]
pub unsafe extern fn cuh2_profiling_enable(enabled: bool) -> cuh2_status_t {
    catch_unwind(|| {
        time_graph::enable_data_collection(enabled);
        Ok(())
    })
}

/// Write the timings collected so far in `buffer`.
///
/// @param format `"table"`, `"short_table"` or `"json"`, as a NULL-terminated
///               string
/// @param buffer pre-allocated buffer receiving the NULL-terminated report.
///               If it is too small, this function returns
///               `CUH2_INVALID_PARAMETER_ERROR`
/// @param bufflen size of the `buffer`
///
/// @returns The status code of this operation. If the status is not
///          `CUH2_SUCCESS`, you can use `cuh2_last_error()` to get the full
///          error message.
#[no_mangle]
pub unsafe extern fn cuh2_profiling_get(
    format: *const c_char,
    buffer: *mut c_char,
    bufflen: usize,
) -> cuh2_status_t {
    catch_unwind(|| {
        check_pointers!(format, buffer);
        let format = ReportFormat::parse(CStr::from_ptr(format).to_str()?)?;
        copy_str_to_c(&format.report(), buffer, bufflen)
    })
}
