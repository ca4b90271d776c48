use std::ffi::CString;
use std::sync::Mutex;

use log::{Record, Metadata};
use once_cell::sync::Lazy;

use cuh2::Error;

use crate::{catch_unwind, cuh2_status_t};

/// Callback function type for logging. The first parameter is the log level
/// (1 = error to 5 = trace) and the second the NULL-terminated message.
#[allow(non_camel_case_types)]
pub type cuh2_logging_callback_t = Option<unsafe extern fn(level: i32, message: *const std::os::raw::c_char)>;

static GLOBAL_CALLBACK: Lazy<Mutex<cuh2_logging_callback_t>> = Lazy::new(|| Mutex::new(None));

/// Implementation of `log::Log` that forward all log messages to the global
/// `cuh2_logging_callback_t`.
struct Cuh2Logger;

/// Set the function used to report log messages, and the maximal level of
/// the messages to report.
///
/// @param callback function receiving the log messages, or NULL to discard
///                 all messages
/// @param log_level maximal level of reported messages: 0 = off, 1 = error,
///                  2 = warn, 3 = info, 4 = debug, 5 = trace
///
/// @returns The status code of this operation. If the status is not
///          `CUH2_SUCCESS`, you can use `cuh2_last_error()` to get the full
///          error message.
#[no_mangle]
pub unsafe extern fn cuh2_set_logging_callback(callback: cuh2_logging_callback_t, log_level: i32) -> cuh2_status_t {
    catch_unwind(|| {
        let level = match log_level {
            0 => log::LevelFilter::Off,
            1 => log::LevelFilter::Error,
            2 => log::LevelFilter::Warn,
            3 => log::LevelFilter::Info,
            4 => log::LevelFilter::Debug,
            5 => log::LevelFilter::Trace,
            _ => return Err(Error::InvalidParameter(format!(
                "log level {} not known, please use an integer in the range [0, 5]", log_level
            )))
        };

        *GLOBAL_CALLBACK.lock().expect("mutex was poisoned") = callback;
        // we allow multiple sets of logger, therefore the result will be ignored
        let _ = log::set_boxed_logger(Box::new(Cuh2Logger));
        log::set_max_level(level);

        Ok(())
    })
}

impl log::Log for Cuh2Logger {
    fn enabled(&self, _: &Metadata) -> bool {
        return true;
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let message = format!("{} -- {}", record.target(), record.args());
            let message = message.replace('\0', "\\0");
            let Ok(message_cstr) = CString::new(message) else {
                return;
            };

            if let Some(callback) = *GLOBAL_CALLBACK.lock().expect("mutex was poisoned") {
                unsafe {
                    callback(record.level() as i32, message_cstr.as_ptr());
                }
            }
        }
    }

    fn flush(&self) {}
}
