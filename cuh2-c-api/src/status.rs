use std::panic::UnwindSafe;
use std::cell::RefCell;
use std::os::raw::c_char;
use std::ffi::CString;

use cuh2::Error;

// Save the last error message in thread local storage.
//
// This is marginally better than a standard global static value because it
// allow multiple threads to each have separate errors conditions.
thread_local! {
    pub static LAST_ERROR_MESSAGE: RefCell<CString> = RefCell::new(CString::new("").expect("invalid C string"));
}

/// Status type returned by all functions in the C API.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum cuh2_status_t {
    /// The function succeeded
    CUH2_SUCCESS = 0,
    /// A function got an invalid parameter
    CUH2_INVALID_PARAMETER_ERROR = 1,
    /// There was an error reading or writing JSON
    CUH2_JSON_ERROR = 2,
    /// A string contains non-utf8 data
    CUH2_UTF8_ERROR = 3,
    /// Wrong number of inputs or outputs
    CUH2_ARGUMENT_COUNT_ERROR = 4,
    /// An input has the wrong element type
    CUH2_INVALID_TYPE_ERROR = 5,
    /// An input has the wrong dimensions
    CUH2_INVALID_SHAPE_ERROR = 6,
    /// An input contains an unsupported value
    CUH2_INVALID_VALUE_ERROR = 7,
    /// The force evaluator failed
    CUH2_EVALUATOR_ERROR = 8,
    /// There was an error of unknown kind
    CUH2_UNKNOWN_ERROR = 254,
    /// There was an internal error (rust panic)
    CUH2_INTERNAL_PANIC = 255,
}

impl cuh2_status_t {
    pub fn is_success(self) -> bool {
        self == cuh2_status_t::CUH2_SUCCESS
    }
}

impl From<Error> for cuh2_status_t {
    fn from(error: Error) -> cuh2_status_t {
        LAST_ERROR_MESSAGE.with(|message| {
            let text = format!("{}", error).replace('\0', "\\0");
            *message.borrow_mut() = CString::new(text).expect("null bytes were removed");
        });
        match error {
            Error::InvalidParameter(_) => cuh2_status_t::CUH2_INVALID_PARAMETER_ERROR,
            Error::Json(_) => cuh2_status_t::CUH2_JSON_ERROR,
            Error::Utf8(_) => cuh2_status_t::CUH2_UTF8_ERROR,
            Error::ArgumentCount(_) => cuh2_status_t::CUH2_ARGUMENT_COUNT_ERROR,
            Error::InvalidType { .. } => cuh2_status_t::CUH2_INVALID_TYPE_ERROR,
            Error::InvalidShape { .. } => cuh2_status_t::CUH2_INVALID_SHAPE_ERROR,
            Error::InvalidValue { .. } => cuh2_status_t::CUH2_INVALID_VALUE_ERROR,
            Error::Evaluator(_) => cuh2_status_t::CUH2_EVALUATOR_ERROR,
            Error::Panic(_) => cuh2_status_t::CUH2_INTERNAL_PANIC,
            _ => cuh2_status_t::CUH2_UNKNOWN_ERROR,
        }
    }
}

/// An alternative to `std::panic::catch_unwind` that automatically transform
/// the error into `cuh2_status_t`.
pub fn catch_unwind<F>(function: F) -> cuh2_status_t where F: FnOnce() -> Result<(), Error> + UnwindSafe {
    match std::panic::catch_unwind(function) {
        Ok(Ok(())) => cuh2_status_t::CUH2_SUCCESS,
        Ok(Err(error)) => error.into(),
        Err(error) => Error::from(error).into()
    }
}

/// Check that pointers (used as C API function parameters) are not null.
#[macro_export]
macro_rules! check_pointers {
    ($pointer: ident) => {
        if $pointer.is_null() {
            return Err(cuh2::Error::InvalidParameter(
                format!("got invalid NULL pointer for {}", stringify!($pointer))
            ));
        }
    };
    ($($pointer: ident),* $(,)?) => {
        $(check_pointers!($pointer);)*
    }
}

/// Get the last error message that was created on the current thread.
///
/// @returns the last error message, as a NULL-terminated string
#[no_mangle]
pub unsafe extern fn cuh2_last_error() -> *const c_char {
    let mut result = std::ptr::null();
    let wrapper = std::panic::AssertUnwindSafe(&mut result);
    let status = catch_unwind(move || {
        let wrapper = wrapper;
        LAST_ERROR_MESSAGE.with(|message| {
            *wrapper.0 = message.borrow().as_ptr();
        });
        Ok(())
    });

    if status != cuh2_status_t::CUH2_SUCCESS {
        eprintln!("ERROR: unable to get last error message!");
        return std::ptr::null();
    }

    return result;
}
