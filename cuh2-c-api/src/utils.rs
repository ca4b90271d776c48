use std::os::raw::c_char;

use cuh2::Error;

/// Copy `data` into the `buffer` of size `bufflen`, adding a NULL terminator.
pub unsafe fn copy_str_to_c(data: &str, buffer: *mut c_char, bufflen: usize) -> Result<(), Error> {
    if buffer.is_null() {
        return Err(Error::InvalidParameter("got invalid NULL pointer for buffer".into()));
    }

    if data.len() + 1 > bufflen {
        return Err(Error::InvalidParameter(format!(
            "string buffer is not big enough: got {} bytes, need {}", bufflen, data.len() + 1
        )));
    }

    std::ptr::copy_nonoverlapping(data.as_ptr().cast(), buffer, data.len());
    *buffer.add(data.len()) = 0;

    Ok(())
}
