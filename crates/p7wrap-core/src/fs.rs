//! Filesystem access checks used by request validation.

use std::path::Path;

/// Returns `true` if the path exists.
#[inline]
#[must_use]
pub fn exists(path: &Path) -> bool {
    path.exists()
}

/// Returns `true` if the current process may read the path.
#[must_use]
pub fn is_readable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        access(path, libc::R_OK)
    }

    #[cfg(not(unix))]
    {
        if path.is_dir() {
            std::fs::read_dir(path).is_ok()
        } else {
            std::fs::File::open(path).is_ok()
        }
    }
}

/// Returns `true` if the current process may write to the path.
#[must_use]
pub fn is_writable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        access(path, libc::W_OK)
    }

    #[cfg(not(unix))]
    {
        std::fs::metadata(path).is_ok_and(|m| !m.permissions().readonly())
    }
}

/// Checks effective permissions with `access(2)`.
#[cfg(unix)]
fn access(path: &Path, mode: libc::c_int) -> bool {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let Ok(path_cstring) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };

    // SAFETY: access() only reads the NUL-terminated string, which outlives
    // the call.
    #[allow(unsafe_code)]
    let result = unsafe { libc::access(path_cstring.as_ptr(), mode) };

    result == 0
}
