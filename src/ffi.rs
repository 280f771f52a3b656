use crate::Core::boundary::{UserBuffer, UserSource};
use crate::Core::error::{ChannelError, Result};
use crate::Core::module::Module;
use crate::Ring::ChannelBuilder;
use crate::Ring::Session;
use crate::Ring::Structs::Buffer_Structs::AccessMode;
use std::ptr;

/// Handle to a loaded module (opaque pointer)
pub struct ModuleHandle {
    inner: Module,
}

/// Handle to an open session (opaque pointer)
pub struct SessionHandle {
    inner: Session,
}

/// Caller-owned destination memory. A null pointer faults on copy.
struct RawUserBuffer {
    ptr: *mut u8,
    len: usize,
}

impl UserBuffer for RawUserBuffer {
    fn capacity(&self) -> usize {
        self.len
    }

    fn copy_to_user(&mut self, src: &[u8]) -> Result<()> {
        if self.ptr.is_null() || src.len() > self.len {
            return Err(ChannelError::TransferFault);
        }
        unsafe {
            ptr::copy_nonoverlapping(src.as_ptr(), self.ptr, src.len());
        }
        Ok(())
    }
}

/// Caller-owned source memory. A null pointer faults on copy.
struct RawUserSource {
    ptr: *const u8,
    len: usize,
}

impl UserSource for RawUserSource {
    fn len(&self) -> usize {
        self.len
    }

    fn copy_from_user(&self, dst: &mut [u8]) -> Result<()> {
        if dst.is_empty() {
            return Ok(());
        }
        if self.ptr.is_null() || dst.len() > self.len {
            return Err(ChannelError::TransferFault);
        }
        unsafe {
            ptr::copy_nonoverlapping(self.ptr, dst.as_mut_ptr(), dst.len());
        }
        Ok(())
    }
}

fn errno_result(res: Result<usize>) -> isize {
    match res {
        Ok(n) => n as isize,
        Err(e) => -(e.errno() as isize),
    }
}

// -----------------------------------------------------------------------------
// Module API
// -----------------------------------------------------------------------------

/// Load a module with its own registry.
///
/// # Arguments
/// * `capacity` - Number of record slots (0 selects the default of 10).
/// * `record_size` - Slot size in bytes including terminator (0 selects 64).
///
/// # Returns
/// * Pointer to `ModuleHandle`, or NULL on failure.
#[no_mangle]
pub extern "C" fn ouroboros_module_load(capacity: usize, record_size: usize) -> *mut ModuleHandle {
    let mut builder = ChannelBuilder::new();
    if capacity != 0 {
        builder = builder.with_capacity(capacity);
    }
    if record_size != 0 {
        builder = builder.with_record_size(record_size);
    }

    match Module::load(Default::default(), builder) {
        Ok(module) => Box::into_raw(Box::new(ModuleHandle { inner: module })),
        Err(e) => {
            tracing::error!(error = %e, "ffi: failed to load module");
            ptr::null_mut()
        }
    }
}

/// Unload and free a module handle.
///
/// Sessions opened from it stay valid and must still be closed.
#[no_mangle]
pub extern "C" fn ouroboros_module_unload(handle: *mut ModuleHandle) {
    if !handle.is_null() {
        unsafe {
            let _ = Box::from_raw(handle); // Dropped automatically, which unloads
        }
    }
}

// -----------------------------------------------------------------------------
// Session API
// -----------------------------------------------------------------------------

/// Open a session.
///
/// # Arguments
/// * `handle` - Pointer to `ModuleHandle`.
/// * `access` - 0 read-only, 1 write-only, 2 read-write.
///
/// # Returns
/// * Pointer to `SessionHandle`, or NULL on failure.
#[no_mangle]
pub extern "C" fn ouroboros_open(handle: *const ModuleHandle, access: u32) -> *mut SessionHandle {
    if handle.is_null() {
        return ptr::null_mut();
    }
    let Some(access) = AccessMode::from_raw(access) else {
        return ptr::null_mut();
    };

    let module = unsafe { &(*handle).inner };
    match module.open(access) {
        Ok(session) => Box::into_raw(Box::new(SessionHandle { inner: session })),
        Err(e) => {
            tracing::error!(error = %e, "ffi: failed to open session");
            ptr::null_mut()
        }
    }
}

/// Read the session's record.
///
/// # Returns
/// * Number of bytes copied into `buf`.
/// * 0 at EOF (record already delivered in this session, or empty channel).
/// * `-EFAULT` if `buf` is NULL, `-EINVAL` if `count` is too small for the
///   record (the record is kept), `-EACCES` on a write-only session.
#[no_mangle]
pub extern "C" fn ouroboros_read(handle: *mut SessionHandle, buf: *mut u8, count: usize) -> isize {
    if handle.is_null() {
        return -(libc::EBADF as isize);
    }
    let session = unsafe { &mut (*handle).inner };
    let mut dst = RawUserBuffer { ptr: buf, len: count };
    errno_result(session.read(&mut dst))
}

/// Append one record.
///
/// # Returns
/// * `count` on success, even if the record was truncated.
/// * `-EFAULT` if `buf` is NULL, `-EACCES` on a read-only session.
#[no_mangle]
pub extern "C" fn ouroboros_write(handle: *mut SessionHandle, buf: *const u8, count: usize) -> isize {
    if handle.is_null() {
        return -(libc::EBADF as isize);
    }
    let session = unsafe { &mut (*handle).inner };
    let src = RawUserSource { ptr: buf, len: count };
    errno_result(session.write(&src))
}

/// Close and free a session handle.
#[no_mangle]
pub extern "C" fn ouroboros_close(handle: *mut SessionHandle) {
    if !handle.is_null() {
        unsafe {
            let _ = Box::from_raw(handle);
        }
    }
}
