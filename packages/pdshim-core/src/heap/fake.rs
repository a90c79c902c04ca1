//! Host primitives for tests.
//!
//! Each fake records the arguments it was called with in a thread-local log, so tests
//! running in parallel never see each other's calls.

use core::{cell::RefCell, ffi::c_void, ptr};

use super::{Heap, SystemHeap};

/// One recorded call to a fake primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Call {
    pub ptr: usize,
    pub size: usize,
}

impl Call {
    pub fn new(ptr: *mut c_void, size: usize) -> Self {
        Self {
            ptr: ptr.addr(),
            size,
        }
    }
}

thread_local! {
    static CALLS: RefCell<Vec<Call>> = const { RefCell::new(Vec::new()) };
}

fn record(ptr: *mut c_void, size: usize) {
    CALLS.with_borrow_mut(|calls| calls.push(Call::new(ptr, size)));
}

/// Clears this thread's call log.
pub fn reset() {
    CALLS.with_borrow_mut(Vec::clear);
}

/// Returns and clears this thread's call log.
pub fn take_calls() -> Vec<Call> {
    CALLS.take()
}

/// Records the call, then serves it from the native heap.
pub unsafe extern "C" fn recording_realloc(ptr: *mut c_void, size: usize) -> *mut c_void {
    record(ptr, size);
    unsafe { SystemHeap.reallocate(ptr, size) }
}

/// Records the call, then fails every request as if the arena had no capacity left.
pub unsafe extern "C" fn exhausted_realloc(ptr: *mut c_void, size: usize) -> *mut c_void {
    record(ptr, size);
    ptr::null_mut()
}
