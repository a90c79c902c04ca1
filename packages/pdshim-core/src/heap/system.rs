//! The platform's native heap.

use core::{ffi::c_void, ptr};

use super::Heap;

unsafe extern "C" {
    fn malloc(size: usize) -> *mut c_void;
    fn realloc(ptr: *mut c_void, size: usize) -> *mut c_void;
    fn free(ptr: *mut c_void);
}

/// A [`Heap`] over the C library's `malloc`, `realloc` and `free`.
///
/// Only available on desktop builds. On the device the C library's `malloc` is itself
/// redirected to the host, so there is no separate native heap to use.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHeap;

// SAFETY: `malloc`, `realloc` and `free` together implement the `Heap` contract.
unsafe impl Heap for SystemHeap {
    unsafe fn reallocate(&self, ptr: *mut c_void, size: usize) -> *mut c_void {
        if ptr.is_null() {
            return self.allocate(size);
        }

        if size == 0 {
            unsafe { free(ptr) };
            return ptr::null_mut();
        }

        unsafe { realloc(ptr, size) }
    }

    fn allocate(&self, size: usize) -> *mut c_void {
        // SAFETY: `malloc` accepts any size.
        unsafe { malloc(size) }
    }

    unsafe fn release(&self, ptr: *mut c_void) {
        // `free(NULL)` is a no-op.
        unsafe { free(ptr) }
    }
}

#[cfg(test)]
mod test {
    use core::ptr;

    use super::*;

    #[test]
    fn follows_realloc_table() {
        let heap = SystemHeap;

        let block = heap.allocate(8).cast::<u64>();
        assert!(!block.is_null());
        unsafe { block.write(0xDEAD_BEEF) };

        let grown = unsafe { heap.reallocate(block.cast(), 64) }.cast::<u64>();
        assert!(!grown.is_null());
        assert_eq!(unsafe { grown.read() }, 0xDEAD_BEEF);

        let released = unsafe { heap.reallocate(grown.cast(), 0) };
        assert!(released.is_null());

        unsafe { heap.release(ptr::null_mut()) };
    }
}
