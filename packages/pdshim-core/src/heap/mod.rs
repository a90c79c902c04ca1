//! Heap backends.
//!
//! Every allocation surface in this crate is written against the [`Heap`] trait, which is
//! shaped exactly like the host's `realloc` primitive. There are two backends:
//!
//! - [`HostHeap`] calls through the primitive captured at the init event.
//! - [`SystemHeap`] uses the platform's native `malloc` family. It only exists on desktop
//!   builds, where there is a native heap to use.
//!
//! [`DefaultHeap`] names whichever of the two redirected code should use on the current target.

use core::{ffi::c_void, ptr};

use cfg_if::cfg_if;
use static_assertions::const_assert;

mod host;
#[cfg(not(target_os = "none"))]
mod system;

#[cfg(test)]
pub(crate) mod fake;

pub use host::{HOST_REALLOC, HostHeap, ReallocCell};
#[cfg(not(target_os = "none"))]
pub use system::SystemHeap;

/// The alignment of every block handed out by a heap.
///
/// This is 8 bytes on the device because that is the largest alignment of any basic type in the
/// ARM procedure call standard. On desktop it matches what the native `malloc` guarantees.
///
/// Always a power of two, and never smaller than a pointer.
pub const NATURAL_ALIGNMENT: usize = if cfg!(target_os = "none") {
    8
} else {
    2 * size_of::<usize>()
};

const_assert!(NATURAL_ALIGNMENT.is_power_of_two());
const_assert!(NATURAL_ALIGNMENT >= size_of::<*const ()>());

cfg_if! {
    if #[cfg(target_os = "none")] {
        /// The heap that redirected allocations are served from on this target.
        ///
        /// On the device this is the host's arena.
        pub type DefaultHeap = HostHeap<'static>;
    } else {
        /// The heap that redirected allocations are served from on this target.
        ///
        /// Desktop builds have a native heap, so no redirection happens.
        pub type DefaultHeap = SystemHeap;
    }
}

/// A source of memory shaped like the host's reallocation primitive.
///
/// The meaning of a call depends only on which arguments are null or zero:
///
/// | `ptr`    | `size` | Meaning                                               |
/// |----------|--------|-------------------------------------------------------|
/// | null     | n > 0  | allocate `n` fresh bytes                              |
/// | non-null | n > 0  | resize, preserving contents up to the smaller size   |
/// | non-null | 0      | release the block                                     |
///
/// A null return means the heap is exhausted. Failures are never retried or reported here.
///
/// # Safety
///
/// Implementors must follow the table above. In particular, a resize must preserve the first
/// `min(old, new)` bytes of the block, and every returned non-null block must be aligned to at
/// least [`NATURAL_ALIGNMENT`].
pub unsafe trait Heap {
    /// The raw primitive.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or a live block previously returned by this heap. After a call with
    /// a non-null `ptr`, that block must no longer be used.
    unsafe fn reallocate(&self, ptr: *mut c_void, size: usize) -> *mut c_void;

    /// Allocates `size` fresh bytes. Returns null if the heap is exhausted.
    fn allocate(&self, size: usize) -> *mut c_void {
        // SAFETY: A null pointer is always a valid argument.
        unsafe { self.reallocate(ptr::null_mut(), size) }
    }

    /// Resizes a block, preserving its contents up to the smaller of the two sizes.
    ///
    /// # Safety
    ///
    /// Same as [`Heap::reallocate`].
    unsafe fn resize(&self, ptr: *mut c_void, size: usize) -> *mut c_void {
        unsafe { self.reallocate(ptr, size) }
    }

    /// Releases a block. Releasing null does nothing and never reaches the primitive.
    ///
    /// # Safety
    ///
    /// Same as [`Heap::reallocate`].
    unsafe fn release(&self, ptr: *mut c_void) {
        if ptr.is_null() {
            return;
        }

        unsafe {
            self.reallocate(ptr, 0);
        }
    }
}
