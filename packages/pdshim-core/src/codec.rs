//! Allocation callbacks for the vendored PNG codec.
//!
//! The codec is built without a heap of its own and calls these three functions for all of
//! its dynamic memory. They follow the same contract as the rest of the allocation surface.
//!
//! On the device they draw from the host's arena, so decoded images share it with the game.
//! On desktop they go straight to the native heap.

use core::ffi::c_void;

use crate::heap::{DefaultHeap, Heap};

fn heap() -> DefaultHeap {
    DefaultHeap::default()
}

/// Allocates `size` bytes for the codec.
#[cfg_attr(feature = "codec", unsafe(no_mangle))]
pub extern "C" fn lodepng_malloc(size: usize) -> *mut c_void {
    heap().allocate(size)
}

/// Resizes a codec block. A null `ptr` allocates.
///
/// # Safety
///
/// `ptr` must be null or a live block from [`lodepng_malloc`] or [`lodepng_realloc`].
#[cfg_attr(feature = "codec", unsafe(no_mangle))]
pub unsafe extern "C" fn lodepng_realloc(ptr: *mut c_void, size: usize) -> *mut c_void {
    unsafe { heap().reallocate(ptr, size) }
}

/// Releases a codec block. Releasing null does nothing.
///
/// # Safety
///
/// `ptr` must be null or a live block from [`lodepng_malloc`] or [`lodepng_realloc`].
#[cfg_attr(feature = "codec", unsafe(no_mangle))]
pub unsafe extern "C" fn lodepng_free(ptr: *mut c_void) {
    unsafe { heap().release(ptr) };
}
