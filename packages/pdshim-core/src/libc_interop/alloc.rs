//! C memory management that delegates to the host's reallocation primitive.

use core::{
    ffi::{c_int, c_void},
    ptr,
};

use pdshim_sys::{EINVAL, ENOMEM};

use crate::heap::{Heap, HostHeap, NATURAL_ALIGNMENT};

static HEAP: HostHeap<'static> = HostHeap::global();

/// Allocates `nmemb * size` zeroed bytes, or returns null if the product overflows or the heap
/// is exhausted.
fn calloc_in(heap: &impl Heap, nmemb: usize, size: usize) -> *mut c_void {
    let Some(total) = nmemb.checked_mul(size) else {
        return ptr::null_mut();
    };

    let block = heap.allocate(total);
    if !block.is_null() {
        // SAFETY: `block` was just allocated with room for `total` bytes.
        unsafe { ptr::write_bytes(block.cast::<u8>(), 0, total) };
    }

    block
}

/// Allocates a block aligned to `align`.
///
/// The host primitive never places a block at a stricter boundary than [`NATURAL_ALIGNMENT`], and
/// a block offset into a larger one could not be passed back to `free`. Stricter alignments are
/// rejected with `EINVAL`.
///
/// # Safety
///
/// `memptr` must be valid for writes.
unsafe fn posix_memalign_in(
    heap: &impl Heap,
    memptr: *mut *mut c_void,
    align: usize,
    size: usize,
) -> c_int {
    if !align.is_power_of_two() || !align.is_multiple_of(size_of::<*const ()>()) {
        return EINVAL;
    }

    if align > NATURAL_ALIGNMENT {
        return EINVAL;
    }

    if size == 0 {
        unsafe { memptr.write(ptr::null_mut()) };
        return 0;
    }

    let block = heap.allocate(size);
    if block.is_null() {
        return ENOMEM;
    }

    unsafe { memptr.write(block) };
    0
}

/// Like [`posix_memalign_in`], but any power of two up to [`NATURAL_ALIGNMENT`] is accepted and
/// failure is reported as null.
fn aligned_alloc_in(heap: &impl Heap, align: usize, size: usize) -> *mut c_void {
    if !align.is_power_of_two() || align > NATURAL_ALIGNMENT {
        return ptr::null_mut();
    }

    heap.allocate(size)
}

/// The reentrant C `malloc`.
#[cfg_attr(all(feature = "libc", target_os = "none"), unsafe(no_mangle))]
pub extern "C" fn _malloc_r(_reent: *mut c_void, size: usize) -> *mut c_void {
    HEAP.allocate(size)
}

/// The reentrant C `realloc`.
///
/// # Safety
///
/// `ptr` must be null or a live block from this allocator.
#[cfg_attr(all(feature = "libc", target_os = "none"), unsafe(no_mangle))]
pub unsafe extern "C" fn _realloc_r(
    _reent: *mut c_void,
    ptr: *mut c_void,
    size: usize,
) -> *mut c_void {
    unsafe { HEAP.reallocate(ptr, size) }
}

/// The reentrant C `free`.
///
/// # Safety
///
/// `ptr` must be null or a live block from this allocator.
#[cfg_attr(all(feature = "libc", target_os = "none"), unsafe(no_mangle))]
pub unsafe extern "C" fn _free_r(_reent: *mut c_void, ptr: *mut c_void) {
    unsafe { HEAP.release(ptr) };
}

/// The reentrant C `calloc`.
#[cfg_attr(all(feature = "libc", target_os = "none"), unsafe(no_mangle))]
pub extern "C" fn _calloc_r(_reent: *mut c_void, nmemb: usize, size: usize) -> *mut c_void {
    calloc_in(&HEAP, nmemb, size)
}

/// Allocates `size` bytes aligned to `align`.
///
/// `align` must be a power of two and a multiple of the size of a pointer, and no larger than
/// [`NATURAL_ALIGNMENT`], or this returns `EINVAL`. Returns `ENOMEM` if the heap is exhausted.
///
/// # Safety
///
/// `memptr` must be valid for writes during the duration of this function call.
#[cfg_attr(all(feature = "libc", target_os = "none"), unsafe(no_mangle))]
pub unsafe extern "C" fn posix_memalign(
    memptr: *mut *mut c_void,
    align: usize,
    size: usize,
) -> c_int {
    unsafe { posix_memalign_in(&HEAP, memptr, align, size) }
}

/// The C `aligned_alloc` function.
///
/// Returns null for alignments that are not a power of two or exceed [`NATURAL_ALIGNMENT`].
#[cfg_attr(all(feature = "libc", target_os = "none"), unsafe(no_mangle))]
pub extern "C" fn aligned_alloc(align: usize, size: usize) -> *mut c_void {
    aligned_alloc_in(&HEAP, align, size)
}

/// The Embedded Swift runtime's coroutine frame allocation hook, `swift_coroFrameAlloc`.
///
/// Games that link Swift code need it on both the device and the simulator. Frames are always
/// fresh allocations, and the type id is only meaningful to typed allocators.
#[cfg_attr(feature = "libc", unsafe(export_name = "swift_coroFrameAlloc"))]
pub extern "C" fn coro_frame_alloc(bytes: usize, _type_id: u64) -> *mut c_void {
    HEAP.allocate(bytes)
}

/// The C `malloc` of a simulator build.
///
/// The simulator's C library has its own heap, so the plain entry points are replaced instead of
/// newlib's reentrant hooks.
#[cfg(not(target_os = "none"))]
#[cfg_attr(all(feature = "simulator", not(test)), unsafe(no_mangle))]
pub extern "C" fn malloc(size: usize) -> *mut c_void {
    HEAP.allocate(size)
}

/// The C `realloc` of a simulator build.
///
/// # Safety
///
/// `ptr` must be null or a live block from this allocator.
#[cfg(not(target_os = "none"))]
#[cfg_attr(all(feature = "simulator", not(test)), unsafe(no_mangle))]
pub unsafe extern "C" fn realloc(ptr: *mut c_void, size: usize) -> *mut c_void {
    unsafe { HEAP.reallocate(ptr, size) }
}

/// The C `free` of a simulator build.
///
/// # Safety
///
/// `ptr` must be null or a live block from this allocator.
#[cfg(not(target_os = "none"))]
#[cfg_attr(all(feature = "simulator", not(test)), unsafe(no_mangle))]
pub unsafe extern "C" fn free(ptr: *mut c_void) {
    unsafe { HEAP.release(ptr) };
}

/// The C `calloc` of a simulator build.
#[cfg(not(target_os = "none"))]
#[cfg_attr(all(feature = "simulator", not(test)), unsafe(no_mangle))]
pub extern "C" fn calloc(nmemb: usize, size: usize) -> *mut c_void {
    calloc_in(&HEAP, nmemb, size)
}
