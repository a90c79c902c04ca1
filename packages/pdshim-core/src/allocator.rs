//! Rust global allocator over a [`Heap`].
//!
//! [`HostAllocator`] lets Rust code share the host's arena with C code. Install it with
//! `#[global_allocator]`:
//!
//! ```ignore
//! use pdshim::allocator::HostAllocator;
//!
//! #[global_allocator]
//! static ALLOCATOR: HostAllocator = HostAllocator::new();
//! ```
//!
//! The host primitive only guarantees [`NATURAL_ALIGNMENT`]. Layouts that need more are
//! over-allocated, and the pointer the heap returned is stored in the word just before the
//! aligned block so it can be handed back on deallocation.

use core::{
    alloc::{GlobalAlloc, Layout},
    ffi::c_void,
    ptr,
};

use crate::heap::{Heap, HostHeap, NATURAL_ALIGNMENT};

/// A [`GlobalAlloc`] that serves every request from a [`Heap`].
#[derive(Debug, Clone, Copy)]
pub struct HostAllocator<H = HostHeap<'static>> {
    heap: H,
}

impl HostAllocator {
    /// An allocator over the host's captured primitive.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            heap: HostHeap::global(),
        }
    }
}

impl Default for HostAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Heap> HostAllocator<H> {
    /// An allocator over any heap.
    pub const fn with_heap(heap: H) -> Self {
        Self { heap }
    }

    /// Serves a layout whose alignment is above [`NATURAL_ALIGNMENT`].
    ///
    /// The block is `size + align` bytes. Because the heap's result is at least naturally
    /// aligned, the distance to the next `align` boundary is at least `NATURAL_ALIGNMENT`, which
    /// leaves room for the base pointer just below the aligned address.
    fn alloc_overaligned(&self, layout: Layout) -> *mut u8 {
        let Some(total) = layout.size().checked_add(layout.align()) else {
            return ptr::null_mut();
        };

        let base = self.heap.allocate(total).cast::<u8>();
        if base.is_null() {
            return ptr::null_mut();
        }

        let offset = layout.align() - (base.addr() & (layout.align() - 1));
        // SAFETY: `offset` is in `NATURAL_ALIGNMENT..=align`, so the aligned block and the word
        // below it are both inside the `size + align` bytes we were given.
        unsafe {
            let aligned = base.add(offset);
            aligned.cast::<*mut u8>().sub(1).write(base);
            aligned
        }
    }

    /// Returns the pointer the heap handed out for an over-aligned block.
    ///
    /// # Safety
    ///
    /// `ptr` must have come from [`Self::alloc_overaligned`].
    const unsafe fn overaligned_base(ptr: *mut u8) -> *mut u8 {
        unsafe { ptr.cast::<*mut u8>().sub(1).read() }
    }
}

// SAFETY: Naturally aligned layouts are passed straight through. Larger alignments are
// satisfied by offsetting into an over-sized block.
unsafe impl<H: Heap> GlobalAlloc for HostAllocator<H> {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if layout.align() <= NATURAL_ALIGNMENT {
            return self.heap.allocate(layout.size()).cast();
        }

        self.alloc_overaligned(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        let base = if layout.align() <= NATURAL_ALIGNMENT {
            ptr
        } else {
            unsafe { Self::overaligned_base(ptr) }
        };

        unsafe { self.heap.release(base.cast::<c_void>()) };
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if layout.align() <= NATURAL_ALIGNMENT {
            return unsafe { self.heap.resize(ptr.cast(), new_size) }.cast();
        }

        // SAFETY: The caller guarantees `new_size` rounded up to `align` does not overflow.
        let new_layout = unsafe { Layout::from_size_align_unchecked(new_size, layout.align()) };
        let new_ptr = self.alloc_overaligned(new_layout);
        if !new_ptr.is_null() {
            unsafe {
                ptr::copy_nonoverlapping(ptr, new_ptr, layout.size().min(new_size));
                self.dealloc(ptr, layout);
            }
        }

        new_ptr
    }
}
