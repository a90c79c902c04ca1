//! The heap backed by the host's captured reallocation primitive.

use core::{
    ffi::c_void,
    fmt::{self, Debug},
    ptr,
};

use pdshim_sys::pd_realloc;
use snafu::ensure;
use spin::Once;

use super::Heap;
use crate::error::{AlreadyCapturedSnafu, InitError};

/// The primitive every redirected allocation in the program goes through.
///
/// This is armed by the startup shim when the host delivers its init event.
pub static HOST_REALLOC: ReallocCell = ReallocCell::new();

/// A write-once slot holding the host's reallocation primitive.
///
/// Once a primitive is stored it can never be replaced. A later attempt is reported as
/// [`InitError::AlreadyCaptured`] instead of swapping the allocator out from under live blocks.
pub struct ReallocCell {
    primitive: Once<pd_realloc>,
}

impl ReallocCell {
    /// Creates an empty cell.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            primitive: Once::new(),
        }
    }

    /// Stores the primitive if the cell is still empty.
    ///
    /// # Errors
    ///
    /// Returns [`InitError::AlreadyCaptured`] if a primitive was stored earlier. The stored
    /// primitive is left in place.
    pub fn set(&self, primitive: pd_realloc) -> Result<(), InitError> {
        let mut stored = false;
        self.primitive.call_once(|| {
            stored = true;
            primitive
        });

        ensure!(stored, AlreadyCapturedSnafu);
        Ok(())
    }

    /// Returns the stored primitive, if any.
    pub fn get(&self) -> Option<pd_realloc> {
        self.primitive.get().copied()
    }

    /// Returns `true` once a primitive has been stored.
    pub fn is_armed(&self) -> bool {
        self.primitive.is_completed()
    }
}

impl Default for ReallocCell {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for ReallocCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReallocCell")
            .field("armed", &self.is_armed())
            .finish()
    }
}

/// A [`Heap`] that calls through the primitive stored in a [`ReallocCell`].
///
/// Before the cell is armed every request fails as if the heap were exhausted. The host
/// delivers its init event before any game code runs, so this only happens when something
/// allocates from a static constructor.
#[derive(Debug, Clone, Copy)]
pub struct HostHeap<'a> {
    cell: &'a ReallocCell,
}

impl<'a> HostHeap<'a> {
    /// Creates a heap over the given cell.
    #[must_use]
    pub const fn new(cell: &'a ReallocCell) -> Self {
        Self { cell }
    }
}

impl HostHeap<'static> {
    /// The heap over [`HOST_REALLOC`].
    #[must_use]
    pub const fn global() -> Self {
        Self::new(&HOST_REALLOC)
    }
}

impl Default for HostHeap<'static> {
    fn default() -> Self {
        Self::global()
    }
}

// SAFETY: The host primitive follows the `Heap` contract.
unsafe impl Heap for HostHeap<'_> {
    unsafe fn reallocate(&self, ptr: *mut c_void, size: usize) -> *mut c_void {
        let Some(primitive) = self.cell.get() else {
            return ptr::null_mut();
        };

        unsafe { primitive(ptr, size) }
    }
}

#[cfg(test)]
mod test {
    use core::{ffi::c_void, ptr};

    use super::*;
    use crate::heap::fake::{self, Call};

    #[test]
    fn cell_is_write_once() {
        let cell = ReallocCell::new();
        assert!(!cell.is_armed());
        assert!(cell.get().is_none());

        assert_eq!(cell.set(fake::recording_realloc), Ok(()));
        assert!(cell.is_armed());

        assert_eq!(
            cell.set(fake::exhausted_realloc),
            Err(InitError::AlreadyCaptured)
        );
        let stored = cell.get().unwrap();
        assert!(core::ptr::fn_addr_eq(
            stored,
            fake::recording_realloc as pd_realloc
        ));
    }

    #[test]
    fn unarmed_heap_fails_without_calling() {
        fake::reset();
        let cell = ReallocCell::new();
        let heap = HostHeap::new(&cell);

        assert!(heap.allocate(32).is_null());
        assert!(fake::take_calls().is_empty());
    }

    #[test]
    fn releasing_null_never_reaches_primitive() {
        fake::reset();
        let cell = ReallocCell::new();
        cell.set(fake::recording_realloc).unwrap();
        let heap = HostHeap::new(&cell);

        unsafe {
            heap.release(ptr::null_mut());
        }
        assert!(fake::take_calls().is_empty());
    }

    #[test]
    fn allocate_is_realloc_from_null() {
        fake::reset();
        let cell = ReallocCell::new();
        cell.set(fake::recording_realloc).unwrap();
        let heap = HostHeap::new(&cell);

        let block = heap.allocate(48);
        assert!(!block.is_null());

        let direct = unsafe { heap.reallocate(ptr::null_mut(), 48) };
        assert!(!direct.is_null());

        assert_eq!(
            fake::take_calls(),
            [Call::new(ptr::null_mut(), 48), Call::new(ptr::null_mut(), 48)]
        );

        unsafe {
            heap.release(block);
            heap.release(direct);
        }
    }

    #[test]
    fn release_is_realloc_to_zero() {
        fake::reset();
        let cell = ReallocCell::new();
        cell.set(fake::recording_realloc).unwrap();
        let heap = HostHeap::new(&cell);

        let block = heap.allocate(16);
        fake::reset();

        unsafe {
            heap.release(block);
        }
        assert_eq!(fake::take_calls(), [Call::new(block, 0)]);
    }

    #[test]
    fn resize_preserves_contents() {
        fake::reset();
        let cell = ReallocCell::new();
        cell.set(fake::recording_realloc).unwrap();
        let heap = HostHeap::new(&cell);

        let pattern: [u8; 24] = core::array::from_fn(|i| (i * 7) as u8);
        let block = heap.allocate(32).cast::<u8>();
        assert!(!block.is_null());

        unsafe {
            ptr::copy_nonoverlapping(pattern.as_ptr(), block, pattern.len());
        }

        let grown = unsafe { heap.resize(block.cast::<c_void>(), 4096) }.cast::<u8>();
        assert!(!grown.is_null());
        let contents = unsafe { core::slice::from_raw_parts(grown, pattern.len()) };
        assert_eq!(contents, pattern);

        let shrunk = unsafe { heap.resize(grown.cast::<c_void>(), 24) }.cast::<u8>();
        assert!(!shrunk.is_null());
        let contents = unsafe { core::slice::from_raw_parts(shrunk, pattern.len()) };
        assert_eq!(contents, pattern);

        unsafe {
            heap.release(shrunk.cast::<c_void>());
        }
    }

    #[test]
    fn exhaustion_is_propagated() {
        fake::reset();
        let cell = ReallocCell::new();
        cell.set(fake::exhausted_realloc).unwrap();
        let heap = HostHeap::new(&cell);

        assert!(heap.allocate(64).is_null());
        assert_eq!(fake::take_calls(), [Call::new(ptr::null_mut(), 64)]);
    }
}
