//! Integration with the C language runtime.
//!
//! On the device the C runtime has no heap of its own. Its `malloc` routes through the
//! reentrant `_malloc_r` family, which this module provides on top of the host's reallocation
//! primitive, so C code and vendored libraries share the host's arena with everything else.
//!
//! In the simulator the game is loaded next to a C library that has its own heap. With the
//! `simulator` feature the plain `malloc`, `realloc`, `free` and `calloc` are replaced so the
//! game still allocates from the host's arena. The feature replaces the allocator of whatever
//! binary it is linked into, so it should only be enabled for the game's simulator library.
//!
//! The C runtime does provide a mechanism for locking the allocator. We don't implement it
//! because the host calls into the game from a single thread.

pub mod alloc;
