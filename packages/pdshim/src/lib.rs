//! # pdshim
//!
//! Routes every allocation a Playdate game makes through the host's allocator.
//!
//! The Playdate host owns the only memory arena on the device and hands out a single
//! `realloc`-shaped function pointer when it delivers the init event. pdshim captures that
//! pointer before the game sees the event, then serves C's `malloc` family, the language
//! runtime's allocation hooks, the vendored PNG codec, and optionally Rust's global allocator
//! from it. It also provides the syscall stubs the device's C runtime needs to link.
//!
//! # Usage
//!
//! Mark the game's event handler with `#[pdshim::event_handler]`:
//!
//! ```ignore
//! #![no_std]
//!
//! use core::ffi::c_int;
//! use pdshim::prelude::*;
//!
//! #[global_allocator]
//! static ALLOCATOR: HostAllocator = HostAllocator::new();
//!
//! #[pdshim::event_handler]
//! fn event_handler(playdate: *mut PlaydateAPI, event: PDSystemEvent, _arg: u32) -> c_int {
//!     if event == kEventInit {
//!         println!("allocator captured");
//!     }
//!     0
//! }
//! ```
//!
//! On desktop builds for the simulator, C code keeps the native heap and only the pieces the
//! game opts into go through the host.

#![no_std]

#[doc(inline)]
pub use pdshim_sys as sys;

#[doc(inline)]
#[cfg(feature = "core")]
pub use pdshim_core::{allocator, codec, error, heap, io, libc_interop, print, println};
#[doc(inline)]
#[cfg(feature = "macros")]
pub use pdshim_macro::event_handler;
#[doc(inline)]
#[cfg(feature = "startup")]
pub use pdshim_startup as startup;

/// Commonly used features of pdshim.
///
/// This module is meant to be glob imported.
pub mod prelude {
    #[cfg(feature = "core")]
    pub use crate::{
        allocator::HostAllocator,
        heap::{DefaultHeap, Heap, HostHeap},
        print, println,
    };
    pub use crate::sys::{PDSystemEvent, PlaydateAPI, kEventInit};
}
