//! Low level allocation redirection for [`pdshim`](https://crates.io/crates/pdshim).
//!
//! The Playdate host owns the only valid memory arena on the device and only grants access
//! to it through a single `realloc`-shaped function pointer handed out at the init event.
//! This crate holds that pointer and builds every allocation surface on top of it.
//!
//! Included in this crate:
//! - The captured primitive and the heap backends: [`heap`]
//! - A Rust global allocator over any heap: [`allocator`]
//! - The C allocation surface (`malloc` and friends): [`libc_interop`]
//! - Allocation callbacks for the vendored PNG codec: [`codec`]
//! - Console printing through the host: [`io`]

#![cfg_attr(not(test), no_std)]

pub mod allocator;
pub mod codec;
pub mod error;
pub mod heap;
pub mod io;
pub mod libc_interop;
