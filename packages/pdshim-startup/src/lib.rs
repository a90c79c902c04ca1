//! Startup support for Playdate games built on `pdshim`.
//!
//! The host hands its capability table to the game's event handler, and that is the only
//! place its allocator can be obtained. This crate provides:
//!
//! - [`shim`]: the wrapper around the game's event handler that captures the allocator when
//!   the init event arrives, before the game sees any event.
//! - [`sysrt`]: the syscall stubs the device's C runtime links against.
//!
//! Games normally don't call into this crate directly. The `#[pdshim::event_handler]`
//! attribute generates the exported entry symbol, which routes through [`handle_event`].

#![cfg_attr(not(test), no_std)]

pub mod shim;
pub mod sysrt;

pub use shim::{capture, dispatch, handle_event, is_armed};
