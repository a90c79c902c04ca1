//! Raw types for the capability table the Playdate host hands to a game's event handler.
//!
//! Only the parts of the table that the shim reads are given real types. Every other
//! subsystem table is left as an opaque pointer.

#![cfg_attr(not(test), no_std)]
#![allow(non_upper_case_globals)]
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]

pub mod errno;
pub mod system;

use core::ffi::c_void;

pub use errno::*;
pub use system::*;

/// The root capability table passed to the event handler.
#[repr(C)]
#[derive(Debug)]
pub struct PlaydateAPI {
    /// The system subsystem, which holds the allocator and the console.
    pub system: *const playdate_sys,
    /// The file subsystem.
    pub file: *const c_void,
    /// The graphics subsystem.
    pub graphics: *const c_void,
    /// The sprite subsystem.
    pub sprite: *const c_void,
    /// The display subsystem.
    pub display: *const c_void,
    /// The sound subsystem.
    pub sound: *const c_void,
    /// The Lua subsystem.
    pub lua: *const c_void,
    /// The JSON subsystem.
    pub json: *const c_void,
    /// The scoreboards subsystem.
    pub scoreboards: *const c_void,
    /// The network subsystem.
    pub network: *const c_void,
}

impl PlaydateAPI {
    /// A table with every subsystem set to null.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            system: core::ptr::null(),
            file: core::ptr::null(),
            graphics: core::ptr::null(),
            sprite: core::ptr::null(),
            display: core::ptr::null(),
            sound: core::ptr::null(),
            lua: core::ptr::null(),
            json: core::ptr::null(),
            scoreboards: core::ptr::null(),
            network: core::ptr::null(),
        }
    }
}
