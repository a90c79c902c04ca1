//! Newlib errno values returned by the C allocation surface.

use core::ffi::c_int;

/// Out of memory.
pub const ENOMEM: c_int = 12;
/// Invalid argument.
pub const EINVAL: c_int = 22;
