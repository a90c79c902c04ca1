//! The system subsystem table and lifecycle events.

use core::ffi::{c_char, c_int, c_void};

/// A lifecycle event delivered to the game's event handler.
pub type PDSystemEvent = u32;
/// The game was loaded. Always the first event.
pub const kEventInit: PDSystemEvent = 0;
/// The Lua runtime is ready.
pub const kEventInitLua: PDSystemEvent = 1;
/// The device was locked.
pub const kEventLock: PDSystemEvent = 2;
/// The device was unlocked.
pub const kEventUnlock: PDSystemEvent = 3;
/// The system menu was opened.
pub const kEventPause: PDSystemEvent = 4;
/// The system menu was closed.
pub const kEventResume: PDSystemEvent = 5;
/// The game is about to exit.
pub const kEventTerminate: PDSystemEvent = 6;
/// A key was pressed in the simulator. The argument holds the key code.
pub const kEventKeyPressed: PDSystemEvent = 7;
/// A key was released in the simulator. The argument holds the key code.
pub const kEventKeyReleased: PDSystemEvent = 8;
/// The battery is low.
pub const kEventLowPower: PDSystemEvent = 9;

/// Allocates, resizes or frees memory depending on which arguments are null or zero.
///
/// - `realloc(NULL, n)` allocates `n` bytes.
/// - `realloc(p, 0)` frees `p`.
/// - `realloc(p, n)` resizes `p`, preserving its contents.
pub type pd_realloc = unsafe extern "C" fn(ptr: *mut c_void, size: usize) -> *mut c_void;

/// Writes a printf-style message to the console.
pub type pd_log_to_console = unsafe extern "C" fn(fmt: *const c_char, ...);

/// Formats a printf-style string into a newly allocated buffer.
pub type pd_format_string =
    unsafe extern "C" fn(ret: *mut *mut c_char, fmt: *const c_char, ...) -> c_int;

/// The head of the system subsystem table.
///
/// The host's table continues past `error`; those entries are never read through this type.
#[repr(C)]
#[derive(Debug)]
pub struct playdate_sys {
    /// The host's reallocation primitive.
    pub realloc: Option<pd_realloc>,
    /// `printf`-style formatting into a host allocation.
    pub formatString: Option<pd_format_string>,
    /// Writes a line to the console.
    pub logToConsole: Option<pd_log_to_console>,
    /// Writes a line to the console and halts the game.
    pub error: Option<pd_log_to_console>,
}
