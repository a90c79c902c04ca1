//! The event handler wrapper.
//!
//! The wrapper has two states. It starts out unarmed, and the first init event arms it by
//! capturing the host's reallocation primitive. Armed is terminal: a repeated init event is
//! reported on the console and otherwise ignored. Every event, in either state, is forwarded
//! to the game's handler unchanged, and the handler's return value is passed back to the host
//! as-is.

use core::ffi::c_int;

use pdshim_core::{
    error::{InitError, MissingReallocSnafu, MissingSystemTableSnafu, NullApiSnafu},
    heap::{HOST_REALLOC, ReallocCell},
    io, println,
};
use pdshim_sys::{PDSystemEvent, PlaydateAPI, kEventInit};
use snafu::OptionExt;

/// Reads the host's reallocation primitive out of its capability table and stores it in `cell`.
///
/// If the table has a console, it is captured for [`println!`] as well.
///
/// # Errors
///
/// - [`InitError::NullApi`] if `api` is null.
/// - [`InitError::MissingSystemTable`] if the table has no system subsystem.
/// - [`InitError::MissingRealloc`] if the system subsystem has no `realloc`.
/// - [`InitError::AlreadyCaptured`] if `cell` was armed earlier.
///
/// # Safety
///
/// `api` must be null or point to a capability table whose `system` entry is null or points to
/// a valid system table.
pub unsafe fn capture(cell: &ReallocCell, api: *const PlaydateAPI) -> Result<(), InitError> {
    let api = unsafe { api.as_ref() }.context(NullApiSnafu)?;
    let system = unsafe { api.system.as_ref() }.context(MissingSystemTableSnafu)?;

    if let Some(log) = system.logToConsole {
        io::capture(log);
    }

    let realloc = system.realloc.context(MissingReallocSnafu)?;
    cell.set(realloc)
}

/// Runs the wrapper for one event against `cell`, then forwards the event to `handler`.
///
/// # Safety
///
/// Same as [`capture`].
pub unsafe fn dispatch<F>(
    cell: &ReallocCell,
    api: *mut PlaydateAPI,
    event: PDSystemEvent,
    arg: u32,
    handler: F,
) -> c_int
where
    F: FnOnce(*mut PlaydateAPI, PDSystemEvent, u32) -> c_int,
{
    if event == kEventInit {
        match unsafe { capture(cell, api) } {
            Ok(()) => {}
            Err(InitError::AlreadyCaptured) => {
                println!("pdshim: ignoring repeated init event, keeping the first allocator");
            }
            Err(err) => println!("pdshim: could not capture the host allocator: {err}"),
        }
    }

    handler(api, event, arg)
}

/// Runs the wrapper against the program's allocator, then forwards the event to `handler`.
///
/// This is what the entry symbol generated by `#[pdshim::event_handler]` calls.
///
/// # Safety
///
/// `api` must be the capability table the host passed to the entry symbol.
pub unsafe fn handle_event<F>(
    api: *mut PlaydateAPI,
    event: PDSystemEvent,
    arg: u32,
    handler: F,
) -> c_int
where
    F: FnOnce(*mut PlaydateAPI, PDSystemEvent, u32) -> c_int,
{
    unsafe { dispatch(&HOST_REALLOC, api, event, arg, handler) }
}

/// Returns `true` once the program's allocator has been captured.
pub fn is_armed() -> bool {
    HOST_REALLOC.is_armed()
}
