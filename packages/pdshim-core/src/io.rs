//! Console output through the host.
//!
//! The host console only accepts whole lines, so output is collected in a fixed buffer and
//! passed to `logToConsole` one line at a time. Nothing reaches the host until the startup
//! shim captures the console at the init event. Output written before then is dropped.

use core::{
    ffi::CStr,
    fmt::{self, Write},
};

use pdshim_sys::pd_log_to_console;
use spin::{Mutex, Once};

/// The size of the line buffer, including the NUL terminator. Longer lines are split.
pub const LINE_CAPACITY: usize = 256;

static SINK: Once<pd_log_to_console> = Once::new();
static LINE: Mutex<LineBuffer> = Mutex::new(LineBuffer::new());

/// Routes console output to the host's `logToConsole`.
///
/// Only the first capture takes effect.
pub fn capture(sink: pd_log_to_console) {
    SINK.call_once(|| sink);
}

/// Returns `true` once the console has been captured.
pub fn is_captured() -> bool {
    SINK.is_completed()
}

fn emit(line: &CStr) {
    if let Some(sink) = SINK.get() {
        // SAFETY: `%s` consumes exactly one NUL-terminated string argument.
        unsafe { sink(c"%s".as_ptr(), line.as_ptr()) };
    }
}

/// A line of console output being assembled.
#[derive(Debug)]
pub struct LineBuffer {
    bytes: [u8; LINE_CAPACITY],
    len: usize,
}

impl LineBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bytes: [0; LINE_CAPACITY],
            len: 0,
        }
    }

    /// Appends a byte, passing the line to `emit` once it is complete.
    ///
    /// A line is complete at a newline (which is not included) or when the buffer is full.
    /// NUL bytes can't be represented in the host's strings and are skipped.
    pub fn push(&mut self, byte: u8, emit: impl FnOnce(&CStr)) {
        match byte {
            b'\n' => self.flush(emit),
            0 => {}
            _ => {
                self.bytes[self.len] = byte;
                self.len += 1;
                if self.len == LINE_CAPACITY - 1 {
                    self.flush(emit);
                }
            }
        }
    }

    /// Passes whatever has been buffered to `emit` and empties the buffer.
    pub fn flush(&mut self, emit: impl FnOnce(&CStr)) {
        self.bytes[self.len] = 0;
        if let Ok(line) = CStr::from_bytes_until_nul(&self.bytes[..=self.len]) {
            emit(line);
        }
        self.len = 0;
    }

    /// Returns `true` if nothing is buffered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// A handle to the host console.
#[derive(Debug, Default, Clone, Copy)]
pub struct Console;

/// Constructs a handle to the host console.
#[must_use]
pub const fn console() -> Console {
    Console
}

impl Console {
    /// Writes a single byte.
    pub fn putc(self, byte: u8) {
        LINE.lock().push(byte, emit);
    }

    /// Sends a partially written line to the host.
    pub fn flush(self) {
        let mut line = LINE.lock();
        if !line.is_empty() {
            line.flush(emit);
        }
    }
}

impl Write for Console {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let mut line = LINE.lock();
        for &byte in s.as_bytes() {
            line.push(byte, emit);
        }
        Ok(())
    }
}

#[doc(hidden)]
pub fn _print(args: fmt::Arguments<'_>) {
    // Writing to the console can't fail.
    _ = console().write_fmt(args);
}

/// Prints a message to the host console.
#[macro_export]
macro_rules! print {
    ($($arg:tt)*) => {
        $crate::io::_print(format_args!($($arg)*))
    };
}

/// Prints a message to the host console and appends a newline.
#[macro_export]
macro_rules! println {
    () => {
        $crate::print!("\n")
    };
    ($($arg:tt)*) => {
        $crate::print!("{}\n", format_args!($($arg)*))
    };
}
