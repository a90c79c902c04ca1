//! Syscall stubs for the device's C runtime.
//!
//! The device has no operating system, but its minimal C runtime still references the usual
//! process, file descriptor and entropy syscalls at link time. These stubs satisfy the linker
//! and report failure without doing any work. Correct game code never reaches them; a caller
//! that does should treat the failure as fatal rather than retry.
//!
//! The stubs are grouped by service so a port to a target with a real OS can replace a whole
//! group at once. They are only exported on the device with the `sysrt` feature enabled.

use core::ffi::c_int;

/// The failure value returned by every descriptor and process stub.
pub const ERR: c_int = -1;

/// The process id reported by [`process::_getpid`]. There is no process table to look it up in.
pub const PLACEHOLDER_PID: c_int = 1;

/// What [`fs::_isatty`] returns: no descriptor is ever a terminal.
pub const NOT_A_TTY: c_int = 0;

/// What [`entropy::getentropy`] returns: the device has no entropy source.
pub const ENTROPY_UNAVAILABLE: c_int = -1;

/// Process control stubs.
#[allow(unused_variables)]
pub mod process {
    use core::ffi::c_int;

    use super::{ERR, PLACEHOLDER_PID};

    /// Signal delivery.
    #[cfg_attr(all(feature = "sysrt", target_os = "none"), unsafe(no_mangle))]
    pub extern "C" fn _kill(pid: c_int, sig: c_int) -> c_int {
        ERR
    }

    /// Process id query.
    #[cfg_attr(all(feature = "sysrt", target_os = "none"), unsafe(no_mangle))]
    pub extern "C" fn _getpid() -> c_int {
        PLACEHOLDER_PID
    }
}

/// File descriptor stubs. Not currently implemented, but a port with a filesystem could fill them in.
#[allow(unused_variables)]
pub mod fs {
    use core::ffi::{c_char, c_int, c_long, c_void};

    use super::{ERR, NOT_A_TTY};

    /// Opens a path.
    #[cfg_attr(all(feature = "sysrt", target_os = "none"), unsafe(no_mangle))]
    pub extern "C" fn _open(path: *const c_char, flags: c_int, mode: c_int) -> c_int {
        ERR
    }

    /// Closes a descriptor.
    #[cfg_attr(all(feature = "sysrt", target_os = "none"), unsafe(no_mangle))]
    pub extern "C" fn _close(fd: c_int) -> c_int {
        ERR
    }

    /// Moves a descriptor's offset.
    #[cfg_attr(all(feature = "sysrt", target_os = "none"), unsafe(no_mangle))]
    pub extern "C" fn _lseek(fd: c_int, offset: c_long, whence: c_int) -> c_long {
        c_long::from(ERR)
    }

    /// Reads from a descriptor.
    #[cfg_attr(all(feature = "sysrt", target_os = "none"), unsafe(no_mangle))]
    pub extern "C" fn _read(fd: c_int, buf: *mut c_char, len: c_int) -> c_int {
        ERR
    }

    /// Writes to a descriptor.
    #[cfg_attr(all(feature = "sysrt", target_os = "none"), unsafe(no_mangle))]
    pub extern "C" fn _write(fd: c_int, buf: *const c_char, len: c_int) -> c_int {
        ERR
    }

    /// Queries a descriptor's status.
    #[cfg_attr(all(feature = "sysrt", target_os = "none"), unsafe(no_mangle))]
    pub extern "C" fn _fstat(fd: c_int, stat: *mut c_void) -> c_int {
        ERR
    }

    /// Checks whether a descriptor is a terminal.
    #[cfg_attr(all(feature = "sysrt", target_os = "none"), unsafe(no_mangle))]
    pub extern "C" fn _isatty(fd: c_int) -> c_int {
        NOT_A_TTY
    }
}

/// Entropy stubs.
#[allow(unused_variables)]
pub mod entropy {
    use core::ffi::{c_int, c_void};

    use super::ENTROPY_UNAVAILABLE;

    /// Fills a buffer with random bytes.
    #[cfg_attr(all(feature = "sysrt", target_os = "none"), unsafe(no_mangle))]
    pub extern "C" fn getentropy(buf: *mut c_void, len: usize) -> c_int {
        ENTROPY_UNAVAILABLE
    }
}

/// Character output for C code, sent to the host console one line at a time.
pub mod stdio {
    use core::ffi::c_int;

    use pdshim_core::io::console;

    /// The C `putchar` function.
    #[cfg_attr(all(feature = "sysrt", target_os = "none"), unsafe(no_mangle))]
    pub extern "C" fn putchar(ch: c_int) -> c_int {
        console().putc(ch as u8);
        ch
    }
}

#[cfg(test)]
mod test {
    use core::{
        ffi::{c_char, c_long},
        ptr,
    };

    use super::{entropy::*, fs::*, process::*, stdio::*, *};

    const DESCRIPTORS: [c_int; 5] = [-1, 0, 1, 2, 1024];

    #[test]
    fn process_stubs() {
        for pid in [-1, 0, 1, 4242] {
            for sig in [0, 9, 15] {
                assert_eq!(_kill(pid, sig), ERR);
            }
        }
        assert_eq!(_getpid(), PLACEHOLDER_PID);
    }

    #[test]
    fn descriptor_stubs() {
        let mut buf = [0x5A_u8; 16];
        let mut stat = [0xA5_u8; 64];

        for fd in DESCRIPTORS {
            assert_eq!(_open(c"/Data/save.json".as_ptr(), fd, 0o644), ERR);
            assert_eq!(_close(fd), ERR);
            assert_eq!(_lseek(fd, 100, 0), c_long::from(ERR));
            assert_eq!(_read(fd, buf.as_mut_ptr().cast::<c_char>(), 16), ERR);
            assert_eq!(_write(fd, buf.as_ptr().cast::<c_char>(), 16), ERR);
            assert_eq!(_fstat(fd, stat.as_mut_ptr().cast()), ERR);
            assert_eq!(_isatty(fd), NOT_A_TTY);
        }

        assert_eq!(_open(ptr::null(), 0, 0), ERR);
        assert_eq!(_read(0, ptr::null_mut(), 0), ERR);

        assert!(buf.iter().all(|&byte| byte == 0x5A));
        assert!(stat.iter().all(|&byte| byte == 0xA5));
    }

    #[test]
    fn entropy_stub() {
        let mut buf = [0_u8; 32];

        for len in [0, 1, 32] {
            assert_eq!(getentropy(buf.as_mut_ptr().cast(), len), ENTROPY_UNAVAILABLE);
        }
        assert_eq!(getentropy(ptr::null_mut(), 256), ENTROPY_UNAVAILABLE);

        assert!(buf.iter().all(|&byte| byte == 0));
    }

    #[test]
    fn putchar_echoes_its_argument() {
        for ch in [c_int::from(b'a'), c_int::from(b'\n'), 0] {
            assert_eq!(putchar(ch), ch);
        }
    }
}
