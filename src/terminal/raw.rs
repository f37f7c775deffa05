//! Raw mode and input polling over termios.
//!
//! # Safety
//! This module calls libc for termios, `ioctl(TIOCGWINSZ)`, `isatty` and
//! `select`. Each call is given fully initialised arguments.

#![allow(unsafe_code)]
#![allow(clippy::borrow_as_ptr)]

use std::io;
use std::os::unix::io::{AsRawFd, RawFd};
use std::time::Duration;

/// Saved terminal attributes, restored on drop.
#[derive(Debug)]
pub struct RawModeGuard {
    fd: RawFd,
    original: libc::termios,
}

impl RawModeGuard {
    /// Put `fd` into raw mode.
    ///
    /// Signal keys are disabled too, so Ctrl+C/Ctrl+Z reach the shell as
    /// key events instead of stopping the process with the terminal still raw.
    pub fn new<F: AsRawFd>(fd: &F) -> io::Result<Self> {
        let fd = fd.as_raw_fd();
        let original = get_termios(fd)?;

        let mut raw = original;
        raw.c_iflag &= !(libc::BRKINT | libc::ICRNL | libc::INPCK | libc::ISTRIP | libc::IXON);
        raw.c_oflag &= !libc::OPOST;
        raw.c_cflag |= libc::CS8;
        raw.c_lflag &= !(libc::ECHO | libc::ICANON | libc::IEXTEN | libc::ISIG);
        raw.c_cc[libc::VMIN] = 0;
        raw.c_cc[libc::VTIME] = 0;

        set_termios(fd, &raw)?;
        Ok(Self { fd, original })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = set_termios(self.fd, &self.original);
    }
}

/// Enter raw mode for stdin.
pub fn enable_raw_mode() -> io::Result<RawModeGuard> {
    RawModeGuard::new(&io::stdin())
}

/// Check if the given file descriptor is a TTY.
#[must_use]
pub fn is_tty<F: AsRawFd>(fd: &F) -> bool {
    // SAFETY: isatty accepts any fd value
    unsafe { libc::isatty(fd.as_raw_fd()) == 1 }
}

/// Terminal size as `(cols, rows)`.
///
/// Zero dimensions are reported as an error.
pub fn terminal_size() -> io::Result<(u16, u16)> {
    // SAFETY: winsize is plain data; zeroed is a valid value
    let mut size: libc::winsize = unsafe { std::mem::zeroed() };

    // SAFETY: TIOCGWINSZ writes into the winsize we pass
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut size) };

    if result == -1 {
        Err(io::Error::last_os_error())
    } else if size.ws_col == 0 || size.ws_row == 0 {
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "terminal reported zero dimensions",
        ))
    } else {
        Ok((size.ws_col, size.ws_row))
    }
}

/// Read whatever input is available on stdin, waiting at most `timeout`.
///
/// Returns 0 when the timeout expires with nothing to read.
pub fn read_with_timeout(buf: &mut [u8], timeout: Duration) -> io::Result<usize> {
    let stdin = io::stdin();
    let fd = stdin.as_raw_fd();

    let mut read_fds = std::mem::MaybeUninit::<libc::fd_set>::uninit();
    // SAFETY: FD_ZERO initialises the set before FD_SET touches it
    unsafe {
        libc::FD_ZERO(read_fds.as_mut_ptr());
        libc::FD_SET(fd, read_fds.as_mut_ptr());
    }

    let mut tv = libc::timeval {
        tv_sec: timeout.as_secs() as libc::time_t,
        tv_usec: timeout.subsec_micros() as libc::suseconds_t,
    };

    // SAFETY: the fd set was initialised above and tv outlives the call
    let ready = unsafe {
        libc::select(
            fd + 1,
            read_fds.as_mut_ptr(),
            std::ptr::null_mut(),
            std::ptr::null_mut(),
            &mut tv,
        )
    };

    match ready {
        -1 => {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                Ok(0)
            } else {
                Err(err)
            }
        }
        0 => Ok(0),
        _ => read_fd(fd, buf),
    }
}

/// Unbuffered read, so bytes never sit in a buffer `select` cannot see.
fn read_fd(fd: RawFd, buf: &mut [u8]) -> io::Result<usize> {
    // SAFETY: buf is valid for writes of buf.len() bytes
    let n = unsafe { libc::read(fd, buf.as_mut_ptr().cast(), buf.len()) };
    if n < 0 {
        let err = io::Error::last_os_error();
        if err.kind() == io::ErrorKind::Interrupted {
            Ok(0)
        } else {
            Err(err)
        }
    } else {
        Ok(n.unsigned_abs())
    }
}

fn get_termios(fd: RawFd) -> io::Result<libc::termios> {
    // SAFETY: termios is plain data; zeroed is a valid value
    let mut termios: libc::termios = unsafe { std::mem::zeroed() };

    // SAFETY: tcgetattr writes into the termios we pass
    if unsafe { libc::tcgetattr(fd, &mut termios) } == -1 {
        Err(io::Error::last_os_error())
    } else {
        Ok(termios)
    }
}

fn set_termios(fd: RawFd, termios: &libc::termios) -> io::Result<()> {
    // SAFETY: tcsetattr only reads the termios we pass
    if unsafe { libc::tcsetattr(fd, libc::TCSAFLUSH, termios) } == -1 {
        Err(io::Error::last_os_error())
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_file_is_not_tty() {
        let file = tempfile::tempfile().expect("Failed to create temp file");
        assert!(!is_tty(&file));
    }

    #[test]
    fn test_raw_mode_on_file_fails_cleanly() {
        let file = tempfile::tempfile().expect("Failed to create temp file");
        assert!(RawModeGuard::new(&file).is_err());
    }

    #[test]
    fn test_terminal_size_valid_when_available() {
        if let Ok((cols, rows)) = terminal_size() {
            assert!(cols > 0);
            assert!(rows > 0);
        }
    }
}
