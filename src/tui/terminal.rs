//! Ownership of the controlling terminal.
//!
//! Standard input is already consumed by the time the picker starts, so keys
//! are read from, and frames written to, `/dev/tty`. Raw mode and the
//! alternate screen are held by a [`RawModeGuard`] and released when it is
//! dropped, on every exit path.

use super::layout::TermSize;
use crate::error::{PickError, Result};
use crossterm::{
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::debug;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::os::fd::AsRawFd;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Once};
use std::time::Duration;

const TTY_PATH: &str = "/dev/tty";

pub struct Tty {
    file: File,
}

impl Tty {
    pub fn open() -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(TTY_PATH)
            .map_err(PickError::OpenTty)?;
        Ok(Self { file })
    }

    /// Current geometry, re-read on every call.
    pub fn size(&self) -> Result<TermSize> {
        let (columns, rows) = terminal::size().map_err(PickError::terminal("reading the terminal size"))?;
        Ok(TermSize::new(columns, rows))
    }

    /// Wait up to `timeout` for one byte. `Ok(None)` on timeout or when a
    /// signal interrupted the wait; end of file is fatal.
    pub fn poll_byte(&mut self, timeout: Duration) -> Result<Option<u8>> {
        let mut fds = libc::pollfd {
            fd: self.file.as_raw_fd(),
            events: libc::POLLIN,
            revents: 0,
        };
        let millis = libc::c_int::try_from(timeout.as_millis()).unwrap_or(libc::c_int::MAX);
        // SAFETY: `fds` is a single valid pollfd that outlives the call.
        let ready = unsafe { libc::poll(&mut fds, 1, millis) };
        if ready < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                return Ok(None);
            }
            return Err(PickError::terminal("waiting for terminal input")(err));
        }
        if ready == 0 {
            return Ok(None);
        }

        let mut byte = [0u8; 1];
        match self.file.read(&mut byte) {
            Ok(0) => Err(PickError::TtyEof),
            Ok(_) => Ok(Some(byte[0])),
            Err(err) if err.kind() == io::ErrorKind::Interrupted => Ok(None),
            Err(err) => Err(PickError::terminal("reading from the terminal")(err)),
        }
    }
}

impl Write for Tty {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

/// Raw mode plus the alternate screen on the tty, for as long as the guard
/// lives.
pub struct RawModeGuard {
    tty: Tty,
    active: bool,
}

impl RawModeGuard {
    pub fn acquire(tty: Tty) -> Result<Self> {
        let mut guard = Self { tty, active: false };
        guard.enter()?;
        Ok(guard)
    }

    pub fn tty(&mut self) -> &mut Tty {
        &mut self.tty
    }

    /// Hand the terminal back to the shell and stop the process until it
    /// is continued, then take the terminal again.
    pub fn suspend(&mut self) -> Result<()> {
        self.leave()?;
        debug!("suspending");
        // SAFETY: raise has no memory-safety preconditions.
        unsafe {
            libc::raise(libc::SIGTSTP);
        }
        self.enter()
    }

    /// Restore the terminal now, reporting failures the way `Drop` cannot.
    pub fn release(mut self) -> Result<()> {
        self.leave()
    }

    fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().map_err(PickError::terminal("enabling raw mode"))?;
        self.active = true;
        execute!(self.tty, EnterAlternateScreen).map_err(PickError::terminal("entering the alternate screen"))?;
        debug!("terminal acquired");
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        let screen = execute!(self.tty, LeaveAlternateScreen);
        let raw = terminal::disable_raw_mode();
        debug!("terminal released");
        screen.map_err(PickError::terminal("leaving the alternate screen"))?;
        raw.map_err(PickError::terminal("disabling raw mode"))?;
        Ok(())
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

/// Restore the terminal before the panic message is printed, so it is not
/// lost on the alternate screen.
pub fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = terminal::disable_raw_mode();
            if let Ok(file) = OpenOptions::new().write(true).open(TTY_PATH) {
                let _ = leave_screen(&mut Tty { file });
            }
            default_panic(info);
        }));
    });
}

fn leave_screen(tty: &mut Tty) -> io::Result<()> {
    execute!(tty, LeaveAlternateScreen)
}

/// Flag raised whenever the terminal is resized.
pub fn resize_flag() -> Result<Arc<AtomicBool>> {
    let flag = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(signal_hook::consts::SIGWINCH, Arc::clone(&flag))
        .map_err(PickError::terminal("watching for terminal resizes"))?;
    Ok(flag)
}
