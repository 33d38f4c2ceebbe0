//! Interactive picker: key decoding, selection, layout and drawing, driven
//! by a single-threaded control loop.

pub mod app;
pub mod keys;
pub mod layout;
pub mod selection;
pub mod terminal;
pub mod ui;

pub use app::{Action, PickerOptions, Session};
pub use keys::{Key, KeyDecoder};
pub use layout::{Layout, TermSize, Viewport};
pub use selection::Selection;

use crate::store::LineStore;
use anyhow::{Context, Result};
use log::info;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use terminal::{RawModeGuard, Tty};

/// How long to wait for a key before checking for resizes again.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Run the picker over `store` on the controlling terminal. Returns the
/// line to print on confirm, or `None` when the user cancelled.
pub fn run(store: &LineStore, options: PickerOptions) -> Result<Option<String>> {
    terminal::install_panic_hook();
    let tty = Tty::open()?;
    let resized = terminal::resize_flag()?;

    // Setup terminal
    let mut guard = RawModeGuard::acquire(tty)?;
    let size = guard.tty().size()?;
    info!(
        "picking from {} lines ({} headers) on a {}x{} terminal",
        store.len(),
        store.header_count(),
        size.columns,
        size.rows
    );
    let mut session = Session::new(store, options, size);

    // Main loop
    let result = run_session(&mut guard, &mut session, &resized);

    // Restore terminal
    let released = guard.release();
    let picked = result?;
    released?;
    Ok(picked)
}

fn run_session(guard: &mut RawModeGuard, session: &mut Session<'_>, resized: &AtomicBool) -> Result<Option<String>> {
    let mut decoder = KeyDecoder::new();
    let mut frame = Vec::new();
    let mut dirty = true;

    loop {
        if resized.swap(false, Ordering::Relaxed) {
            session.resize(guard.tty().size()?);
            dirty = true;
        }

        if dirty {
            frame.clear();
            ui::draw(&mut frame, session).context("Failed to draw frame")?;
            let tty = guard.tty();
            tty.write_all(&frame).context("Failed to write to the terminal")?;
            tty.flush().context("Failed to write to the terminal")?;
            dirty = false;
        }

        let Some(byte) = guard.tty().poll_byte(POLL_INTERVAL)? else {
            continue;
        };
        let Some(key) = decoder.feed(byte) else {
            continue;
        };

        match session.handle_key(key) {
            Action::Continue => dirty = true,
            Action::Confirm => return Ok(Some(session.output_line())),
            Action::Cancel => return Ok(None),
            Action::Suspend => {
                guard.suspend()?;
                session.resize(guard.tty().size()?);
                dirty = true;
            }
        }
    }
}
