//! Output of the confirmed selection.

use std::io::{self, Write};

/// Write the picked line followed by a newline.
pub fn print_selection<W: Write>(out: &mut W, line: &str) -> io::Result<()> {
    writeln!(out, "{line}")?;
    out.flush()
}
