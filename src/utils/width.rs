//! Terminal column arithmetic.
//!
//! Widths come from the East Asian Width tables of `unicode-width`:
//! combining marks and format characters take 0 columns, wide and
//! fullwidth characters take 2, everything else 1. A tab advances to the
//! next multiple of [`TAB_WIDTH`]. C0/C1 control characters are never sent
//! to the terminal raw; they are shown as [`CONTROL_REPLACEMENT`].

use unicode_width::UnicodeWidthChar;

pub const TAB_WIDTH: usize = 8;

/// Printed in place of control characters.
pub const CONTROL_REPLACEMENT: char = '?';

/// Columns taken by `c` when printed at column `col`, or `None` for a
/// control character that must be escaped.
pub fn char_width(c: char, col: usize) -> Option<usize> {
    match c {
        '\t' => Some(TAB_WIDTH - col % TAB_WIDTH),
        c if c.is_control() => None,
        c => Some(c.width().unwrap_or(0)),
    }
}

/// Columns taken by `c` once made printable.
fn rendered_width(c: char, col: usize) -> usize {
    char_width(c, col).unwrap_or(1)
}

/// Columns taken by `s` when printed starting at column `col`.
pub fn width_of(s: &str, col: usize) -> usize {
    s.chars().fold(col, |pos, c| pos + rendered_width(c, pos)) - col
}

/// Byte offset at which `s`, printed from column `col`, must be cut so that
/// it does not go past column `limit`.
///
/// The offset is always a code point boundary: it is the start of the first
/// code point whose inclusion would exceed the limit, or `s.len()` when the
/// whole string fits.
pub fn truncate_at_width(s: &str, limit: usize, col: usize) -> usize {
    let mut pos = col;
    for (offset, c) in s.char_indices() {
        pos += rendered_width(c, pos);
        if pos > limit {
            return offset;
        }
    }
    s.len()
}

/// Printable form of `s` from column `col` up to column `limit`: tabs are
/// expanded to spaces and control characters replaced. Returns the text and
/// the column reached.
pub fn printable(s: &str, limit: usize, col: usize) -> (String, usize) {
    let visible = &s[..truncate_at_width(s, limit, col)];
    let mut out = String::with_capacity(visible.len());
    let mut pos = col;
    for c in visible.chars() {
        match char_width(c, pos) {
            Some(w) if c == '\t' => {
                out.extend(std::iter::repeat_n(' ', w));
                pos += w;
            }
            Some(w) => {
                out.push(c);
                pos += w;
            }
            None => {
                out.push(CONTROL_REPLACEMENT);
                pos += 1;
            }
        }
    }
    (out, pos)
}
