use super::app::Session;
use super::layout::{Layout, RIBBON_MARGIN};
use crate::utils::printable;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};

/// Redraw the whole screen. Every frame starts from a cleared screen, so
/// nothing from a previous geometry survives a resize.
pub fn draw<W: Write>(out: &mut W, session: &Session<'_>) -> io::Result<()> {
    queue!(out, Clear(ClearType::All))?;

    let cursor_col = match session.layout() {
        Layout::Vertical { .. } => {
            let col = draw_query_line(out, session, session.size().columns)?;
            draw_list(out, session)?;
            col
        }
        Layout::Ribbon => {
            let margin = RIBBON_MARGIN.min(session.size().columns);
            let col = draw_query_line(out, session, margin)?;
            draw_ribbon(out, session)?;
            col
        }
    };

    queue!(out, MoveTo(cell(cursor_col), 0))?;
    out.flush()
}

fn cell(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// `matching/total`; the total leaves headers out.
fn counter(session: &Session<'_>) -> String {
    format!(
        "{}/{}",
        session.matches().matching_count(),
        session.store().selectable_count()
    )
}

/// Prompt, query and counter on row 0, within the first `width` columns.
/// Returns the column right after the query text.
fn draw_query_line<W: Write>(out: &mut W, session: &Session<'_>, width: usize) -> io::Result<usize> {
    let counter = counter(session);
    let counter_col = width.saturating_sub(counter.len() + 1);
    queue!(out, MoveTo(0, 0))?;

    let mut col = 0;
    let prompt = &session.options().prompt;
    if !prompt.is_empty() {
        let (text, end) = printable(prompt, counter_col, col);
        queue!(
            out,
            SetAttribute(Attribute::Reverse),
            Print(text),
            SetAttribute(Attribute::Reset),
            Print(" ")
        )?;
        col = end + 1;
    }

    let (query, end) = printable(session.query(), counter_col.saturating_sub(1), col);
    queue!(out, Print(query))?;
    col = end;

    if counter_col > col {
        queue!(out, MoveTo(cell(counter_col), 0), Print(counter))?;
    }
    Ok(col)
}

/// Print one entry with at most `limit` columns; headers bold, the
/// selected entry reversed. Returns the columns used.
fn draw_entry<W: Write>(out: &mut W, session: &Session<'_>, index: usize, limit: usize, pad_to: usize) -> io::Result<usize> {
    let entry = session.matches().entries()[index];
    let (text, used) = printable(session.store().display_text(entry.line), limit, 0);
    let selected = session.selection().current(session.matches()) == Some(index);

    if entry.is_header() {
        queue!(out, SetAttribute(Attribute::Bold))?;
    } else if selected {
        queue!(out, SetAttribute(Attribute::Reverse))?;
    }
    queue!(out, Print(text))?;
    if selected && pad_to > used {
        queue!(out, Print(" ".repeat(pad_to - used)))?;
    }
    queue!(out, SetAttribute(Attribute::Reset))?;
    Ok(used.max(pad_to))
}

fn draw_list<W: Write>(out: &mut W, session: &Session<'_>) -> io::Result<()> {
    let size = session.size();
    let range = session.viewport().range(session.layout(), session.matches(), size);

    // Row 0 holds the query line.
    for (row, index) in range.enumerate() {
        queue!(out, MoveTo(0, cell(row + 1)))?;
        draw_entry(out, session, index, size.columns, size.columns)?;
    }
    Ok(())
}

fn draw_ribbon<W: Write>(out: &mut W, session: &Session<'_>) -> io::Result<()> {
    let size = session.size();
    if size.columns <= RIBBON_MARGIN {
        return Ok(());
    }
    let range = session.viewport().range(session.layout(), session.matches(), size);
    let more_before = range.start > 0;
    let more_after = range.end < session.matches().len();

    queue!(out, MoveTo(cell(RIBBON_MARGIN), 0))?;
    queue!(out, Print(if more_before { "< " } else { "  " }))?;

    let right_edge = size.columns.saturating_sub(2);
    let mut col = RIBBON_MARGIN + 2;
    for index in range {
        if col + 1 >= right_edge {
            break;
        }
        queue!(out, Print(" "))?;
        col += 1;
        let used = draw_entry(out, session, index, right_edge - col, 0)?;
        queue!(out, Print(" "))?;
        col += used + 1;
    }

    if more_after {
        queue!(out, MoveTo(cell(right_edge), 0), Print(" >"))?;
    }
    Ok(())
}
