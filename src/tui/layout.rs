//! Pagination and windowing math shared by the renderer and the
//! navigation keys.
//!
//! The vertical list shows fixed pages of [`page_size`] rows. The
//! horizontal ribbon packs consecutive entries into *segments* that fit the
//! terminal width minus [`RIBBON_MARGIN`], so its pages have variable
//! length and are found by walking entry widths.

use crate::query::MatchSet;
use crate::store::LineStore;
use crate::utils::width_of;

/// Columns on the left of the ribbon reserved for the prompt and query.
pub const RIBBON_MARGIN: usize = 30;

/// Room for the `< ` and ` >` overflow indicators around a segment.
const INDICATOR_WIDTH: usize = 4;

/// Blank columns printed around each ribbon entry.
const ENTRY_PADDING: usize = 2;

/// Terminal geometry in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermSize {
    pub columns: usize,
    pub rows: usize,
}

impl TermSize {
    pub fn new(columns: u16, rows: u16) -> Self {
        Self {
            columns: usize::from(columns),
            rows: usize::from(rows),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// One entry per row, at most `lines` rows.
    Vertical { lines: usize },
    /// Entries side by side on the query line.
    Ribbon,
}

impl Layout {
    /// `lines == 0` selects the ribbon.
    pub fn from_lines(lines: usize) -> Self {
        if lines == 0 {
            Layout::Ribbon
        } else {
            Layout::Vertical { lines }
        }
    }
}

/// Rows per page of the vertical list: the configured count, but never
/// more than the terminal minus the query line, and never zero.
pub fn page_size(lines: usize, size: TermSize) -> usize {
    lines.min(size.rows.saturating_sub(1)).max(1)
}

/// Columns available to ribbon entries.
pub fn ribbon_budget(size: TermSize) -> usize {
    size.columns.saturating_sub(RIBBON_MARGIN + INDICATOR_WIDTH)
}

/// Columns taken by one ribbon entry, padding included.
pub fn entry_width(store: &LineStore, matches: &MatchSet, index: usize) -> usize {
    let line = matches.entries()[index].line;
    width_of(store.display_text(line), 0) + ENTRY_PADDING
}

/// End (exclusive) of the segment starting at `start`. A segment always
/// holds at least one entry, even one wider than the budget.
pub fn next_segment_end(store: &LineStore, matches: &MatchSet, start: usize, budget: usize) -> usize {
    let mut col = 0;
    let mut pos = start;
    while pos < matches.len() {
        let width = entry_width(store, matches, pos);
        if col + width > budget && pos > start {
            break;
        }
        col += width;
        pos += 1;
    }
    pos
}

/// Start of the segment ending (exclusive) at `end`, packing backwards.
pub fn prev_segment_start(store: &LineStore, matches: &MatchSet, end: usize, budget: usize) -> usize {
    let mut col = 0;
    let mut pos = end.min(matches.len());
    while pos > 0 {
        let width = entry_width(store, matches, pos - 1);
        if col + width > budget && pos < end {
            break;
        }
        col += width;
        pos -= 1;
    }
    pos
}

/// The window of the match set currently on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewport {
    Vertical { scroll_top: usize },
    Ribbon { start: usize, end: usize },
}

impl Viewport {
    /// Window showing the start of the match set.
    pub fn top(layout: Layout, store: &LineStore, matches: &MatchSet, size: TermSize) -> Self {
        match layout {
            Layout::Vertical { .. } => Viewport::Vertical { scroll_top: 0 },
            Layout::Ribbon => Viewport::Ribbon {
                start: 0,
                end: next_segment_end(store, matches, 0, ribbon_budget(size)),
            },
        }
    }

    /// Move the window until it contains `cursor`.
    pub fn follow(&mut self, cursor: usize, layout: Layout, store: &LineStore, matches: &MatchSet, size: TermSize) {
        match (self, layout) {
            (Viewport::Vertical { scroll_top }, Layout::Vertical { lines }) => {
                let page = page_size(lines, size);
                *scroll_top = cursor - cursor % page;
            }
            (Viewport::Ribbon { start, end }, Layout::Ribbon) => {
                let budget = ribbon_budget(size);
                while cursor < *start {
                    *end = *start;
                    *start = prev_segment_start(store, matches, *end, budget);
                }
                while cursor >= *end && *end < matches.len() {
                    *start = *end;
                    *end = next_segment_end(store, matches, *start, budget);
                }
            }
            (viewport, layout) => {
                *viewport = Viewport::top(layout, store, matches, size);
                viewport.follow(cursor, layout, store, matches, size);
            }
        }
    }

    /// Visible range of match set indices.
    pub fn range(&self, layout: Layout, matches: &MatchSet, size: TermSize) -> std::ops::Range<usize> {
        match (*self, layout) {
            (Viewport::Vertical { scroll_top }, Layout::Vertical { lines }) => {
                let end = (scroll_top + page_size(lines, size)).min(matches.len());
                scroll_top.min(end)..end
            }
            (Viewport::Ribbon { start, end }, _) => {
                let end = end.min(matches.len());
                start.min(end)..end
            }
            (Viewport::Vertical { .. }, Layout::Ribbon) => 0..0,
        }
    }
}
