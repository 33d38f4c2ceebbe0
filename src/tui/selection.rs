//! Cursor over the current [`MatchSet`].
//!
//! The cursor never rests on a header entry while the match set holds at
//! least one selectable line. When it holds none the cursor is clamped to 0
//! and every movement is a no-op.

use crate::query::MatchSet;

/// First selectable entry at or after `start`.
fn selectable_from(matches: &MatchSet, start: usize) -> Option<usize> {
    (start..matches.len()).find(|&i| !matches.is_header(i))
}

/// Last selectable entry at or before `end`.
fn selectable_before(matches: &MatchSet, end: usize) -> Option<usize> {
    (0..=end.min(matches.len().checked_sub(1)?))
        .rev()
        .find(|&i| !matches.is_header(i))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    cursor: usize,
}

impl Selection {
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Index of the selected entry, or `None` if nothing is selectable.
    pub fn current(&self, matches: &MatchSet) -> Option<usize> {
        match matches.get(self.cursor) {
            Some(entry) if !entry.is_header() => Some(self.cursor),
            _ => None,
        }
    }

    /// Position the cursor after the match set was recomputed: on the first
    /// exact match if there is one, otherwise on the first selectable entry.
    pub fn reset(&mut self, matches: &MatchSet) {
        self.cursor = matches.first_exact().unwrap_or(0);
        self.settle(matches);
    }

    /// Restore the invariant after the match set changed under the cursor:
    /// seek forward to the nearest selectable entry, then backward. The
    /// cursor is left alone if the match set holds nothing selectable.
    pub fn settle(&mut self, matches: &MatchSet) {
        if matches.matching_count() == 0 {
            self.cursor = 0;
            return;
        }
        if self.current(matches).is_some() {
            return;
        }
        let start = self.cursor.min(matches.len() - 1);
        if let Some(found) = selectable_from(matches, start).or_else(|| selectable_before(matches, start)) {
            self.cursor = found;
        }
    }

    /// Step to the next selectable entry in direction `sign`, skipping
    /// headers. Stays put at the boundary.
    pub fn move_by(&mut self, matches: &MatchSet, sign: isize) {
        let found = if sign < 0 {
            self.cursor.checked_sub(1).and_then(|end| selectable_before(matches, end))
        } else {
            selectable_from(matches, self.cursor + 1)
        };
        if let Some(found) = found {
            self.cursor = found;
        }
    }

    /// Move to the first selectable entry at or after `target`, if any.
    pub fn jump_to(&mut self, matches: &MatchSet, target: usize) {
        if let Some(found) = selectable_from(matches, target) {
            self.cursor = found;
        }
    }

    /// Vertical paging: jump to the first row of the previous or next page
    /// of `page_size` rows, skipping a header found there. No-op when that
    /// page does not exist.
    pub fn move_by_page(&mut self, matches: &MatchSet, sign: isize, page_size: usize) {
        if page_size == 0 {
            return;
        }
        let page_start = self.cursor - self.cursor % page_size;
        let target = if sign < 0 {
            page_start.checked_sub(page_size)
        } else {
            Some(page_start + page_size)
        };
        match target {
            Some(target) if target < matches.len() => self.jump_to(matches, target),
            _ => {}
        }
    }

    /// Jump to the first entry of the next section (`sign > 0`), or to the
    /// first entry of the section holding the previous entry (`sign < 0`).
    /// Without headers the whole list is one section, so this clamps to the
    /// first or last entry.
    pub fn move_to_header(&mut self, matches: &MatchSet, sign: isize) {
        if matches.is_empty() {
            return;
        }
        self.move_by(matches, sign);

        let last = matches.len() - 1;
        let mut i = self.cursor;
        let target = loop {
            if sign < 0 {
                match i.checked_sub(1) {
                    Some(prev) => i = prev,
                    None => break 0,
                }
            } else if i >= last {
                break last;
            } else {
                i += 1;
            }
            if matches.is_header(i) {
                break i;
            }
        };

        if matches.is_header(target) || sign < 0 {
            self.jump_to(matches, target);
        } else {
            self.cursor = selectable_before(matches, target).unwrap_or(self.cursor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{filter, SearchSpace, TokenSet};
    use crate::store::LineStore;

    fn sections() -> (LineStore, MatchSet) {
        let store = LineStore::from_lines(["# Section A", "x1", "x2", "# Section B", "y1"], Some('#')).unwrap();
        let matches = filter(&store, SearchSpace::All, &TokenSet::parse(""));
        (store, matches)
    }

    fn numbered(n: usize) -> (LineStore, MatchSet) {
        let store = LineStore::from_lines((0..n).map(|i| format!("line {i}")), None).unwrap();
        let matches = filter(&store, SearchSpace::All, &TokenSet::parse(""));
        (store, matches)
    }

    #[test]
    fn test_reset_skips_leading_header() {
        let (_, matches) = sections();
        let mut sel = Selection::default();
        sel.reset(&matches);
        assert_eq!(sel.cursor(), 1);
    }

    #[test]
    fn test_reset_prefers_exact_match() {
        let store = LineStore::from_lines(["x10", "x1", "x11"], None).unwrap();
        let matches = filter(&store, SearchSpace::All, &TokenSet::parse("x1"));
        let mut sel = Selection::default();
        sel.reset(&matches);
        assert_eq!(sel.cursor(), 1);
    }

    #[test]
    fn test_move_skips_headers() {
        let (_, matches) = sections();
        let mut sel = Selection::default();
        sel.reset(&matches);
        sel.move_by(&matches, 1);
        assert_eq!(sel.cursor(), 2);
        sel.move_by(&matches, 1);
        assert_eq!(sel.cursor(), 4);
        sel.move_by(&matches, 1);
        assert_eq!(sel.cursor(), 4);
        sel.move_by(&matches, -1);
        assert_eq!(sel.cursor(), 2);
        sel.move_by(&matches, -1);
        sel.move_by(&matches, -1);
        assert_eq!(sel.cursor(), 1);
    }

    #[test]
    fn test_empty_match_set_is_inert() {
        let (_, matches) = numbered(0);
        let mut sel = Selection::default();
        sel.reset(&matches);
        sel.move_by(&matches, 1);
        sel.move_by(&matches, -1);
        sel.move_by_page(&matches, 1, 10);
        sel.move_to_header(&matches, 1);
        assert_eq!(sel.cursor(), 0);
        assert_eq!(sel.current(&matches), None);
    }

    #[test]
    fn test_headers_only_has_no_current() {
        let store = LineStore::from_lines(["# A", "# B"], Some('#')).unwrap();
        let matches = filter(&store, SearchSpace::All, &TokenSet::parse(""));
        let mut sel = Selection::default();
        sel.reset(&matches);
        sel.move_by(&matches, 1);
        assert_eq!(sel.current(&matches), None);
    }

    #[test]
    fn test_page_down_and_up() {
        let (_, matches) = numbered(25);
        let mut sel = Selection::default();
        sel.reset(&matches);
        sel.move_by(&matches, 1);
        sel.move_by_page(&matches, 1, 10);
        assert_eq!(sel.cursor(), 10);
        sel.move_by_page(&matches, 1, 10);
        assert_eq!(sel.cursor(), 20);
        sel.move_by_page(&matches, 1, 10);
        assert_eq!(sel.cursor(), 20);
        sel.move_by_page(&matches, -1, 10);
        assert_eq!(sel.cursor(), 10);
        sel.move_by_page(&matches, -1, 10);
        assert_eq!(sel.cursor(), 0);
        sel.move_by_page(&matches, -1, 10);
        assert_eq!(sel.cursor(), 0);
    }

    #[test]
    fn test_page_skips_header_at_boundary() {
        let store = LineStore::from_lines(["a", "b", "# H", "c"], Some('#')).unwrap();
        let matches = filter(&store, SearchSpace::All, &TokenSet::parse(""));
        let mut sel = Selection::default();
        sel.reset(&matches);
        sel.move_by_page(&matches, 1, 2);
        assert_eq!(sel.cursor(), 3);
    }

    #[test]
    fn test_move_to_header() {
        let (_, matches) = sections();
        let mut sel = Selection::default();
        sel.reset(&matches);
        sel.move_to_header(&matches, 1);
        assert_eq!(sel.cursor(), 4);
        sel.move_to_header(&matches, 1);
        assert_eq!(sel.cursor(), 4);
        sel.move_to_header(&matches, -1);
        assert_eq!(sel.cursor(), 1);
    }

    #[test]
    fn test_move_to_header_within_section() {
        let (_, matches) = sections();
        let mut sel = Selection::default();
        sel.reset(&matches);
        sel.move_by(&matches, 1);
        assert_eq!(sel.cursor(), 2);
        sel.move_to_header(&matches, -1);
        assert_eq!(sel.cursor(), 1);
    }

    #[test]
    fn test_move_to_header_trailing_empty_section() {
        let store = LineStore::from_lines(["# A", "x1", "# B"], Some('#')).unwrap();
        let matches = filter(&store, SearchSpace::All, &TokenSet::parse(""));
        let mut sel = Selection::default();
        sel.reset(&matches);
        sel.move_to_header(&matches, 1);
        assert_eq!(sel.cursor(), 1);
        assert!(sel.current(&matches).is_some());
    }

    #[test]
    fn test_move_to_header_without_headers_clamps() {
        let (_, matches) = numbered(5);
        let mut sel = Selection::default();
        sel.reset(&matches);
        sel.move_to_header(&matches, 1);
        assert_eq!(sel.cursor(), 4);
        sel.move_to_header(&matches, -1);
        assert_eq!(sel.cursor(), 0);
    }

    #[test]
    fn test_settle_after_shrink() {
        let (_, matches) = numbered(10);
        let mut sel = Selection::default();
        sel.jump_to(&matches, 9);
        let (_, fewer) = numbered(3);
        sel.settle(&fewer);
        assert_eq!(sel.cursor(), 2);
    }

    #[test]
    fn test_settle_off_header() {
        let (_, matches) = sections();
        let mut sel = Selection::default();
        sel.jump_to(&matches, 3);
        assert_eq!(sel.cursor(), 4);

        let store = LineStore::from_lines(["x", "# H"], Some('#')).unwrap();
        let trailing = filter(&store, SearchSpace::All, &TokenSet::parse(""));
        let mut sel = Selection::default();
        sel.jump_to(&trailing, 0);
        sel.cursor = 1;
        sel.settle(&trailing);
        assert_eq!(sel.cursor(), 0);
    }
}
