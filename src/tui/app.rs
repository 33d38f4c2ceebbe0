use super::keys::Key;
use super::layout::{next_segment_end, page_size, prev_segment_start, ribbon_budget, Layout, TermSize, Viewport};
use super::selection::Selection;
use crate::query::{filter, Edit, MatchSet, QueryBuffer, SearchSpace, TokenSet};
use crate::store::LineStore;
use log::debug;

/// What the control loop should do after a key was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    /// Print [`Session::output_line`] and exit successfully.
    Confirm,
    /// Exit without printing.
    Cancel,
    /// Give the terminal back and stop the process until resumed.
    Suspend,
}

/// Presentation settings fixed for the whole session.
#[derive(Debug, Clone)]
pub struct PickerOptions {
    pub layout: Layout,
    pub prompt: String,
    /// Prefix the confirmed line with the nearest header above it.
    pub print_header: bool,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            layout: Layout::Ribbon,
            prompt: String::new(),
            print_header: false,
        }
    }
}

/// All mutable picker state, owned by the control loop.
pub struct Session<'s> {
    store: &'s LineStore,
    options: PickerOptions,
    query: QueryBuffer,
    matches: MatchSet,
    selection: Selection,
    viewport: Viewport,
    size: TermSize,
}

impl<'s> Session<'s> {
    /// Start a session with an empty query: every line matches.
    pub fn new(store: &'s LineStore, options: PickerOptions, size: TermSize) -> Self {
        let matches = filter(store, SearchSpace::All, &TokenSet::parse(""));
        let viewport = Viewport::top(options.layout, store, &matches, size);
        let mut session = Self {
            store,
            options,
            query: QueryBuffer::new(),
            matches,
            selection: Selection::default(),
            viewport,
            size,
        };
        session.selection.reset(&session.matches);
        session.follow_cursor();
        session
    }

    pub fn store(&self) -> &'s LineStore {
        self.store
    }

    pub fn options(&self) -> &PickerOptions {
        &self.options
    }

    pub fn query(&self) -> &str {
        self.query.as_str()
    }

    pub fn matches(&self) -> &MatchSet {
        &self.matches
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn size(&self) -> TermSize {
        self.size
    }

    pub fn layout(&self) -> Layout {
        self.options.layout
    }

    /// Apply one decoded key.
    pub fn handle_key(&mut self, key: Key) -> Action {
        match key {
            Key::Enter => return Action::Confirm,
            Key::Ctrl('c') | Key::Ctrl('d') => return Action::Cancel,
            Key::Ctrl('z') => return Action::Suspend,

            Key::Char(c) => {
                let edit = self.query.push(c);
                self.refilter(edit);
            }
            Key::Backspace => {
                let edit = self.query.pop();
                self.refilter(edit);
            }
            Key::Ctrl('w') => {
                let edit = self.query.delete_word();
                self.refilter(edit);
            }
            Key::Ctrl('u') => {
                let edit = self.query.clear();
                self.refilter(edit);
            }
            Key::Tab => self.complete(),

            Key::Up | Key::Ctrl('p') => self.navigate(|sel, matches| sel.move_by(matches, -1)),
            Key::Down | Key::Ctrl('n') => self.navigate(|sel, matches| sel.move_by(matches, 1)),
            Key::Alt(b'p') => self.navigate(|sel, matches| sel.move_to_header(matches, -1)),
            Key::Alt(b'n') => self.navigate(|sel, matches| sel.move_to_header(matches, 1)),
            Key::PageUp | Key::Alt(b'v') => self.page(-1),
            Key::PageDown | Key::Ctrl('v') => self.page(1),

            _ => {}
        }
        Action::Continue
    }

    /// New terminal geometry: the window is recomputed from the top.
    pub fn resize(&mut self, size: TermSize) {
        debug!("resize to {}x{}", size.columns, size.rows);
        self.size = size;
        self.viewport = Viewport::top(self.options.layout, self.store, &self.matches, size);
        self.follow_cursor();
    }

    /// Text printed on confirm: the selected line, or the query when
    /// nothing is selectable.
    pub fn output_line(&self) -> String {
        let Some(index) = self.selection.current(&self.matches) else {
            return self.query.as_str().to_owned();
        };
        let line = self.matches.entries()[index].line;
        let text = self.store.text(line);
        if self.options.print_header {
            if let Some(header) = (0..line).rev().find(|&i| self.store.is_header(i)) {
                return format!("{}\t{}", self.store.display_text(header), text);
            }
        }
        text.to_owned()
    }

    fn refilter(&mut self, edit: Edit) {
        let tokens = TokenSet::parse(self.query.as_str());
        self.matches = match edit {
            Edit::Unchanged => return,
            Edit::Narrow => filter(self.store, SearchSpace::Within(&self.matches), &tokens),
            Edit::Widen => filter(self.store, SearchSpace::All, &tokens),
        };
        self.selection.reset(&self.matches);
        self.viewport = Viewport::top(self.options.layout, self.store, &self.matches, self.size);
        self.follow_cursor();
    }

    /// Copy the selected line into the query.
    fn complete(&mut self) {
        let Some(index) = self.selection.current(&self.matches) else {
            return;
        };
        let line = self.matches.entries()[index].line;
        let edit = self.query.replace(self.store.text(line));
        self.refilter(edit);
    }

    fn navigate(&mut self, step: impl FnOnce(&mut Selection, &MatchSet)) {
        step(&mut self.selection, &self.matches);
        self.follow_cursor();
    }

    fn page(&mut self, sign: isize) {
        match (self.options.layout, self.viewport) {
            (Layout::Vertical { lines }, _) => {
                let page = page_size(lines, self.size);
                self.selection.move_by_page(&self.matches, sign, page);
            }
            (Layout::Ribbon, Viewport::Ribbon { start, end }) => {
                let budget = ribbon_budget(self.size);
                let (start, end) = if sign > 0 {
                    if end >= self.matches.len() {
                        return;
                    }
                    (end, next_segment_end(self.store, &self.matches, end, budget))
                } else {
                    if start == 0 {
                        return;
                    }
                    (prev_segment_start(self.store, &self.matches, start, budget), start)
                };
                self.viewport = Viewport::Ribbon { start, end };
                self.selection.jump_to(&self.matches, start);
            }
            (Layout::Ribbon, Viewport::Vertical { .. }) => {}
        }
        self.follow_cursor();
    }

    fn follow_cursor(&mut self) {
        self.viewport.follow(
            self.selection.cursor(),
            self.options.layout,
            self.store,
            &self.matches,
            self.size,
        );
    }
}
