//! AND-of-substrings line filtering.
//!
//! A line is kept when every token of the query occurs in it, in any order
//! and possibly overlapping, ignoring ASCII case. There is no ranking: the
//! result keeps the order of the searched lines.
//!
//! Appending characters to the query can only remove lines from the
//! result, so after an append the previous [`MatchSet`] is searched instead
//! of the whole store ([`SearchSpace::Within`]). Every other edit may bring
//! lines back and must use [`SearchSpace::All`].

use crate::query::TokenSet;
use crate::store::LineStore;
use log::debug;
use memchr::memmem::Finder;

/// How a line relates to the current query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Excluded from the match set.
    NoMatch,
    /// Every token occurs in the line.
    Token,
    /// The query equals the line's text verbatim.
    Exact,
    /// A header line, kept regardless of the query.
    Header,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchEntry {
    /// Index into the [`LineStore`].
    pub line: usize,
    pub kind: MatchKind,
}

impl MatchEntry {
    pub fn is_header(&self) -> bool {
        self.kind == MatchKind::Header
    }
}

/// Lines matching the current query, in store order.
#[derive(Debug, Clone, Default)]
pub struct MatchSet {
    entries: Vec<MatchEntry>,
    matching: usize,
}

impl MatchSet {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries that are not headers.
    pub fn matching_count(&self) -> usize {
        self.matching
    }

    pub fn get(&self, index: usize) -> Option<&MatchEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[MatchEntry] {
        &self.entries
    }

    pub fn is_header(&self, index: usize) -> bool {
        self.entries.get(index).is_some_and(MatchEntry::is_header)
    }

    /// Position of the first exact match, if any.
    pub fn first_exact(&self) -> Option<usize> {
        self.entries.iter().position(|e| e.kind == MatchKind::Exact)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MatchEntry> + '_ {
        self.entries.iter()
    }

    /// Store indices of the entries, in order.
    pub fn lines(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(|e| e.line)
    }

    fn push(&mut self, entry: MatchEntry) {
        if !entry.is_header() {
            self.matching += 1;
        }
        self.entries.push(entry);
    }
}

/// Lines to consider when filtering.
#[derive(Debug, Clone, Copy)]
pub enum SearchSpace<'a> {
    /// Every line of the store.
    All,
    /// Only the lines of a previous result.
    Within(&'a MatchSet),
}

/// Classify one line against the query.
pub fn classify(store: &LineStore, line: usize, tokens: &TokenSet<'_>, finders: &[Finder<'_>]) -> MatchKind {
    if store.is_header(line) {
        return MatchKind::Header;
    }
    let query = tokens.query();
    if !query.is_empty() && query == store.text(line) {
        return MatchKind::Exact;
    }
    let haystack = store.folded(line);
    if finders.iter().all(|f| f.find(haystack).is_some()) {
        MatchKind::Token
    } else {
        MatchKind::NoMatch
    }
}

/// Filter `space` with `tokens`, producing a fresh [`MatchSet`].
pub fn filter(store: &LineStore, space: SearchSpace<'_>, tokens: &TokenSet<'_>) -> MatchSet {
    let finders: Vec<Finder<'_>> = tokens.iter().map(|token| Finder::new(token)).collect();
    let mut result = MatchSet::default();

    let mut keep = |line: usize| {
        let kind = classify(store, line, tokens, &finders);
        if kind != MatchKind::NoMatch {
            result.push(MatchEntry { line, kind });
        }
    };

    let searched = match space {
        SearchSpace::All => {
            (0..store.len()).for_each(&mut keep);
            store.len()
        }
        SearchSpace::Within(previous) => {
            previous.lines().for_each(&mut keep);
            previous.len()
        }
    };

    debug!(
        "filter {:?}: {} tokens, {} searched ({}), {} kept",
        tokens.query(),
        tokens.len(),
        searched,
        if matches!(space, SearchSpace::All) { "full" } else { "narrowed" },
        result.matching_count()
    );

    result
}
