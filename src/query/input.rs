/// Largest query accepted, in bytes. Same as the longest line a terminal in
/// canonical mode hands over (`LINE_MAX` minus the terminator).
pub const MAX_QUERY_BYTES: usize = 2047;

/// How an edit changed the query, which decides how much of the input has
/// to be searched again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    /// Nothing changed; the current matches stay valid.
    Unchanged,
    /// Characters were appended. Matching is monotonic under appends, so
    /// only the previous matches need to be searched.
    Narrow,
    /// Anything else. The match set may grow, so every line is searched.
    Widen,
}

/// The user's query, bounded to [`MAX_QUERY_BYTES`].
#[derive(Debug, Clone, Default)]
pub struct QueryBuffer {
    text: String,
}

impl QueryBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Append a printable character. Control characters and characters that
    /// would overflow the buffer are dropped.
    pub fn push(&mut self, c: char) -> Edit {
        if c.is_control() || self.text.len() + c.len_utf8() > MAX_QUERY_BYTES {
            return Edit::Unchanged;
        }
        self.text.push(c);
        Edit::Narrow
    }

    /// Remove the last character.
    pub fn pop(&mut self) -> Edit {
        match self.text.pop() {
            Some(_) => Edit::Widen,
            None => Edit::Unchanged,
        }
    }

    /// Remove trailing whitespace, then the word before it.
    pub fn delete_word(&mut self) -> Edit {
        let before = self.text.len();
        let trimmed = self.text.trim_end_matches(char::is_whitespace);
        let kept = trimmed.trim_end_matches(|c: char| !c.is_whitespace()).len();
        self.text.truncate(kept);
        if self.text.len() == before {
            Edit::Unchanged
        } else {
            Edit::Widen
        }
    }

    /// Empty the query. Always reported as a widening edit so the cursor is
    /// re-seeked from the top even when the query was already empty.
    pub fn clear(&mut self) -> Edit {
        self.text.clear();
        Edit::Widen
    }

    /// Replace the whole query, cutting `text` at the last code point that
    /// still fits the bound.
    pub fn replace(&mut self, text: &str) -> Edit {
        let mut end = text.len().min(MAX_QUERY_BYTES);
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        self.text.clear();
        self.text.push_str(&text[..end]);
        Edit::Widen
    }
}
