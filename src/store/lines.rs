use crate::error::{PickError, Result};
use log::{debug, warn};

/// Location of one candidate inside the arena.
#[derive(Debug, Clone, Copy)]
struct Span {
    start: usize,
    end: usize,
    header: bool,
}

/// Immutable, index-stable list of candidate lines.
///
/// Besides the text arena the store keeps an ASCII-lowercased copy of it
/// with identical byte offsets, so case-insensitive matching never has to
/// fold a candidate at query time.
#[derive(Debug)]
pub struct LineStore {
    text: String,
    folded: Vec<u8>,
    spans: Vec<Span>,
    marker: Option<char>,
    headers: usize,
}

impl LineStore {
    /// Build a store from raw input bytes, splitting on `\n`.
    ///
    /// A final newline does not produce a trailing empty line, and empty
    /// input produces an empty store. An embedded NUL byte is rejected with
    /// the (1-based) number of the offending line.
    pub fn from_bytes(bytes: Vec<u8>, marker: Option<char>) -> Result<Self> {
        if let Some(pos) = memchr::memchr(0, &bytes) {
            let line = memchr::memchr_iter(b'\n', &bytes[..pos]).count() + 1;
            return Err(PickError::NulByte { line });
        }

        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(err) => {
                warn!("input is not valid UTF-8, replacing invalid sequences");
                String::from_utf8_lossy(err.as_bytes()).into_owned()
            }
        };

        let mut spans = Vec::with_capacity(memchr::memchr_iter(b'\n', text.as_bytes()).count() + 1);
        let mut start = 0;
        for end in memchr::memchr_iter(b'\n', text.as_bytes()) {
            spans.push(Span { start, end, header: false });
            start = end + 1;
        }
        if start < text.len() {
            spans.push(Span { start, end: text.len(), header: false });
        }

        let mut headers = 0;
        if let Some(marker) = marker {
            for span in &mut spans {
                span.header = text[span.start..span.end].starts_with(marker);
                headers += usize::from(span.header);
            }
        }

        let folded = text.as_bytes().to_ascii_lowercase();

        debug!(
            "loaded {} lines ({} headers, {} bytes)",
            spans.len(),
            headers,
            text.len()
        );

        Ok(Self {
            text,
            folded,
            spans,
            marker,
            headers,
        })
    }

    /// Build a store from already-split lines. Mostly useful for tests and
    /// benchmarks.
    pub fn from_lines<I, S>(lines: I, marker: Option<char>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut buf = Vec::new();
        for line in lines {
            buf.extend_from_slice(line.as_ref().as_bytes());
            buf.push(b'\n');
        }
        Self::from_bytes(buf, marker)
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Full text of the line at `index`, as printed on confirmation. Panics
    /// when out of range, like slice indexing.
    pub fn text(&self, index: usize) -> &str {
        let span = self.spans[index];
        &self.text[span.start..span.end]
    }

    /// ASCII-lowercased bytes of the line, used for matching.
    pub fn folded(&self, index: usize) -> &[u8] {
        let span = self.spans[index];
        &self.folded[span.start..span.end]
    }

    pub fn is_header(&self, index: usize) -> bool {
        self.spans[index].header
    }

    /// Text shown on screen: headers lose their marker character.
    pub fn display_text(&self, index: usize) -> &str {
        let text = self.text(index);
        match self.marker {
            Some(marker) if self.is_header(index) => &text[marker.len_utf8()..],
            _ => text,
        }
    }

    pub fn header_count(&self) -> usize {
        self.headers
    }

    /// Number of lines that can be selected, the denominator of the
    /// `matching/total` counter.
    pub fn selectable_count(&self) -> usize {
        self.spans.len() - self.headers
    }
}
