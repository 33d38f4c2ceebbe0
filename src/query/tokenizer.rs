/// Tokens of the current query.
///
/// Splits on runs of spaces and tabs; empty fragments are dropped, so an
/// empty or all-blank query yields no tokens and matches everything. Tokens
/// are stored ASCII-lowercased for case-insensitive matching, while the raw
/// query is kept for exact-match comparison.
#[derive(Debug, Clone)]
pub struct TokenSet<'q> {
    query: &'q str,
    tokens: Vec<Vec<u8>>,
}

impl<'q> TokenSet<'q> {
    pub fn parse(query: &'q str) -> Self {
        let tokens = query
            .split([' ', '\t'])
            .filter(|token| !token.is_empty())
            .map(|token| token.as_bytes().to_ascii_lowercase())
            .collect();
        Self { query, tokens }
    }

    /// The query the tokens were split from, verbatim.
    pub fn query(&self) -> &'q str {
        self.query
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.tokens.iter().map(Vec::as_slice)
    }
}
