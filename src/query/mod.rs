//! Query editing and line matching.
//!
//! - [`input`] - The bounded, user-edited query string
//! - [`tokenizer`] - Whitespace splitting of the query into tokens
//! - [`matcher`] - AND-of-substrings filtering into a [`MatchSet`]

pub mod input;
pub mod matcher;
pub mod tokenizer;

pub use input::{Edit, QueryBuffer, MAX_QUERY_BYTES};
pub use matcher::{filter, MatchEntry, MatchKind, MatchSet, SearchSpace};
pub use tokenizer::TokenSet;
