//! # linepick - Interactive Line Picker
//!
//! linepick reads candidate lines from standard input, lets the user narrow
//! them down by typing on the controlling terminal, and prints the chosen
//! line to standard output.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`store`] - Line ingestion into an immutable arena
//! - [`query`] - Query buffer, tokenizing and match filtering
//! - [`tui`] - Key decoding, selection, layout and the control loop
//! - [`output`] - Printing the confirmed selection
//! - [`utils`] - Column width math and the config file
//! - [`error`] - Fatal error types
//!
//! ## Quick Start
//!
//! ```
//! use linepick::query::{filter, SearchSpace, TokenSet};
//! use linepick::store::LineStore;
//!
//! let store = LineStore::from_lines(["apple pie", "banana", "apple tart"], None).unwrap();
//! let matches = filter(&store, SearchSpace::All, &TokenSet::parse("apple"));
//! assert_eq!(matches.matching_count(), 2);
//!
//! // Appending to the query only needs to search the previous matches.
//! let narrowed = filter(&store, SearchSpace::Within(&matches), &TokenSet::parse("apple t"));
//! assert_eq!(narrowed.matching_count(), 1);
//! ```
//!
//! ## Performance
//!
//! Lines live in one contiguous buffer alongside an ASCII-lowercased copy,
//! so case-insensitive matching is a plain `memchr` substring search with
//! no per-keystroke allocation. Typing a character filters only the current
//! match set; every other edit rescans the whole input.

pub mod error;
pub mod output;
pub mod query;
pub mod store;
pub mod tui;
pub mod utils;
