//! Candidate line storage.
//!
//! Standard input is read once into a single arena; every candidate is an
//! `(offset, length)` window into it, so ingestion allocates one buffer no
//! matter how many lines arrive.
//!
//! - [`lines`] - The immutable [`LineStore`]
//! - [`reader`] - Reading and validating the input stream

pub mod lines;
pub mod reader;

pub use lines::LineStore;
pub use reader::read_lines;
