use crate::error::{PickError, Result};
use crate::store::LineStore;
use std::io::Read;

/// Read the whole input stream and split it into a [`LineStore`].
///
/// This runs before the terminal is touched, so failures here never need
/// to restore anything.
pub fn read_lines<R: Read>(mut input: R, marker: Option<char>) -> Result<LineStore> {
    let mut buf = Vec::with_capacity(64 * 1024);
    input.read_to_end(&mut buf).map_err(PickError::ReadInput)?;
    LineStore::from_bytes(buf, marker)
}
