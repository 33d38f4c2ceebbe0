//! Error types shared by the picker.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal conditions. Every variant ends the session after the terminal has
/// been restored; malformed key sequences never surface here.
#[derive(Debug, Error)]
pub enum PickError {
    #[error("reading standard input")]
    ReadInput(#[source] io::Error),

    #[error("'\\0' byte in input on line {line}")]
    NulByte { line: usize },

    #[error("opening /dev/tty")]
    OpenTty(#[source] io::Error),

    #[error("{what}")]
    Terminal {
        what: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("unexpected end of input from the terminal")]
    TtyEof,

    #[error("invalid config file {}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl PickError {
    pub(crate) fn terminal(what: &'static str) -> impl FnOnce(io::Error) -> Self {
        move |source| PickError::Terminal { what, source }
    }
}

pub type Result<T, E = PickError> = std::result::Result<T, E>;
