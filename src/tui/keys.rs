//! Byte-level key decoding.
//!
//! The terminal is read one byte at a time in raw mode. [`KeyDecoder`] is a
//! small state machine turning that stream into logical [`Key`]s:
//!
//! ```text
//! Normal --ESC--> AltPending --'['--> CsiPending --(params)*--> terminator
//!                            --'O'--> Ss3Pending --> 'A' | 'B'
//! ```
//!
//! Unknown sequences decode to [`Key::Ignored`] so the caller can treat
//! them as no-ops. A byte that cannot continue the pending sequence, such as
//! a fresh ESC or a control key, drops that sequence and is decoded as if the
//! decoder were idle.

const ESC: u8 = 0x1b;
const DEL: u8 = 0x7f;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable character, possibly assembled from several UTF-8 bytes.
    Char(char),
    /// Ctrl with a letter, given in lowercase (`Ctrl('c')` for 0x03).
    Ctrl(char),
    /// ESC followed by any byte other than `[` or `O`.
    Alt(u8),
    Backspace,
    Tab,
    Enter,
    Up,
    Down,
    PageUp,
    PageDown,
    /// A malformed or unsupported sequence.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Normal,
    Utf8 { buf: [u8; 4], len: usize, need: usize },
    AltPending,
    CsiPending { param: u32, first: bool },
    Ss3Pending,
}

#[derive(Debug, Clone)]
pub struct KeyDecoder {
    state: State,
}

impl Default for KeyDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyDecoder {
    pub fn new() -> Self {
        Self { state: State::Normal }
    }

    /// Whether a multi-byte sequence is in progress.
    pub fn is_pending(&self) -> bool {
        self.state != State::Normal
    }

    /// Feed one byte; returns a key once a full sequence has been read.
    pub fn feed(&mut self, byte: u8) -> Option<Key> {
        match self.state {
            State::Normal => self.normal(byte),
            State::Utf8 { mut buf, len, need } => {
                if byte & 0xc0 != 0x80 {
                    self.state = State::Normal;
                    return self.normal(byte);
                }
                buf[len] = byte;
                if len + 1 < need {
                    self.state = State::Utf8 { buf, len: len + 1, need };
                    return None;
                }
                self.state = State::Normal;
                let key = std::str::from_utf8(&buf[..need])
                    .ok()
                    .and_then(|s| s.chars().next())
                    .map_or(Key::Ignored, Key::Char);
                Some(key)
            }
            State::AltPending => match byte {
                b'[' => {
                    self.state = State::CsiPending { param: 0, first: true };
                    None
                }
                b'O' => {
                    self.state = State::Ss3Pending;
                    None
                }
                _ => {
                    self.state = State::Normal;
                    Some(Key::Alt(byte))
                }
            },
            State::CsiPending { param, first } => match byte {
                b'0'..=b'9' if first => {
                    let digit = u32::from(byte - b'0');
                    let param = param.saturating_mul(10).saturating_add(digit);
                    self.state = State::CsiPending { param, first };
                    None
                }
                // Further parameters and intermediate bytes.
                0x20..=0x3f => {
                    let first = first && byte.is_ascii_digit();
                    self.state = State::CsiPending { param, first };
                    None
                }
                0x40..=0x7e => {
                    self.state = State::Normal;
                    Some(match (byte, param) {
                        (b'A', _) => Key::Up,
                        (b'B', _) => Key::Down,
                        (b'~', 5) => Key::PageUp,
                        (b'~', 6) => Key::PageDown,
                        _ => Key::Ignored,
                    })
                }
                _ => {
                    self.state = State::Normal;
                    self.normal(byte)
                }
            },
            State::Ss3Pending => {
                self.state = State::Normal;
                match byte {
                    b'A' => Some(Key::Up),
                    b'B' => Some(Key::Down),
                    0x20..=0x7e => Some(Key::Ignored),
                    _ => self.normal(byte),
                }
            }
        }
    }

    /// Feed a buffer, collecting every completed key.
    pub fn feed_all(&mut self, bytes: &[u8]) -> Vec<Key> {
        bytes.iter().filter_map(|&b| self.feed(b)).collect()
    }

    fn normal(&mut self, byte: u8) -> Option<Key> {
        let key = match byte {
            ESC => {
                self.state = State::AltPending;
                return None;
            }
            DEL | 0x08 => Key::Backspace,
            b'\t' => Key::Tab,
            b'\n' | b'\r' => Key::Enter,
            0x01..=0x1a => Key::Ctrl(char::from(byte | 0x60)),
            0x20..=0x7e => Key::Char(char::from(byte)),
            0xc2..=0xf4 => {
                let need = match byte {
                    0xc2..=0xdf => 2,
                    0xe0..=0xef => 3,
                    _ => 4,
                };
                let mut buf = [0; 4];
                buf[0] = byte;
                self.state = State::Utf8 { buf, len: 1, need };
                return None;
            }
            _ => Key::Ignored,
        };
        Some(key)
    }
}
