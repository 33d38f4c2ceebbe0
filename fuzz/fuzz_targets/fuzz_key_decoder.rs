#![no_main]

use libfuzzer_sys::fuzz_target;
use linepick::store::LineStore;
use linepick::tui::{KeyDecoder, Layout, PickerOptions, Session, TermSize};

fuzz_target!(|data: &[u8]| {
    // Arbitrary terminal input must never panic the decoder or the session,
    // and the cursor must never rest on a header.
    let store = LineStore::from_lines(["# a", "alpha", "beta", "# b", "gamma", "x\ty夢"], Some('#')).unwrap();
    let options = PickerOptions {
        layout: Layout::Vertical { lines: 3 },
        ..PickerOptions::default()
    };
    let mut session = Session::new(&store, options, TermSize { columns: 40, rows: 5 });
    let mut decoder = KeyDecoder::new();
    for &byte in data {
        if let Some(key) = decoder.feed(byte) {
            session.handle_key(key);
            let matches = session.matches();
            if matches.matching_count() > 0 {
                assert!(!matches.is_header(session.selection().cursor()));
            }
        }
    }
});
