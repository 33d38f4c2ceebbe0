//! End-to-end picker sessions driven by decoded keys, without a terminal.

use linepick::query::{filter, MatchKind, SearchSpace, TokenSet};
use linepick::store::LineStore;
use linepick::tui::{Action, KeyDecoder, Layout, PickerOptions, Session, TermSize};
use linepick::utils::{truncate_at_width, width_of};
use std::collections::HashSet;

const SIZE: TermSize = TermSize { columns: 80, rows: 24 };

fn fruit() -> LineStore {
    LineStore::from_lines(["apple pie", "banana", "apple tart"], None).unwrap()
}

fn sections() -> LineStore {
    LineStore::from_lines(["# Section A", "x1", "x2", "# Section B", "y1"], Some('#')).unwrap()
}

fn vertical() -> PickerOptions {
    PickerOptions {
        layout: Layout::Vertical { lines: 10 },
        ..PickerOptions::default()
    }
}

/// Feed raw terminal bytes through the decoder into the session, stopping
/// at the first key that ends it.
fn feed(session: &mut Session<'_>, bytes: &[u8]) -> Action {
    let mut decoder = KeyDecoder::new();
    for key in decoder.feed_all(bytes) {
        let action = session.handle_key(key);
        if action != Action::Continue {
            return action;
        }
    }
    Action::Continue
}

fn shown(session: &Session<'_>) -> Vec<String> {
    session
        .matches()
        .lines()
        .map(|line| session.store().text(line).to_owned())
        .collect()
}

#[test]
fn test_scenario_a_tokens_filter_lines() {
    let store = fruit();
    let mut session = Session::new(&store, vertical(), SIZE);
    feed(&mut session, b"apple");
    assert_eq!(shown(&session), ["apple pie", "apple tart"]);
    assert_eq!(session.matches().matching_count(), 2);
}

#[test]
fn test_scenario_b_backspace_rescans_everything() {
    let store = fruit();
    let mut session = Session::new(&store, vertical(), SIZE);
    feed(&mut session, b"apple\x7f");
    assert_eq!(session.query(), "appl");
    assert_eq!(shown(&session), ["apple pie", "apple tart"]);

    // A narrowed search would have lost "banana" for good.
    feed(&mut session, b"\x7f\x7f\x7f\x7f");
    assert_eq!(session.query(), "");
    assert_eq!(session.matches().matching_count(), 3);
}

#[test]
fn test_scenario_c_headers_are_kept_and_skipped() {
    let store = sections();
    let session = Session::new(&store, vertical(), SIZE);
    assert_eq!(session.matches().len(), 5);
    assert_eq!(session.matches().matching_count(), 3);
    assert_eq!(session.selection().cursor(), 1);
    assert_eq!(session.output_line(), "x1");
}

#[test]
fn test_scenario_d_exact_match_is_selected() {
    let store = LineStore::from_lines(["x10", "x1", "x100"], None).unwrap();
    let mut session = Session::new(&store, vertical(), SIZE);
    feed(&mut session, b"x1");
    let cursor = session.selection().cursor();
    assert_eq!(session.matches().get(cursor).unwrap().kind, MatchKind::Exact);
    assert_eq!(feed(&mut session, b"\r"), Action::Confirm);
    assert_eq!(session.output_line(), "x1");
}

#[test]
fn test_scenario_e_empty_input_confirms_empty_line() {
    let store = LineStore::from_bytes(Vec::new(), None).unwrap();
    let mut session = Session::new(&store, vertical(), SIZE);
    assert!(session.matches().is_empty());
    assert_eq!(session.matches().matching_count(), 0);
    assert_eq!(feed(&mut session, b"\n"), Action::Confirm);
    assert_eq!(session.output_line(), "");
}

#[test]
fn test_cancel_keys() {
    let store = fruit();
    let mut session = Session::new(&store, vertical(), SIZE);
    assert_eq!(feed(&mut session, b"ban\x03"), Action::Cancel);
    assert_eq!(feed(&mut session, b"\x04"), Action::Cancel);
}

#[test]
fn test_arrows_and_header_jumps() {
    let store = sections();
    let mut session = Session::new(&store, vertical(), SIZE);
    feed(&mut session, b"\x1b[B");
    assert_eq!(session.output_line(), "x2");
    feed(&mut session, b"\x1bOB");
    assert_eq!(session.output_line(), "y1");
    feed(&mut session, b"\x1bp");
    assert_eq!(session.output_line(), "x1");
    feed(&mut session, b"\x1bn");
    assert_eq!(session.output_line(), "y1");
    feed(&mut session, b"\x10");
    assert_eq!(session.output_line(), "x2");
}

#[test]
fn test_typed_utf8_reaches_the_query() {
    let store = LineStore::from_lines(["café au lait", "thé vert"], None).unwrap();
    let mut session = Session::new(&store, vertical(), SIZE);
    feed(&mut session, "thé".as_bytes());
    assert_eq!(session.query(), "thé");
    assert_eq!(shown(&session), ["thé vert"]);
}

#[test]
fn test_nothing_selectable_outputs_query() {
    let store = sections();
    let mut session = Session::new(&store, vertical(), SIZE);
    feed(&mut session, b"zzz");
    // Headers survive any query.
    assert_eq!(session.matches().len(), 2);
    assert_eq!(session.matches().matching_count(), 0);
    assert_eq!(session.output_line(), "zzz");
}

fn corpus() -> LineStore {
    let lines: Vec<String> = (0..400)
        .map(|i| {
            if i % 37 == 0 {
                format!("# group {i}")
            } else {
                format!("Item-{i} {} {}", ["red", "Green", "BLUE"][i % 3], i * 7)
            }
        })
        .collect();
    LineStore::from_lines(&lines, Some('#')).unwrap()
}

#[test]
fn test_appending_never_grows_the_match_set() {
    let store = corpus();
    for query in ["item-1 green", "Item 2", "blue 7", "red  14"] {
        let mut prev: Option<HashSet<usize>> = None;
        for end in (0..=query.len()).filter(|&end| query.is_char_boundary(end)) {
            let tokens = TokenSet::parse(&query[..end]);
            let matches = filter(&store, SearchSpace::All, &tokens);
            let current: HashSet<usize> = matches
                .iter()
                .filter(|entry| !entry.is_header())
                .map(|entry| entry.line)
                .collect();
            if let Some(prev) = &prev {
                assert!(current.is_subset(prev), "query {:?} grew the match set", &query[..end]);
            }
            prev = Some(current);
        }
    }
}

#[test]
fn test_narrowed_search_agrees_with_full_rescan() {
    let store = corpus();
    let mut within = filter(&store, SearchSpace::All, &TokenSet::parse(""));
    let query = "item 1 green";
    for end in 1..=query.len() {
        let tokens = TokenSet::parse(&query[..end]);
        let narrowed = filter(&store, SearchSpace::Within(&within), &tokens);
        let full = filter(&store, SearchSpace::All, &tokens);
        assert_eq!(narrowed.entries(), full.entries(), "query {:?}", &query[..end]);
        within = narrowed;
    }
}

#[test]
fn test_cursor_never_rests_on_a_header() {
    let store = corpus();
    let mut session = Session::new(&store, vertical(), SIZE);
    let script: &[&[u8]] = &[
        b"\x1b[B\x1b[B", b"\x1b[6~", b"\x1bn", b"\x1bn", b"\x1b[A", b"\x1bp", b"1", b"\x1b[6~", b"\x7f", b"\x15",
        b"\x1b[5~", b"\x0e\x0e\x0e", b"\x16", b"\x1bv", b"gre", b"\x17", b"\t",
    ];
    for bytes in script {
        feed(&mut session, bytes);
        let matches = session.matches();
        if matches.matching_count() > 0 {
            assert!(!matches.is_header(session.selection().cursor()), "after {bytes:?}");
        }
        let counted = matches.iter().filter(|entry| !entry.is_header()).count();
        assert_eq!(matches.matching_count(), counted);
    }
}

#[test]
fn test_truncation_round_trip() {
    for line in ["plain ascii", "\tTabbed\tline", "浪漫的夢想", "e\u{301}\u{301}x", "mixed 夢 and\tmore"] {
        let full = width_of(line, 0);
        assert_eq!(truncate_at_width(line, full, 0), line.len());
        for limit in 0..full {
            let cut = truncate_at_width(line, limit, 0);
            assert!(std::str::from_utf8(&line.as_bytes()[..cut]).is_ok());
            assert!(width_of(&line[..cut], 0) <= limit);
        }
    }
}
