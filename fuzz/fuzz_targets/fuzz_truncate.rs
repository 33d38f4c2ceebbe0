#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    text: &'a str,
    limit: u8,
    col: u8,
}

fuzz_target!(|input: Input<'_>| {
    // Truncation must land on a code point boundary and respect the limit.
    let col = usize::from(input.col);
    let limit = col + usize::from(input.limit);
    let cut = linepick::utils::truncate_at_width(input.text, limit, col);
    assert!(input.text.is_char_boundary(cut));
    assert!(linepick::utils::width_of(&input.text[..cut], col) <= usize::from(input.limit));

    let (shown, end) = linepick::utils::printable(input.text, limit, col);
    assert!(end <= limit);
    assert!(!shown.chars().any(char::is_control));
});
