use super::*;
use crate::config::DEFAULT_PUNCTUATION;

fn pos(col: usize, line: usize) -> Position {
    Position::new(col, line)
}

#[test]
fn test_next_word_stops_at_punctuation() {
    let store = TextStore::from_text("foo.bar baz\n");
    let m = Movement::new(&store, DEFAULT_PUNCTUATION);

    assert_eq!(m.find_next_word(pos(0, 0), true), Some(pos(3, 0)));
    assert_eq!(m.find_next_word(pos(3, 0), true), Some(pos(4, 0)));
    assert_eq!(m.find_next_word(pos(4, 0), true), Some(pos(8, 0)));
    assert_eq!(m.find_next_word(pos(8, 0), true), None);
}

#[test]
fn test_next_big_word_skips_punctuation() {
    let store = TextStore::from_text("foo.bar baz\n");
    let m = Movement::new(&store, DEFAULT_PUNCTUATION);

    assert_eq!(m.find_next_big_word(pos(0, 0), true), Some(pos(8, 0)));
}

#[test]
fn test_next_word_without_skip() {
    let store = TextStore::from_text("foo   bar\n");
    let m = Movement::new(&store, DEFAULT_PUNCTUATION);

    assert_eq!(m.find_next_word(pos(0, 0), false), Some(pos(0, 0)));
    assert_eq!(m.find_next_word(pos(3, 0), false), Some(pos(6, 0)));
}

#[test]
fn test_word_motion_crosses_lines() {
    let store = TextStore::from_text("foo\n  bar\n");
    let m = Movement::new(&store, DEFAULT_PUNCTUATION);

    assert_eq!(m.find_next_word(pos(0, 0), true), Some(pos(2, 1)));
    assert_eq!(m.find_prev_word(pos(2, 1), true), Some(pos(0, 0)));
}

#[test]
fn test_prev_word() {
    let store = TextStore::from_text("foo.bar baz\n");
    let m = Movement::new(&store, DEFAULT_PUNCTUATION);

    assert_eq!(m.find_prev_word(pos(8, 0), true), Some(pos(4, 0)));
    assert_eq!(m.find_prev_word(pos(4, 0), true), Some(pos(3, 0)));
    assert_eq!(m.find_prev_word(pos(3, 0), true), Some(pos(0, 0)));
    assert_eq!(m.find_prev_word(pos(0, 0), true), None);
    assert_eq!(m.find_prev_big_word(pos(8, 0), true), Some(pos(0, 0)));
}

#[test]
fn test_word_end() {
    let store = TextStore::from_text("foo.bar baz\n");
    let m = Movement::new(&store, DEFAULT_PUNCTUATION);

    assert_eq!(m.find_word_end(pos(0, 0), true), Some(pos(2, 0)));
    assert_eq!(m.find_word_end(pos(2, 0), true), Some(pos(3, 0)));
    assert_eq!(m.find_word_end(pos(3, 0), true), Some(pos(6, 0)));
    assert_eq!(m.find_word_end(pos(6, 0), true), Some(pos(10, 0)));
    assert_eq!(m.find_word_end(pos(10, 0), true), None);
    assert_eq!(m.find_big_word_end(pos(0, 0), true), Some(pos(6, 0)));
}

#[test]
fn test_unlisted_symbols_form_runs() {
    let store = TextStore::from_text("a,,b c\n");
    let m = Movement::new(&store, ".");

    assert_eq!(m.find_next_word(pos(0, 0), true), Some(pos(1, 0)));
    assert_eq!(m.find_next_word(pos(1, 0), true), Some(pos(3, 0)));
}

#[test]
fn test_find_char() {
    let store = TextStore::from_text("a-b-c\nd-e\n");
    let m = Movement::new(&store, DEFAULT_PUNCTUATION);

    assert_eq!(m.find_next_char(pos(0, 0), '-', false), Some(pos(1, 0)));
    assert_eq!(m.find_next_char(pos(1, 0), '-', false), Some(pos(3, 0)));
    assert_eq!(m.find_next_char(pos(3, 0), '-', false), Some(pos(1, 1)));
    assert_eq!(m.find_next_char(pos(0, 0), 'z', false), None);

    assert_eq!(m.find_prev_char(pos(1, 1), '-', false), Some(pos(3, 0)));
    assert_eq!(m.find_prev_char(pos(0, 0), '-', false), None);
}

#[test]
fn test_smart_bracket_search_skips_nested_pairs() {
    let store = TextStore::from_text("(a(b)c)\n");
    let m = Movement::new(&store, DEFAULT_PUNCTUATION);

    assert_eq!(m.find_next_char(pos(0, 0), ')', true), Some(pos(6, 0)));
    assert_eq!(m.find_next_char(pos(0, 0), ')', false), Some(pos(4, 0)));

    assert_eq!(m.find_prev_char(pos(6, 0), '(', true), Some(pos(0, 0)));
    assert_eq!(m.find_prev_char(pos(6, 0), '(', false), Some(pos(2, 0)));
    assert_eq!(m.find_prev_char(pos(3, 0), '(', true), Some(pos(2, 0)));
}

#[test]
fn test_smart_search_on_non_bracket_is_plain() {
    let store = TextStore::from_text("x(y)x\n");
    let m = Movement::new(&store, DEFAULT_PUNCTUATION);

    assert_eq!(m.find_next_char(pos(0, 0), 'x', true), Some(pos(4, 0)));
}

#[test]
fn test_invalid_start_position() {
    let store = TextStore::from_text("ab\n");
    let m = Movement::new(&store, DEFAULT_PUNCTUATION);

    assert_eq!(m.find_next_word(pos(0, 5), true), None);
    assert_eq!(m.find_next_char(pos(9, 0), 'a', false), None);
}

#[test]
fn test_negation() {
    assert_eq!(negation('('), Some(')'));
    assert_eq!(negation('}'), Some('{'));
    assert_eq!(negation('x'), None);
    assert!(is_word_char('_'));
    assert!(!is_word_char('-'));
}
