/*! End-to-end scenario tests over the public API. */

use pretty_assertions::assert_eq;

use crate::{Error, Matcher};

fn spans(pattern: &str, text: &str) -> Vec<(usize, usize)> {
    Matcher::new(pattern)
        .unwrap()
        .scan(text)
        .into_iter()
        .map(|m| (m.range.start, m.range.end))
        .collect()
}

#[test]
fn plain_literals() {
    assert_eq!(spans("ab", "xabyab"), vec![(1, 3), (4, 6)]);
    assert_eq!(spans("ab", "ab"), vec![(0, 2)]);
    assert!(spans("ab", "xyz").is_empty());
}

#[test]
fn star_reports_every_accepting_prefix() {
    // Each live attempt emits at every accepting step, so the match at
    // offset 0 is joined by the shorter suffix matches that were anchored
    // later and accepted at the same step.
    assert_eq!(
        spans("a*b", "aaabxb"),
        vec![(0, 4), (1, 4), (2, 4), (3, 4), (5, 6)]
    );
}

#[test]
fn alternation() {
    assert_eq!(spans("a|b", "cab"), vec![(1, 2), (2, 3)]);
}

#[test]
fn classes() {
    assert_eq!(
        spans("[a-c]+", "zabcz"),
        vec![(1, 2), (1, 3), (2, 3), (1, 4), (2, 4), (3, 4)]
    );
    assert_eq!(spans("[^0-9]", "1a2b"), vec![(1, 2), (3, 4)]);
}

#[test]
fn anchors() {
    assert_eq!(spans("^ab$", "ab"), vec![(0, 2)]);
    assert_eq!(spans("^ab$", "xab\nab"), vec![(4, 6)]);
    assert!(spans("^ab$", "aab").is_empty());
}

#[test]
fn empty_line_anchor() {
    // `^$` matches each empty line once; the span covers the newline
    // byte the `$` consumed.
    assert_eq!(spans("^$", "\n\n"), vec![(0, 1), (1, 2)]);
    assert_eq!(spans("^$", "a\n\nb"), vec![(2, 3)]);
    assert!(spans("^$", "ab").is_empty());
    assert!(spans("^$", "").is_empty());
}

#[test]
fn eol_spans_include_the_consumed_newline() {
    assert_eq!(spans("a$", "a\nxa"), vec![(0, 2), (3, 4)]);
}

#[test]
fn quantified_groups() {
    assert_eq!(spans("(ab)+", "xababy"), vec![(1, 3), (1, 5), (3, 5)]);
}

#[test]
fn optional_atoms() {
    assert_eq!(spans("a?b", "ab b"), vec![(0, 2), (1, 2), (3, 4)]);
}

#[test]
fn reserved_classes() {
    assert_eq!(spans(r"\d+", "ab12cd"), vec![(2, 3), (2, 4), (3, 4)]);
    assert_eq!(spans(r"a\sb", "a b"), vec![(0, 3)]);
    assert_eq!(
        spans(r"\w+", "a_1!"),
        vec![(0, 1), (0, 2), (1, 2), (0, 3), (1, 3), (2, 3)]
    );
}

#[test]
fn dot_excludes_space() {
    assert_eq!(spans(".", "a b"), vec![(0, 1), (2, 3)]);
}

#[test]
fn escaped_metacharacters_match_literally() {
    assert_eq!(spans(r"a\*b", "xa*b"), vec![(1, 4)]);
    assert_eq!(spans(r"\.", "a.b"), vec![(1, 2)]);
}

#[test]
fn multiline_texts_rebase_offsets() {
    assert_eq!(spans("ab", "ab\nab"), vec![(0, 2), (3, 5)]);
}

#[test]
fn reversed_matching() {
    let matcher = Matcher::reversed("ab").unwrap();
    let found: Vec<_> = matcher
        .scan("xba")
        .into_iter()
        .map(|m| (m.range.start, m.range.end))
        .collect();
    assert_eq!(found, vec![(1, 3)]);
}

#[test]
fn construction_errors() {
    assert_eq!(Matcher::new(r"ab\").unwrap_err(), Error::TrailingEscape);
    assert_eq!(Matcher::new("a(").unwrap_err(), Error::MalformedPattern);
    assert_eq!(Matcher::new("").unwrap_err(), Error::MalformedPattern);
    assert_eq!(Matcher::new("[a-]").unwrap_err(), Error::MalformedPattern);
    assert_eq!(Matcher::new(r"a\b").unwrap_err(), Error::MalformedPattern);
}
