use pretty_assertions::assert_eq;

use super::{tokenize, NormalKind, SetKind, Token};

/// Tokenizes `pattern` and returns every token up to and including the
/// terminator as `(normal, set, byte)` triples.
fn tags(pattern: &str) -> Vec<(NormalKind, SetKind, u8)> {
    let mut stream = tokenize(pattern).unwrap();
    let mut tags = Vec::new();
    loop {
        let token = stream.pop();
        tags.push((token.normal, token.set, token.byte));
        if token.normal == NormalKind::Terminator {
            return tags;
        }
    }
}

#[test]
fn literals_and_metacharacters() {
    use NormalKind::*;
    use SetKind::Character as M;

    assert_eq!(
        tags("a(b)|c.$"),
        vec![
            (Character, M, b'a'),
            (LParen, M, b'('),
            (Character, M, b'b'),
            (RParen, M, b')'),
            (Or, M, b'|'),
            (Character, M, b'c'),
            (ReservedSet, M, b'.'),
            (Eol, M, b'$'),
            (Terminator, SetKind::Terminator, 0),
        ]
    );

    assert_eq!(
        tags("x+y*z?"),
        vec![
            (Character, M, b'x'),
            (PostModifier, M, b'+'),
            (Character, M, b'y'),
            (PostModifier, M, b'*'),
            (Character, M, b'z'),
            (PostModifier, M, b'?'),
            (Terminator, SetKind::Terminator, 0),
        ]
    );
}

#[test]
fn caret_depends_on_context() {
    // Right after `[` a `^` is a negation, anywhere else an anchor.
    assert_eq!(
        tags("^[^a^]"),
        vec![
            (NormalKind::Bol, SetKind::Character, b'^'),
            (NormalKind::LSet, SetKind::LSet, b'['),
            (NormalKind::Character, SetKind::Neg, b'^'),
            (NormalKind::Character, SetKind::Character, b'a'),
            (NormalKind::Bol, SetKind::Character, b'^'),
            (NormalKind::RSet, SetKind::RSet, b']'),
            (NormalKind::Terminator, SetKind::Terminator, 0),
        ]
    );
}

#[test]
fn dash_reads_as_range_in_classes() {
    assert_eq!(
        tags("a-b"),
        vec![
            (NormalKind::Character, SetKind::Character, b'a'),
            (NormalKind::Character, SetKind::Range, b'-'),
            (NormalKind::Character, SetKind::Character, b'b'),
            (NormalKind::Terminator, SetKind::Terminator, 0),
        ]
    );
}

#[test]
fn escapes() {
    // Reserved class escapes keep the reserved reading in both contexts.
    assert_eq!(
        tags(r"\d\W"),
        vec![
            (NormalKind::ReservedSet, SetKind::ReservedSet, b'd'),
            (NormalKind::ReservedSet, SetKind::ReservedSet, b'W'),
            (NormalKind::Terminator, SetKind::Terminator, 0),
        ]
    );

    // Boundary escapes only exist in the normal context.
    assert_eq!(
        tags(r"\b\B"),
        vec![
            (NormalKind::Boundary, SetKind::Character, b'b'),
            (NormalKind::Boundary, SetKind::Character, b'B'),
            (NormalKind::Terminator, SetKind::Terminator, 0),
        ]
    );

    // Everything else escapes to a plain literal.
    assert_eq!(
        tags(r"\*\-\\\]"),
        vec![
            (NormalKind::Character, SetKind::Character, b'*'),
            (NormalKind::Character, SetKind::Character, b'-'),
            (NormalKind::Character, SetKind::Character, b'\\'),
            (NormalKind::Character, SetKind::Character, b']'),
            (NormalKind::Terminator, SetKind::Terminator, 0),
        ]
    );
}

#[test]
fn trailing_escape_fails() {
    assert!(tokenize(r"ab\").is_none());
    assert!(tokenize(r"\").is_none());
}

#[test]
fn non_ascii_fails() {
    assert!(tokenize("á").is_none());
    assert!(tokenize("a\u{00e1}b").is_none());
}

#[test]
fn stream_ends_with_one_terminator() {
    let stream = tokenize("a|b").unwrap();
    assert_eq!(stream.len(), 3);

    let terminators = tags("a|b")
        .iter()
        .filter(|(normal, _, _)| *normal == NormalKind::Terminator)
        .count();
    assert_eq!(terminators, 1);

    // The empty pattern is just the terminator.
    let stream = tokenize("").unwrap();
    assert!(stream.is_empty());
    assert_eq!(stream.len(), 0);
}

#[test]
fn cursor_operations() {
    let mut stream = tokenize("ab").unwrap();

    assert_eq!(stream.peek().byte, b'a');
    assert_eq!(stream.lookahead().byte, b'b');
    assert_eq!(stream.len(), 2);

    assert!(!stream.expect(&[NormalKind::Or]));
    assert!(stream.expect(&[NormalKind::Or, NormalKind::Character]));
    assert_eq!(stream.peek().byte, b'b');

    // `reject` consumes on mismatch.
    assert!(stream.reject(&[NormalKind::Or]));
    assert!(stream.is_empty());
    assert!(!stream.reject(&[NormalKind::Or]));

    // Popping at the terminator stays put.
    assert_eq!(stream.pop(), Token::TERMINATOR);
    assert_eq!(stream.pop(), Token::TERMINATOR);
    assert_eq!(stream.lookahead(), Token::TERMINATOR);

    stream.reset();
    assert_eq!(stream.peek().byte, b'a');
    assert_eq!(stream.len(), 2);
}
