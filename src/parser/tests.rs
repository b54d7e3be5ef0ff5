use pretty_assertions::assert_eq;

use super::validate;
use crate::tokenizer::tokenize;

fn valid(pattern: &str) -> bool {
    let mut stream = tokenize(pattern).unwrap();
    validate(&mut stream)
}

#[test]
fn accepts_well_formed_patterns() {
    let patterns = [
        "a",
        "ab",
        ".",
        "a-b",
        "a|b",
        "a|b|c",
        "x?y",
        "a*",
        "ab+c",
        "(ab)*c",
        "a(b|c)*d",
        "(a)(b)",
        "((a|b)c)+",
        "[abc]",
        "[a-c]+",
        "[^0-9]",
        "[a-zA-Z_]",
        "[a\\]b]",
        "[x\\-y]",
        r"[\d\s]",
        "^ab$",
        "^$",
        "^a|b$",
        "(^a)(b$)",
        "a$b",
        "a$$",
        r"\d+",
        r"\w\W",
        r"a\*b",
        r"\\",
        r"\.",
    ];
    for pattern in patterns {
        assert!(valid(pattern), "{pattern} should validate");
    }
}

#[test]
fn rejects_malformed_patterns() {
    let patterns = [
        "",
        "*",
        "*a",
        "+",
        "?a",
        "a**",
        "a*?",
        "(",
        ")",
        "(ab",
        "ab)",
        "(a|)",
        "a|",
        "|a",
        "a||b",
        "[",
        "[]",
        "[^]",
        "[abc",
        "[a-]",
        "[-a]",
        "[a-\\d]",
        "[[a]",
        "^",
        "a^",
        "^*a",
        "$a",
        "$$",
        r"a\b",
        r"\Bx",
        r"[a]\b",
    ];
    for pattern in patterns {
        assert!(!valid(pattern), "{pattern} should not validate");
    }
}

#[test]
fn validation_is_idempotent_and_rewinds() {
    let mut stream = tokenize("a(b|c)*").unwrap();

    assert!(validate(&mut stream));
    assert_eq!(stream.len(), 7);
    assert!(validate(&mut stream));

    let mut stream = tokenize("a(b|c").unwrap();
    assert!(!validate(&mut stream));
    assert_eq!(stream.len(), 5);
    assert!(!validate(&mut stream));
}
