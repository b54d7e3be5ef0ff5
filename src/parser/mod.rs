/*! Validates tokenized patterns.

Validation is a pure predicate over the token stream: it accepts exactly
the patterns the compiler knows how to build tables for, and leaves
diagnosing *where* a pattern went wrong out of scope. The compiler assumes
a validated stream and only guards its expectations with debug assertions,
so every pattern must pass through [`validate`] before being compiled.
*/

use crate::tokenizer::{NormalKind, SetKind, TokenStream};

#[cfg(test)]
mod tests;

/// Checks that `stream` forms a well-formed pattern.
///
/// The accepted grammar, with alternation binding loosest:
///
/// ```text
/// alt       := seq ( '|' seq )*
/// seq       := ( '^'? atom mod? '$'? )+  |  '^'? '$'
/// atom      := group | class | char
/// group     := '(' alt ')'
/// class     := '[' '^'? class_elt+ ']'
/// class_elt := char '-' char | char | reserved
/// mod       := '+' | '*' | '?'
/// ```
///
/// where `char` is a literal token and `reserved` is `.` or one of the
/// reserved escapes. A `$` with no atom in front of it is only accepted
/// where the enclosing expression ends, as in `^$`. Word-boundary escapes
/// (`\b`, `\B`) are recognized by the tokenizer but rejected here: the
/// compiled machine has no zero-width transitions to implement them with.
///
/// The cursor is rewound before returning, so validation is idempotent.
pub fn validate(stream: &mut TokenStream) -> bool {
    let valid = alternation(stream) && stream.is_empty();
    stream.reset();
    valid
}

fn alternation(stream: &mut TokenStream) -> bool {
    if !sequence(stream) {
        return false;
    }
    while stream.expect(&[NormalKind::Or]) {
        if !sequence(stream) {
            return false;
        }
    }
    true
}

fn sequence(stream: &mut TokenStream) -> bool {
    let mut atoms = 0;
    loop {
        let anchored = stream.expect(&[NormalKind::Bol]);

        if stream.expect(&[NormalKind::LParen]) {
            if !alternation(stream) || !stream.expect(&[NormalKind::RParen]) {
                return false;
            }
        } else if stream.expect(&[NormalKind::LSet]) {
            if !class_members(stream) {
                return false;
            }
        } else if stream.expect(&[NormalKind::Character, NormalKind::ReservedSet]) {
            // a literal byte, `.`, or a reserved escape such as `\d`
        } else if stream.peek().normal == NormalKind::Eol {
            // A bare `$` closes the whole sequence.
            stream.pop();
            return matches!(
                stream.peek().normal,
                NormalKind::Or | NormalKind::RParen | NormalKind::Terminator
            );
        } else {
            // `^` must be followed by something it can anchor.
            return !anchored && atoms > 0;
        }

        atoms += 1;
        stream.expect(&[NormalKind::PostModifier]);
        stream.expect(&[NormalKind::Eol]);
    }
}

/// Validates the members of a class; the cursor sits right after the
/// opening bracket and, on success, ends up right after the closing one.
fn class_members(stream: &mut TokenStream) -> bool {
    stream.expect_set(&[SetKind::Neg]);

    let mut members = 0;
    loop {
        if stream.expect_set(&[SetKind::ReservedSet]) {
            members += 1;
        } else if stream.peek().set == SetKind::Character {
            stream.pop();
            if stream.peek().set == SetKind::Range {
                // Both ends of a range must be literal characters.
                stream.pop();
                if !stream.expect_set(&[SetKind::Character]) {
                    return false;
                }
            }
            members += 1;
        } else {
            break;
        }
    }

    members > 0 && stream.expect_set(&[SetKind::RSet])
}
