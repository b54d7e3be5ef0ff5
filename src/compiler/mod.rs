/*! Compiles validated token streams into transition tables.

The compiler is a recursive descent over the token cursor that drives a
[`TableBuilder`]: each alternative of an alternation is built in its own
builder and unioned in with `|=`, each segment of a sequence is built
locally, quantified, anchored, and then sequenced in with `+=`.

Bare literal bytes take a shortcut: they are appended to the current
segment with [`TableBuilder::add_char`], which grows transitions out of
the accepting states themselves. Quantified atoms, groups, and classes are
built standalone and grafted in with `+=` so the quantifier binds to that
atom alone.
*/

use log::trace;

use crate::nfa::builder::TableBuilder;
use crate::nfa::TransitionTable;
use crate::tokenizer::{NormalKind, SetKind, Token, TokenStream};


/// Compiles a validated token stream into its transition table.
///
/// With `reverse` set, the table matches the mirror image of the pattern,
/// for right-to-left searching.
///
/// The stream must have passed [`crate::validate`]; the compiler guards
/// that assumption with debug assertions only.
pub fn compile(stream: &mut TokenStream, reverse: bool) -> TransitionTable {
    let mut builder = TableBuilder::new();
    compile_alternation(&mut builder, stream);
    debug_assert!(stream.is_empty());

    if reverse {
        builder.reverse();
    }
    builder.shrink();

    trace!("compiled table with {} states", builder.table().state_count());
    builder.into_table()
}

fn compile_alternation(builder: &mut TableBuilder, stream: &mut TokenStream) {
    compile_sequence(builder, stream);
    while stream.expect(&[NormalKind::Or]) {
        let mut alternative = TableBuilder::new();
        compile_sequence(&mut alternative, stream);
        *builder |= alternative;
    }
}

fn compile_sequence(builder: &mut TableBuilder, stream: &mut TokenStream) {
    loop {
        let anchored = stream.expect(&[NormalKind::Bol]);
        let mut segment = TableBuilder::new();

        match stream.peek().normal {
            NormalKind::LParen => {
                stream.pop();
                let mut group = TableBuilder::new();
                compile_alternation(&mut group, stream);
                stream.expect(&[NormalKind::RParen]);
                apply_modifier(&mut group, stream);
                segment += group;
            }
            NormalKind::LSet => {
                stream.pop();
                let mut class = TableBuilder::new();
                compile_class(&mut class, stream);
                apply_modifier(&mut class, stream);
                segment += class;
            }
            NormalKind::Character | NormalKind::ReservedSet => {
                compile_literal_run(&mut segment, stream);
            }
            NormalKind::Eol => {
                // A bare `$`, as in `^$`.
                stream.pop();
                segment.eol();
            }
            _ => {
                debug_assert!(!anchored);
                return;
            }
        }

        if anchored {
            segment.bol();
        }
        if stream.expect(&[NormalKind::Eol]) {
            segment.eol();
        }
        *builder += segment;
    }
}

/// Compiles a run of literal bytes, `.`, and reserved escapes into
/// `segment`.
fn compile_literal_run(segment: &mut TableBuilder, stream: &mut TokenStream) {
    loop {
        let token = stream.peek();
        match token.normal {
            NormalKind::Character | NormalKind::ReservedSet => {}
            _ => return,
        }
        stream.pop();

        if stream.peek().normal == NormalKind::PostModifier {
            let mut atom = TableBuilder::new();
            emit_atom(&mut atom, token);
            apply_modifier(&mut atom, stream);
            *segment += atom;
        } else if token.normal == NormalKind::Character {
            segment.add_char(token.byte);
        } else {
            emit_atom(segment, token);
        }

        if stream.expect(&[NormalKind::Eol]) {
            segment.eol();
        }
    }
}

/// Emits one unquantified atom into `builder`.
fn emit_atom(builder: &mut TableBuilder, token: Token) {
    match token.normal {
        NormalKind::Character => builder.add_char(token.byte),
        NormalKind::ReservedSet if token.byte == b'.' => builder.add_dot(),
        NormalKind::ReservedSet => {
            builder.add_char_set(&shorthand_set(token.byte))
        }
        _ => unreachable!("not an atom: {token:?}"),
    }
}

/// Applies the quantifier under the cursor, if any, to `builder`.
fn apply_modifier(builder: &mut TableBuilder, stream: &mut TokenStream) {
    if stream.peek().normal != NormalKind::PostModifier {
        return;
    }
    match stream.pop().byte {
        b'*' => builder.star(),
        b'+' => builder.plus(),
        b'?' => builder.question(),
        byte => unreachable!("not a quantifier: {byte}"),
    }
}

/// Compiles the members of a class; the cursor sits right after the
/// opening bracket and is consumed through the closing one.
fn compile_class(builder: &mut TableBuilder, stream: &mut TokenStream) {
    let negated = stream.expect_set(&[SetKind::Neg]);

    let mut members: Vec<u8> = Vec::new();
    loop {
        if stream.expect_set(&[SetKind::RSet]) {
            break;
        }
        let token = stream.pop();
        match token.set {
            SetKind::Character => {
                if stream.peek().set == SetKind::Range {
                    stream.pop();
                    let end = stream.pop();
                    debug_assert_eq!(end.set, SetKind::Character);
                    // An inverted range like `z-a` contributes nothing.
                    members.extend(token.byte..=end.byte);
                } else {
                    members.push(token.byte);
                }
            }
            SetKind::ReservedSet => members.extend(shorthand_set(token.byte)),
            _ => unreachable!("not a class member: {token:?}"),
        }
    }

    if negated {
        builder.add_neg_char_set(&members);
    } else {
        builder.add_char_set(&members);
    }
}

/// The byte set a reserved escape stands for. `\s` is space and tab; the
/// uppercase forms complement their counterparts within the printable
/// range (`\S` also drops the tab).
fn shorthand_set(escape: u8) -> Vec<u8> {
    match escape {
        b's' => vec![b' ', b'\t'],
        b'S' => (33u8..127).collect(),
        b'd' => (b'0'..=b'9').collect(),
        b'D' => (32u8..127).filter(|byte| !byte.is_ascii_digit()).collect(),
        b'w' => word_set(),
        b'W' => {
            let word = word_set();
            (32u8..127).filter(|byte| !word.contains(byte)).collect()
        }
        byte => unreachable!("not a reserved escape: {}", byte as char),
    }
}

fn word_set() -> Vec<u8> {
    (b'0'..=b'9')
        .chain([b'_'])
        .chain(b'a'..=b'z')
        .chain(b'A'..=b'Z')
        .collect()
}
